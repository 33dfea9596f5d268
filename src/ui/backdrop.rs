// SPDX-License-Identifier: MPL-2.0
//! Modal backdrop.
//!
//! `Backdrop` is the application container the modal controller mounts
//! dialogs into. It only records what to show; [`Backdrop::view`] layers
//! the dialog over the application when the backdrop is visible.

use crate::application::port::AppContainer;
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing};
use iced::widget::{center, container, opaque, Container, Stack};
use iced::{Color, Element, Length, Theme};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

struct State<E> {
    contents: Option<E>,
    visible: bool,
}

/// Shared modal backdrop holding at most one dialog element.
pub struct Backdrop<E> {
    state: Rc<RefCell<State<E>>>,
}

impl<E> Clone for Backdrop<E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<E> Default for Backdrop<E> {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                contents: None,
                visible: false,
            })),
        }
    }
}

impl<E> fmt::Debug for Backdrop<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Backdrop")
            .field("visible", &state.visible)
            .field("has_contents", &state.contents.is_some())
            .finish()
    }
}

impl<E: Clone> Backdrop<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    /// The mounted dialog element, if any.
    #[must_use]
    pub fn contents(&self) -> Option<E> {
        self.state.borrow().contents.clone()
    }

    /// Layers the mounted dialog over `base` while the backdrop is shown.
    pub fn view<'a, Message: 'a>(
        &self,
        base: impl Into<Element<'a, Message>>,
        render: impl FnOnce(&E) -> Element<'a, Message>,
    ) -> Element<'a, Message> {
        let contents = match self.contents() {
            Some(contents) if self.is_visible() => contents,
            _ => return base.into(),
        };

        let dialog = Container::new(render(&contents))
            .max_width(sizing::DIALOG_WIDTH)
            .width(Length::Shrink)
            .padding(spacing::LG)
            .style(dialog_style);

        Stack::new()
            .push(base)
            .push(opaque(center(dialog).style(scrim_style)))
            .into()
    }
}

impl<E> AppContainer for Backdrop<E> {
    type Element = E;

    fn set_modal_backdrop_contents(&self, element: Option<E>) {
        self.state.borrow_mut().contents = element;
    }

    fn show_modal_backdrop(&self) {
        self.state.borrow_mut().visible = true;
    }

    fn hide_modal_backdrop(&self) {
        self.state.borrow_mut().visible = false;
    }
}

fn scrim_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

fn dialog_style(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(
            theme.extended_palette().background.base.color,
        )),
        border: iced::Border {
            color: palette::PRIMARY_500,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}
