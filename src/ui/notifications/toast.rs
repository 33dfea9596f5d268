// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual notifications.
//!
//! Toasts are small cards with a severity-colored border, an optional
//! title, the parsed message body with its inline controls, and optional
//! close button and progress bar.

use super::manager::{Manager, Message};
use super::markup::Segment;
use super::notification::Notification;
use crate::notify::PositionClass;
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use crate::ui::severity_color;
use iced::widget::{button, container, mouse_area, progress_bar, text, Column, Container, Row, Stack, Text};
use iced::{alignment, Color, Element, Length, Theme};
use std::time::Instant;

const POSITIONS: [PositionClass; 8] = [
    PositionClass::TopRight,
    PositionClass::TopLeft,
    PositionClass::TopCenter,
    PositionClass::TopFullWidth,
    PositionClass::BottomRight,
    PositionClass::BottomLeft,
    PositionClass::BottomCenter,
    PositionClass::BottomFullWidth,
];

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Renders a single toast.
    pub fn view(notification: &Notification, now: Instant) -> Element<'static, Message> {
        let id = notification.id();
        let options = notification.options();
        let accent_color = severity_color(notification.severity());
        let alpha = notification.opacity_at(now);
        let hiding = notification.is_hiding();

        let mut body = Column::new().spacing(spacing::XXS);
        if let Some(title) = notification.title() {
            body = body.push(Text::new(title.to_string()).size(typography::TITLE_SM));
        }

        let mut line = Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center);
        for segment in notification.body().segments() {
            match segment {
                Segment::Text(content) => {
                    line = line.push(Text::new(content.clone()).size(typography::BODY));
                }
                Segment::LineBreak => {
                    body = body.push(line);
                    line = Row::new()
                        .spacing(spacing::XS)
                        .align_y(alignment::Vertical::Center);
                }
                Segment::Control(index) => {
                    let Some(control) = notification.controls().get(*index) else {
                        continue;
                    };
                    let label = Text::new(control.label().to_string()).size(typography::BODY_SM);
                    line = line.push(
                        button(label)
                            .on_press(Message::ControlPressed(id, *index))
                            .padding([spacing::XXS, spacing::SM])
                            .style(move |theme: &Theme, status| {
                                control_button_style(theme, status, accent_color)
                            }),
                    );
                }
            }
        }
        body = body.push(line);

        // Layout: [body] [close]
        let mut header = Row::new()
            .spacing(spacing::SM)
            .push(Container::new(body).width(Length::Fill));
        if options.close_button {
            header = header.push(
                button(text("×").size(typography::BODY))
                    .on_press(Message::CloseRequested(id))
                    .padding(spacing::XXS)
                    .style(dismiss_button_style),
            );
        }

        let mut content = Column::new().spacing(spacing::XS).push(header);
        if options.progress_bar {
            if let Some(remaining) = notification.remaining_at(now) {
                content = content.push(progress_bar(0.0..=1.0, remaining));
            }
        }

        let width = if options.position_class.is_full_width() {
            Length::Fill
        } else {
            Length::Fixed(sizing::TOAST_WIDTH)
        };

        let card = Container::new(content)
            .width(width)
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent_color, alpha, hiding));

        mouse_area(card)
            .on_press(Message::Tapped(id))
            .on_enter(Message::Hovered(id, true))
            .on_exit(Message::Hovered(id, false))
            .into()
    }

    /// Renders the toast overlay with all visible toasts.
    ///
    /// Each position class gets its own stacked column.
    pub fn view_overlay(manager: &Manager, now: Instant) -> Element<'static, Message> {
        let mut layers: Vec<Element<'static, Message>> = Vec::new();

        for position in POSITIONS {
            let toasts: Vec<Element<'static, Message>> = manager
                .visible()
                .filter(|n| n.options().position_class == position)
                .map(|n| Self::view(n, now))
                .collect();
            if toasts.is_empty() {
                continue;
            }

            let (align_x, align_y) = anchor(position);
            let column = Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(align_x);
            layers.push(
                Container::new(column)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(align_x)
                    .align_y(align_y)
                    .padding(spacing::MD)
                    .into(),
            );
        }

        if layers.is_empty() {
            // Return an empty container that takes no space
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            Stack::with_children(layers)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
    }
}

fn anchor(position: PositionClass) -> (alignment::Horizontal, alignment::Vertical) {
    let vertical = if position.is_top() {
        alignment::Vertical::Top
    } else {
        alignment::Vertical::Bottom
    };
    let horizontal = match position {
        PositionClass::TopLeft | PositionClass::BottomLeft => alignment::Horizontal::Left,
        PositionClass::TopRight | PositionClass::BottomRight => alignment::Horizontal::Right,
        _ => alignment::Horizontal::Center,
    };
    (horizontal, vertical)
}

/// Style function for the toast container, faded to `alpha`.
fn toast_container_style(
    theme: &Theme,
    accent_color: Color,
    alpha: f32,
    hiding: bool,
) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;
    let text_color = theme.palette().text;

    container::Style {
        background: Some(iced::Background::Color(Color { a: alpha, ..bg_color })),
        border: iced::Border {
            color: Color { a: alpha, ..accent_color },
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: if hiding { shadow::NONE } else { shadow::MD },
        text_color: Some(Color { a: alpha, ..text_color }),
        ..Default::default()
    }
}

/// Style function for inline controls such as Yes/No.
fn control_button_style(theme: &Theme, status: button::Status, accent_color: Color) -> button::Style {
    let base = theme.extended_palette().background.base;
    let background = match status {
        button::Status::Active => Some(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..accent_color
        }),
        button::Status::Hovered | button::Status::Pressed => Some(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..accent_color
        }),
        button::Status::Disabled => None,
    };

    button::Style {
        background: background.map(iced::Background::Color),
        text_color: base.text,
        border: iced::Border {
            color: accent_color,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Style function for the close button.
fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let background = match status {
        button::Status::Hovered => Some(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        }),
        button::Status::Pressed => Some(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::GRAY_400
        }),
        button::Status::Active | button::Status::Disabled => None,
    };

    button::Style {
        background: background.map(iced::Background::Color),
        text_color: base.text,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
