// SPDX-License-Identifier: MPL-2.0
//! The toast engine behind [`NotificationFacade`](crate::notify::NotificationFacade).
//!
//! `ToastEngine` wraps a [`Manager`] in a `RefCell` so that the facade can
//! render and clear toasts through a shared `Rc` while the application
//! feeds it UI messages from its `update` function.

use super::manager::{Manager, Message};
use super::notification::{Notification, ToastRef};
use super::toast::Toast;
use crate::application::port::{ClearOptions, Severity, Toaster};
use crate::config::defaults::TICK_INTERVAL_MS;
use crate::config::StackConfig;
use crate::notify::ToasterOptions;
use iced::{time, Element, Subscription};
use std::cell::RefCell;
use std::time::{Duration, Instant};

/// Iced-backed implementation of [`Toaster`].
#[derive(Debug, Default)]
pub struct ToastEngine {
    manager: RefCell<Manager>,
}

impl ToastEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_visible(max_visible: usize) -> Self {
        Self {
            manager: RefCell::new(Manager::with_max_visible(max_visible)),
        }
    }

    #[must_use]
    pub fn from_config(stack: &StackConfig) -> Self {
        Self::with_max_visible(stack.max_visible())
    }

    /// Handles a toast message at the current time.
    pub fn update(&self, message: Message) {
        self.update_at(message, Instant::now());
    }

    /// Handles a toast message at a given time.
    ///
    /// Listeners and click handlers run with the manager unborrowed, so they
    /// may render or clear toasts themselves.
    pub fn update_at(&self, message: Message, now: Instant) {
        match message {
            Message::ControlPressed(id, index) => {
                let control = self
                    .manager
                    .borrow()
                    .get(id)
                    .filter(|n| !n.is_hiding())
                    .and_then(|n| n.controls().get(index).cloned());
                if let Some(control) = control {
                    control.click();
                }
            }
            Message::Tapped(id) => {
                let on_click = {
                    let mut manager = self.manager.borrow_mut();
                    let Some(n) = manager.get(id).filter(|n| !n.is_hiding()) else {
                        return;
                    };
                    let on_click = n.options().on_click.clone();
                    if n.options().tap_to_dismiss {
                        manager.begin_hide(id, now);
                    }
                    on_click
                };
                if let Some(handler) = on_click {
                    handler.call();
                }
            }
            Message::CloseRequested(id) => {
                self.manager.borrow_mut().begin_hide(id, now);
            }
            Message::Hovered(id, hovered) => {
                self.manager.borrow_mut().set_hovered(id, hovered, now);
            }
            Message::Tick => {
                self.manager.borrow_mut().tick(now);
            }
        }
    }

    /// Ticks while toasts are on screen.
    #[must_use]
    pub fn subscription(&self) -> Subscription<Message> {
        if self.manager.borrow().has_notifications() {
            time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    /// Renders the toast overlay.
    #[must_use]
    pub fn view(&self) -> Element<'static, Message> {
        Toast::view_overlay(&self.manager.borrow(), Instant::now())
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.manager.borrow().visible_count()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.manager.borrow().queued_count()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        self.manager.borrow().has_notifications()
    }

    /// Whether the toast is still on screen or queued.
    #[must_use]
    pub fn contains(&self, handle: &ToastRef) -> bool {
        self.manager.borrow().get(handle.id()).is_some()
    }

    /// Whether the toast is running its hide transition.
    #[must_use]
    pub fn is_hiding(&self, handle: &ToastRef) -> bool {
        self.manager
            .borrow()
            .get(handle.id())
            .is_some_and(Notification::is_hiding)
    }

    /// Handles of the visible toasts, in display order.
    #[must_use]
    pub fn visible_handles(&self) -> Vec<ToastRef> {
        self.manager
            .borrow()
            .visible()
            .map(Notification::handle)
            .collect()
    }

    /// Presses the first control matching `selector`, as a click would.
    ///
    /// Returns `false` if the toast has no such control.
    pub fn press(&self, handle: &ToastRef, selector: &str) -> bool {
        let index = self
            .manager
            .borrow()
            .get(handle.id())
            .and_then(|n| n.controls().iter().position(|c| c.matches(selector)));
        match index {
            Some(index) => {
                self.update(Message::ControlPressed(handle.id(), index));
                true
            }
            None => false,
        }
    }

    /// Removes every toast at once.
    pub fn clear_all(&self) {
        self.manager.borrow_mut().clear();
    }
}

impl Toaster for ToastEngine {
    type Handle = ToastRef;

    fn render(
        &self,
        severity: Severity,
        message: &str,
        title: Option<&str>,
        options: &ToasterOptions,
    ) -> ToastRef {
        let mut manager = self.manager.borrow_mut();
        if options.prevent_duplicates {
            if let Some(existing) = manager.find_duplicate(message) {
                if options.debug {
                    tracing::debug!(%severity, "duplicate toast suppressed");
                }
                return existing.handle();
            }
        }

        let notification = Notification::new(severity, message, title, options.clone());
        if options.debug {
            tracing::debug!(
                %severity,
                position = options.position_class.as_class(),
                time_out_ms = options.time_out_ms,
                controls = notification.controls().len(),
                "toast rendered"
            );
        }
        let handle = notification.handle();
        manager.push(notification);
        handle
    }

    fn clear(&self, handle: &ToastRef, options: ClearOptions) {
        let now = Instant::now();
        let mut manager = self.manager.borrow_mut();
        if options.force {
            manager.dismiss(handle.id(), now);
        } else {
            manager.begin_hide(handle.id(), now);
        }
    }
}
