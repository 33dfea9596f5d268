// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `Manager` handles queuing, display timing, and dismissal of toasts.
//! It limits the number of visible toasts, runs auto-dismiss timers and
//! keeps hiding toasts on screen until their hide transition is over.

use super::notification::{Notification, ToastId};
use crate::config::defaults::DEFAULT_MAX_VISIBLE;
use std::collections::VecDeque;
use std::time::Instant;

/// Messages for toast state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// An embedded control (by index) was pressed.
    ControlPressed(ToastId, usize),
    /// The toast body was clicked.
    Tapped(ToastId),
    /// The close button was pressed.
    CloseRequested(ToastId),
    /// The pointer entered or left the toast.
    Hovered(ToastId, bool),
    /// Tick for checking auto-dismiss and hide timers.
    Tick,
}

/// Manages the toast queue and visible toasts.
#[derive(Debug)]
pub struct Manager {
    /// Currently visible toasts, in display order.
    visible: VecDeque<Notification>,
    /// Queued toasts waiting to be displayed.
    queue: VecDeque<Notification>,
    max_visible: usize,
}

impl Default for Manager {
    fn default() -> Self {
        Self::with_max_visible(DEFAULT_MAX_VISIBLE)
    }
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager showing at most `max_visible` toasts (at least one).
    #[must_use]
    pub fn with_max_visible(max_visible: usize) -> Self {
        Self {
            visible: VecDeque::new(),
            queue: VecDeque::new(),
            max_visible: max_visible.max(1),
        }
    }

    #[must_use]
    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Pushes a new toast.
    ///
    /// If fewer than `max_visible` toasts are showing, it's displayed
    /// immediately, on top or at the bottom of the stack depending on its
    /// `newest_on_top` option. Otherwise it waits in the queue.
    pub fn push(&mut self, notification: Notification) {
        if self.visible.len() >= self.max_visible {
            self.queue.push_back(notification);
            return;
        }
        if notification.options().newest_on_top {
            self.visible.push_front(notification);
        } else {
            self.visible.push_back(notification);
        }
    }

    /// Finds a live toast with the same message body.
    #[must_use]
    pub fn find_duplicate(&self, message: &str) -> Option<&Notification> {
        self.visible
            .iter()
            .chain(self.queue.iter())
            .find(|n| !n.is_hiding() && n.message() == message)
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Notification> {
        self.visible
            .iter()
            .chain(self.queue.iter())
            .find(|n| n.id() == id)
    }

    fn get_mut(&mut self, id: ToastId) -> Option<&mut Notification> {
        self.visible
            .iter_mut()
            .chain(self.queue.iter_mut())
            .find(|n| n.id() == id)
    }

    /// Removes a toast immediately.
    ///
    /// Returns `true` if the toast was found and removed.
    pub fn dismiss(&mut self, id: ToastId, now: Instant) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            if let Some(removed) = self.visible.remove(pos) {
                release(&removed);
            }
            self.promote_from_queue(now);
            return true;
        }

        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            if let Some(removed) = self.queue.remove(pos) {
                release(&removed);
            }
            return true;
        }

        false
    }

    /// Starts hiding a toast; it is removed once its hide duration elapses.
    ///
    /// Queued toasts and toasts without a hide duration go away at once.
    pub fn begin_hide(&mut self, id: ToastId, now: Instant) -> bool {
        let queued = self.queue.iter().any(|n| n.id() == id);
        let animated = match self.get(id) {
            Some(n) => {
                let options = n.options();
                !queued && options.hide_method.is_animated() && !options.hide_duration().is_zero()
            }
            None => return false,
        };
        if !animated {
            return self.dismiss(id, now);
        }
        if let Some(n) = self.get_mut(id) {
            n.begin_hide(now);
        }
        true
    }

    /// Updates the hover state of a toast.
    pub fn set_hovered(&mut self, id: ToastId, hovered: bool, now: Instant) {
        if let Some(n) = self.get_mut(id) {
            n.set_hovered(hovered, now);
        }
    }

    /// Processes a tick: expired toasts start hiding, hidden ones are removed.
    pub fn tick(&mut self, now: Instant) {
        let expired: Vec<ToastId> = self
            .visible
            .iter()
            .filter(|n| n.should_auto_dismiss_at(now))
            .map(Notification::id)
            .collect();
        for id in expired {
            self.begin_hide(id, now);
        }

        let finished: Vec<ToastId> = self
            .visible
            .iter()
            .filter(|n| n.hide_finished_at(now))
            .map(Notification::id)
            .collect();
        for id in finished {
            self.dismiss(id, now);
        }
    }

    /// Returns the currently visible toasts.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether there are any toasts (visible or queued).
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    /// Clears all toasts (visible and queued).
    pub fn clear(&mut self) {
        for n in self.visible.drain(..).chain(self.queue.drain(..)) {
            release(&n);
        }
    }

    fn promote_from_queue(&mut self, now: Instant) {
        while self.visible.len() < self.max_visible {
            let Some(mut notification) = self.queue.pop_front() else {
                break;
            };
            notification.mark_shown(now);
            if notification.options().newest_on_top {
                self.visible.push_front(notification);
            } else {
                self.visible.push_back(notification);
            }
        }
    }
}

// Listeners may hold handles to the toast itself; dropping them breaks the cycle.
fn release(notification: &Notification) {
    for control in notification.controls() {
        control.release();
    }
}
