// SPDX-License-Identifier: MPL-2.0
//! The process-wide notification context.
//!
//! Built once at startup and handed to whatever needs toasts or modals.
//! Clones share the same facade presets, toast engine and modal state.

use super::facade::NotificationFacade;
use super::modal::ModalController;
use crate::application::port::{AppContainer, ElementFactory, Toaster};
use crate::config::Config;
use std::rc::Rc;

pub struct NotifyContext<T, C, F: ElementFactory> {
    notifications: NotificationFacade<T>,
    modals: ModalController<C, F>,
}

impl<T, C, F> NotifyContext<T, C, F>
where
    T: Toaster + 'static,
    C: AppContainer<Element = F::Element> + 'static,
    F: ElementFactory + 'static,
{
    /// Wires the collaborators together using the presets from `config`.
    pub fn new(config: &Config, toaster: Rc<T>, container: C, factory: F) -> Self {
        Self {
            notifications: NotificationFacade::with_presets(toaster, config.presets()),
            modals: ModalController::new(container, factory),
        }
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationFacade<T> {
        &self.notifications
    }

    #[must_use]
    pub fn modals(&self) -> &ModalController<C, F> {
        &self.modals
    }
}

impl<T, C, F: ElementFactory> Clone for NotifyContext<T, C, F> {
    fn clone(&self) -> Self {
        Self {
            notifications: self.notifications.clone(),
            modals: self.modals.clone(),
        }
    }
}
