// SPDX-License-Identifier: MPL-2.0
//! Show and confirm operations per severity.
//!
//! The facade owns the two presets and hands the right one to the engine
//! on every call, merged with the caller's overrides. Nothing is stored
//! on the engine between calls.

use super::confirm::{self, Confirmation};
use super::options::{Presets, ToasterOptions, ToasterOverrides};
use crate::application::port::{Severity, Toaster};
use std::rc::Rc;

/// Entry point for toast notifications.
#[derive(Debug)]
pub struct NotificationFacade<T> {
    toaster: Rc<T>,
    presets: Presets,
}

impl<T> Clone for NotificationFacade<T> {
    fn clone(&self) -> Self {
        Self {
            toaster: Rc::clone(&self.toaster),
            presets: self.presets.clone(),
        }
    }
}

impl<T: Toaster + 'static> NotificationFacade<T> {
    /// Creates a facade using the built-in presets.
    pub fn new(toaster: Rc<T>) -> Self {
        Self::with_presets(toaster, Presets::default())
    }

    /// Creates a facade with custom presets.
    ///
    /// Confirm presets with timeouts are normalized so confirm toasts
    /// persist until answered.
    pub fn with_presets(toaster: Rc<T>, presets: Presets) -> Self {
        Self {
            toaster,
            presets: presets.normalized(),
        }
    }

    #[must_use]
    pub fn presets(&self) -> &Presets {
        &self.presets
    }

    #[must_use]
    pub fn toaster(&self) -> &Rc<T> {
        &self.toaster
    }

    /// Renders an auto-dismissing toast with the show preset.
    pub fn show(
        &self,
        severity: Severity,
        message: &str,
        title: Option<&str>,
        overrides: Option<&ToasterOverrides>,
    ) {
        let options = resolve(&self.presets.show, overrides);
        tracing::debug!(%severity, "showing toast");
        self.toaster.render(severity, message, title, &options);
    }

    /// Renders a persistent Yes/No toast with the confirm preset.
    ///
    /// Overrides that set a timeout are honored and can dismiss the toast
    /// before it is answered, leaving the confirmation pending.
    pub fn confirm(
        &self,
        severity: Severity,
        message: &str,
        title: Option<&str>,
        overrides: Option<&ToasterOverrides>,
    ) -> Confirmation {
        let options = resolve(&self.presets.confirm, overrides);
        let body = confirm::with_confirm_markup(message);
        tracing::debug!(%severity, "showing confirm toast");
        let handle = self.toaster.render(severity, &body, title, &options);
        confirm::bind(Rc::clone(&self.toaster), handle)
    }

    pub fn show_info(&self, message: &str, title: Option<&str>, overrides: Option<&ToasterOverrides>) {
        self.show(Severity::Info, message, title, overrides);
    }

    pub fn show_warning(
        &self,
        message: &str,
        title: Option<&str>,
        overrides: Option<&ToasterOverrides>,
    ) {
        self.show(Severity::Warning, message, title, overrides);
    }

    pub fn show_success(
        &self,
        message: &str,
        title: Option<&str>,
        overrides: Option<&ToasterOverrides>,
    ) {
        self.show(Severity::Success, message, title, overrides);
    }

    pub fn show_error(&self, message: &str, title: Option<&str>, overrides: Option<&ToasterOverrides>) {
        self.show(Severity::Error, message, title, overrides);
    }

    pub fn confirm_info(
        &self,
        message: &str,
        title: Option<&str>,
        overrides: Option<&ToasterOverrides>,
    ) -> Confirmation {
        self.confirm(Severity::Info, message, title, overrides)
    }

    pub fn confirm_warning(
        &self,
        message: &str,
        title: Option<&str>,
        overrides: Option<&ToasterOverrides>,
    ) -> Confirmation {
        self.confirm(Severity::Warning, message, title, overrides)
    }

    pub fn confirm_success(
        &self,
        message: &str,
        title: Option<&str>,
        overrides: Option<&ToasterOverrides>,
    ) -> Confirmation {
        self.confirm(Severity::Success, message, title, overrides)
    }

    pub fn confirm_error(
        &self,
        message: &str,
        title: Option<&str>,
        overrides: Option<&ToasterOverrides>,
    ) -> Confirmation {
        self.confirm(Severity::Error, message, title, overrides)
    }
}

fn resolve(preset: &ToasterOptions, overrides: Option<&ToasterOverrides>) -> ToasterOptions {
    match overrides {
        Some(overrides) => preset.merged(overrides),
        None => preset.clone(),
    }
}
