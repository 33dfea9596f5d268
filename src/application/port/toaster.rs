// SPDX-License-Identifier: MPL-2.0
//! Toast engine port definition.
//!
//! The engine renders toasts and clears them; the facade never touches a
//! rendered toast except through [`Toaster::clear`] and
//! [`ToastHandle::find`].

use crate::dom::{Listener, ListenerId};
use crate::notify::ToasterOptions;
use std::fmt;
use std::rc::Rc;

/// Severity level of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Informational message.
    #[default]
    Info,
    /// Warning that doesn't block the user.
    Warning,
    /// Operation completed successfully.
    Success,
    /// Error requiring attention.
    Error,
}

impl Severity {
    /// All severities in display order.
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warning,
        Severity::Success,
        Severity::Error,
    ];

    /// Returns the lowercase name used by toast class names (`toast-info`, ...).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a toast should be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearOptions {
    /// Remove immediately, skipping the hide transition.
    pub force: bool,
}

impl ClearOptions {
    /// Immediate removal, no hide transition.
    #[must_use]
    pub fn forced() -> Self {
        Self { force: true }
    }
}

/// A clickable control inside a rendered toast.
pub trait ToastControl {
    /// Attaches a click listener.
    fn on_click(&self, listener: Listener<()>) -> ListenerId;

    /// Detaches a click listener. Returns `true` if it was attached.
    fn remove_click_listener(&self, id: ListenerId) -> bool;
}

/// Opaque reference to a toast owned by the engine.
pub trait ToastHandle: Clone {
    type Control: ToastControl + Clone + 'static;

    /// Looks up a control by class selector, e.g. `.btn.confirm-yes`.
    ///
    /// Returns the first matching control in document order.
    fn find(&self, selector: &str) -> Option<Self::Control>;
}

/// Port for the toast rendering engine.
///
/// # Lifecycle
///
/// 1. `render()` mounts a toast and returns its handle
/// 2. The engine dismisses it on its own (timeout, tap) or
/// 3. `clear()` removes it on request
///
/// A toast must be inert until `render()` returns, so listeners attached
/// to its controls right after rendering cannot miss a click.
pub trait Toaster {
    type Handle: ToastHandle + 'static;

    /// Renders a toast using exactly the given options.
    fn render(
        &self,
        severity: Severity,
        message: &str,
        title: Option<&str>,
        options: &ToasterOptions,
    ) -> Self::Handle;

    /// Removes a toast. Clearing an already removed toast is a no-op.
    fn clear(&self, handle: &Self::Handle, options: ClearOptions);
}

impl<T: Toaster + ?Sized> Toaster for Rc<T> {
    type Handle = T::Handle;

    fn render(
        &self,
        severity: Severity,
        message: &str,
        title: Option<&str>,
        options: &ToasterOptions,
    ) -> Self::Handle {
        (**self).render(severity, message, title, options)
    }

    fn clear(&self, handle: &Self::Handle, options: ClearOptions) {
        (**self).clear(handle, options);
    }
}
