// SPDX-License-Identifier: MPL-2.0
//! Notification and modal-dialog facade.
//!
//! # Components
//!
//! - [`options`] - `ToasterOptions`, per-call overrides and the two presets
//! - [`facade`] - `NotificationFacade` with show/confirm per severity
//! - [`confirm`] - Yes/No toast to settle-once `Confirmation` future
//! - [`modal`] - `ModalController` and its open/close protocol
//! - [`context`] - `NotifyContext` bundling the facade and the controller
//!
//! # Usage
//!
//! ```ignore
//! use iced_notify::notify::{ModalOptions, NotifyContext};
//!
//! let ctx = NotifyContext::new(&config, engine, backdrop, factory);
//!
//! ctx.notifications().show_success("Saved", None, None);
//!
//! if ctx.notifications().confirm_warning("Delete item?", Some("Confirm"), None).await.is_ok() {
//!     delete();
//! }
//!
//! let opening = ctx.modals().show_modal_dialog(
//!     ModalOptions::new("edit-form").on_accept(|_form, _detail| false),
//! );
//! ```

pub mod confirm;
pub mod context;
pub mod facade;
pub mod modal;
pub mod options;

pub use confirm::{Confirmation, Declined, CONFIRM_MARKUP};
pub use context::NotifyContext;
pub use facade::NotificationFacade;
pub use modal::{CloseDirective, ModalController, ModalOptions, ModalState, OpenOutcome};
pub use options::{
    ClickHandler, Easing, PositionClass, Presets, ToasterOptions, ToasterOverrides,
    TransitionMethod,
};
