// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! These traits describe the three collaborators the notification core
//! drives without owning: the toast engine, the modal backdrop host and
//! the dialog element factory.
//!
//! # Available Ports
//!
//! - [`toaster`]: Toast rendering and clearing, toast controls
//! - [`modal`]: Backdrop container, element factory, dialog elements
//!
//! # Design Notes
//!
//! - Everything runs on the UI thread: traits are neither `Send` nor `Sync`
//! - Engine options are passed per call, there is no shared options slot
//! - Element creation is the only asynchronous boundary (`LocalBoxFuture`)
//!
//! # Example
//!
//! ```ignore
//! use iced_notify::application::port::{Severity, Toaster};
//! use iced_notify::notify::ToasterOptions;
//!
//! fn announce(toaster: &impl Toaster) {
//!     toaster.render(Severity::Info, "Saved", None, &ToasterOptions::show_preset());
//! }
//! ```

pub mod modal;
pub mod toaster;

pub use modal::{AppContainer, DialogElement, DialogEvent, ElementFactory};
pub use toaster::{ClearOptions, Severity, ToastControl, ToastHandle, Toaster};
