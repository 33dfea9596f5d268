// SPDX-License-Identifier: MPL-2.0
//! Toast notifications on iced.
//!
//! # Components
//!
//! - [`notification`] - A rendered toast with its timers and controls
//! - [`markup`] - Parsing of toast bodies into text, line breaks and controls
//! - [`manager`] - `Manager` for queuing and lifecycle management
//! - [`engine`] - `ToastEngine`, the [`Toaster`](crate::application::port::Toaster) used by the facade
//! - [`toast`] - Toast widget component for rendering
//!
//! # Usage
//!
//! ```ignore
//! let engine = Rc::new(ToastEngine::new());
//! let notifications = NotificationFacade::new(Rc::clone(&engine));
//! notifications.show_success("Draft saved", None, None);
//!
//! // In update: engine.update(message)
//! // In view:   engine.view().map(Message::Toast)
//! ```

pub mod engine;
pub mod manager;
pub mod markup;
pub mod notification;
mod toast;

pub use engine::ToastEngine;
pub use manager::{Manager, Message as ToastMessage};
pub use notification::{Notification, ToastId, ToastRef};
pub use toast::Toast;
