// SPDX-License-Identifier: MPL-2.0
//! `iced_notify` provides toast notifications and modal dialogs for Iced
//! applications.
//!
//! The [`notify`] module holds the framework-independent facade: show and
//! confirm toasts per severity, and a modal controller with accept/reject
//! close semantics. [`ui`] renders both on top of Iced.

#![doc(html_root_url = "https://docs.rs/iced_notify/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod dom;
pub mod error;
pub mod notify;
pub mod ui;
