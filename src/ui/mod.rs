// SPDX-License-Identifier: MPL-2.0
//! Iced rendering of toasts and modal dialogs.
//!
//! - [`notifications`] - Toast engine, queue and widgets
//! - [`backdrop`] - Modal backdrop hosting one dialog above the application
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod backdrop;
pub mod design_tokens;
pub mod notifications;

use crate::application::port::Severity;
use design_tokens::palette;
use iced::Color;

/// Accent color of a severity.
#[must_use]
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => palette::INFO_500,
        Severity::Warning => palette::WARNING_500,
        Severity::Success => palette::SUCCESS_500,
        Severity::Error => palette::ERROR_500,
    }
}
