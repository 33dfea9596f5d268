// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo application.

use crate::application::port::Severity;
use crate::ui::notifications::ToastMessage;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Toast(ToastMessage),
    Show(Severity),
    Confirm(Severity),
    OpenEditor,
    /// Opens a dialog the factory does not know, to show the failure path.
    OpenMissing,
    EditorNameChanged(String),
    EditorSave,
    EditorCancel,
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional config directory override (for notify.toml).
    /// Takes precedence over `ICED_NOTIFY_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
