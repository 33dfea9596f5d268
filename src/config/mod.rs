// SPDX-License-Identifier: MPL-2.0
//! This module handles the notification configuration, loading and saving
//! it from a `notify.toml` file.
//!
//! # Configuration Sections
//!
//! - `[show]` - Overrides of the transient toast preset
//! - `[confirm]` - Overrides of the Yes/No toast preset
//! - `[stack]` - Toast container limits
//!
//! Preset sections only list the fields that differ from the built-in
//! presets. Confirm timeouts are always forced back to zero.
//!
//! # Path Resolution
//!
//! 1. Explicit directory passed to `load_with_override()`/`save_with_override()`
//! 2. `ICED_NOTIFY_CONFIG_DIR` environment variable
//! 3. Platform config directory (`dirs::config_dir()/IcedNotify`)
//!
//! # Examples
//!
//! ```no_run
//! use iced_notify::config;
//!
//! let (mut config, _warning) = config::load();
//! config.show.time_out_ms = Some(8_000);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::notify::{Presets, ToasterOptions, ToasterOverrides};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "notify.toml";
const APP_NAME: &str = "IcedNotify";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_NOTIFY_CONFIG_DIR";

/// Toast container settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StackConfig {
    /// Toasts visible at once.
    #[serde(
        default = "default_max_visible",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_visible: Option<usize>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
        }
    }
}

impl StackConfig {
    /// `max_visible` clamped to its allowed range.
    #[must_use]
    pub fn max_visible(&self) -> usize {
        self.max_visible
            .unwrap_or(DEFAULT_MAX_VISIBLE)
            .clamp(MIN_MAX_VISIBLE, MAX_MAX_VISIBLE)
    }
}

/// Notification configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub show: ToasterOverrides,

    #[serde(default)]
    pub confirm: ToasterOverrides,

    #[serde(default)]
    pub stack: StackConfig,
}

impl Config {
    /// Built-in presets with this configuration applied.
    #[must_use]
    pub fn presets(&self) -> Presets {
        Presets {
            show: ToasterOptions::show_preset().merged(&self.show),
            confirm: ToasterOptions::confirm_preset().merged(&self.confirm),
        }
        .normalized()
    }
}

fn default_max_visible() -> Option<usize> {
    Some(DEFAULT_MAX_VISIBLE)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory, honoring an explicit override first.
pub fn config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    base_dir
        .or_else(|| std::env::var_os(ENV_CONFIG_DIR).map(PathBuf::from))
        .or_else(|| {
            dirs::config_dir().map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "using default notification config");
                    return (
                        Config::default(),
                        Some(format!("could not load {}: {}", path.display(), error)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::PositionClass;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_sections() {
        let config = Config {
            show: ToasterOverrides::new()
                .time_out_ms(8_000)
                .position_class(PositionClass::BottomRight),
            confirm: ToasterOverrides::new().close_button(true),
            stack: StackConfig {
                max_visible: Some(3),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("notify.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("notify.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_falls_back_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[show]\ntime_out_ms = \"soon\"")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().join("absent")));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn presets_apply_sections_and_keep_confirm_persistent() {
        let config: Config = toml::from_str(
            r#"
            [show]
            close_button = true
            position_class = "toast-bottom-center"

            [confirm]
            time_out_ms = 4000
            progress_bar = true
            "#,
        )
        .expect("valid config");

        let presets = config.presets();
        assert!(presets.show.close_button);
        assert_eq!(presets.show.position_class, PositionClass::BottomCenter);
        assert_eq!(presets.show.time_out_ms, DEFAULT_TIME_OUT_MS);
        assert!(presets.confirm.progress_bar);
        assert!(presets.confirm.is_persistent());
    }

    #[test]
    fn stack_max_visible_is_clamped() {
        let stack = StackConfig {
            max_visible: Some(0),
        };
        assert_eq!(stack.max_visible(), MIN_MAX_VISIBLE);
        let stack = StackConfig {
            max_visible: Some(500),
        };
        assert_eq!(stack.max_visible(), MAX_MAX_VISIBLE);
        assert_eq!(StackConfig::default().max_visible(), DEFAULT_MAX_VISIBLE);
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("notify.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }
}
