// SPDX-License-Identifier: MPL-2.0
//! Toast engine options and the two built-in presets.
//!
//! The show preset is used for transient toasts. The confirm preset is
//! used for Yes/No toasts and never auto-dismisses: its timeouts are
//! always zero, so the toast stays until the user picks an answer.

use crate::config::defaults::{
    DEFAULT_EXTENDED_TIME_OUT_MS, DEFAULT_HIDE_DURATION_MS, DEFAULT_SHOW_DURATION_MS,
    DEFAULT_TIME_OUT_MS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

// =============================================================================
// Enums
// =============================================================================

/// Screen corner or edge the toast container is anchored to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PositionClass {
    #[default]
    #[serde(rename = "toast-top-right")]
    TopRight,
    #[serde(rename = "toast-top-left")]
    TopLeft,
    #[serde(rename = "toast-top-center")]
    TopCenter,
    #[serde(rename = "toast-top-full-width")]
    TopFullWidth,
    #[serde(rename = "toast-bottom-right")]
    BottomRight,
    #[serde(rename = "toast-bottom-left")]
    BottomLeft,
    #[serde(rename = "toast-bottom-center")]
    BottomCenter,
    #[serde(rename = "toast-bottom-full-width")]
    BottomFullWidth,
}

impl PositionClass {
    #[must_use]
    pub fn as_class(&self) -> &'static str {
        match self {
            PositionClass::TopRight => "toast-top-right",
            PositionClass::TopLeft => "toast-top-left",
            PositionClass::TopCenter => "toast-top-center",
            PositionClass::TopFullWidth => "toast-top-full-width",
            PositionClass::BottomRight => "toast-bottom-right",
            PositionClass::BottomLeft => "toast-bottom-left",
            PositionClass::BottomCenter => "toast-bottom-center",
            PositionClass::BottomFullWidth => "toast-bottom-full-width",
        }
    }

    #[must_use]
    pub fn is_top(&self) -> bool {
        matches!(
            self,
            PositionClass::TopRight
                | PositionClass::TopLeft
                | PositionClass::TopCenter
                | PositionClass::TopFullWidth
        )
    }

    #[must_use]
    pub fn is_full_width(&self) -> bool {
        matches!(
            self,
            PositionClass::TopFullWidth | PositionClass::BottomFullWidth
        )
    }
}

/// Easing curve of a show/hide transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    #[default]
    Swing,
    Linear,
}

impl Easing {
    /// Maps linear progress in `0.0..=1.0` onto the curve.
    #[must_use]
    pub fn apply(self, progress: f32) -> f32 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => p,
            Easing::Swing => 0.5 - (p * std::f32::consts::PI).cos() / 2.0,
        }
    }
}

/// Visual method of a show/hide transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TransitionMethod {
    FadeIn,
    FadeOut,
    SlideDown,
    SlideUp,
    Show,
    Hide,
}

impl TransitionMethod {
    /// `Show`/`Hide` switch instantly; the others animate.
    #[must_use]
    pub fn is_animated(self) -> bool {
        !matches!(self, TransitionMethod::Show | TransitionMethod::Hide)
    }
}

/// Callback invoked when a toast body is clicked.
#[derive(Clone)]
pub struct ClickHandler(Rc<dyn Fn()>);

impl ClickHandler {
    pub fn new(handler: impl Fn() + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self) {
        (self.0)();
    }
}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickHandler(..)")
    }
}

impl PartialEq for ClickHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// =============================================================================
// ToasterOptions
// =============================================================================

/// Complete option set handed to the toast engine for one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToasterOptions {
    pub close_button: bool,
    pub debug: bool,
    pub newest_on_top: bool,
    pub progress_bar: bool,
    pub position_class: PositionClass,
    pub prevent_duplicates: bool,
    pub on_click: Option<ClickHandler>,
    pub show_duration_ms: u64,
    pub hide_duration_ms: u64,
    /// Auto-dismiss delay; `0` keeps the toast until it is cleared.
    pub time_out_ms: u64,
    /// Auto-dismiss delay after the pointer leaves the toast.
    pub extended_time_out_ms: u64,
    pub show_easing: Easing,
    pub hide_easing: Easing,
    pub show_method: TransitionMethod,
    pub hide_method: TransitionMethod,
    pub tap_to_dismiss: bool,
}

impl ToasterOptions {
    /// Options for transient, auto-dismissing toasts.
    #[must_use]
    pub fn show_preset() -> Self {
        Self {
            close_button: false,
            debug: false,
            newest_on_top: false,
            progress_bar: false,
            position_class: PositionClass::TopRight,
            prevent_duplicates: false,
            on_click: None,
            show_duration_ms: DEFAULT_SHOW_DURATION_MS,
            hide_duration_ms: DEFAULT_HIDE_DURATION_MS,
            time_out_ms: DEFAULT_TIME_OUT_MS,
            extended_time_out_ms: DEFAULT_EXTENDED_TIME_OUT_MS,
            show_easing: Easing::Swing,
            hide_easing: Easing::Swing,
            show_method: TransitionMethod::FadeIn,
            hide_method: TransitionMethod::FadeOut,
            tap_to_dismiss: true,
        }
    }

    /// Options for persistent Yes/No toasts.
    #[must_use]
    pub fn confirm_preset() -> Self {
        Self {
            time_out_ms: 0,
            extended_time_out_ms: 0,
            hide_easing: Easing::Linear,
            tap_to_dismiss: false,
            ..Self::show_preset()
        }
    }

    /// Returns these options with every set override applied.
    #[must_use]
    pub fn merged(&self, overrides: &ToasterOverrides) -> Self {
        let mut merged = self.clone();
        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = &overrides.$field {
                    merged.$field = value.clone();
                })*
            };
        }
        apply!(
            close_button,
            debug,
            newest_on_top,
            progress_bar,
            position_class,
            prevent_duplicates,
            show_duration_ms,
            hide_duration_ms,
            time_out_ms,
            extended_time_out_ms,
            show_easing,
            hide_easing,
            show_method,
            hide_method,
            tap_to_dismiss,
        );
        if overrides.on_click.is_some() {
            merged.on_click = overrides.on_click.clone();
        }
        merged
    }

    /// Auto-dismiss delay, `None` when the toast persists.
    #[must_use]
    pub fn auto_dismiss(&self) -> Option<Duration> {
        (self.time_out_ms > 0).then(|| Duration::from_millis(self.time_out_ms))
    }

    /// Delay restarted when the pointer leaves the toast, `None` if disabled.
    #[must_use]
    pub fn extended_auto_dismiss(&self) -> Option<Duration> {
        (self.extended_time_out_ms > 0).then(|| Duration::from_millis(self.extended_time_out_ms))
    }

    #[must_use]
    pub fn hide_duration(&self) -> Duration {
        Duration::from_millis(self.hide_duration_ms)
    }

    /// Whether the toast stays until the user acts on it.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.time_out_ms == 0 && self.extended_time_out_ms == 0
    }
}

impl Default for ToasterOptions {
    fn default() -> Self {
        Self::show_preset()
    }
}

// =============================================================================
// ToasterOverrides
// =============================================================================

/// Partial options; each set field replaces the preset value.
///
/// Also the shape of the `[show]` and `[confirm]` config sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToasterOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_button: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newest_on_top: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_bar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_class: Option<PositionClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevent_duplicates: Option<bool>,
    #[serde(skip)]
    pub on_click: Option<ClickHandler>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_out_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_time_out_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_easing: Option<Easing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_easing: Option<Easing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_method: Option<TransitionMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_method: Option<TransitionMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_to_dismiss: Option<bool>,
}

impl ToasterOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn time_out_ms(mut self, millis: u64) -> Self {
        self.time_out_ms = Some(millis);
        self
    }

    #[must_use]
    pub fn close_button(mut self, enabled: bool) -> Self {
        self.close_button = Some(enabled);
        self
    }

    #[must_use]
    pub fn position_class(mut self, position: PositionClass) -> Self {
        self.position_class = Some(position);
        self
    }

    #[must_use]
    pub fn on_click(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_click = Some(ClickHandler::new(handler));
        self
    }
}

// =============================================================================
// Presets
// =============================================================================

/// The show and confirm presets used by the notification facade.
#[derive(Debug, Clone, PartialEq)]
pub struct Presets {
    pub show: ToasterOptions,
    pub confirm: ToasterOptions,
}

impl Presets {
    /// Forces the confirm preset to persist until answered.
    ///
    /// Presets built from user configuration go through here; a confirm
    /// timeout would otherwise dismiss the question unanswered and leave
    /// its future pending forever.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if !self.confirm.is_persistent() {
            tracing::warn!(
                time_out_ms = self.confirm.time_out_ms,
                extended_time_out_ms = self.confirm.extended_time_out_ms,
                "confirm preset timeouts ignored, confirm toasts persist until answered"
            );
            self.confirm.time_out_ms = 0;
            self.confirm.extended_time_out_ms = 0;
        }
        self
    }
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            show: ToasterOptions::show_preset(),
            confirm: ToasterOptions::confirm_preset(),
        }
    }
}
