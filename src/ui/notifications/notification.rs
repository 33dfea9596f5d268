// SPDX-License-Identifier: MPL-2.0
//! A rendered toast and its timers.
//!
//! Each toast carries the complete option set it was rendered with, so
//! two toasts on screen can follow different presets.

use super::markup::{self, Body};
use crate::application::port::{Severity, ToastHandle};
use crate::dom::Button;
use crate::notify::ToasterOptions;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Unique identifier for a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by the engine for a rendered toast.
#[derive(Debug, Clone)]
pub struct ToastRef {
    id: ToastId,
    controls: Rc<[Button]>,
}

impl ToastRef {
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }
}

impl ToastHandle for ToastRef {
    type Control = Button;

    fn find(&self, selector: &str) -> Option<Button> {
        self.controls
            .iter()
            .find(|control| control.matches(selector))
            .cloned()
    }
}

/// Running auto-dismiss countdown.
#[derive(Debug, Clone, Copy)]
struct Countdown {
    started_at: Instant,
    length: Duration,
}

impl Countdown {
    fn deadline(&self) -> Instant {
        self.started_at + self.length
    }
}

/// A toast to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: ToastId,
    severity: Severity,
    title: Option<String>,
    /// Raw message body as passed to the engine.
    message: String,
    body: Body,
    controls: Rc<[Button]>,
    options: ToasterOptions,
    created_at: Instant,
    shown_at: Instant,
    countdown: Option<Countdown>,
    hovered: bool,
    hide_started: Option<Instant>,
}

impl Notification {
    pub fn new(
        severity: Severity,
        message: &str,
        title: Option<&str>,
        options: ToasterOptions,
    ) -> Self {
        Self::new_at(severity, message, title, options, Instant::now())
    }

    /// Creates a toast whose timers start at `now`.
    pub fn new_at(
        severity: Severity,
        message: &str,
        title: Option<&str>,
        options: ToasterOptions,
        now: Instant,
    ) -> Self {
        let (body, controls) = markup::parse(message).into_parts();
        let countdown = options.auto_dismiss().map(|length| Countdown {
            started_at: now,
            length,
        });
        Self {
            id: ToastId::new(),
            severity,
            title: title.map(str::to_string),
            message: message.to_string(),
            body,
            controls: controls.into(),
            options,
            created_at: now,
            shown_at: now,
            countdown,
            hovered: false,
            hide_started: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn handle(&self) -> ToastRef {
        ToastRef {
            id: self.id,
            controls: Rc::clone(&self.controls),
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[must_use]
    pub fn controls(&self) -> &[Button] {
        &self.controls
    }

    #[must_use]
    pub fn options(&self) -> &ToasterOptions {
        &self.options
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[must_use]
    pub fn is_hiding(&self) -> bool {
        self.hide_started.is_some()
    }

    /// Moves a queued toast on screen: the show transition and the
    /// countdown start over.
    pub fn mark_shown(&mut self, now: Instant) {
        self.shown_at = now;
        self.countdown = self.options.auto_dismiss().map(|length| Countdown {
            started_at: now,
            length,
        });
    }

    /// Hovering suspends the countdown; leaving restarts it with the
    /// extended timeout.
    pub fn set_hovered(&mut self, hovered: bool, now: Instant) {
        self.hovered = hovered;
        if hovered || self.hide_started.is_some() {
            return;
        }
        if self.options.time_out_ms > 0 || self.options.extended_time_out_ms > 0 {
            self.countdown = Some(Countdown {
                started_at: now,
                length: Duration::from_millis(self.options.extended_time_out_ms),
            });
        }
    }

    /// Returns whether the countdown has run out.
    #[must_use]
    pub fn should_auto_dismiss_at(&self, now: Instant) -> bool {
        if self.hovered || self.hide_started.is_some() {
            return false;
        }
        self.countdown
            .is_some_and(|countdown| now >= countdown.deadline())
    }

    /// Starts the hide transition. Returns `false` if already hiding.
    pub fn begin_hide(&mut self, now: Instant) -> bool {
        if self.hide_started.is_some() {
            return false;
        }
        self.hide_started = Some(now);
        true
    }

    /// Returns whether the hide transition is over.
    #[must_use]
    pub fn hide_finished_at(&self, now: Instant) -> bool {
        self.hide_started
            .is_some_and(|started| now >= started + self.options.hide_duration())
    }

    /// Opacity from the show and hide transitions, in `0.0..=1.0`.
    #[must_use]
    pub fn opacity_at(&self, now: Instant) -> f32 {
        let options = &self.options;
        if let Some(started) = self.hide_started {
            if !options.hide_method.is_animated() {
                return 1.0;
            }
            let p = progress(now.saturating_duration_since(started), options.hide_duration());
            return 1.0 - options.hide_easing.apply(p);
        }
        if !options.show_method.is_animated() {
            return 1.0;
        }
        let p = progress(
            now.saturating_duration_since(self.shown_at),
            Duration::from_millis(options.show_duration_ms),
        );
        options.show_easing.apply(p)
    }

    /// Fraction of the countdown still remaining, for the progress bar.
    #[must_use]
    pub fn remaining_at(&self, now: Instant) -> Option<f32> {
        let countdown = self.countdown?;
        if self.hovered || countdown.length.is_zero() {
            return Some(1.0);
        }
        let left = countdown.deadline().saturating_duration_since(now);
        Some((left.as_secs_f32() / countdown.length.as_secs_f32()).clamp(0.0, 1.0))
    }
}

fn progress(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / total.as_secs_f32()).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::CONFIRM_MARKUP;

    fn show(message: &str, now: Instant) -> Notification {
        Notification::new_at(
            Severity::Info,
            message,
            None,
            ToasterOptions::show_preset(),
            now,
        )
    }

    #[test]
    fn toast_ids_are_unique() {
        let now = Instant::now();
        assert_ne!(show("a", now).id(), show("a", now).id());
    }

    #[test]
    fn show_toast_expires_after_time_out() {
        let now = Instant::now();
        let toast = show("Saved", now);
        assert!(!toast.should_auto_dismiss_at(now + Duration::from_millis(4_999)));
        assert!(toast.should_auto_dismiss_at(now + Duration::from_millis(5_000)));
    }

    #[test]
    fn confirm_toast_never_expires() {
        let now = Instant::now();
        let toast = Notification::new_at(
            Severity::Warning,
            &format!("Delete?{CONFIRM_MARKUP}"),
            Some("Confirm"),
            ToasterOptions::confirm_preset(),
            now,
        );
        assert!(!toast.should_auto_dismiss_at(now + Duration::from_secs(3_600)));
        assert!(toast.remaining_at(now).is_none());
    }

    #[test]
    fn hover_suspends_and_leave_uses_extended_time_out() {
        let now = Instant::now();
        let mut toast = show("Saved", now);

        toast.set_hovered(true, now + Duration::from_secs(1));
        assert!(!toast.should_auto_dismiss_at(now + Duration::from_secs(10)));

        let left_at = now + Duration::from_secs(10);
        toast.set_hovered(false, left_at);
        assert!(!toast.should_auto_dismiss_at(left_at + Duration::from_millis(999)));
        assert!(toast.should_auto_dismiss_at(left_at + Duration::from_millis(1_000)));
    }

    #[test]
    fn hide_transition_lasts_hide_duration() {
        let now = Instant::now();
        let mut toast = show("Saved", now);

        assert!(toast.begin_hide(now));
        assert!(!toast.begin_hide(now));
        assert!(!toast.hide_finished_at(now + Duration::from_millis(999)));
        assert!(toast.hide_finished_at(now + Duration::from_millis(1_000)));
        assert!(!toast.should_auto_dismiss_at(now + Duration::from_secs(60)));
    }

    #[test]
    fn handle_finds_confirm_controls() {
        let toast = Notification::new(
            Severity::Info,
            &format!("Delete item?{CONFIRM_MARKUP}"),
            None,
            ToasterOptions::confirm_preset(),
        );
        let handle = toast.handle();
        assert_eq!(handle.id(), toast.id());
        assert_eq!(
            handle.find(".btn.confirm-yes").map(|b| b.label().to_string()),
            Some("Yes".to_string())
        );
        assert!(handle.find(".btn.confirm-no").is_some());
        assert!(handle.find(".btn.confirm-maybe").is_none());
    }

    #[test]
    fn fades_in_then_out() {
        let now = Instant::now();
        let mut toast = show("Saved", now);

        assert_eq!(toast.opacity_at(now), 0.0);
        assert!((toast.opacity_at(now + Duration::from_millis(300)) - 1.0).abs() < 1e-6);

        let hide = now + Duration::from_secs(1);
        toast.begin_hide(hide);
        assert!(toast.opacity_at(hide + Duration::from_millis(500)) > 0.0);
        assert!(toast.opacity_at(hide + Duration::from_millis(1_000)) < 1e-6);
    }

    #[test]
    fn instant_methods_skip_fading() {
        use crate::notify::{ToasterOverrides, TransitionMethod};
        let now = Instant::now();
        let options = ToasterOptions::show_preset().merged(&ToasterOverrides {
            show_method: Some(TransitionMethod::Show),
            ..ToasterOverrides::default()
        });
        let toast = Notification::new_at(Severity::Info, "Hi", None, options, now);
        assert_eq!(toast.opacity_at(now), 1.0);
    }

    #[test]
    fn remaining_fraction_counts_down() {
        let now = Instant::now();
        let toast = show("Saved", now);
        let half = toast
            .remaining_at(now + Duration::from_millis(2_500))
            .expect("countdown running");
        assert!((half - 0.5).abs() < 0.01);
    }
}
