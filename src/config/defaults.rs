// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Transitions**: Show/hide transition durations
//! - **Timeouts**: Auto-dismiss delays of transient toasts
//! - **Stack**: Toast container limits and refresh rate

// ==========================================================================
// Transition Defaults
// ==========================================================================

/// Duration of the show transition (milliseconds).
pub const DEFAULT_SHOW_DURATION_MS: u64 = 300;

/// Duration of the hide transition (milliseconds).
pub const DEFAULT_HIDE_DURATION_MS: u64 = 1000;

// ==========================================================================
// Timeout Defaults
// ==========================================================================

/// Auto-dismiss delay of transient toasts (milliseconds).
pub const DEFAULT_TIME_OUT_MS: u64 = 5000;

/// Auto-dismiss delay restarted when the pointer leaves a toast (milliseconds).
pub const DEFAULT_EXTENDED_TIME_OUT_MS: u64 = 1000;

// ==========================================================================
// Stack Defaults
// ==========================================================================

/// Toasts visible at once; further toasts wait in a queue.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Lower bound for `max_visible`.
pub const MIN_MAX_VISIBLE: usize = 1;

/// Upper bound for `max_visible`.
pub const MAX_MAX_VISIBLE: usize = 20;

/// Interval of the tick driving auto-dismiss and hide transitions (milliseconds).
pub const TICK_INTERVAL_MS: u64 = 100;

const _: () = {
    assert!(DEFAULT_MAX_VISIBLE >= MIN_MAX_VISIBLE);
    assert!(DEFAULT_MAX_VISIBLE <= MAX_MAX_VISIBLE);
    assert!(DEFAULT_EXTENDED_TIME_OUT_MS < DEFAULT_TIME_OUT_MS);
};
