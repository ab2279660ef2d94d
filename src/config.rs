//! Engine configuration parsed from environment variables.
//!
//! Every knob has a default, so an empty environment yields a working engine.
//! Unparseable values fall back to the default rather than failing.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{
    CLEAR_TAP_COUNT, DRAG_HOLD_MS, EVENT_QUEUE_CAPACITY, LONG_PRESS_MS, MARKER_RADIUS_PX, MULTI_TAP_DELAY_MS,
    TAP_MAX_DURATION_MS, TAP_SLOP_PX,
};
use crate::input::GestureConfig;

/// Fewest taps that may be configured to clear the court.
const MIN_CLEAR_TAP_COUNT: u32 = 2;

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_max_duration_ms: TAP_MAX_DURATION_MS,
            multi_tap_delay_ms: MULTI_TAP_DELAY_MS,
            tap_slop_px: TAP_SLOP_PX,
            clear_tap_count: CLEAR_TAP_COUNT,
            drag_hold_ms: DRAG_HOLD_MS,
            long_press_ms: LONG_PRESS_MS,
            long_press_places: false,
        }
    }
}

impl GestureConfig {
    /// Read gesture thresholds from the environment.
    ///
    /// - `GESTURE_TAP_MAX_DURATION_MS` (default 500)
    /// - `GESTURE_MULTI_TAP_DELAY_MS` (default 500)
    /// - `GESTURE_TAP_SLOP_PX` (default 10)
    /// - `GESTURE_CLEAR_TAP_COUNT` (default 3, at least 2)
    /// - `GESTURE_DRAG_HOLD_MS` (default 500)
    /// - `GESTURE_LONG_PRESS_MS` (default 300)
    /// - `GESTURE_LONG_PRESS_PLACES` (default false)
    #[must_use]
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            tap_max_duration_ms: env_parse("GESTURE_TAP_MAX_DURATION_MS", d.tap_max_duration_ms),
            multi_tap_delay_ms: env_parse("GESTURE_MULTI_TAP_DELAY_MS", d.multi_tap_delay_ms),
            tap_slop_px: env_parse("GESTURE_TAP_SLOP_PX", d.tap_slop_px),
            clear_tap_count: env_parse("GESTURE_CLEAR_TAP_COUNT", d.clear_tap_count).max(MIN_CLEAR_TAP_COUNT),
            drag_hold_ms: env_parse("GESTURE_DRAG_HOLD_MS", d.drag_hold_ms),
            long_press_ms: env_parse("GESTURE_LONG_PRESS_MS", d.long_press_ms),
            long_press_places: env_parse("GESTURE_LONG_PRESS_PLACES", d.long_press_places),
        }
    }
}

/// Top-level configuration for one court instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtConfig {
    /// Padding between the container edge and the diagram, in canvas pixels.
    pub padding_px: f64,
    /// Radius given to newly placed markers.
    pub marker_radius_px: f64,
    /// Recognizer thresholds.
    pub gesture: GestureConfig,
    /// Capacity of the bounded domain-event queue.
    pub event_queue_capacity: usize,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            padding_px: 0.0,
            marker_radius_px: MARKER_RADIUS_PX,
            gesture: GestureConfig::default(),
            event_queue_capacity: EVENT_QUEUE_CAPACITY,
        }
    }
}

impl CourtConfig {
    /// Build the config from environment variables.
    ///
    /// - `COURT_PADDING_PX` (default 0)
    /// - `MARKER_RADIUS_PX` (default 25)
    /// - `EVENT_QUEUE_CAPACITY` (default 256, at least 1)
    /// - the `GESTURE_*` variables listed on [`GestureConfig::from_env`]
    #[must_use]
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            padding_px: env_parse("COURT_PADDING_PX", d.padding_px).max(0.0),
            marker_radius_px: env_parse("MARKER_RADIUS_PX", d.marker_radius_px),
            gesture: GestureConfig::from_env(),
            event_queue_capacity: env_parse("EVENT_QUEUE_CAPACITY", d.event_queue_capacity).max(1),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
