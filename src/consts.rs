//! Shared numeric constants for the court engine.

// ── Diagram source frame ────────────────────────────────────────

/// Width of the court diagram's fixed viewBox, in source units.
pub const SOURCE_W: f64 = 940.0;

/// Height of the court diagram's fixed viewBox, in source units.
pub const SOURCE_H: f64 = 500.0;

/// Distance from a baseline to the centre of its basket, in source units.
pub const BASKET_DISTANCE: f64 = 52.5;

/// Radius of the modeled three-point arc around each basket, in source units.
pub const THREE_POINT_RADIUS: f64 = 237.5;

// ── Logical frame ───────────────────────────────────────────────

/// Logical half-extent along x (the grid spans -47..=47).
pub const LOGICAL_HALF_X: f64 = 47.0;

/// Logical half-extent along y (the grid spans -25..=25).
pub const LOGICAL_HALF_Y: f64 = 25.0;

// ── Markers ─────────────────────────────────────────────────────

/// Default visual radius of a marker in canvas pixels; doubles as hit radius.
pub const MARKER_RADIUS_PX: f64 = 25.0;

/// Marker fill for shots inside the arc.
pub const INSIDE_ARC_COLOR: &str = "#FF6B35";

/// Marker fill for shots outside the arc.
pub const OUTSIDE_ARC_COLOR: &str = "#2C3E50";

/// Opacity applied to a marker while it is being dragged.
pub const DRAGGING_OPACITY: f64 = 0.5;

// ── Gestures ────────────────────────────────────────────────────

/// Longest press, in milliseconds, that still counts as a tap.
pub const TAP_MAX_DURATION_MS: u64 = 500;

/// Longest gap between a release and the next press of a multi-tap.
pub const MULTI_TAP_DELAY_MS: u64 = 500;

/// Movement allowed during a tap or a pre-drag hold, in canvas pixels.
pub const TAP_SLOP_PX: f64 = 10.0;

/// Number of taps that clears the court.
pub const CLEAR_TAP_COUNT: u32 = 3;

/// Hold time before a press on a marker turns into a drag.
pub const DRAG_HOLD_MS: u64 = 500;

/// Hold time before a press counts as a long press.
pub const LONG_PRESS_MS: u64 = 300;

// ── Outbound ────────────────────────────────────────────────────

/// Capacity of the bounded domain-event queue handed to consumers.
pub const EVENT_QUEUE_CAPACITY: usize = 256;
