//! Input model: pointer events from the host and per-press recognizer state.
//!
//! The host forwards raw pointer phases with millisecond timestamps. `Tick`
//! carries no position; it only advances time so that hold thresholds and the
//! multi-tap window can lapse while the finger is still or lifted.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::geom::Point;
use crate::marker::MarkerId;

/// A pointer event in the canvas frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    /// Finger or button went down.
    Down { x: f64, y: f64, t_ms: u64 },
    /// Pointer moved while down (or hovering; ignored when no press is active).
    Move { x: f64, y: f64, t_ms: u64 },
    /// Finger or button released.
    Up { x: f64, y: f64, t_ms: u64 },
    /// The host lost the touch (interrupted, stolen by the system, etc.).
    Cancel { t_ms: u64 },
    /// Time passed with no pointer change.
    Tick { t_ms: u64 },
}

impl PointerEvent {
    /// Phase name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Down { .. } => "down",
            Self::Move { .. } => "move",
            Self::Up { .. } => "up",
            Self::Cancel { .. } => "cancel",
            Self::Tick { .. } => "tick",
        }
    }

    /// Timestamp in milliseconds.
    #[must_use]
    pub fn t_ms(&self) -> u64 {
        match *self {
            Self::Down { t_ms, .. }
            | Self::Move { t_ms, .. }
            | Self::Up { t_ms, .. }
            | Self::Cancel { t_ms }
            | Self::Tick { t_ms } => t_ms,
        }
    }

    /// Canvas position, for phases that carry one.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::Down { x, y, .. } | Self::Move { x, y, .. } | Self::Up { x, y, .. } => Some(Point::new(x, y)),
            Self::Cancel { .. } | Self::Tick { .. } => None,
        }
    }

    /// Whether this event ends the current press.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Up { .. } | Self::Cancel { .. })
    }
}

/// Timing and distance thresholds for the recognizers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Longest press that still counts as a tap.
    pub tap_max_duration_ms: u64,
    /// Longest gap from one tap's release to the next tap's press.
    pub multi_tap_delay_ms: u64,
    /// Movement tolerated before a press stops being a tap or pre-drag hold.
    pub tap_slop_px: f64,
    /// Tap count that clears the court.
    pub clear_tap_count: u32,
    /// Hold before a press on a marker becomes a drag.
    pub drag_hold_ms: u64,
    /// Hold before a press counts as a long press.
    pub long_press_ms: u64,
    /// Whether a long press on empty court places a marker.
    pub long_press_places: bool,
}

/// Where the current press stands, from pointer-down to pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PressState {
    /// No finger down.
    #[default]
    Idle,
    /// Press began off the diagram or before layout; swallowed until release.
    Ignored,
    /// Press still eligible for tap, long press or drag.
    Pending {
        /// Canvas position at pointer-down; drag eligibility is decided here.
        start: Point,
        /// Timestamp of pointer-down.
        down_ms: u64,
        /// Marker under the start position, if any.
        grabbed: Option<Grab>,
    },
    /// Already resolved, or moved past the slop before anything activated.
    /// The rest of the press is a no-op.
    Failed,
    /// A drag is moving a marker.
    Dragging {
        grab: Grab,
        /// Last accepted marker centre, in canvas pixels.
        last: Point,
    },
}

/// A marker held by the current press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    pub id: MarkerId,
    /// Marker centre minus the press position. Kept for the whole drag so
    /// the marker does not jump under the finger.
    pub offset: Point,
}

impl Grab {
    /// Grab `marker` with a press at `at`.
    #[must_use]
    pub fn new(id: MarkerId, centre: Point, at: Point) -> Self {
        Self { id, offset: Point::new(centre.x - at.x, centre.y - at.y) }
    }

    /// Marker centre for a finger at `p`.
    #[must_use]
    pub fn centre_for(&self, p: Point) -> Point {
        Point::new(p.x + self.offset.x, p.y + self.offset.y)
    }
}

/// Consecutive taps still inside the multi-tap window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapSequence {
    /// Taps recognized so far.
    pub count: u32,
    /// Position of the first tap; a lone tap places its marker here.
    pub first: Point,
    /// Release time of the latest tap.
    pub last_up_ms: u64,
}
