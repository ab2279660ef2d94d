//! Error taxonomy for pointer input.
//!
//! Not-ready layouts, out-of-bounds touches and presses that miss every marker
//! are ordinary outcomes, not errors. Only malformed events land here, and the
//! arbiter catches them at its callback boundary.

/// A pointer event the arbiter refused to process.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GestureError {
    /// The event carried a NaN or infinite coordinate.
    #[error("non-finite pointer position ({x}, {y})")]
    NonFinitePosition { x: f64, y: f64 },
    /// The event's timestamp is earlier than one already processed.
    #[error("event at {now_ms}ms arrived after an event at {last_ms}ms")]
    ClockWentBackwards { last_ms: u64, now_ms: u64 },
    /// A release arrived with no press to release.
    #[error("pointer {phase} without an active press")]
    NoActivePress { phase: &'static str },
}
