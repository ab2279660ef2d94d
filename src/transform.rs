//! Conversions between the canvas, logical and diagram-source frames.
//!
//! All functions are pure and take the rectangle they map against as a
//! parameter. A rectangle that has not been measured yet yields `None`, which
//! callers treat as "layout not ready" and drop the input.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::consts::{LOGICAL_HALF_X, LOGICAL_HALF_Y, SOURCE_H, SOURCE_W};
use crate::geom::{LayoutRect, LogicalPoint, Point, SourcePoint};

/// Map a canvas point onto the logical court grid.
///
/// The grid is centred on the container's midpoint with y growing upward, so
/// a point above the centre has a positive logical y.
#[must_use]
pub fn canvas_to_logical(p: Point, container: &LayoutRect) -> Option<LogicalPoint> {
    if !container.is_ready() {
        return None;
    }
    let cx = container.width / 2.0;
    let cy = container.height / 2.0;
    Some(LogicalPoint {
        x: round_half_up(((p.x - cx) / cx) * LOGICAL_HALF_X),
        y: round_half_up(((cy - p.y) / cy) * LOGICAL_HALF_Y),
    })
}

/// Map a canvas point into the diagram's fixed viewBox using the rendered
/// diagram rectangle.
#[must_use]
pub fn canvas_to_source(p: Point, diagram: &LayoutRect) -> Option<SourcePoint> {
    if !diagram.is_ready() {
        return None;
    }
    Some(SourcePoint {
        x: ((p.x - diagram.x) / diagram.width) * SOURCE_W,
        y: ((p.y - diagram.y) / diagram.height) * SOURCE_H,
    })
}

/// Round to the nearest integer, ties toward positive infinity.
///
/// `-12.5` rounds to `-12`, matching how court coordinates are reported.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}
