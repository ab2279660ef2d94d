//! Render data: a flat, ordered projection of the marker store.
//!
//! The host draws the court diagram itself; this module only says where each
//! marker goes and how it looks. Order matches insertion order, so later
//! markers draw on top.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::consts::DRAGGING_OPACITY;
use crate::geom::Point;
use crate::marker::{Marker, MarkerId};

/// One marker, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMarker {
    pub id: MarkerId,
    /// Centre in canvas pixels.
    pub center: Point,
    pub radius: f64,
    /// Fill colour for the marker's arc classification.
    pub color: &'static str,
    /// Dimmed while the marker is being dragged.
    pub opacity: f64,
    /// Logical coordinate readout, `(x, y)`.
    pub label: String,
}

impl From<&Marker> for RenderMarker {
    fn from(m: &Marker) -> Self {
        Self {
            id: m.id,
            center: m.canvas_position,
            radius: m.radius,
            color: m.classification.color(),
            opacity: if m.is_dragging { DRAGGING_OPACITY } else { 1.0 },
            label: m.logical_position.to_string(),
        }
    }
}

/// Project markers into draw order.
#[must_use]
pub fn render_list(markers: &[Marker]) -> Vec<RenderMarker> {
    markers.iter().map(RenderMarker::from).collect()
}
