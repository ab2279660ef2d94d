//! Marker model: placed shots, their sparse updates, and the in-memory store.
//!
//! A [`Marker`] carries its position in both the canvas frame (for drawing and
//! hit-testing) and the logical frame (for coordinate readout), plus the arc
//! classification computed from its diagram-source position. [`MarkerStore`]
//! keeps markers in insertion order; that order is also the draw order and the
//! tie-break for overlapping hits.

#[cfg(test)]
#[path = "marker_test.rs"]
mod marker_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::{LogicalPoint, Point};
use crate::hit;
use crate::region::ArcRegion;

/// Unique identifier for a marker.
pub type MarkerId = Uuid;

/// Allocate a fresh marker id: a millisecond timestamp followed by random bits.
#[must_use]
pub fn new_marker_id() -> MarkerId {
    Uuid::now_v7()
}

/// A shot marker placed on the court.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: MarkerId,
    /// Position in the canvas frame; drives rendering and hit-testing.
    pub canvas_position: Point,
    /// Position on the logical court grid; drives the coordinate readout.
    pub logical_position: LogicalPoint,
    /// Inside or outside the three-point arc.
    pub classification: ArcRegion,
    /// Visual radius in canvas pixels, also the default hit radius.
    pub radius: f64,
    /// True only while a drag gesture holds this marker.
    pub is_dragging: bool,
}

/// Sparse update for a marker. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_position: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_position: Option<LogicalPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<ArcRegion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dragging: Option<bool>,
}

impl MarkerPatch {
    /// A patch that only toggles the dragging flag.
    #[must_use]
    pub fn dragging(is_dragging: bool) -> Self {
        Self { is_dragging: Some(is_dragging), ..Default::default() }
    }

    /// Merge the present fields into `marker`.
    pub fn apply_to(&self, marker: &mut Marker) {
        if let Some(p) = self.canvas_position {
            marker.canvas_position = p;
        }
        if let Some(p) = self.logical_position {
            marker.logical_position = p;
        }
        if let Some(c) = self.classification {
            marker.classification = c;
        }
        if let Some(d) = self.is_dragging {
            marker.is_dragging = d;
        }
    }
}

/// Immutable copy of the store's contents, shared with the gesture context.
pub type MarkerSnapshot = Arc<[Marker]>;

/// Ordered in-memory collection of markers.
#[derive(Debug, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
}

impl MarkerStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { markers: Vec::new() }
    }

    /// Append a marker. Ids are not checked for uniqueness.
    pub fn add(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Merge `patch` into the marker with `id`. Returns false when no such
    /// marker exists, which is expected if the court was cleared mid-gesture.
    pub fn update_by_id(&mut self, id: &MarkerId, patch: &MarkerPatch) -> bool {
        let Some(marker) = self.markers.iter_mut().find(|m| m.id == *id) else {
            return false;
        };
        patch.apply_to(marker);
        true
    }

    /// Remove every marker.
    pub fn clear_all(&mut self) {
        self.markers.clear();
    }

    /// First marker, in insertion order, within `hit_radius` of `point`.
    /// `None` for the radius means each marker's own radius.
    #[must_use]
    pub fn find_at(&self, point: Point, hit_radius: Option<f64>) -> Option<&Marker> {
        hit::find_at(&self.markers, point, hit_radius)
    }

    /// Look up a marker by id.
    #[must_use]
    pub fn get(&self, id: &MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == *id)
    }

    /// All markers in insertion order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Copy the current contents into a shareable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> MarkerSnapshot {
        Arc::from(self.markers.as_slice())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
