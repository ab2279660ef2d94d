#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::Point;
use crate::marker::Marker;

/// Linear scan for the first marker whose canvas position is within the hit
/// radius of `point`. Overlaps resolve to the earliest-inserted marker.
///
/// `hit_radius` overrides every marker's own radius when present.
#[must_use]
pub fn find_at(markers: &[Marker], point: Point, hit_radius: Option<f64>) -> Option<&Marker> {
    markers
        .iter()
        .find(|m| point.distance_to(m.canvas_position) <= hit_radius.unwrap_or(m.radius))
}
