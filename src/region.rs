//! Shot-region classification on the diagram-source frame.
//!
//! The diagram is two mirrored half courts split at `SOURCE_H / 2`. Each half
//! has a basket `BASKET_DISTANCE` in from its own baseline, centred across the
//! court. A point is inside the arc when it is strictly closer than
//! `THREE_POINT_RADIUS` to its half's basket. The arc is modeled as a full
//! circle; the flattened corner-three segments are not represented.

#[cfg(test)]
#[path = "region_test.rs"]
mod region_test;

use serde::{Deserialize, Serialize};

use crate::consts::{BASKET_DISTANCE, INSIDE_ARC_COLOR, OUTSIDE_ARC_COLOR, SOURCE_H, SOURCE_W, THREE_POINT_RADIUS};
use crate::geom::SourcePoint;

/// Which side of the three-point arc a shot was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArcRegion {
    InsideArc,
    OutsideArc,
}

impl ArcRegion {
    /// Points a made shot from this region is worth.
    #[must_use]
    pub fn shot_value(self) -> u8 {
        match self {
            Self::InsideArc => 2,
            Self::OutsideArc => 3,
        }
    }

    /// Stat code for a field-goal attempt from this region.
    #[must_use]
    pub fn attempt_code(self) -> &'static str {
        match self {
            Self::InsideArc => "FG2A",
            Self::OutsideArc => "FG3A",
        }
    }

    /// Marker fill color for this region.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::InsideArc => INSIDE_ARC_COLOR,
            Self::OutsideArc => OUTSIDE_ARC_COLOR,
        }
    }
}

/// One of the two mirrored half courts, named by their position in the viewBox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourtHalf {
    /// Source y below the midline (baseline at y = 0).
    Upper,
    /// Source y at or past the midline (baseline at y = `SOURCE_H`).
    Lower,
}

/// Fixed dimensions of the court diagram in source units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtGeometry {
    pub source_w: f64,
    pub source_h: f64,
    pub basket_distance: f64,
    pub three_point_radius: f64,
}

impl Default for CourtGeometry {
    fn default() -> Self {
        Self {
            source_w: SOURCE_W,
            source_h: SOURCE_H,
            basket_distance: BASKET_DISTANCE,
            three_point_radius: THREE_POINT_RADIUS,
        }
    }
}

impl CourtGeometry {
    /// Source-y of the line splitting the two halves.
    #[must_use]
    pub fn midline(&self) -> f64 {
        self.source_h / 2.0
    }

    /// The half court a point falls in.
    #[must_use]
    pub fn half_of(&self, p: SourcePoint) -> CourtHalf {
        if p.y < self.midline() { CourtHalf::Upper } else { CourtHalf::Lower }
    }

    /// Basket location for a half court.
    #[must_use]
    pub fn basket(&self, half: CourtHalf) -> SourcePoint {
        let x = self.source_w / 2.0;
        match half {
            CourtHalf::Upper => SourcePoint::new(x, self.basket_distance),
            CourtHalf::Lower => SourcePoint::new(x, self.source_h - self.basket_distance),
        }
    }

    /// Distance from `p` to the basket of the half it falls in.
    #[must_use]
    pub fn distance_to_basket(&self, p: SourcePoint) -> f64 {
        p.distance_to(self.basket(self.half_of(p)))
    }

    /// Classify a diagram-source point against its half's three-point arc.
    #[must_use]
    pub fn classify(&self, p: SourcePoint) -> ArcRegion {
        if self.distance_to_basket(p) < self.three_point_radius {
            ArcRegion::InsideArc
        } else {
            ArcRegion::OutsideArc
        }
    }
}
