//! Committed placements.

use crate::footprint::FootprintId;
use crate::geometry::{Extent, Point2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A footprint copy accepted by the planner. Never mutated after commit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// The ID of the placed footprint.
    pub footprint_id: FootprintId,

    /// Instance index (0-based) among copies of the same footprint.
    pub instance: usize,

    /// Insertion point: the center plus the rotated base offset.
    pub position: Point2,

    /// Footprint center.
    pub center: Point2,

    /// Rotation in radians, normalized to `[0, 2π)`.
    pub rotation: f64,

    /// Axis-aligned extent of the rotated footprint.
    pub extent: Extent,

    /// Index of the lane the placement was made on.
    pub lane: usize,
}

impl Placement {
    /// Returns the rotation in degrees.
    pub fn rotation_deg(&self) -> f64 {
        self.rotation.to_degrees()
    }

    /// Returns the key this placement is registered under in an obstacle set.
    pub fn obstacle_key(&self) -> String {
        format!("{}#{}", self.footprint_id, self.instance)
    }
}
