//! Lanes: directed segments the planner walks, with the side footprints go on.

use wallpack_core::{Point2, Segment, Side, Vector2};

/// One segment of a travel order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lane {
    /// Boundary edge index (perimeter) or row number (rows).
    pub source: usize,
    /// Effective sub-segment, already clipped to the reference points.
    pub segment: Segment,
    /// Side of the segment footprints extend into.
    pub side: Side,
}

impl Lane {
    /// Creates a new lane.
    pub fn new(source: usize, segment: Segment, side: Side) -> Self {
        Self {
            source,
            segment,
            side,
        }
    }

    /// Returns the usable length.
    pub fn length(&self) -> f64 {
        self.segment.length()
    }

    /// Returns the unit direction, or `None` for a zero-length lane.
    pub fn direction(&self) -> Option<Vector2> {
        self.segment.direction()
    }

    /// Returns the start point.
    pub fn start(&self) -> Point2 {
        self.segment.start
    }
}
