//! Planning request: everything one run needs, assembled once by the caller.

use crate::lane::Lane;
use crate::obstacle::Obstacle;
use crate::perimeter::perimeter_lanes;
use crate::rows::row_lanes;
use wallpack_core::{Config, Footprint, Point2, Polygon, Result, Side, WallSide};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where candidate positions come from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TravelMode {
    /// Walk the boundary forward from one boundary point to another.
    Perimeter {
        /// Entry point on (or near) the boundary.
        from: Point2,
        /// Exit point on (or near) the boundary.
        to: Point2,
    },
    /// Pack parallel rows whose direction is `start -> end`.
    Rows {
        /// First reference point.
        start: Point2,
        /// Second reference point.
        end: Point2,
        /// Strip width.
        row_width: f64,
    },
}

impl TravelMode {
    /// Returns a short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Perimeter { .. } => "perimeter",
            Self::Rows { .. } => "rows",
        }
    }
}

/// Inputs of one planning run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementRequest {
    /// Target area.
    pub boundary: Polygon,
    /// Footprints in placement order.
    pub footprints: Vec<Footprint>,
    /// Existing occupied regions.
    pub obstacles: Vec<Obstacle>,
    /// Candidate source.
    pub mode: TravelMode,
}

impl PlacementRequest {
    /// Creates a perimeter walk request.
    pub fn perimeter(boundary: Polygon, from: Point2, to: Point2) -> Self {
        Self {
            boundary,
            footprints: Vec::new(),
            obstacles: Vec::new(),
            mode: TravelMode::Perimeter { from, to },
        }
    }

    /// Creates a row packing request.
    pub fn rows(boundary: Polygon, start: Point2, end: Point2, row_width: f64) -> Self {
        Self {
            boundary,
            footprints: Vec::new(),
            obstacles: Vec::new(),
            mode: TravelMode::Rows {
                start,
                end,
                row_width,
            },
        }
    }

    /// Appends a footprint.
    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprints.push(footprint);
        self
    }

    /// Appends footprints.
    pub fn with_footprints(mut self, footprints: impl IntoIterator<Item = Footprint>) -> Self {
        self.footprints.extend(footprints);
        self
    }

    /// Appends an obstacle.
    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    /// Appends obstacles.
    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = Obstacle>) -> Self {
        self.obstacles.extend(obstacles);
        self
    }

    /// Returns the number of fixed-count copies requested.
    pub fn requested_count(&self) -> usize {
        self.footprints.iter().filter_map(|f| f.count()).sum()
    }

    /// Checks every precondition and builds the lanes.
    pub fn prepare(&self, config: &Config) -> Result<Vec<Lane>> {
        config.validate()?;
        self.boundary.validate()?;
        for footprint in &self.footprints {
            footprint.validate()?;
        }
        for obstacle in &self.obstacles {
            obstacle.validate()?;
        }

        match &self.mode {
            TravelMode::Perimeter { from, to } => {
                let side = match config.wall_side {
                    WallSide::Auto => self.boundary.inward_side(),
                    WallSide::Left => Side::Left,
                    WallSide::Right => Side::Right,
                };
                perimeter_lanes(&self.boundary, from, to, config.snap_tolerance, side)
            }
            TravelMode::Rows {
                start,
                end,
                row_width,
            } => row_lanes(&self.boundary, start, end, *row_width),
        }
    }
}
