//! # wallpack 2D
//!
//! Places rectangular equipment footprints inside a room outline, either
//! along its walls or in parallel rows across its floor.
//!
//! ## Features
//!
//! - Perimeter walk between two boundary reference points
//! - Row packing along a direction given by two points
//! - Orientation choice per position (long axis along the lane first)
//! - Collision checks against caller obstacles and earlier placements
//! - Configurable retry and exhaustion policies
//! - Fill requests, per-footprint gaps and insertion base points
//!
//! ## Quick Start
//!
//! ```rust
//! use wallpack_d2::{Footprint, PlacementRequest, Planner, Point2, Polygon};
//!
//! let room = Polygon::rectangle(10.0, 10.0);
//! let request = PlacementRequest::perimeter(room, Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))
//!     .with_footprint(Footprint::new("cabinet", 2.0, 1.0).with_count(3));
//!
//! let result = Planner::default_config().plan(&request).unwrap();
//! assert_eq!(result.placements.len(), 3);
//! println!("{}", result.summary());
//! ```
//!
//! ## Row Packing
//!
//! ```rust
//! use wallpack_d2::{Footprint, PlacementRequest, Planner, Point2, Polygon};
//!
//! let room = Polygon::rectangle(10.0, 6.0);
//! let request = PlacementRequest::rows(room, Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), 2.0)
//!     .with_footprint(Footprint::new("desk", 2.0, 1.5).with_rotation(false).with_fill());
//!
//! let result = Planner::default_config().plan(&request).unwrap();
//! assert_eq!(result.placements.len(), 12);
//! ```

pub mod lane;
pub mod obstacle;
pub mod perimeter;
pub mod planner;
pub mod request;
pub mod rows;

// Re-exports
pub use lane::Lane;
pub use obstacle::{Obstacle, ObstacleEntry, ObstacleId, ObstacleSet};
pub use perimeter::{perimeter_lanes, segment_index_at_point, segments, travel_order};
pub use planner::Planner;
pub use request::{PlacementRequest, TravelMode};
pub use rows::{row_lanes, rows, MAX_ROWS};
pub use wallpack_core::{
    point_in_polygon, rotated_extent, CancelCheck, Config, ContainmentMode, Error,
    ExhaustionPolicy, Extent, Footprint, FootprintId, Placement, PlanResult, PlanSummary, Point2,
    Polygon, ProgressCallback, ProgressInfo, RejectPolicy, Result, Segment, Side, Vector2,
    WallSide,
};
