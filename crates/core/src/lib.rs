//! # wallpack core
//!
//! Shared types for the wallpack footprint placement engine.
//!
//! ## Core Components
//!
//! - **Geometry kernel**: [`Point2`], [`Vector2`], [`Extent`], [`Segment`],
//!   [`extent_of`], [`overlaps`], [`rotated_extent`]
//! - **Boundary**: [`Polygon`] with the crossing-number [`point_in_polygon`] test
//! - **Requests and results**: [`Footprint`], [`Placement`], [`PlanResult`]
//! - **Configuration**: [`Config`] and its placement policies
//!
//! ## Boundary convention
//!
//! [`Polygon::contains`] treats points within the configured tolerance of an
//! edge as inside. The planner uses it for every containment check, so a
//! footprint may sit flush against any wall regardless of vertex order.
//!
//! ## Configuration
//!
//! ```rust
//! use wallpack_core::{Config, ExhaustionPolicy, RejectPolicy};
//!
//! let config = Config::new()
//!     .with_gap(0.1)
//!     .with_reject_policy(RejectPolicy::Retry)
//!     .with_exhaustion_policy(ExhaustionPolicy::Requeue);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod error;
pub mod footprint;
pub mod geometry;
pub mod placement;
pub mod polygon;
pub mod result;

// Re-exports
pub use config::{
    CancelCheck, Config, ContainmentMode, ExhaustionPolicy, ProgressCallback, ProgressInfo,
    RejectPolicy, WallSide,
};
pub use error::{Error, Result};
pub use footprint::{Footprint, FootprintId, Orientation};
pub use geometry::{
    extent_of, overlaps, rotate_point, rotate_vector, rotated_corners, rotated_extent,
    sin_cos_snapped, Extent, PlanarVector, Point2, Segment, Side, Vector2, LENGTH_EPSILON,
};
pub use placement::Placement;
pub use polygon::{point_in_polygon, Polygon, Winding};
pub use result::{PlanResult, PlanSummary};
