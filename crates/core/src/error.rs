//! Error types for wallpack.

use thiserror::Error;

/// Result type alias for wallpack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition failures detected before any placement is attempted.
///
/// A run that returns one of these has committed nothing. Footprints that
/// simply find no room are not errors; they are listed in
/// [`PlanResult::unplaced`](crate::PlanResult::unplaced).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Boundary polygon is open, has fewer than 3 vertices, or non-finite coordinates.
    #[error("Invalid boundary: {0}")]
    InvalidBoundary(String),

    /// A perimeter reference point is farther than the snap tolerance from every edge.
    #[error("Point ({x}, {y}) is not within {tolerance} of the boundary")]
    PointNotOnBoundary {
        /// X coordinate of the rejected point.
        x: f64,
        /// Y coordinate of the rejected point.
        y: f64,
        /// Tolerance that was applied.
        tolerance: f64,
    },

    /// Footprint with non-positive or non-finite length or width.
    #[error("Degenerate footprint: {0}")]
    DegenerateFootprint(String),

    /// Zero-length edge or zero-length packing direction.
    #[error("Degenerate segment: {0}")]
    DegenerateSegment(String),

    /// Obstacle with non-finite coordinates or inverted bounds.
    #[error("Invalid obstacle: {0}")]
    InvalidObstacle(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}
