//! Planner configuration and progress reporting.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default gap between consecutive placements.
pub const DEFAULT_GAP: f64 = 0.1;

/// Default distance within which a reference point snaps onto the boundary.
pub const DEFAULT_SNAP_TOLERANCE: f64 = 0.2;

/// What to do when a candidate fails containment or collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RejectPolicy {
    /// Advance by the retry step and try again on the same lane.
    #[default]
    Retry,
    /// Give up on the lane for this footprint.
    NextSegment,
}

/// What to do when the retry budget of a lane runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExhaustionPolicy {
    /// Keep the footprint first in the queue for the next lane.
    #[default]
    Requeue,
    /// Report the footprint as unplaced; the next one continues on the lane.
    Discard,
}

/// Which points must lie inside the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ContainmentMode {
    /// Corners of the axis-aligned extent of the rotated footprint.
    #[default]
    ExtentCorners,
    /// Corners of the rotated footprint itself.
    FootprintCorners,
}

/// Which side of a perimeter edge footprints are laid on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WallSide {
    /// Interior side, from the boundary's winding.
    #[default]
    Auto,
    /// Left of the edge direction.
    Left,
    /// Right of the edge direction.
    Right,
}

/// Planner configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Minimum gap between consecutive placements on a lane.
    pub gap: f64,

    /// Offset of the first candidate on each lane (`None` = half the gap).
    pub leading_gap: Option<f64>,

    /// Fixed advance after a placement (`None` = placed dimension + gap).
    pub step: Option<f64>,

    /// Advance after a rejected candidate (`None` = half the normal step).
    pub retry_step: Option<f64>,

    /// Rejections tolerated per lane before the exhaustion policy applies.
    pub max_attempts_per_segment: usize,

    /// Distance between the lane line and the back of each footprint.
    pub wall_inset: f64,

    /// Distance from the boundary still counted as inside.
    pub containment_tolerance: f64,

    /// Distance within which a perimeter reference point matches an edge.
    pub snap_tolerance: f64,

    /// Reaction to a rejected candidate.
    pub reject_policy: RejectPolicy,

    /// Reaction to an exhausted retry budget.
    pub exhaustion_policy: ExhaustionPolicy,

    /// Containment test variant.
    pub containment: ContainmentMode,

    /// Side of perimeter edges to place on.
    pub wall_side: WallSide,

    /// Also try the other fitting orientation when the preferred one is rejected.
    pub rotate_on_conflict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            leading_gap: None,
            step: None,
            retry_step: None,
            max_attempts_per_segment: 256,
            wall_inset: 0.0,
            containment_tolerance: 1e-9,
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
            reject_policy: RejectPolicy::default(),
            exhaustion_policy: ExhaustionPolicy::default(),
            containment: ContainmentMode::default(),
            wall_side: WallSide::default(),
            rotate_on_conflict: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the gap between placements.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the offset of the first candidate on each lane.
    pub fn with_leading_gap(mut self, leading_gap: f64) -> Self {
        self.leading_gap = Some(leading_gap);
        self
    }

    /// Sets a fixed advance after each placement.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Sets the advance after a rejected candidate.
    pub fn with_retry_step(mut self, retry_step: f64) -> Self {
        self.retry_step = Some(retry_step);
        self
    }

    /// Sets the per-lane rejection budget.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts_per_segment = attempts;
        self
    }

    /// Sets the distance between the lane and the back of each footprint.
    pub fn with_wall_inset(mut self, inset: f64) -> Self {
        self.wall_inset = inset;
        self
    }

    /// Sets the containment tolerance.
    pub fn with_containment_tolerance(mut self, tolerance: f64) -> Self {
        self.containment_tolerance = tolerance;
        self
    }

    /// Sets the reference point snap tolerance.
    pub fn with_snap_tolerance(mut self, tolerance: f64) -> Self {
        self.snap_tolerance = tolerance;
        self
    }

    /// Sets the reject policy.
    pub fn with_reject_policy(mut self, policy: RejectPolicy) -> Self {
        self.reject_policy = policy;
        self
    }

    /// Sets the exhaustion policy.
    pub fn with_exhaustion_policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.exhaustion_policy = policy;
        self
    }

    /// Sets the containment mode.
    pub fn with_containment(mut self, mode: ContainmentMode) -> Self {
        self.containment = mode;
        self
    }

    /// Sets the wall side for perimeter placement.
    pub fn with_wall_side(mut self, side: WallSide) -> Self {
        self.wall_side = side;
        self
    }

    /// Enables trying the other orientation on conflict.
    pub fn with_rotate_on_conflict(mut self, enabled: bool) -> Self {
        self.rotate_on_conflict = enabled;
        self
    }

    /// Returns the offset of the first candidate on each lane.
    pub fn effective_leading_gap(&self) -> f64 {
        self.leading_gap.unwrap_or(self.gap / 2.0)
    }

    /// Returns the advance after placing something `along` long with `gap` after it.
    pub fn advance(&self, along: f64, gap: f64) -> f64 {
        self.step.unwrap_or(along + gap)
    }

    /// Returns the advance after a rejected candidate `along` long.
    pub fn retry_advance(&self, along: f64, gap: f64) -> f64 {
        self.retry_step
            .unwrap_or_else(|| self.advance(along, gap) / 2.0)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let non_negative = |name: &str, v: f64| -> Result<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, v
                )))
            }
        };
        let positive = |name: &str, v: f64| -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, v
                )))
            }
        };

        non_negative("gap", self.gap)?;
        if let Some(v) = self.leading_gap {
            non_negative("leading_gap", v)?;
        }
        if let Some(v) = self.step {
            positive("step", v)?;
        }
        if let Some(v) = self.retry_step {
            positive("retry_step", v)?;
        }
        non_negative("wall_inset", self.wall_inset)?;
        non_negative("containment_tolerance", self.containment_tolerance)?;
        non_negative("snap_tolerance", self.snap_tolerance)?;

        if self.max_attempts_per_segment == 0 {
            return Err(Error::InvalidConfig(
                "max_attempts_per_segment must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// Progress callback for a planning run.
pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

/// Cooperative cancellation predicate, polled once per loop iteration.
pub type CancelCheck = Box<dyn Fn() -> bool + Send + Sync>;

/// Progress information during planning.
#[derive(Debug, Clone, Default)]
pub struct ProgressInfo {
    /// Lane about to be walked (0-based).
    pub lane: usize,
    /// Total lanes in the travel order.
    pub total_lanes: usize,
    /// Footprints placed so far.
    pub items_placed: usize,
    /// Fixed-count footprints requested.
    pub total_items: usize,
    /// Current phase description.
    pub phase: String,
    /// Whether the planner is still running.
    pub running: bool,
}

impl ProgressInfo {
    /// Creates a new progress info with default values.
    pub fn new() -> Self {
        Self {
            running: true,
            ..Default::default()
        }
    }

    /// Sets the lane info.
    pub fn with_lane(mut self, current: usize, total: usize) -> Self {
        self.lane = current;
        self.total_lanes = total;
        self
    }

    /// Sets the items placed info.
    pub fn with_items(mut self, placed: usize, total: usize) -> Self {
        self.items_placed = placed;
        self.total_items = total;
        self
    }

    /// Sets the phase description.
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = phase.into();
        self
    }

    /// Marks the planner as finished.
    pub fn finished(mut self) -> Self {
        self.running = false;
        self
    }

    /// Fraction of lanes walked (0.0 to 1.0).
    pub fn progress_percent(&self) -> f64 {
        if self.total_lanes > 0 {
            self.lane as f64 / self.total_lanes as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_relative_eq!(config.gap, 0.1);
        assert_relative_eq!(config.effective_leading_gap(), 0.05);
        assert_relative_eq!(config.advance(2.0, 0.1), 2.1);
        assert_relative_eq!(config.retry_advance(2.0, 0.1), 1.05);
        assert_eq!(config.reject_policy, RejectPolicy::Retry);
        assert_eq!(config.exhaustion_policy, ExhaustionPolicy::Requeue);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::new()
            .with_gap(0.5)
            .with_leading_gap(0.0)
            .with_step(3.0)
            .with_retry_step(0.25)
            .with_reject_policy(RejectPolicy::NextSegment)
            .with_exhaustion_policy(ExhaustionPolicy::Discard);
        assert_relative_eq!(config.effective_leading_gap(), 0.0);
        assert_relative_eq!(config.advance(2.0, 0.5), 3.0);
        assert_relative_eq!(config.retry_advance(2.0, 0.5), 0.25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(Config::new().with_gap(-1.0).validate().is_err());
        assert!(Config::new().with_step(0.0).validate().is_err());
        assert!(Config::new().with_retry_step(f64::NAN).validate().is_err());
        assert!(Config::new().with_max_attempts(0).validate().is_err());
        assert!(matches!(
            Config::new().with_wall_inset(-0.1).validate(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_progress_info() {
        let info = ProgressInfo::new()
            .with_lane(1, 4)
            .with_items(2, 5)
            .with_phase("perimeter");
        assert!(info.running);
        assert_relative_eq!(info.progress_percent(), 0.25);
        assert!(!info.finished().running);
    }
}
