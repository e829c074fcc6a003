//! Planning result representation.

use crate::footprint::FootprintId;
use crate::placement::Placement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a planning run.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanResult {
    /// Accepted placements in commit order.
    pub placements: Vec<Placement>,

    /// Number of fixed-count footprint copies requested.
    pub requested: usize,

    /// Number of placements made by fill requests.
    pub filled: usize,

    /// One entry per fixed-count copy that could not be placed.
    pub unplaced: Vec<FootprintId>,

    /// Number of lanes the planner walked (summed over passes).
    pub lanes_visited: usize,

    /// Whether the run stopped on a cancellation request.
    pub cancelled: bool,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl PlanResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every fixed-count copy was placed.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Returns the number of placements (fill copies included).
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns the number of unplaced copies.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// Returns true if at least one footprint was placed.
    pub fn is_successful(&self) -> bool {
        !self.placements.is_empty()
    }

    /// Returns the placements of one footprint.
    pub fn placements_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Placement> + 'a {
        self.placements.iter().filter(move |p| p.footprint_id == id)
    }

    /// Returns the unplaced footprint IDs without duplicates, in first-seen order.
    pub fn unplaced_ids(&self) -> Vec<FootprintId> {
        let mut seen = std::collections::HashSet::new();
        self.unplaced
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect()
    }

    /// Returns a summary of this result.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary::from(self)
    }
}

/// Summary statistics for a planning run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanSummary {
    /// Fixed-count copies requested.
    pub total_requested: usize,
    /// Placements made (fill copies included).
    pub total_placed: usize,
    /// Placements made by fill requests.
    pub total_filled: usize,
    /// Fixed-count copies left unplaced.
    pub total_unplaced: usize,
    /// Lanes walked.
    pub lanes_visited: usize,
    /// Computation time in milliseconds.
    pub time_ms: u64,
    /// Whether the run was cancelled.
    pub cancelled: bool,
}

impl From<&PlanResult> for PlanSummary {
    fn from(result: &PlanResult) -> Self {
        Self {
            total_requested: result.requested,
            total_placed: result.placements.len(),
            total_filled: result.filled,
            total_unplaced: result.unplaced.len(),
            lanes_visited: result.lanes_visited,
            time_ms: result.computation_time_ms,
            cancelled: result.cancelled,
        }
    }
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "placed {} of {} requested",
            self.total_placed.saturating_sub(self.total_filled),
            self.total_requested
        )?;
        if self.total_filled > 0 {
            write!(f, ", {} filled", self.total_filled)?;
        }
        if self.total_unplaced > 0 {
            write!(f, ", {} unplaced", self.total_unplaced)?;
        }
        if self.cancelled {
            write!(f, " (cancelled)")?;
        }
        Ok(())
    }
}
