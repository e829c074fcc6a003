//! Greedy lane-walk placement planner.
//!
//! Lanes are walked in travel order. On each lane a running offset moves
//! forward from the leading gap; the footprint at the head of the queue is
//! tried there in its first fitting orientation, checked for containment and
//! collision, and committed on success. Rejections advance the offset by the
//! retry step until the per-lane budget runs out.

use crate::lane::Lane;
use crate::obstacle::ObstacleSet;
use crate::request::PlacementRequest;
use std::collections::VecDeque;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use wallpack_core::{
    rotate_vector, rotated_corners, rotated_extent, CancelCheck, Config, ContainmentMode,
    ExhaustionPolicy, Extent, Footprint, Orientation, Placement, PlanResult, Point2, Polygon,
    ProgressCallback, ProgressInfo, RejectPolicy, Result, Vector2,
};

/// Slack allowed when checking whether a footprint fits the rest of a lane.
const FIT_EPSILON: f64 = 1e-9;

/// Footprint placement planner.
pub struct Planner {
    config: Config,
    cancelled: Arc<AtomicBool>,
    cancel_check: Option<CancelCheck>,
}

impl Planner {
    /// Creates a new planner with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
            cancel_check: None,
        }
    }

    /// Creates a planner with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Adds a cancellation predicate, polled once per loop iteration.
    pub fn with_cancel_check(mut self, check: CancelCheck) -> Self {
        self.cancel_check = Some(check);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Requests cancellation of the run in progress.
    ///
    /// The flag is cleared when a new run starts.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Plans placements for `request`.
    ///
    /// Every precondition is checked before the first candidate is tried; on
    /// failure no placement is made.
    pub fn plan(&self, request: &PlacementRequest) -> Result<PlanResult> {
        self.run(request, None)
    }

    /// Plans placements for `request`, reporting progress once per lane.
    pub fn plan_with_progress(
        &self,
        request: &PlacementRequest,
        callback: ProgressCallback,
    ) -> Result<PlanResult> {
        self.run(request, Some(&callback))
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.cancel_check.as_ref().map_or(false, |check| check())
    }

    fn run(
        &self,
        request: &PlacementRequest,
        progress: Option<&ProgressCallback>,
    ) -> Result<PlanResult> {
        let start = Instant::now();

        // Reset cancellation flag
        self.cancelled.store(false, Ordering::Relaxed);

        let lanes = request.prepare(&self.config)?;
        log::debug!(
            "{} plan: {} lanes, {} footprint requests, {} obstacles",
            request.mode.name(),
            lanes.len(),
            request.footprints.len(),
            request.obstacles.len()
        );

        let mut run = Run::new(request);

        // Fixed counts first, in caller order
        let mut queue: VecDeque<Pending> = request
            .footprints
            .iter()
            .enumerate()
            .filter_map(|(index, f)| {
                f.count()
                    .filter(|&n| n > 0)
                    .map(|n| Pending {
                        index,
                        remaining: Some(n),
                    })
            })
            .collect();
        let mut cancelled = self.walk(&mut run, &lanes, &mut queue, "placing", progress);

        // Then one full walk per fill request
        if !cancelled {
            for (index, _) in request
                .footprints
                .iter()
                .enumerate()
                .filter(|(_, f)| f.is_fill())
            {
                let mut fill = VecDeque::from([Pending {
                    index,
                    remaining: None,
                }]);
                if self.walk(&mut run, &lanes, &mut fill, "filling", progress) {
                    cancelled = true;
                    break;
                }
            }
        }

        for pending in queue {
            let copies = pending.remaining.unwrap_or(0);
            let id = request.footprints[pending.index].id();
            log::warn!("{} copies of footprint '{}' left unplaced", copies, id);
            run.result
                .unplaced
                .extend(std::iter::repeat(id.clone()).take(copies));
        }

        let mut result = run.result;
        result.cancelled = cancelled;
        result.computation_time_ms = start.elapsed().as_millis() as u64;
        log::info!("{} plan: {}", request.mode.name(), result.summary());

        if let Some(callback) = progress {
            callback(
                ProgressInfo::new()
                    .with_phase(if cancelled { "Cancelled" } else { "Complete" })
                    .with_lane(lanes.len(), lanes.len())
                    .with_items(result.placements.len(), result.requested)
                    .finished(),
            );
        }

        Ok(result)
    }

    /// Walks all lanes for `queue`. Returns true if cancelled.
    fn walk(
        &self,
        run: &mut Run<'_>,
        lanes: &[Lane],
        queue: &mut VecDeque<Pending>,
        phase: &str,
        progress: Option<&ProgressCallback>,
    ) -> bool {
        for (lane_index, lane) in lanes.iter().enumerate() {
            if queue.is_empty() {
                break;
            }
            if self.is_cancelled() {
                return true;
            }
            if let Some(callback) = progress {
                callback(
                    ProgressInfo::new()
                        .with_phase(phase)
                        .with_lane(lane_index, lanes.len())
                        .with_items(run.result.placements.len(), run.result.requested),
                );
            }
            if self.walk_lane(run, lane_index, lane, queue) == LaneEnd::Cancelled {
                return true;
            }
        }
        false
    }

    fn walk_lane(
        &self,
        run: &mut Run<'_>,
        lane_index: usize,
        lane: &Lane,
        queue: &mut VecDeque<Pending>,
    ) -> LaneEnd {
        let Some(direction) = lane.direction() else {
            log::warn!(
                "skipping zero-length lane {} (source {})",
                lane_index,
                lane.source
            );
            return LaneEnd::Skipped;
        };
        run.result.lanes_visited += 1;

        let footprints = run.footprints;
        let length = lane.length();
        let mut offset = self.config.effective_leading_gap();
        let mut attempts = 0usize;
        log::debug!(
            "lane {} (source {}): length {:.3}, {} requests queued",
            lane_index,
            lane.source,
            length,
            queue.len()
        );

        while let Some(&head) = queue.front() {
            if self.is_cancelled() {
                return LaneEnd::Cancelled;
            }

            let footprint = &footprints[head.index];
            let gap = footprint.gap().unwrap_or(self.config.gap);
            let remaining = length - offset;
            let fitting: Vec<Orientation> = footprint
                .orientations()
                .into_iter()
                .filter(|o| o.along <= remaining + FIT_EPSILON)
                .collect();
            let Some(preferred) = fitting.first().copied() else {
                log::debug!(
                    "lane {}: no room for '{}' at offset {:.3}",
                    lane_index,
                    footprint.id(),
                    offset
                );
                return LaneEnd::NoRoom;
            };

            let tried = if self.config.rotate_on_conflict {
                &fitting[..]
            } else {
                &fitting[..1]
            };
            let mut accepted = None;
            for orientation in tried {
                let candidate = self.candidate(footprint, lane, &direction, offset, orientation);
                match run.check(&candidate, &self.config) {
                    Ok(()) => {
                        accepted = Some(candidate);
                        break;
                    }
                    Err(rejection) => log::debug!(
                        "lane {}: '{}' rejected at offset {:.3}: {}",
                        lane_index,
                        footprint.id(),
                        offset,
                        rejection
                    ),
                }
            }

            match accepted {
                Some(candidate) => {
                    run.commit(head.index, &candidate, lane_index);
                    offset += self.config.advance(candidate.along, gap);
                    match head.remaining {
                        Some(1) => {
                            queue.pop_front();
                        }
                        Some(n) => queue[0].remaining = Some(n - 1),
                        None => run.result.filled += 1,
                    }
                }
                None => {
                    attempts += 1;
                    let give_up = self.config.reject_policy == RejectPolicy::NextSegment
                        || attempts >= self.config.max_attempts_per_segment;
                    if !give_up {
                        offset += self.config.retry_advance(preferred.along, gap);
                        continue;
                    }

                    match (head.remaining, self.config.exhaustion_policy) {
                        (Some(copies), ExhaustionPolicy::Discard) => {
                            let id = footprint.id().clone();
                            log::warn!(
                                "discarding {} copies of footprint '{}' on lane {}",
                                copies,
                                id,
                                lane_index
                            );
                            run.result
                                .unplaced
                                .extend(std::iter::repeat(id).take(copies));
                            queue.pop_front();
                            attempts = 0;
                        }
                        _ => return LaneEnd::Exhausted,
                    }
                }
            }
        }

        LaneEnd::QueueEmpty
    }

    fn candidate(
        &self,
        footprint: &Footprint,
        lane: &Lane,
        direction: &Vector2,
        offset: f64,
        orientation: &Orientation,
    ) -> Candidate {
        let normal = lane.side.normal(direction);
        let center = lane.start()
            + direction * (offset + orientation.along / 2.0)
            + normal * (self.config.wall_inset + orientation.across / 2.0);
        let turn = if orientation.quarter_turn { FRAC_PI_2 } else { 0.0 };
        let rotation = (lane.segment.angle() + turn).rem_euclid(TAU);

        let local = Extent::centered(center, footprint.length(), footprint.width());
        Candidate {
            center,
            rotation,
            corners: rotated_corners(&local, &center, rotation),
            extent: rotated_extent(&local, &center, rotation),
            along: orientation.along,
        }
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::default_config()
    }
}

/// A footprint request waiting in the queue.
#[derive(Debug, Clone, Copy)]
struct Pending {
    index: usize,
    /// `None` for a fill request.
    remaining: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LaneEnd {
    QueueEmpty,
    NoRoom,
    Exhausted,
    Skipped,
    Cancelled,
}

/// One tested footprint position.
#[derive(Debug, Clone)]
struct Candidate {
    center: Point2,
    rotation: f64,
    corners: [Point2; 4],
    extent: Extent,
    along: f64,
}

#[derive(Debug)]
enum Rejection {
    OutsideBoundary,
    Collision(String),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutsideBoundary => write!(f, "outside boundary"),
            Self::Collision(id) => write!(f, "collides with '{}'", id),
        }
    }
}

/// Mutable state of one planning run.
struct Run<'a> {
    boundary: &'a Polygon,
    footprints: &'a [Footprint],
    obstacles: ObstacleSet,
    instances: Vec<usize>,
    result: PlanResult,
}

impl<'a> Run<'a> {
    fn new(request: &'a PlacementRequest) -> Self {
        let result = PlanResult {
            requested: request.requested_count(),
            ..PlanResult::default()
        };
        Self {
            boundary: &request.boundary,
            footprints: &request.footprints,
            obstacles: ObstacleSet::from_obstacles(&request.obstacles),
            instances: vec![0; request.footprints.len()],
            result,
        }
    }

    fn check(&self, candidate: &Candidate, config: &Config) -> std::result::Result<(), Rejection> {
        let points = match config.containment {
            ContainmentMode::ExtentCorners => candidate.extent.corners(),
            ContainmentMode::FootprintCorners => candidate.corners,
        };
        if !self
            .boundary
            .contains_all(&points, config.containment_tolerance)
        {
            return Err(Rejection::OutsideBoundary);
        }
        if let Some(hit) = self.obstacles.first_intersecting(&candidate.extent) {
            return Err(Rejection::Collision(hit.id.clone()));
        }
        Ok(())
    }

    fn commit(&mut self, index: usize, candidate: &Candidate, lane: usize) {
        let footprint = &self.footprints[index];
        let instance = self.instances[index];
        self.instances[index] += 1;

        let placement = Placement {
            footprint_id: footprint.id().clone(),
            instance,
            position: candidate.center + rotate_vector(footprint.base_offset(), candidate.rotation),
            center: candidate.center,
            rotation: candidate.rotation,
            extent: candidate.extent,
            lane,
        };
        log::info!(
            "placed '{}' #{} at ({:.3}, {:.3}), rotation {:.1} deg",
            placement.footprint_id,
            placement.instance,
            placement.position.x,
            placement.position.y,
            placement.rotation_deg()
        );

        self.obstacles
            .insert(placement.obstacle_key(), placement.extent);
        self.result.placements.push(placement);
    }
}
