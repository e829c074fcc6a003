//! Obstacle index for candidate collision checks.
//!
//! Holds the occupied regions of one planning run as axis-aligned extents:
//! caller-supplied obstacles first, then every placement as it commits.
//! Small sets are scanned linearly; past [`LINEAR_SCAN_LIMIT`] entries the
//! query goes through an R*-tree. Both paths apply the same touching-counts
//! [`overlaps`] predicate, so they always agree.

use rstar::{RTree, RTreeObject, AABB};
use wallpack_core::{overlaps, Error, Extent, Point2, Polygon, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Entry count up to which queries use a linear scan.
pub const LINEAR_SCAN_LIMIT: usize = 32;

/// Opaque obstacle identifier.
pub type ObstacleId = String;

/// A caller-supplied obstacle: walls, fixtures, existing equipment or a forbidden zone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obstacle {
    /// Identifier.
    pub id: ObstacleId,
    /// Occupied extent.
    pub extent: Extent,
}

impl Obstacle {
    /// Creates an obstacle from an extent.
    pub fn new(id: impl Into<ObstacleId>, extent: Extent) -> Self {
        Self {
            id: id.into(),
            extent,
        }
    }

    /// Creates an obstacle covering a forbidden-zone polygon's extent.
    ///
    /// Returns `None` for an empty polygon.
    pub fn from_polygon(id: impl Into<ObstacleId>, zone: &Polygon) -> Option<Self> {
        zone.extent().map(|extent| Self::new(id, extent))
    }

    /// Creates a zero-area point obstacle.
    pub fn point(id: impl Into<ObstacleId>, at: Point2) -> Self {
        Self::new(id, Extent::from_corners(at, at))
    }

    /// Checks that the extent is finite with `min <= max`.
    pub fn validate(&self) -> Result<()> {
        if self.extent.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidObstacle(format!(
                "Obstacle '{}' has extent ({}, {})-({}, {}); coordinates must be finite with min <= max",
                self.id, self.extent.min.x, self.extent.min.y, self.extent.max.x, self.extent.max.y
            )))
        }
    }
}

/// An entry in the obstacle index.
#[derive(Debug, Clone)]
pub struct ObstacleEntry {
    /// Insertion order.
    pub index: usize,
    /// Obstacle or placement identifier.
    pub id: ObstacleId,
    /// Occupied extent.
    pub extent: Extent,
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.extent.min.x, self.extent.min.y],
            [self.extent.max.x, self.extent.max.y],
        )
    }
}

/// Append-only obstacle set private to one planning run.
#[derive(Debug)]
pub struct ObstacleSet {
    entries: Vec<ObstacleEntry>,
    tree: RTree<ObstacleEntry>,
}

impl ObstacleSet {
    /// Creates a new empty set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            tree: RTree::new(),
        }
    }

    /// Creates a set seeded with caller obstacles, in order.
    pub fn from_obstacles<'a, I>(obstacles: I) -> Self
    where
        I: IntoIterator<Item = &'a Obstacle>,
    {
        let entries: Vec<ObstacleEntry> = obstacles
            .into_iter()
            .enumerate()
            .map(|(index, o)| ObstacleEntry {
                index,
                id: o.id.clone(),
                extent: o.extent,
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries.clone()),
            entries,
        }
    }

    /// Registers an occupied extent.
    pub fn insert(&mut self, id: impl Into<ObstacleId>, extent: Extent) {
        let entry = ObstacleEntry {
            index: self.entries.len(),
            id: id.into(),
            extent,
        };
        self.tree.insert(entry.clone());
        self.entries.push(entry);
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `extent` overlaps any entry. Early exit on the first hit.
    pub fn intersects_any(&self, extent: &Extent) -> bool {
        if self.entries.len() <= LINEAR_SCAN_LIMIT {
            self.entries.iter().any(|e| overlaps(&e.extent, extent))
        } else {
            self.tree
                .locate_in_envelope_intersecting(&envelope_of(extent))
                .any(|e| overlaps(&e.extent, extent))
        }
    }

    /// Returns the earliest-inserted entry overlapping `extent`.
    pub fn first_intersecting(&self, extent: &Extent) -> Option<&ObstacleEntry> {
        if self.entries.len() <= LINEAR_SCAN_LIMIT {
            self.entries.iter().find(|e| overlaps(&e.extent, extent))
        } else {
            self.tree
                .locate_in_envelope_intersecting(&envelope_of(extent))
                .filter(|e| overlaps(&e.extent, extent))
                .min_by_key(|e| e.index)
        }
    }

    /// Returns all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ObstacleEntry> {
        self.entries.iter()
    }
}

impl Default for ObstacleSet {
    fn default() -> Self {
        Self::new()
    }
}

fn envelope_of(extent: &Extent) -> AABB<[f64; 2]> {
    AABB::from_corners(
        [extent.min.x, extent.min.y],
        [extent.max.x, extent.max.y],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: usize) -> Vec<Obstacle> {
        (0..n)
            .map(|i| {
                let x = (i % 10) as f64 * 3.0;
                let y = (i / 10) as f64 * 3.0;
                Obstacle::new(format!("o{}", i), Extent::new(x, y, x + 1.0, y + 1.0))
            })
            .collect()
    }

    #[test]
    fn test_obstacle_set_new() {
        let set = ObstacleSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.intersects_any(&Extent::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn test_obstacle_set_insert() {
        let mut set = ObstacleSet::new();
        set.insert("wall", Extent::new(0.0, 0.0, 10.0, 0.2));
        assert!(!set.is_empty());
        assert_eq!(set.len(), 1);
        assert!(set.intersects_any(&Extent::new(5.0, 0.1, 6.0, 1.0)));
        assert!(!set.intersects_any(&Extent::new(5.0, 0.3, 6.0, 1.0)));
    }

    #[test]
    fn test_touching_counts_as_hit() {
        let set = ObstacleSet::from_obstacles(&[Obstacle::new("a", Extent::new(2.0, 0.0, 4.0, 1.0))]);
        assert!(set.intersects_any(&Extent::new(0.0, 0.0, 2.0, 1.0)));
        assert!(set.intersects_any(&Extent::new(4.0, 1.0, 5.0, 2.0)));
        assert!(!set.intersects_any(&Extent::new(4.01, 0.0, 5.0, 1.0)));
    }

    #[test]
    fn test_point_obstacle() {
        let set = ObstacleSet::from_obstacles(&[Obstacle::point("pillar", Point2::new(3.0, 3.0))]);
        assert!(set.intersects_any(&Extent::new(2.0, 2.0, 4.0, 4.0)));
        assert!(!set.intersects_any(&Extent::new(3.5, 2.0, 4.0, 4.0)));
    }

    #[test]
    fn test_from_polygon() {
        let zone = Polygon::from_coords(&[(1.0, 1.0), (4.0, 2.0), (2.0, 5.0)]);
        let obstacle = Obstacle::from_polygon("zone", &zone).unwrap();
        assert_eq!(obstacle.extent, Extent::new(1.0, 1.0, 4.0, 5.0));
        assert!(Obstacle::from_polygon("empty", &Polygon::new(vec![])).is_none());
    }

    #[test]
    fn test_validate() {
        assert!(Obstacle::new("column", Extent::new(2.0, 0.0, 4.0, 1.0)).validate().is_ok());
        assert!(Obstacle::point("pillar", Point2::new(3.0, 3.0)).validate().is_ok());

        let nan = Obstacle::point("lost", Point2::new(f64::NAN, f64::NAN));
        assert!(matches!(nan.validate(), Err(Error::InvalidObstacle(_))));

        let inverted = Obstacle {
            id: "column".into(),
            extent: Extent {
                min: Point2::new(4.0, 1.0),
                max: Point2::new(2.0, 0.0),
            },
        };
        assert!(matches!(inverted.validate(), Err(Error::InvalidObstacle(_))));
    }

    #[test]
    fn test_first_intersecting_is_earliest() {
        let mut set = ObstacleSet::new();
        set.insert("first", Extent::new(0.0, 0.0, 1.0, 1.0));
        set.insert("second", Extent::new(0.5, 0.5, 2.0, 2.0));
        let hit = set.first_intersecting(&Extent::new(0.8, 0.8, 1.5, 1.5)).unwrap();
        assert_eq!(hit.id, "first");
    }

    #[test]
    fn test_tree_and_scan_agree() {
        let obstacles = grid(100);
        let big = ObstacleSet::from_obstacles(&obstacles);
        assert!(big.len() > LINEAR_SCAN_LIMIT);

        let queries = [
            Extent::new(0.5, 0.5, 0.8, 0.8),
            Extent::new(1.5, 1.5, 2.5, 2.5),
            Extent::new(1.0, 0.0, 3.0, 0.5),
            Extent::new(27.0, 27.0, 40.0, 40.0),
            Extent::new(100.0, 100.0, 101.0, 101.0),
        ];
        for q in &queries {
            let scan = obstacles.iter().any(|o| overlaps(&o.extent, q));
            assert_eq!(big.intersects_any(q), scan);
            let first = obstacles.iter().position(|o| overlaps(&o.extent, q));
            assert_eq!(big.first_intersecting(q).map(|e| e.index), first);
        }
    }

    #[test]
    fn test_insert_after_bulk_load() {
        let mut set = ObstacleSet::from_obstacles(&grid(40));
        let extent = Extent::new(200.0, 200.0, 201.0, 201.0);
        assert!(!set.intersects_any(&extent));
        set.insert("placed#0", extent);
        assert!(set.intersects_any(&extent));
        assert_eq!(set.iter().last().map(|e| e.index), Some(40));
    }
}
