//! Geometry kernel: points, vectors, extents and segments.

use std::f64::consts::FRAC_PI_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D coordinate.
pub type Point2 = nalgebra::Point2<f64>;

/// A 2D direction or displacement.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Lengths below this are treated as zero.
pub const LENGTH_EPSILON: f64 = 1e-12;

/// Planar helpers nalgebra does not provide for 2D vectors.
pub trait PlanarVector {
    /// Returns the vector rotated a quarter turn counter-clockwise.
    fn perpendicular(&self) -> Vector2;

    /// Returns the angle from the positive x axis in radians, in `(-π, π]`.
    fn angle_from_x(&self) -> f64;
}

impl PlanarVector for Vector2 {
    fn perpendicular(&self) -> Vector2 {
        Vector2::new(-self.y, self.x)
    }

    fn angle_from_x(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

/// Side of a directed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// Counter-clockwise of the direction.
    Left,
    /// Clockwise of the direction.
    Right,
}

impl Side {
    /// Returns the unit normal pointing to this side of `direction`.
    pub fn normal(self, direction: &Vector2) -> Vector2 {
        match self {
            Self::Left => direction.perpendicular(),
            Self::Right => -direction.perpendicular(),
        }
    }

    /// Returns the opposite side.
    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Sine and cosine with exact values at multiples of a quarter turn.
///
/// Footprints are mostly rotated by 0°/90°/180°/270°, where `f64::sin_cos`
/// leaves residues around 1e-16 that would break the touching-extent rule.
pub fn sin_cos_snapped(angle: f64) -> (f64, f64) {
    let quarters = (angle / FRAC_PI_2).round();
    if (angle - quarters * FRAC_PI_2).abs() < 1e-12 {
        match (quarters as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        }
    } else {
        angle.sin_cos()
    }
}

/// Axis-aligned bounding box.
///
/// `min` is component-wise less than or equal to `max`. Zero-area extents
/// are valid and stand for point or line obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extent {
    /// Lower-left corner.
    pub min: Point2,
    /// Upper-right corner.
    pub max: Point2,
}

impl Extent {
    /// Creates an extent from min/max coordinates. Swapped bounds are reordered.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: Point2::new(min_x.min(max_x), min_y.min(max_y)),
            max: Point2::new(min_x.max(max_x), min_y.max(max_y)),
        }
    }

    /// Creates an extent from two opposite corners.
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Creates an extent of the given size centered on `center`.
    pub fn centered(center: Point2, width: f64, height: f64) -> Self {
        let hw = width.abs() / 2.0;
        let hh = height.abs() / 2.0;
        Self::new(center.x - hw, center.y - hh, center.x + hw, center.y + hh)
    }

    /// Returns the width (x span).
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the height (y span).
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the area.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns the center point.
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns the four corners counter-clockwise from `min`.
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// Returns true unless the extents are fully separated on x or y.
    ///
    /// Touching extents overlap, so two placements can never sit at zero gap.
    pub fn overlaps(&self, other: &Extent) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }

    /// Returns true if every coordinate is finite and `min <= max` on both axes.
    ///
    /// [`Extent::new`] always produces valid bounds for finite input; direct
    /// field construction may not.
    pub fn is_valid(&self) -> bool {
        let finite = [self.min.x, self.min.y, self.max.x, self.max.y]
            .iter()
            .all(|v| v.is_finite());
        finite && self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

/// Min/max reduction over a point sequence. `None` for an empty sequence.
pub fn extent_of<'a, I>(points: I) -> Option<Extent>
where
    I: IntoIterator<Item = &'a Point2>,
{
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let mut extent = Extent {
        min: *first,
        max: *first,
    };
    for p in iter {
        extent.min.x = extent.min.x.min(p.x);
        extent.min.y = extent.min.y.min(p.y);
        extent.max.x = extent.max.x.max(p.x);
        extent.max.y = extent.max.y.max(p.y);
    }
    Some(extent)
}

/// Symmetric overlap test; touching extents overlap.
pub fn overlaps(a: &Extent, b: &Extent) -> bool {
    a.overlaps(b)
}

/// Rotates a point about `pivot` by `angle` radians.
pub fn rotate_point(point: &Point2, pivot: &Point2, angle: f64) -> Point2 {
    let (sin_r, cos_r) = sin_cos_snapped(angle);
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    Point2::new(
        pivot.x + dx * cos_r - dy * sin_r,
        pivot.y + dx * sin_r + dy * cos_r,
    )
}

/// Rotates a vector by `angle` radians.
pub fn rotate_vector(vector: &Vector2, angle: f64) -> Vector2 {
    let (sin_r, cos_r) = sin_cos_snapped(angle);
    Vector2::new(
        vector.x * cos_r - vector.y * sin_r,
        vector.x * sin_r + vector.y * cos_r,
    )
}

/// Returns the four corners of `extent` rotated about `pivot` by `angle` radians.
pub fn rotated_corners(extent: &Extent, pivot: &Point2, angle: f64) -> [Point2; 4] {
    if angle == 0.0 {
        return extent.corners();
    }
    extent.corners().map(|c| rotate_point(&c, pivot, angle))
}

/// Rotates the corners of `extent` about `pivot` and re-derives the axis-aligned extent.
///
/// A zero angle returns `extent` unchanged.
pub fn rotated_extent(extent: &Extent, pivot: &Point2, angle: f64) -> Extent {
    if angle == 0.0 {
        return *extent;
    }
    let corners = rotated_corners(extent, pivot, angle);
    // four corners, never empty
    extent_of(corners.iter()).unwrap_or(*extent)
}

/// A directed line segment: one polygon edge, one lane, or one row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    /// Start point.
    pub start: Point2,
    /// End point.
    pub end: Point2,
}

impl Segment {
    /// Creates a new segment.
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Returns the displacement from start to end.
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    /// Returns the length.
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Returns true if the segment is shorter than [`LENGTH_EPSILON`].
    pub fn is_degenerate(&self) -> bool {
        self.length() < LENGTH_EPSILON
    }

    /// Returns the unit direction, or `None` for a degenerate segment.
    pub fn direction(&self) -> Option<Vector2> {
        self.vector().try_normalize(LENGTH_EPSILON)
    }

    /// Returns the direction angle from the x axis.
    pub fn angle(&self) -> f64 {
        self.vector().angle_from_x()
    }

    /// Returns the point at `distance` from the start along the segment.
    pub fn point_at(&self, distance: f64) -> Point2 {
        match self.direction() {
            Some(dir) => self.start + dir * distance,
            None => self.start,
        }
    }

    /// Returns the distance along the segment of the closest point to `point`,
    /// clamped to `[0, length]`.
    pub fn project(&self, point: &Point2) -> f64 {
        match self.direction() {
            Some(dir) => (point - self.start).dot(&dir).clamp(0.0, self.length()),
            None => 0.0,
        }
    }

    /// Returns the closest point on the segment to `point`.
    pub fn closest_point(&self, point: &Point2) -> Point2 {
        self.point_at(self.project(point))
    }

    /// Returns the Euclidean distance from `point` to the segment.
    pub fn distance_to(&self, point: &Point2) -> f64 {
        nalgebra::distance(&self.closest_point(point), point)
    }

    /// Returns the sub-segment between two distances along this segment.
    pub fn sub_segment(&self, from: f64, to: f64) -> Segment {
        Segment::new(self.point_at(from), self.point_at(to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_4, PI};

    #[test]
    fn test_extent_of() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 5.0),
            Point2::new(5.0, 8.0),
        ];
        let extent = extent_of(points.iter()).unwrap();
        assert_relative_eq!(extent.min.x, 0.0);
        assert_relative_eq!(extent.min.y, 0.0);
        assert_relative_eq!(extent.max.x, 10.0);
        assert_relative_eq!(extent.max.y, 8.0);

        let empty: [Point2; 0] = [];
        assert!(extent_of(empty.iter()).is_none());
    }

    #[test]
    fn test_extent_new_reorders() {
        let extent = Extent::new(4.0, 1.0, 2.0, 0.0);
        assert_eq!(extent.min, Point2::new(2.0, 0.0));
        assert_eq!(extent.max, Point2::new(4.0, 1.0));
        assert!(extent.is_valid());
    }

    #[test]
    fn test_extent_is_valid() {
        let inverted = Extent {
            min: Point2::new(4.0, 1.0),
            max: Point2::new(2.0, 0.0),
        };
        assert!(!inverted.is_valid());

        let nan = Extent {
            min: Point2::new(f64::NAN, 0.0),
            max: Point2::new(1.0, 1.0),
        };
        assert!(!nan.is_valid());

        let infinite = Extent::new(0.0, 0.0, f64::INFINITY, 1.0);
        assert!(!infinite.is_valid());

        assert!(Extent::new(3.0, 3.0, 3.0, 3.0).is_valid());
    }

    #[test]
    fn test_overlaps_symmetric() {
        let extents = [
            Extent::new(0.0, 0.0, 10.0, 10.0),
            Extent::new(5.0, 5.0, 15.0, 15.0),
            Extent::new(10.0, 0.0, 12.0, 2.0),
            Extent::new(20.0, 20.0, 21.0, 21.0),
            Extent::new(3.0, 3.0, 3.0, 3.0),
        ];
        for a in &extents {
            for b in &extents {
                assert_eq!(overlaps(a, b), overlaps(b, a));
            }
        }
    }

    #[test]
    fn test_touching_extents_overlap() {
        let a = Extent::new(0.0, 0.0, 2.0, 1.0);
        let b = Extent::new(2.0, 0.0, 4.0, 1.0);
        assert!(overlaps(&a, &b));

        let c = Extent::new(2.0 + 1e-9, 0.0, 4.0, 1.0);
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_degenerate_extent_overlaps() {
        let point = Extent::new(1.0, 1.0, 1.0, 1.0);
        let area = Extent::new(0.0, 0.0, 2.0, 2.0);
        assert!(overlaps(&point, &area));
        assert_relative_eq!(point.area(), 0.0);
    }

    #[test]
    fn test_rotated_extent_identity() {
        let extent = Extent::new(1.3, -2.7, 4.1, 0.9);
        let pivot = Point2::new(7.0, 3.0);
        assert_eq!(rotated_extent(&extent, &pivot, 0.0), extent);
    }

    #[test]
    fn test_rotated_extent_quarter_turn() {
        let extent = Extent::centered(Point2::new(5.0, 5.0), 4.0, 2.0);
        let rotated = rotated_extent(&extent, &Point2::new(5.0, 5.0), PI / 2.0);
        assert_eq!(rotated, Extent::new(4.0, 3.0, 6.0, 7.0));
    }

    #[test]
    fn test_rotated_extent_45_degrees() {
        let extent = Extent::new(0.0, 0.0, 10.0, 10.0);
        let rotated = rotated_extent(&extent, &Point2::origin(), FRAC_PI_4);
        let half_diag = 10.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(rotated.min.x, -half_diag, epsilon = 1e-9);
        assert_relative_eq!(rotated.min.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(rotated.max.x, half_diag, epsilon = 1e-9);
        assert_relative_eq!(rotated.max.y, 10.0 * std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_sin_cos_snapped() {
        assert_eq!(sin_cos_snapped(PI / 2.0), (1.0, 0.0));
        assert_eq!(sin_cos_snapped(PI), (0.0, -1.0));
        assert_eq!(sin_cos_snapped(-PI / 2.0), (-1.0, 0.0));
        let (s, c) = sin_cos_snapped(FRAC_PI_4);
        assert_relative_eq!(s, c);
    }

    #[test]
    fn test_vector_helpers() {
        let v = Vector2::new(3.0, 4.0);
        assert_relative_eq!(v.normalize().norm(), 1.0);
        assert_eq!(v.perpendicular(), Vector2::new(-4.0, 3.0));
        assert_relative_eq!(v.dot(&v.perpendicular()), 0.0);
        assert_relative_eq!(Vector2::new(0.0, 1.0).angle_from_x(), PI / 2.0);
        assert_eq!(Side::Left.normal(&Vector2::x()), Vector2::y());
        assert_eq!(Side::Right.normal(&Vector2::x()), -Vector2::y());
    }

    #[test]
    fn test_segment_projection() {
        let seg = Segment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        assert_relative_eq!(seg.length(), 10.0);
        assert_relative_eq!(seg.project(&Point2::new(3.0, 2.0)), 3.0);
        assert_relative_eq!(seg.project(&Point2::new(-3.0, 2.0)), 0.0);
        assert_relative_eq!(seg.distance_to(&Point2::new(3.0, 2.0)), 2.0);
        assert_relative_eq!(seg.distance_to(&Point2::new(13.0, 4.0)), 5.0);

        let sub = seg.sub_segment(2.0, 5.0);
        assert_eq!(sub.start, Point2::new(2.0, 0.0));
        assert_eq!(sub.end, Point2::new(5.0, 0.0));
    }

    #[test]
    fn test_degenerate_segment() {
        let seg = Segment::new(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0));
        assert!(seg.is_degenerate());
        assert!(seg.direction().is_none());
        assert_relative_eq!(seg.distance_to(&Point2::new(4.0, 5.0)), 5.0);
    }
}
