//! Boundary polygon and containment tests.

use crate::error::{Error, Result};
use crate::geometry::{extent_of, Extent, Point2, Segment, Side, LENGTH_EPSILON};
use geo::{Area, Coord, LineString, Polygon as GeoPolygon};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vertex order of a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Winding {
    /// Positive signed area.
    CounterClockwise,
    /// Negative signed area.
    Clockwise,
}

/// Crossing-number point-in-polygon test.
///
/// An edge counts when it straddles the horizontal ray through `point`
/// (one endpoint `y <= point.y`, the other `y > point.y`) and its intercept
/// lies strictly right of `point`. Horizontal edges never straddle and are
/// skipped before the division. Odd crossings mean inside.
///
/// Points exactly on an edge get whatever the half-open rule gives them;
/// use [`Polygon::contains`] for the inclusive convention.
pub fn point_in_polygon(vertices: &[Point2], point: &Point2) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    for i in 0..n {
        let a = &vertices[i];
        let b = &vertices[(i + 1) % n];
        if a.y == b.y {
            continue;
        }
        if (a.y <= point.y) != (b.y <= point.y) {
            let at_x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if at_x > point.x {
                inside = !inside;
            }
        }
    }
    inside
}

/// A boundary polygon, implicitly closed from the last vertex to the first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    vertices: Vec<Point2>,
    closed: bool,
}

impl Polygon {
    /// Creates a closed polygon. A trailing vertex equal to the first is dropped.
    pub fn new(mut vertices: Vec<Point2>) -> Self {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Self {
            vertices,
            closed: true,
        }
    }

    /// Creates a closed polygon from `(x, y)` pairs.
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    /// Creates an axis-aligned rectangle with its lower-left corner at the origin.
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::from_coords(&[(0.0, 0.0), (width, 0.0), (width, height), (0.0, height)])
    }

    /// Sets the closed flag carried over from the source drawing.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Returns the vertices.
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Returns the number of vertices (and edges).
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the closed flag.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns edge `index`, wrapping from the last vertex to the first.
    pub fn edge(&self, index: usize) -> Segment {
        let n = self.vertices.len();
        Segment::new(self.vertices[index % n], self.vertices[(index + 1) % n])
    }

    /// Returns all edges in vertex order.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.vertices.len()).map(move |i| self.edge(i))
    }

    /// Returns the bounding extent, or `None` for an empty polygon.
    pub fn extent(&self) -> Option<Extent> {
        extent_of(self.vertices.iter())
    }

    fn to_geo_polygon(&self) -> GeoPolygon<f64> {
        let coords: Vec<Coord<f64>> = self
            .vertices
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();
        GeoPolygon::new(LineString::from(coords), vec![])
    }

    /// Returns the signed area (positive for counter-clockwise).
    pub fn signed_area(&self) -> f64 {
        self.to_geo_polygon().signed_area()
    }

    /// Returns the vertex order.
    pub fn winding(&self) -> Winding {
        if self.signed_area() < 0.0 {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }

    /// Returns the side of each edge that faces the interior.
    pub fn inward_side(&self) -> Side {
        match self.winding() {
            Winding::CounterClockwise => Side::Left,
            Winding::Clockwise => Side::Right,
        }
    }

    /// Returns the distance from `point` to the nearest edge.
    pub fn distance_to_boundary(&self, point: &Point2) -> f64 {
        self.edges()
            .map(|e| e.distance_to(point))
            .fold(f64::INFINITY, f64::min)
    }

    /// Inclusive containment: strictly inside, or within `tolerance` of the boundary.
    pub fn contains(&self, point: &Point2, tolerance: f64) -> bool {
        point_in_polygon(&self.vertices, point) || self.distance_to_boundary(point) <= tolerance
    }

    /// Returns true if every point passes [`Polygon::contains`].
    pub fn contains_all(&self, points: &[Point2], tolerance: f64) -> bool {
        points.iter().all(|p| self.contains(p, tolerance))
    }

    /// Validates the polygon as a placement boundary.
    pub fn validate(&self) -> Result<()> {
        if self.vertices.len() < 3 {
            return Err(Error::InvalidBoundary(format!(
                "Boundary must have at least 3 vertices, got {}",
                self.vertices.len()
            )));
        }

        if !self.closed {
            return Err(Error::InvalidBoundary("Boundary polygon is not closed".into()));
        }

        if let Some(p) = self
            .vertices
            .iter()
            .find(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(Error::InvalidBoundary(format!(
                "Boundary vertex ({}, {}) is not finite",
                p.x, p.y
            )));
        }

        for (i, edge) in self.edges().enumerate() {
            if edge.length() < LENGTH_EPSILON {
                return Err(Error::DegenerateSegment(format!(
                    "Boundary edge {} has zero length",
                    i
                )));
            }
        }

        if self.signed_area().abs() < LENGTH_EPSILON {
            return Err(Error::InvalidBoundary("Boundary has zero area".into()));
        }

        Ok(())
    }
}
