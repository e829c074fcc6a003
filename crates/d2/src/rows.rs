//! Row generator: parallel strips across a polygon's interior.
//!
//! Rows depend on the polygon only through vertex projections. A row may
//! leave and re-enter a concave polygon; the planner filters candidates
//! by containment, not the generator.

use crate::lane::Lane;
use wallpack_core::{Error, PlanarVector, Point2, Polygon, Result, Segment, Side, LENGTH_EPSILON};

/// Largest number of rows one request may generate.
pub const MAX_ROWS: usize = 100_000;

/// Builds rows of width `row_width` parallel to the direction `start -> end`.
///
/// Rows sit at normal offsets `min, min + w, min + 2w, ...` below the far
/// end of the polygon's perpendicular span, and each spans the polygon's
/// full extent along the packing direction. Footprints go on the left of
/// each row, i.e. toward increasing offsets.
pub fn rows(polygon: &Polygon, start: &Point2, end: &Point2, row_width: f64) -> Result<Vec<Segment>> {
    if !row_width.is_finite() || row_width <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "Row width must be positive, got {}",
            row_width
        )));
    }

    if polygon.is_empty() {
        return Ok(Vec::new());
    }

    let direction = (end - start).try_normalize(LENGTH_EPSILON).ok_or_else(|| {
        Error::DegenerateSegment(format!(
            "Row direction from ({}, {}) to ({}, {}) has zero length",
            start.x, start.y, end.x, end.y
        ))
    })?;
    let normal = direction.perpendicular();

    let mut along = (f64::INFINITY, f64::NEG_INFINITY);
    let mut across = (f64::INFINITY, f64::NEG_INFINITY);
    for v in polygon.vertices() {
        let rel = v - start;
        let d = rel.dot(&direction);
        let n = rel.dot(&normal);
        along = (along.0.min(d), along.1.max(d));
        across = (across.0.min(n), across.1.max(n));
    }

    let span = across.1 - across.0;
    let needed = (span / row_width - LENGTH_EPSILON).ceil().max(0.0);
    if needed > MAX_ROWS as f64 {
        return Err(Error::InvalidConfig(format!(
            "Row width {} yields {} rows over a span of {}; at most {} allowed",
            row_width, needed, span, MAX_ROWS
        )));
    }
    let count = needed as usize;
    let rows = (0..count)
        .map(|k| {
            let offset = across.0 + k as f64 * row_width;
            let base = start + normal * offset;
            Segment::new(base + direction * along.0, base + direction * along.1)
        })
        .collect();
    Ok(rows)
}

/// Wraps [`rows`] as lanes numbered by row.
pub fn row_lanes(polygon: &Polygon, start: &Point2, end: &Point2, row_width: f64) -> Result<Vec<Lane>> {
    Ok(rows(polygon, start, end, row_width)?
        .into_iter()
        .enumerate()
        .map(|(i, segment)| Lane::new(i, segment, Side::Left))
        .collect())
}
