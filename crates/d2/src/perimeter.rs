//! Perimeter walker: boundary edges between two reference points.

use crate::lane::Lane;
use wallpack_core::{Error, Point2, Polygon, Result, Segment, Side};

/// Returns one segment per consecutive vertex pair, wrapping last to first.
pub fn segments(polygon: &Polygon) -> Vec<Segment> {
    polygon.edges().collect()
}

/// Returns the index of the edge closest to `point`, if within `tolerance`.
///
/// A point on a shared vertex resolves to the lower edge index.
pub fn segment_index_at_point(polygon: &Polygon, point: &Point2, tolerance: f64) -> Result<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, edge) in polygon.edges().enumerate() {
        let d = edge.distance_to(point);
        if d <= tolerance && best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }

    best.map(|(i, _)| i).ok_or(Error::PointNotOnBoundary {
        x: point.x,
        y: point.y,
        tolerance,
    })
}

/// Walks forward from `start` to `end` inclusive, modulo `count`.
///
/// Never empty for `count > 0`; `start == end` yields a single index rather
/// than a full loop.
pub fn travel_order(start: usize, end: usize, count: usize) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    let start = start % count;
    let end = end % count;
    let steps = (end + count - start) % count;
    (0..=steps).map(|k| (start + k) % count).collect()
}

/// Builds the lanes for a perimeter walk from `from` to `to`.
///
/// The first lane starts at the projection of `from` and the last one ends
/// at the projection of `to`; lanes in between are whole edges. When both
/// points project onto the same edge and `to` comes before `from`, the lane
/// is empty.
pub fn perimeter_lanes(
    polygon: &Polygon,
    from: &Point2,
    to: &Point2,
    tolerance: f64,
    side: Side,
) -> Result<Vec<Lane>> {
    let edges = segments(polygon);
    let first = segment_index_at_point(polygon, from, tolerance)?;
    let last = segment_index_at_point(polygon, to, tolerance)?;
    let order = travel_order(first, last, edges.len());

    let lanes = order
        .iter()
        .enumerate()
        .map(|(k, &index)| {
            let edge = &edges[index];
            let mut lo = 0.0;
            let mut hi = edge.length();
            if k == 0 {
                lo = edge.project(from);
            }
            if k + 1 == order.len() {
                hi = edge.project(to).max(lo);
            }
            // keep whole edges bit-exact
            let segment = if lo == 0.0 && hi == edge.length() {
                *edge
            } else {
                edge.sub_segment(lo, hi)
            };
            Lane::new(index, segment, side)
        })
        .collect();
    Ok(lanes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segments_wrap() {
        let square = Polygon::rectangle(10.0, 10.0);
        let segs = segments(&square);
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[0].start, Point2::new(0.0, 0.0));
        assert_eq!(segs[3].end, Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_segment_index_at_point() {
        let square = Polygon::rectangle(10.0, 10.0);
        assert_eq!(segment_index_at_point(&square, &Point2::new(5.0, 0.0), 0.2).unwrap(), 0);
        assert_eq!(segment_index_at_point(&square, &Point2::new(10.1, 3.0), 0.2).unwrap(), 1);
        assert_eq!(segment_index_at_point(&square, &Point2::new(4.0, 9.9), 0.2).unwrap(), 2);
        // shared vertex resolves to the lower index
        assert_eq!(segment_index_at_point(&square, &Point2::new(0.0, 0.0), 0.2).unwrap(), 0);
        assert_eq!(segment_index_at_point(&square, &Point2::new(10.0, 0.0), 0.2).unwrap(), 0);
    }

    #[test]
    fn test_segment_index_not_found() {
        let square = Polygon::rectangle(10.0, 10.0);
        let err = segment_index_at_point(&square, &Point2::new(5.0, 5.0), 0.2).unwrap_err();
        assert!(matches!(err, Error::PointNotOnBoundary { .. }));
    }

    #[test]
    fn test_travel_order() {
        assert_eq!(travel_order(1, 3, 4), vec![1, 2, 3]);
        assert_eq!(travel_order(3, 1, 4), vec![3, 0, 1]);
        assert_eq!(travel_order(2, 2, 4), vec![2]);
        assert_eq!(travel_order(0, 3, 4), vec![0, 1, 2, 3]);
        assert!(travel_order(0, 0, 0).is_empty());
    }

    #[test]
    fn test_perimeter_lanes_clipped() {
        let square = Polygon::rectangle(10.0, 10.0);
        let lanes = perimeter_lanes(
            &square,
            &Point2::new(4.0, 0.0),
            &Point2::new(10.0, 6.0),
            0.2,
            Side::Left,
        )
        .unwrap();
        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes[0].source, 0);
        assert_relative_eq!(lanes[0].segment.start.x, 4.0);
        assert_relative_eq!(lanes[0].segment.end.x, 10.0);
        assert_eq!(lanes[1].source, 1);
        assert_relative_eq!(lanes[1].segment.start.y, 0.0);
        assert_relative_eq!(lanes[1].segment.end.y, 6.0);
    }

    #[test]
    fn test_perimeter_lanes_snap_off_boundary_points() {
        let square = Polygon::rectangle(10.0, 10.0);
        let lanes = perimeter_lanes(
            &square,
            &Point2::new(2.0, 0.15),
            &Point2::new(7.0, -0.1),
            0.2,
            Side::Left,
        )
        .unwrap();
        assert_eq!(lanes.len(), 1);
        assert_eq!(lanes[0].segment.start, Point2::new(2.0, 0.0));
        assert_eq!(lanes[0].segment.end, Point2::new(7.0, 0.0));
    }

    #[test]
    fn test_perimeter_lanes_reversed_on_one_edge() {
        let square = Polygon::rectangle(10.0, 10.0);
        let lanes = perimeter_lanes(
            &square,
            &Point2::new(7.0, 0.0),
            &Point2::new(2.0, 0.0),
            0.2,
            Side::Left,
        )
        .unwrap();
        assert_eq!(lanes.len(), 1);
        assert_relative_eq!(lanes[0].length(), 0.0);
    }

    #[test]
    fn test_perimeter_lanes_wraps_past_last_edge() {
        let square = Polygon::rectangle(10.0, 10.0);
        let lanes = perimeter_lanes(
            &square,
            &Point2::new(0.0, 5.0),
            &Point2::new(5.0, 0.0),
            0.2,
            Side::Left,
        )
        .unwrap();
        let sources: Vec<usize> = lanes.iter().map(|l| l.source).collect();
        assert_eq!(sources, vec![3, 0]);
        assert_relative_eq!(lanes[0].length(), 5.0);
        assert_relative_eq!(lanes[1].length(), 5.0);
    }
}
