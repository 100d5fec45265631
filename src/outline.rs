//! Rounded polygon outlines for rendering
//!
//! Produces renderer-agnostic geometry: every polygon edge becomes a
//! straight segment trimmed at both ends, and every corner becomes a cubic
//! Bézier bridging the two trimmed ends with both control points on the corner.

use crate::geometry::{Point, Polygon, Segment};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cubic Bézier curve
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Curve start
    pub start: Point,
    /// First control point
    pub control1: Point,
    /// Second control point
    pub control2: Point,
    /// Curve end
    pub end: Point,
}

impl CubicBezier {
    /// Evaluate the curve at `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let p = self.start.to_vec() * (u * u * u)
            + self.control1.to_vec() * (3.0 * u * u * t)
            + self.control2.to_vec() * (3.0 * u * t * t)
            + self.end.to_vec() * (t * t * t);
        Point::from(p)
    }

    /// Approximate the curve by `segments` straight pieces
    pub fn flatten(&self, segments: usize) -> Vec<Segment> {
        let segments = segments.max(1);
        let points: Vec<Point> = (0..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect();
        points
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .collect()
    }
}

/// Straight runs and rounded corners of one polygon
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    /// One trimmed segment per polygon edge
    pub lines: Vec<Segment>,
    /// One corner curve per polygon vertex
    pub curves: Vec<CubicBezier>,
}

impl Outline {
    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.curves.is_empty()
    }

    /// The whole outline as line segments, curves flattened
    pub fn to_segments(&self, curve_segments: usize) -> Vec<Segment> {
        let mut out = self.lines.clone();
        for curve in &self.curves {
            out.extend(curve.flatten(curve_segments));
        }
        out
    }
}

/// Round off the corners of `polygon`
///
/// Each edge is trimmed by `rounding` at both ends (edges shorter than
/// `2 * rounding` are trimmed by one unit instead). Corner curve `i` joins
/// the trimmed end of edge `i` to the trimmed start of edge `i + 1`.
pub fn smooth_outline(polygon: &Polygon, rounding: f64) -> Outline {
    let edges = polygon.segments();
    if edges.len() < 3 {
        return Outline::default();
    }

    let trimmed: Vec<Segment> = edges
        .iter()
        .map(|e| {
            Segment::new(
                e.start.move_toward(e.end, rounding),
                e.end.move_toward(e.start, rounding),
            )
        })
        .collect();

    let curves = (0..edges.len())
        .map(|i| {
            let next = (i + 1) % edges.len();
            CubicBezier {
                start: trimmed[i].end,
                control1: edges[i].end,
                control2: edges[next].start,
                end: trimmed[next].start,
            }
        })
        .collect();

    Outline {
        lines: trimmed,
        curves,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ])
    }

    #[test]
    fn test_square_outline() {
        let outline = smooth_outline(&square(), 10.0);
        assert_eq!(outline.lines.len(), 4);
        assert_eq!(outline.curves.len(), 4);

        let first = outline.lines[0];
        assert!(first.start.approx_eq(Point::new(10.0, 0.0)));
        assert!(first.end.approx_eq(Point::new(90.0, 0.0)));

        let corner = outline.curves[0];
        assert!(corner.start.approx_eq(Point::new(90.0, 0.0)));
        assert!(corner.control1.approx_eq(Point::new(100.0, 0.0)));
        assert!(corner.control2.approx_eq(Point::new(100.0, 0.0)));
        assert!(corner.end.approx_eq(Point::new(100.0, 10.0)));
    }

    #[test]
    fn test_curves_join_lines() {
        let outline = smooth_outline(&square().scale(0.2), 5.0);
        let n = outline.lines.len();
        for i in 0..n {
            assert!(outline.curves[i].start.approx_eq(outline.lines[i].end));
            assert!(outline.curves[i].end.approx_eq(outline.lines[(i + 1) % n].start));
        }
    }

    #[test]
    fn test_short_edges_trim_one_unit() {
        let tiny = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        ]);
        let outline = smooth_outline(&tiny, 10.0);
        assert!(outline.lines[0].start.approx_eq(Point::new(1.0, 0.0)));
        assert!(outline.lines[0].end.approx_eq(Point::new(3.0, 0.0)));
    }

    #[test]
    fn test_bezier_endpoints_and_flatten() {
        let curve = CubicBezier {
            start: Point::new(0.0, 0.0),
            control1: Point::new(0.0, 10.0),
            control2: Point::new(10.0, 10.0),
            end: Point::new(10.0, 0.0),
        };
        assert!(curve.point_at(0.0).approx_eq(curve.start));
        assert!(curve.point_at(1.0).approx_eq(curve.end));
        assert!(curve.point_at(0.5).approx_eq(Point::new(5.0, 7.5)));

        let pieces = curve.flatten(8);
        assert_eq!(pieces.len(), 8);
        assert!(pieces[7].end.approx_eq(curve.end));
    }

    #[test]
    fn test_degenerate_polygon() {
        let line = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        assert!(smooth_outline(&line, 1.0).is_empty());
        assert_eq!(smooth_outline(&square(), 10.0).to_segments(4).len(), 4 + 16);
    }
}
