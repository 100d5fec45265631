//! Line segments and the orientation-based intersection test

use super::point::{Point, POINT_EPSILON};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Turn direction of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points lie on one line
    Collinear,
    /// Right turn
    Clockwise,
    /// Left turn
    CounterClockwise,
}

/// Sine of the largest angle still treated as a straight line
const COLLINEAR_TOLERANCE: f64 = 1e-9;

/// Classify the turn `p -> q -> r`
///
/// Turns within [`COLLINEAR_TOLERANCE`] of straight count as collinear, so
/// points rebuilt from `cos`/`sin` steps still line up.
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let a = q.to_vec() - p.to_vec();
    let b = r.to_vec() - q.to_vec();
    let cross = a.perp_dot(b);
    if cross.abs() <= COLLINEAR_TOLERANCE * a.length() * b.length() {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// Whether `q` lies inside the bounding box of `p` and `r`, padded by [`POINT_EPSILON`]
///
/// Only meaningful when the three points are already known to be collinear.
fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) + POINT_EPSILON
        && q.x >= p.x.min(r.x) - POINT_EPSILON
        && q.y <= p.y.max(r.y) + POINT_EPSILON
        && q.y >= p.y.min(r.y) - POINT_EPSILON
}

/// A directed line segment
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point
    pub start: Point,
    /// End point
    pub end: Point,
}

impl Segment {
    /// Create a new segment
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Segment length
    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Same segment traversed the other way
    #[inline]
    pub fn reversed(&self) -> Segment {
        Segment::new(self.end, self.start)
    }

    /// Whether both endpoints coincide (within tolerance)
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start.approx_eq(self.end)
    }

    /// Whether any endpoint of `self` coincides with any endpoint of `other`
    pub fn shares_endpoint(&self, other: &Segment) -> bool {
        self.start.approx_eq(other.start)
            || self.start.approx_eq(other.end)
            || self.end.approx_eq(other.start)
            || self.end.approx_eq(other.end)
    }

    /// Undirected tolerant equality
    pub fn same_undirected(&self, other: &Segment) -> bool {
        (self.start.approx_eq(other.start) && self.end.approx_eq(other.end))
            || (self.start.approx_eq(other.end) && self.end.approx_eq(other.start))
    }

    /// Cross product of the two segment vectors
    ///
    /// Positive when `next` turns left relative to `self`.
    #[inline]
    pub fn turn(&self, next: &Segment) -> f64 {
        let a = self.end.to_vec() - self.start.to_vec();
        let b = next.end.to_vec() - next.start.to_vec();
        a.perp_dot(b)
    }

    /// Whether the segments share an endpoint and run along the same line from it
    ///
    /// Identical segments (in either direction) overlap. Two segments meeting
    /// end to end, or at an angle, do not.
    pub fn overlaps(&self, other: &Segment) -> bool {
        if self.same_undirected(other) {
            return true;
        }

        let ends = |s: &Segment| [(s.start, s.end), (s.end, s.start)];
        ends(self).into_iter().any(|(pivot, far)| {
            ends(other).into_iter().any(|(other_pivot, other_far)| {
                if !pivot.approx_eq(other_pivot) {
                    return false;
                }
                let a = far.to_vec() - pivot.to_vec();
                let b = other_far.to_vec() - pivot.to_vec();
                a.dot(b) > 0.0
                    && a.perp_dot(b).abs() <= COLLINEAR_TOLERANCE * a.length() * b.length()
            })
        })
    }

    /// Orientation-based intersection test, touching and collinear overlap count
    pub fn intersects(&self, other: &Segment) -> bool {
        let (p1, q1) = (self.start, self.end);
        let (p2, q2) = (other.start, other.end);

        let o1 = orientation(p1, q1, p2);
        let o2 = orientation(p1, q1, q2);
        let o3 = orientation(p2, q2, p1);
        let o4 = orientation(p2, q2, q1);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
            || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
            || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
            || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
    }
}

/// Whether `candidate` crosses or retraces any segment of `soup`
///
/// Touching at a shared endpoint is allowed, so a path can keep growing from
/// its own tip. A segment sharing an endpoint still blocks the candidate when
/// the two overlap along a line.
pub fn crosses_any(soup: &[Segment], candidate: &Segment) -> bool {
    soup.iter().any(|existing| {
        if existing.shares_endpoint(candidate) {
            existing.overlaps(candidate)
        } else {
            existing.intersects(candidate)
        }
    })
}
