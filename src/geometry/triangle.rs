//! Triangles with precomputed circumcircles

use super::point::Point;
use super::segment::Segment;
use crate::error::{CellsError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unordered pair of points
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// One endpoint
    pub a: Point,
    /// The other endpoint
    pub b: Point,
}

impl Edge {
    /// Create a new edge
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Whether the edge has `p` as an endpoint
    #[inline]
    pub fn has_endpoint(&self, p: Point) -> bool {
        self.a.approx_eq(p) || self.b.approx_eq(p)
    }

    /// As a segment running from `a` to `b`
    #[inline]
    pub fn to_segment(self) -> Segment {
        Segment::new(self.a, self.b)
    }
}

impl PartialEq for Edge {
    /// Endpoints match in either order
    fn eq(&self, other: &Self) -> bool {
        (self.a.approx_eq(other.a) && self.b.approx_eq(other.b))
            || (self.a.approx_eq(other.b) && self.b.approx_eq(other.a))
    }
}

/// A triangle of three points with its circumcircle computed up front
///
/// Triangles are never mutated after construction; build a new one when the
/// geometry changes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    a: Point,
    b: Point,
    c: Point,
    circumcenter: Point,
    circumradius: f64,
}

impl Triangle {
    /// Create a triangle and compute its circumcircle
    ///
    /// # Errors
    ///
    /// Returns `DegenerateTriangle` if the vertices are collinear (the
    /// circumcenter denominator vanishes) or the circumcenter is not finite.
    pub fn new(a: Point, b: Point, c: Point) -> Result<Self> {
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d == 0.0 {
            return Err(CellsError::DegenerateTriangle { a, b, c });
        }

        let a2 = a.x * a.x + a.y * a.y;
        let b2 = b.x * b.x + b.y * b.y;
        let c2 = c.x * c.x + c.y * c.y;
        let circumcenter = Point::new(
            (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        );
        if !circumcenter.is_finite() {
            return Err(CellsError::DegenerateTriangle { a, b, c });
        }

        Ok(Self {
            a,
            b,
            c,
            circumcenter,
            circumradius: a.distance(circumcenter),
        })
    }

    /// The three vertices in construction order
    #[inline]
    pub fn vertices(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    /// The three edges `ab`, `bc`, `ca`
    #[inline]
    pub fn edges(&self) -> [Edge; 3] {
        [
            Edge::new(self.a, self.b),
            Edge::new(self.b, self.c),
            Edge::new(self.c, self.a),
        ]
    }

    /// Center of the circle through all three vertices
    #[inline]
    pub fn circumcenter(&self) -> Point {
        self.circumcenter
    }

    /// Radius of the circle through all three vertices
    #[inline]
    pub fn circumradius(&self) -> f64 {
        self.circumradius
    }

    /// Whether `p` lies strictly inside the circumcircle
    ///
    /// Points exactly on the circle are outside, so co-circular input keeps
    /// whichever triangles were built first.
    #[inline]
    pub fn circumcircle_contains(&self, p: Point) -> bool {
        p.distance(self.circumcenter) < self.circumradius
    }

    /// Whether `p` is one of the vertices
    #[inline]
    pub fn has_vertex(&self, p: Point) -> bool {
        self.vertices().iter().any(|v| v.approx_eq(p))
    }

    /// Whether `edge` is one of the three edges
    #[inline]
    pub fn has_edge(&self, edge: &Edge) -> bool {
        self.edges().iter().any(|e| e == edge)
    }

    /// Whether the triangles have at least one vertex in common
    pub fn shares_vertex_with(&self, other: &Triangle) -> bool {
        self.vertices().iter().any(|&v| other.has_vertex(v))
    }

    /// The edge both triangles have in common, if any
    pub fn shared_edge(&self, other: &Triangle) -> Option<Edge> {
        self.edges().into_iter().find(|e| other.has_edge(e))
    }

    /// Signed area, positive for counter-clockwise vertex order
    pub fn signed_area(&self) -> f64 {
        0.5 * (self.b.to_vec() - self.a.to_vec()).perp_dot(self.c.to_vec() - self.a.to_vec())
    }
}
