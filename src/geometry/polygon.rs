//! Closed polygons with ordered vertices

use super::point::Point;
use super::segment::Segment;
use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed polygon
///
/// Vertices are ordered (clockwise or counter-clockwise) and the last vertex
/// connects back to the first. The first vertex is not repeated.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from ordered vertices
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Ordered vertices
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Arithmetic mean of the vertices
    pub fn centroid(&self) -> Point {
        if self.vertices.is_empty() {
            return Point::default();
        }
        let sum: DVec2 = self.vertices.iter().map(|v| v.to_vec()).sum();
        Point::from(sum / self.vertices.len() as f64)
    }

    /// Consecutive vertex pairs, wrapping from the last vertex to the first
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Edges collected into a vector
    pub fn segments(&self) -> Vec<Segment> {
        self.edges().collect()
    }

    /// Shrink every vertex toward the centroid
    ///
    /// `mu` is the weight of the centroid: 0 keeps the polygon, values close
    /// to 1 collapse it onto its centroid.
    pub fn scale(&self, mu: f64) -> Polygon {
        let center = self.centroid();
        Polygon::new(
            self.vertices
                .iter()
                .map(|&v| center.lerp_toward(v, mu))
                .collect(),
        )
    }

    /// Shoelace area, positive for counter-clockwise winding
    pub fn signed_area(&self) -> f64 {
        0.5 * self
            .edges()
            .map(|e| e.start.to_vec().perp_dot(e.end.to_vec()))
            .sum::<f64>()
    }

    /// Absolute area
    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Whether the polygon winds counter-clockwise
    #[inline]
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Ray-casting point-in-polygon test
    pub fn contains(&self, point: Point) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if ((vi.y > point.y) != (vj.y > point.y))
                && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Whether every corner turns the same way
    pub fn is_convex(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        let mut sign = None;
        for i in 0..n {
            let e1 = Segment::new(self.vertices[i], self.vertices[(i + 1) % n]);
            let e2 = Segment::new(self.vertices[(i + 1) % n], self.vertices[(i + 2) % n]);
            let cross = e1.turn(&e2);
            if cross.abs() > 1e-10 {
                let positive = cross > 0.0;
                match sign {
                    None => sign = Some(positive),
                    Some(s) if s != positive => return false,
                    _ => {}
                }
            }
        }
        true
    }
}
