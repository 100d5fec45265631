//! Bowyer-Watson incremental Delaunay triangulation
//!
//! Points are inserted one at a time into a triangulation seeded with a single
//! oversized super-triangle. Every triangle whose circumcircle strictly
//! contains the new point is removed, and the resulting cavity is re-filled
//! with a fan of triangles around the point. Triangles still touching the
//! super-triangle are discarded at the end.
//!
//! The scan over triangles is linear per insertion (no spatial index), which
//! is fine for the few hundred sites a sketch uses.

use log::{debug, warn};
use std::time::Instant;

use crate::error::{CellsError, Result};
use crate::geometry::{Edge, Point, Triangle};

/// Super-triangle size as a multiple of the input bounding box
const SUPER_TRIANGLE_SCALE: f64 = 10.0;

/// A triangulation under construction
#[derive(Debug, Clone)]
pub struct Triangulation {
    super_triangle: Triangle,
    triangles: Vec<Triangle>,
    inserted: usize,
}

impl Triangulation {
    /// Start a triangulation whose super-triangle encloses `points`
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` if `points` is empty or holds non-finite coordinates.
    pub fn enclosing(points: &[Point]) -> Result<Self> {
        let super_triangle = super_triangle(points)?;
        Ok(Self {
            super_triangle,
            triangles: vec![super_triangle],
            inserted: 0,
        })
    }

    /// Insert one point, re-triangulating the cavity it invalidates
    ///
    /// # Errors
    ///
    /// Returns `DegenerateTriangle` if the cavity fan would contain a
    /// collinear triangle (only reachable with duplicate or out-of-bounds points).
    pub fn insert(&mut self, point: Point) -> Result<()> {
        let (bad, good): (Vec<Triangle>, Vec<Triangle>) = std::mem::take(&mut self.triangles)
            .into_iter()
            .partition(|t| t.circumcircle_contains(point));
        self.triangles = good;

        if bad.is_empty() {
            warn!(
                "[Delaunay] Point ({}, {}) lies in no circumcircle, skipped",
                point.x, point.y
            );
            return Ok(());
        }

        for edge in cavity_boundary(&bad) {
            self.triangles.push(Triangle::new(edge.a, edge.b, point)?);
        }
        self.inserted += 1;
        Ok(())
    }

    /// Current triangles, super-triangle remnants included
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of points inserted so far
    #[inline]
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// The synthetic enclosing triangle
    #[inline]
    pub fn super_triangle(&self) -> &Triangle {
        &self.super_triangle
    }

    /// Drop every triangle touching the super-triangle and return the rest
    pub fn finish(self) -> Vec<Triangle> {
        let super_triangle = self.super_triangle;
        self.triangles
            .into_iter()
            .filter(|t| !t.shares_vertex_with(&super_triangle))
            .collect()
    }
}

/// Compute the Delaunay triangulation of `points`
///
/// Points are inserted in input order. Duplicates (within
/// [`POINT_EPSILON`](crate::geometry::POINT_EPSILON)) are dropped first.
/// Fewer than three distinct points produce an empty triangulation.
///
/// # Errors
///
/// Propagates `DegenerateTriangle` and `GenerationFailed` from construction.
pub fn triangulate(points: &[Point]) -> Result<Vec<Triangle>> {
    let start = Instant::now();
    let sites = dedup_points(points);
    if sites.len() < 3 {
        return Ok(Vec::new());
    }

    let mut triangulation = Triangulation::enclosing(&sites)?;
    for &point in &sites {
        triangulation.insert(point)?;
    }
    let triangles = triangulation.finish();

    debug!(
        "[Delaunay] {} points -> {} triangles in {:?}",
        sites.len(),
        triangles.len(),
        start.elapsed()
    );
    Ok(triangles)
}

/// Remove duplicate points, keeping the first occurrence
pub fn dedup_points(points: &[Point]) -> Vec<Point> {
    let mut unique: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if !unique.iter().any(|u| u.approx_eq(p)) {
            unique.push(p);
        }
    }
    if unique.len() < points.len() {
        warn!(
            "[Delaunay] Dropped {} duplicate points",
            points.len() - unique.len()
        );
    }
    unique
}

/// Edges of the bad triangles that are not shared by two of them
fn cavity_boundary(bad: &[Triangle]) -> Vec<Edge> {
    let mut boundary = Vec::new();
    for (i, triangle) in bad.iter().enumerate() {
        for edge in triangle.edges() {
            let shared = bad
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && other.has_edge(&edge));
            if !shared {
                boundary.push(edge);
            }
        }
    }
    boundary
}

/// Triangle enclosing the bounding box of `points` with a wide margin
fn super_triangle(points: &[Point]) -> Result<Triangle> {
    if points.is_empty() {
        return Err(CellsError::GenerationFailed(
            "cannot enclose an empty point set".to_string(),
        ));
    }
    if points.iter().any(|p| !p.is_finite()) {
        return Err(CellsError::GenerationFailed(
            "point set contains non-finite coordinates".to_string(),
        ));
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let delta = (max_x - min_x).max(max_y - min_y);
    let delta = if delta > 0.0 { delta } else { 1.0 };
    let reach = SUPER_TRIANGLE_SCALE * delta;
    let cx = 0.5 * (min_x + max_x);
    let cy = 0.5 * (min_y + max_y);

    Triangle::new(
        Point::new(cx - reach, cy - reach),
        Point::new(cx + reach, cy - reach),
        Point::new(cx, cy + reach),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::points::generate_seeded_points;

    /// Canonical, order-independent form of a triangle set
    fn canonical(triangles: &[Triangle]) -> Vec<[(u64, u64); 3]> {
        let mut out: Vec<[(u64, u64); 3]> = triangles
            .iter()
            .map(|t| {
                let mut v = t.vertices().map(|p| (p.x.to_bits(), p.y.to_bits()));
                v.sort();
                v
            })
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_unit_square_two_triangles() {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let triangles = triangulate(&corners).unwrap();
        assert_eq!(triangles.len(), 2);

        let shared = triangles[0].shared_edge(&triangles[1]).expect("shared diagonal");
        let main = Edge::new(corners[0], corners[2]);
        let anti = Edge::new(corners[1], corners[3]);
        assert!(shared == main || shared == anti);
    }

    #[test]
    fn test_interior_point_fan() {
        let interior = Point::new(5.0, 3.0);
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
            interior,
        ];
        let triangles = triangulate(&points).unwrap();
        assert_eq!(triangles.len(), 3);
        for t in &triangles {
            assert!(t.has_vertex(interior));
        }
    }

    #[test]
    fn test_empty_circumcircle_property() {
        let points = generate_seeded_points(150, 800.0, 800.0, false, 42);
        let triangles = triangulate(&points).unwrap();
        assert!(!triangles.is_empty());

        for t in &triangles {
            for p in &points {
                let dist = p.distance(t.circumcenter());
                assert!(
                    dist >= t.circumradius() - 1e-7,
                    "point ({}, {}) inside circumcircle",
                    p.x,
                    p.y
                );
            }
        }
    }

    #[test]
    fn test_triangle_count_bound() {
        let n = 100;
        let points = generate_seeded_points(n, 500.0, 500.0, false, 7);
        let triangles = triangulate(&points).unwrap();

        // At most 2n - 5 triangles (three hull points minimum), and well above n / 2
        assert!(triangles.len() <= 2 * n - 5);
        assert!(triangles.len() >= n);
    }

    #[test]
    fn test_no_super_triangle_vertices() {
        let points = generate_seeded_points(60, 300.0, 300.0, false, 3);
        let triangles = triangulate(&points).unwrap();
        for t in &triangles {
            for v in t.vertices() {
                assert!(points.iter().any(|p| p.approx_eq(v)));
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let points = generate_seeded_points(80, 400.0, 400.0, false, 99);
        let first = triangulate(&points).unwrap();
        let second = triangulate(&points).unwrap();
        assert_eq!(canonical(&first), canonical(&second));
    }

    #[test]
    fn test_duplicates_dropped() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
        ];
        assert_eq!(dedup_points(&points).len(), 3);
        let triangles = triangulate(&points).unwrap();
        assert_eq!(triangles.len(), 1);
    }

    #[test]
    fn test_too_few_points() {
        assert!(triangulate(&[]).unwrap().is_empty());
        assert!(triangulate(&[Point::new(1.0, 1.0), Point::new(2.0, 2.0)])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_collinear_points_yield_nothing() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ];
        assert!(triangulate(&points).unwrap().is_empty());
    }

    #[test]
    fn test_incremental_insert() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 3.0),
        ];
        let mut triangulation = Triangulation::enclosing(&points).unwrap();
        assert_eq!(triangulation.triangles().len(), 1);

        for &p in &points {
            triangulation.insert(p).unwrap();
        }
        assert_eq!(triangulation.inserted(), 3);
        // Every remaining triangle touches the super-triangle or is the real one
        assert!(triangulation.triangles().len() > 1);
        assert_eq!(triangulation.finish().len(), 1);
    }

    #[test]
    fn test_enclosing_rejects_empty() {
        assert!(Triangulation::enclosing(&[]).is_err());
    }
}
