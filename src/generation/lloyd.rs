//! Lloyd's Relaxation for evenly spread sites
//!
//! Each iteration moves every site that owns a closed Voronoi cell to the
//! centroid of that cell. Sites on the open outer boundary have no closed
//! cell and stay where they are.

use log::debug;
use std::time::Instant;

use crate::error::Result;
use crate::generation::delaunay::triangulate;
use crate::generation::polygons::reconstruct_polygons;
use crate::generation::voronoi::voronoi_segments;
use crate::geometry::Point;

/// Options for Lloyd's relaxation algorithm
#[derive(Debug, Clone, Copy)]
pub struct LloydOptions {
    /// Maximum number of iterations to run
    pub max_iterations: usize,
    /// Convergence threshold as a fraction of the site bounding box size
    /// Set to 0.0 to disable early termination
    pub convergence_threshold: f64,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            // For an 800 px canvas this stops once no site moves more than 0.8 px
            convergence_threshold: 0.001,
        }
    }
}

/// Apply a fixed number of relaxation iterations
///
/// # Errors
///
/// Propagates triangulation failures.
pub fn lloyd_relaxation(points: Vec<Point>, iterations: usize) -> Result<Vec<Point>> {
    let options = LloydOptions {
        max_iterations: iterations,
        ..Default::default()
    };
    lloyd_relaxation_with_options(points, options)
}

/// Apply Lloyd's Relaxation with custom options
///
/// # Errors
///
/// Propagates triangulation failures.
pub fn lloyd_relaxation_with_options(
    mut points: Vec<Point>,
    options: LloydOptions,
) -> Result<Vec<Point>> {
    let threshold = options.convergence_threshold * extent(&points);
    let total_start = Instant::now();

    debug!(
        "[Lloyd] Starting: {} points, max {} iterations, threshold {:.4} (abs: {:.4})",
        points.len(),
        options.max_iterations,
        options.convergence_threshold,
        threshold
    );

    let mut iterations_run = 0;
    for iteration in 0..options.max_iterations {
        let iter_start = Instant::now();
        let (new_points, max_displacement) = relax_once(&points)?;
        points = new_points;
        iterations_run = iteration + 1;

        debug!(
            "[Lloyd] Iter {}: total={:?}, max_disp={:.4}",
            iteration + 1,
            iter_start.elapsed(),
            max_displacement
        );

        if threshold > 0.0 && max_displacement < threshold {
            debug!(
                "[Lloyd] Converged at iteration {} (max_disp {:.4} < threshold {:.4})",
                iteration + 1,
                max_displacement,
                threshold
            );
            break;
        }
    }

    debug!(
        "[Lloyd] Finished: {} iterations (of max {}), total={:?}",
        iterations_run,
        options.max_iterations,
        total_start.elapsed()
    );
    Ok(points)
}

/// One relaxation pass, returning the moved sites and the largest move
fn relax_once(points: &[Point]) -> Result<(Vec<Point>, f64)> {
    let triangles = triangulate(points)?;
    let polygons = reconstruct_polygons(&voronoi_segments(&triangles));

    let mut new_points = points.to_vec();
    let mut max_displacement: f64 = 0.0;

    for polygon in &polygons {
        if let Some(idx) = points.iter().position(|p| polygon.contains(*p)) {
            let centroid = polygon.centroid();
            max_displacement = max_displacement.max(points[idx].distance(centroid));
            new_points[idx] = centroid;
        }
    }

    Ok((new_points, max_displacement))
}

/// Larger side of the bounding box
fn extent(points: &[Point]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (max_x - min_x).max(max_y - min_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::points::generate_seeded_points;

    #[test]
    fn test_lloyd_relaxation() {
        let points = generate_seeded_points(100, 500.0, 500.0, false, 42);
        let relaxed = lloyd_relaxation(points.clone(), 3).unwrap();

        assert_eq!(relaxed.len(), 100);
        assert!(relaxed.iter().zip(&points).any(|(a, b)| !a.approx_eq(*b)));
        assert!(relaxed.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_lloyd_relaxation_determinism() {
        let points = generate_seeded_points(50, 300.0, 300.0, false, 12345);
        let relaxed1 = lloyd_relaxation(points.clone(), 2).unwrap();
        let relaxed2 = lloyd_relaxation(points, 2).unwrap();

        for (p1, p2) in relaxed1.iter().zip(relaxed2.iter()) {
            assert!((p1.x - p2.x).abs() < 1e-9);
            assert!((p1.y - p2.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let points = generate_seeded_points(20, 100.0, 100.0, false, 1);
        let relaxed = lloyd_relaxation(points.clone(), 0).unwrap();
        assert_eq!(relaxed, points);
    }

    #[test]
    fn test_lloyd_options_default() {
        let options = LloydOptions::default();
        assert_eq!(options.max_iterations, 5);
        assert!((options.convergence_threshold - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_lloyd_no_convergence_threshold() {
        let points = generate_seeded_points(40, 200.0, 200.0, false, 8);
        let options = LloydOptions {
            max_iterations: 3,
            convergence_threshold: 0.0,
        };
        let relaxed = lloyd_relaxation_with_options(points, options).unwrap();
        assert_eq!(relaxed.len(), 40);
    }
}
