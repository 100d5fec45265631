//! Random site placement on the canvas

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::geometry::Point;

/// Generate uniformly random sites inside `[0, width) x [0, height)`
///
/// With `snap_to_grid` every coordinate is floored to a whole pixel, which is
/// how the dense cell sketches place their sites. Snapped sites can collide;
/// the triangulator drops duplicates.
pub fn generate_points<R: Rng + ?Sized>(
    count: usize,
    width: f64,
    height: f64,
    snap_to_grid: bool,
    rng: &mut R,
) -> Vec<Point> {
    (0..count)
        .map(|_| {
            let x = rng.gen_range(0.0..width);
            let y = rng.gen_range(0.0..height);
            if snap_to_grid {
                Point::new(x.floor(), y.floor())
            } else {
                Point::new(x, y)
            }
        })
        .collect()
}

/// Seeded convenience wrapper around [`generate_points`]
pub fn generate_seeded_points(
    count: usize,
    width: f64,
    height: f64,
    snap_to_grid: bool,
    seed: u64,
) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_points(count, width, height, snap_to_grid, &mut rng)
}
