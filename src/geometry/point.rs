//! Planar point type and tolerant comparison

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute tolerance used whenever two points are compared for equality
///
/// Coordinates are canvas pixels (at most a few tens of thousands for the
/// super-triangle), so anything closer than a micro-pixel is the same point.
/// Circumcenters of co-circular triangles land well inside this band.
pub const POINT_EPSILON: f64 = 1e-6;

/// A point on the drawing plane
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert to a glam vector for arithmetic
    #[inline]
    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Tolerant equality, see [`POINT_EPSILON`]
    #[inline]
    pub fn approx_eq(self, other: Point) -> bool {
        (self.x - other.x).abs() <= POINT_EPSILON && (self.y - other.y).abs() <= POINT_EPSILON
    }

    /// Weighted blend `self * mu + other * (1 - mu)`
    ///
    /// With `self` as a polygon centroid and `other` a vertex, larger `mu`
    /// pulls the vertex closer to the centroid.
    pub fn lerp_toward(self, other: Point, mu: f64) -> Point {
        Point::from(self.to_vec() * mu + other.to_vec() * (1.0 - mu))
    }

    /// Move `dist` units from `self` in the direction of `other`
    ///
    /// If the two points are closer than `2 * dist` the distance collapses to
    /// a single unit so that trimming both ends of a short edge never crosses over.
    pub fn move_toward(self, other: Point, dist: f64) -> Point {
        let length = self.distance(other);
        if length == 0.0 {
            return self;
        }
        let dist = if 2.0 * dist >= length { 1.0 } else { dist };
        Point::from(self.to_vec() + (other.to_vec() - self.to_vec()) * (dist / length))
    }

    /// Whether both coordinates are finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<DVec2> for Point {
    #[inline]
    fn from(v: DVec2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for DVec2 {
    #[inline]
    fn from(p: Point) -> Self {
        p.to_vec()
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}
