//! Planar geometry primitives
//!
//! Points, segments, triangles and polygons shared by every generation stage.

mod point;
mod polygon;
mod segment;
mod triangle;

pub use point::{Point, POINT_EPSILON};
pub use polygon::Polygon;
pub use segment::{crosses_any, orientation, Orientation, Segment};
pub use triangle::{Edge, Triangle};
