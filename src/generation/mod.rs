//! Core generation pipeline
//!
//! Random sites are triangulated with Bowyer-Watson, the dual Voronoi edges
//! are extracted, and the unordered edges are stitched back into closed cell
//! polygons. Walkers can then fill any polygon with texture.

mod delaunay;
mod lloyd;
mod points;
mod polygons;
mod voronoi;
mod walker;

pub use delaunay::{dedup_points, triangulate, Triangulation};
pub use lloyd::{lloyd_relaxation, lloyd_relaxation_with_options, LloydOptions};
pub use points::{generate_points, generate_seeded_points};
pub use polygons::reconstruct_polygons;
pub use voronoi::{voronoi_edges, voronoi_segments, VoronoiEdge};
pub use walker::{fill_region, Walker, WalkerOptions};

use crate::error::Result;
use crate::geometry::{Point, Polygon, Segment, Triangle};

/// Every geometric product of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    /// Delaunay triangles
    pub triangles: Vec<Triangle>,
    /// Voronoi edges as segments
    pub edges: Vec<Segment>,
    /// Closed Voronoi cells
    pub polygons: Vec<Polygon>,
}

/// Run triangulation, edge extraction and polygon reconstruction
///
/// # Errors
///
/// Propagates triangulation failures.
pub fn build_diagram(points: &[Point]) -> Result<Diagram> {
    let triangles = triangulate(points)?;
    let edges = voronoi_segments(&triangles);
    let polygons = reconstruct_polygons(&edges);

    Ok(Diagram {
        triangles,
        edges,
        polygons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_diagram() {
        let points = generate_seeded_points(60, 400.0, 400.0, false, 42);
        let diagram = build_diagram(&points).unwrap();

        assert!(!diagram.triangles.is_empty());
        assert!(!diagram.edges.is_empty());
        assert!(!diagram.polygons.is_empty());
    }
}
