//! Voronoi edge extraction from a Delaunay triangulation
//!
//! Every pair of triangles sharing an edge contributes one Voronoi edge
//! joining their circumcenters. This is the dual graph of the triangulation.

use log::debug;

use crate::geometry::{Edge, Segment, Triangle};

/// One edge of the Voronoi diagram
#[derive(Debug, Clone, Copy)]
pub struct VoronoiEdge {
    /// Segment from the circumcenter of `triangles.0` to that of `triangles.1`
    pub segment: Segment,
    /// Indices of the two Delaunay triangles this edge is dual to
    pub triangles: (usize, usize),
    /// The Delaunay edge both triangles share
    pub delaunay_edge: Edge,
}

/// Build the Voronoi edges of a triangulation
///
/// The adjacency scan is pairwise over all triangles. Triangles sharing a
/// circumcenter (co-circular vertices) yield a zero-length edge, which is kept
/// here and skipped by polygon reconstruction.
pub fn voronoi_edges(triangles: &[Triangle]) -> Vec<VoronoiEdge> {
    let mut edges = Vec::new();

    for (i, current) in triangles.iter().enumerate() {
        for (j, other) in triangles.iter().enumerate().skip(i + 1) {
            if let Some(delaunay_edge) = current.shared_edge(other) {
                edges.push(VoronoiEdge {
                    segment: Segment::new(current.circumcenter(), other.circumcenter()),
                    triangles: (i, j),
                    delaunay_edge,
                });
            }
        }
    }

    debug!(
        "[Voronoi] {} triangles -> {} edges",
        triangles.len(),
        edges.len()
    );
    edges
}

/// Voronoi edges as bare segments
pub fn voronoi_segments(triangles: &[Triangle]) -> Vec<Segment> {
    voronoi_edges(triangles)
        .into_iter()
        .map(|edge| edge.segment)
        .collect()
}
