//! Closed polygon reconstruction from an unordered edge soup
//!
//! Each undirected edge is used once in each direction. A chain starts on an
//! unused directed edge and keeps extending from its tip with the unused
//! edge that turns left most sharply, which walks the face lying to the left
//! of the chain. Chains that come back to their origin become polygons.
//! Chains that run into a dead end or a right turn (the open outer boundary of
//! the diagram) are dropped.

use log::debug;
use std::time::Instant;

use crate::geometry::{Polygon, Segment};

/// A directed copy of an input edge plus its consumption flag
#[derive(Debug, Clone, Copy)]
struct DirectedEdge {
    segment: Segment,
    used: bool,
}

/// Rebuild closed polygons from undirected segments
///
/// Zero-length segments are ignored. Every returned polygon has at least
/// three vertices, consecutive vertices joined by an input segment, and the
/// last vertex joined back to the first. Polygons traced this way wind
/// counter-clockwise.
pub fn reconstruct_polygons(edges: &[Segment]) -> Vec<Polygon> {
    let start = Instant::now();

    let mut directed: Vec<DirectedEdge> = edges
        .iter()
        .filter(|e| !e.is_degenerate())
        .flat_map(|e| [*e, e.reversed()])
        .map(|segment| DirectedEdge {
            segment,
            used: false,
        })
        .collect();

    let mut polygons = Vec::new();
    let mut open_chains = 0usize;

    for first in 0..directed.len() {
        if directed[first].used {
            continue;
        }
        directed[first].used = true;

        let origin = directed[first].segment.start;
        let mut chain = vec![directed[first].segment];
        let mut closed = false;

        loop {
            let last = chain[chain.len() - 1];
            if last.end.approx_eq(origin) {
                closed = true;
                break;
            }
            match next_edge(&directed, &last) {
                Some(k) => {
                    directed[k].used = true;
                    chain.push(directed[k].segment);
                }
                None => break,
            }
        }

        if closed && chain.len() >= 3 {
            polygons.push(Polygon::new(chain.iter().map(|s| s.end).collect()));
        } else {
            open_chains += 1;
        }
    }

    debug!(
        "[Polygons] {} edges -> {} polygons ({} open chains dropped) in {:?}",
        edges.len(),
        polygons.len(),
        open_chains,
        start.elapsed()
    );
    polygons
}

/// Index of the unused edge leaving `last.end` with the sharpest left turn
///
/// Only strictly positive turns qualify. Equal turn angles keep the lowest index.
fn next_edge(directed: &[DirectedEdge], last: &Segment) -> Option<usize> {
    let incoming = last.end.to_vec() - last.start.to_vec();
    let mut best: Option<(usize, f64)> = None;

    for (k, candidate) in directed.iter().enumerate() {
        if candidate.used || !candidate.segment.start.approx_eq(last.end) {
            continue;
        }
        let cross = last.turn(&candidate.segment);
        if cross <= 0.0 {
            continue;
        }
        let outgoing = candidate.segment.end.to_vec() - candidate.segment.start.to_vec();
        let angle = cross.atan2(incoming.dot(outgoing));
        match best {
            Some((_, best_angle)) if angle <= best_angle => {}
            _ => best = Some((k, angle)),
        }
    }

    best.map(|(k, _)| k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::delaunay::triangulate;
    use crate::generation::points::generate_seeded_points;
    use crate::generation::voronoi::voronoi_segments;
    use crate::geometry::Point;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    fn assert_closed_over(polygon: &Polygon, soup: &[Segment]) {
        for edge in polygon.edges() {
            assert!(
                soup.iter().any(|s| s.same_undirected(&edge)),
                "polygon edge not in the input soup"
            );
        }
        let first = polygon.vertices()[0];
        let last = polygon.vertices()[polygon.vertex_count() - 1];
        assert!(soup
            .iter()
            .any(|s| s.same_undirected(&Segment::new(last, first))));
    }

    #[test]
    fn test_single_square() {
        let soup = vec![
            seg(0.0, 1.0, 0.0, 0.0),
            seg(1.0, 0.0, 1.0, 1.0),
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 1.0, 0.0, 1.0),
        ];
        let polygons = reconstruct_polygons(&soup);
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].vertex_count(), 4);
        assert!(polygons[0].is_counter_clockwise());
        assert_closed_over(&polygons[0], &soup);
    }

    #[test]
    fn test_two_adjacent_squares() {
        let soup = vec![
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 0.0, 2.0, 0.0),
            seg(2.0, 0.0, 2.0, 1.0),
            seg(2.0, 1.0, 1.0, 1.0),
            seg(1.0, 1.0, 0.0, 1.0),
            seg(0.0, 1.0, 0.0, 0.0),
            seg(1.0, 0.0, 1.0, 1.0),
        ];
        let polygons = reconstruct_polygons(&soup);
        assert_eq!(polygons.len(), 2);
        for polygon in &polygons {
            assert_eq!(polygon.vertex_count(), 4);
            assert!((polygon.area() - 1.0).abs() < 1e-12);
            assert_closed_over(polygon, &soup);
        }
    }

    #[test]
    fn test_open_chain_dropped() {
        let soup = vec![seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 1.0, 1.0)];
        assert!(reconstruct_polygons(&soup).is_empty());
    }

    #[test]
    fn test_degenerate_edges_ignored() {
        let soup = vec![seg(3.0, 3.0, 3.0, 3.0)];
        assert!(reconstruct_polygons(&soup).is_empty());
    }

    #[test]
    fn test_near_duplicate_vertices_close_loop() {
        // Vertices that differ by less than the point tolerance still join up
        let d = 1e-9;
        let soup = vec![
            seg(0.0, 0.0, 4.0, 0.0),
            seg(4.0 + d, 0.0, 2.0, 3.0),
            seg(2.0, 3.0 - d, d, -d),
        ];
        let polygons = reconstruct_polygons(&soup);
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].vertex_count(), 3);
    }

    #[test]
    fn test_sharpest_left_turn_wins() {
        // Arriving eastward at the origin with two left-turn options
        let directed = vec![
            DirectedEdge {
                segment: seg(0.0, 0.0, 1.0, 1.0),
                used: false,
            },
            DirectedEdge {
                segment: seg(0.0, 0.0, -1.0, 1.0),
                used: false,
            },
            DirectedEdge {
                segment: seg(0.0, 0.0, 0.0, -1.0),
                used: false,
            },
        ];
        let last = seg(-1.0, 0.0, 0.0, 0.0);
        assert_eq!(next_edge(&directed, &last), Some(1));

        let mut consumed = directed.clone();
        consumed[1].used = true;
        assert_eq!(next_edge(&consumed, &last), Some(0));

        consumed[0].used = true;
        // Only a right turn remains
        assert_eq!(next_edge(&consumed, &last), None);
    }

    #[test]
    fn test_square_sites_give_one_diamond() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(5.0, 5.0),
        ];
        let triangles = triangulate(&points).unwrap();
        let soup = voronoi_segments(&triangles);
        let polygons = reconstruct_polygons(&soup);

        assert_eq!(polygons.len(), 1);
        let diamond = &polygons[0];
        assert_eq!(diamond.vertex_count(), 4);
        assert!((diamond.area() - 50.0).abs() < 1e-9);
        assert!(diamond.centroid().approx_eq(Point::new(5.0, 5.0)));
        assert_closed_over(diamond, &soup);
    }

    #[test]
    fn test_bare_square_corners_give_no_cell() {
        // Both triangles share one circumcenter, so the only Voronoi edge has zero length
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let triangles = triangulate(&corners).unwrap();
        let soup = voronoi_segments(&triangles);

        assert_eq!(soup.len(), 1);
        assert!(soup[0].is_degenerate());
        assert!(reconstruct_polygons(&soup).is_empty());
    }

    #[test]
    fn test_voronoi_cells_closed_and_convex() {
        let points = generate_seeded_points(120, 800.0, 800.0, false, 42);
        let triangles = triangulate(&points).unwrap();
        let soup = voronoi_segments(&triangles);
        let polygons = reconstruct_polygons(&soup);

        assert!(!polygons.is_empty());
        assert!(polygons.len() < points.len());

        for polygon in &polygons {
            assert!(polygon.vertex_count() >= 3);
            assert!(polygon.is_counter_clockwise());
            assert!(polygon.is_convex());
            assert_closed_over(polygon, &soup);

            // Each bounded cell surrounds exactly one site
            let inside = points.iter().filter(|p| polygon.contains(**p)).count();
            assert_eq!(inside, 1);
        }
    }
}
