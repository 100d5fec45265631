//! Voronoi Cell Structure
//!
//! A closed Voronoi polygon attached to the site that generated it.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Polygon, Triangle};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A single closed Voronoi cell
///
/// Only sites whose region is fully enclosed by Voronoi edges get a cell;
/// sites on the outer boundary of the diagram have open regions and are skipped.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// Position of this cell in the sketch's cell list
    pub id: usize,

    /// Index of the generating site in the sketch's site list
    pub site_index: usize,

    /// The generating site
    pub site: Point,

    /// Cell boundary, counter-clockwise
    pub polygon: Polygon,

    /// IDs of cells whose sites share a Delaunay edge with this one
    pub neighbors: Vec<usize>,
}

impl VoronoiCell {
    /// Get the number of neighboring cells
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if this cell is a neighbor of another cell
    #[inline]
    pub fn is_neighbor_of(&self, other_cell_id: usize) -> bool {
        self.neighbors.contains(&other_cell_id)
    }

    /// Get the vertex count (polygon complexity)
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.polygon.vertex_count()
    }

    /// Area of the cell polygon
    #[inline]
    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    /// Distance between the two generating sites
    #[inline]
    pub fn distance_to(&self, other: &VoronoiCell) -> f64 {
        self.site.distance(other.site)
    }
}

/// Attach each polygon to its site and link neighbours
///
/// The vertex mean of a convex cell lies inside it, and every point inside a
/// Voronoi cell is nearest to that cell's site, so a nearest-site query on
/// the centroid identifies the owner. Cells are ordered by site index.
pub fn build_cells(sites: &[Point], triangles: &[Triangle], polygons: Vec<Polygon>) -> Vec<VoronoiCell> {
    if sites.is_empty() {
        return Vec::new();
    }

    #[cfg(feature = "spatial-index")]
    {
        let index = SpatialIndex::new(sites);
        build_cells_with_index(sites, triangles, polygons, &index)
    }
    #[cfg(not(feature = "spatial-index"))]
    {
        attach_cells(sites, triangles, polygons, |p| nearest_site(sites, p))
    }
}

/// [`build_cells`] reusing a KD-tree already built over `sites`
#[cfg(feature = "spatial-index")]
pub fn build_cells_with_index(
    sites: &[Point],
    triangles: &[Triangle],
    polygons: Vec<Polygon>,
    index: &SpatialIndex,
) -> Vec<VoronoiCell> {
    if sites.is_empty() {
        return Vec::new();
    }
    attach_cells(sites, triangles, polygons, |p| index.find_nearest(p))
}

fn attach_cells(
    sites: &[Point],
    triangles: &[Triangle],
    polygons: Vec<Polygon>,
    locate: impl Fn(Point) -> usize,
) -> Vec<VoronoiCell> {
    let mut owned: Vec<(usize, Polygon)> = Vec::with_capacity(polygons.len());
    let mut claimed = HashSet::new();
    for polygon in polygons {
        let site_index = locate(polygon.centroid());
        if claimed.insert(site_index) {
            owned.push((site_index, polygon));
        }
    }
    owned.sort_by_key(|(site_index, _)| *site_index);

    let cell_of_site: HashMap<usize, usize> = owned
        .iter()
        .enumerate()
        .map(|(cell_id, (site_index, _))| (*site_index, cell_id))
        .collect();
    let site_neighbors = build_site_adjacency(sites, triangles);

    owned
        .into_iter()
        .enumerate()
        .map(|(id, (site_index, polygon))| {
            let mut neighbors: Vec<usize> = site_neighbors
                .get(&site_index)
                .map(|adjacent| {
                    adjacent
                        .iter()
                        .filter_map(|s| cell_of_site.get(s).copied())
                        .collect()
                })
                .unwrap_or_default();
            neighbors.sort(); // Deterministic ordering

            VoronoiCell {
                id,
                site_index,
                site: sites[site_index],
                polygon,
                neighbors,
            }
        })
        .collect()
}

/// Map from site index to the indices of sites sharing a Delaunay edge
fn build_site_adjacency(sites: &[Point], triangles: &[Triangle]) -> HashMap<usize, HashSet<usize>> {
    let lookup: HashMap<(u64, u64), usize> = sites
        .iter()
        .enumerate()
        .map(|(i, p)| ((p.x.to_bits(), p.y.to_bits()), i))
        .collect();
    let find = |p: Point| lookup.get(&(p.x.to_bits(), p.y.to_bits())).copied();

    let mut adjacency: HashMap<usize, HashSet<usize>> = HashMap::new();
    for triangle in triangles {
        for edge in triangle.edges() {
            if let (Some(a), Some(b)) = (find(edge.a), find(edge.b)) {
                adjacency.entry(a).or_default().insert(b);
                adjacency.entry(b).or_default().insert(a);
            }
        }
    }
    adjacency
}

/// Linear nearest-site scan used without the KD-tree
#[cfg(not(feature = "spatial-index"))]
fn nearest_site(sites: &[Point], p: Point) -> usize {
    sites
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.distance(p)
                .partial_cmp(&b.distance(p))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}
