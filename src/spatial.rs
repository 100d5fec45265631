//! Spatial indexing for fast position-to-site lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

#[cfg(feature = "spatial-index")]
use crate::geometry::Point;

/// Wrapper around a KD-tree over Voronoi sites
///
/// The nearest site to a position is the site whose Voronoi cell contains it,
/// so this doubles as point location for the diagram.
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build the index from site positions
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_cells::*;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let sites = vec![
    ///     Point::new(0.0, 0.0),
    ///     Point::new(100.0, 0.0),
    ///     Point::new(0.0, 100.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&sites);
    /// assert_eq!(index.find_nearest(Point::new(90.0, 5.0)), 1);
    /// # }
    /// ```
    pub fn new(sites: &[Point]) -> Self {
        let points: Vec<[f64; 2]> = sites.iter().map(|p| [p.x, p.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Index of the site nearest to `position`
    pub fn find_nearest(&self, position: Point) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let sites = vec![
            Point::new(10.0, 10.0),
            Point::new(90.0, 10.0),
            Point::new(90.0, 90.0),
            Point::new(10.0, 90.0),
        ];

        let index = SpatialIndex::new(&sites);

        assert_eq!(index.find_nearest(Point::new(15.0, 12.0)), 0);
        assert_eq!(index.find_nearest(Point::new(70.0, 20.0)), 1);
        assert_eq!(index.find_nearest(Point::new(60.0, 95.0)), 2);
        assert_eq!(index.find_nearest(Point::new(-40.0, 70.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let sites = vec![Point::new(250.0, 0.0), Point::new(0.0, 250.0)];

        let index = SpatialIndex::new(&sites);

        assert_eq!(index.find_nearest(sites[0]), 0);
        assert_eq!(index.find_nearest(sites[1]), 1);
    }
}
