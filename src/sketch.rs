//! Sketch: the full generation pipeline and its products

use std::collections::HashSet;
use std::time::Instant;

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cell::VoronoiCell;
use crate::config::{CellStyle, SketchConfig};
use crate::error::{CellsError, Result};
use crate::generation::{
    build_diagram, dedup_points, fill_region, generate_points, lloyd_relaxation,
};
use crate::geometry::{Point, Polygon, Segment, Triangle};
use crate::outline::{smooth_outline, Outline};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "spatial-index")]
use crate::cell::build_cells_with_index;
#[cfg(not(feature = "spatial-index"))]
use crate::cell::build_cells;
#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// Decoration generated for one closed cell
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CellTexture {
    /// ID of the decorated cell
    pub cell_id: usize,
    /// The cell shrunk toward its centroid
    pub shape: Polygon,
    /// Rounded outline of `shape`
    pub outline: Outline,
    /// Walker strokes inside `shape`, empty unless the style is [`CellStyle::Walkers`]
    pub strokes: Vec<Segment>,
}

/// A generated Voronoi sketch
///
/// Holds every intermediate product of the pipeline as plain geometry, ready
/// for an external renderer.
///
/// # Examples
///
/// ```
/// use voronoi_cells::*;
///
/// let config = SketchConfigBuilder::new()
///     .seed(42)
///     .preset(SketchPreset::Voronoi)
///     .build()
///     .unwrap();
///
/// let sketch = Sketch::generate(config).unwrap();
/// println!("Generated {} closed cells", sketch.cell_count());
///
/// if let Some(cell) = sketch.get_cell(0) {
///     println!("Cell 0 has {} corners", cell.vertex_count());
/// }
/// ```
#[derive(Clone)]
pub struct Sketch {
    config: SketchConfig,
    sites: Vec<Point>,
    triangles: Vec<Triangle>,
    voronoi_edges: Vec<Segment>,
    cells: Vec<VoronoiCell>,
    textures: Vec<CellTexture>,

    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl Sketch {
    /// Run the whole pipeline for `config`
    ///
    /// Sites are placed, optionally relaxed, triangulated, turned into
    /// Voronoi edges, stitched into cells and finally decorated according to
    /// [`SketchConfig::cell_style`].
    ///
    /// # Errors
    ///
    /// Propagates triangulation failures.
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_cells::*;
    ///
    /// let config = SketchConfigBuilder::new()
    ///     .seed(7)
    ///     .preset(SketchPreset::Custom { width: 300.0, height: 300.0, point_count: 40 })
    ///     .cell_style(CellStyle::Walkers)
    ///     .build()
    ///     .unwrap();
    ///
    /// let sketch = Sketch::generate(config).unwrap();
    /// assert_eq!(sketch.textures().len(), sketch.cell_count());
    /// ```
    pub fn generate(config: SketchConfig) -> Result<Self> {
        let start = Instant::now();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let raw = generate_points(
            config.point_count(),
            config.width(),
            config.height(),
            config.snap_to_grid,
            &mut rng,
        );
        let mut sites = dedup_points(&raw);
        if config.lloyd_iterations > 0 {
            sites = dedup_points(&lloyd_relaxation(sites, config.lloyd_iterations)?);
        }

        let diagram = build_diagram(&sites)?;

        #[cfg(feature = "spatial-index")]
        let spatial_index = SpatialIndex::new(&sites);
        #[cfg(feature = "spatial-index")]
        let cells =
            build_cells_with_index(&sites, &diagram.triangles, diagram.polygons, &spatial_index);
        #[cfg(not(feature = "spatial-index"))]
        let cells = build_cells(&sites, &diagram.triangles, diagram.polygons);

        let textures: Vec<CellTexture> = match config.cell_style {
            CellStyle::Plain => Vec::new(),
            CellStyle::Rounded | CellStyle::Walkers => cells
                .iter()
                .map(|cell| {
                    let shape = cell.polygon.scale(config.shrink);
                    let outline = smooth_outline(&shape, config.rounding);
                    let strokes = if config.cell_style == CellStyle::Walkers {
                        fill_region(&shape, shape.centroid(), &config.walker, &mut rng)
                            .split_off(shape.vertex_count())
                    } else {
                        Vec::new()
                    };
                    CellTexture {
                        cell_id: cell.id,
                        shape,
                        outline,
                        strokes,
                    }
                })
                .collect(),
        };

        info!(
            "[Sketch] {} preset, seed {}: {} sites, {} triangles, {} edges, {} cells in {:?}",
            config.preset.name(),
            config.seed,
            sites.len(),
            diagram.triangles.len(),
            diagram.edges.len(),
            cells.len(),
            start.elapsed()
        );

        Ok(Self {
            config,
            sites,
            triangles: diagram.triangles,
            voronoi_edges: diagram.edges,
            cells,
            textures,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Get the configuration used to generate this sketch
    #[inline]
    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Sites after deduplication and relaxation
    #[inline]
    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    /// Delaunay triangles of the sites
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Every Voronoi edge, including those of open boundary regions
    #[inline]
    pub fn voronoi_edges(&self) -> &[Segment] {
        &self.voronoi_edges
    }

    /// Number of closed cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Get a cell by ID
    ///
    /// Returns `None` if the cell ID is out of bounds.
    #[inline]
    pub fn get_cell(&self, id: usize) -> Option<&VoronoiCell> {
        self.cells.get(id)
    }

    /// All closed cells, ordered by site index
    #[inline]
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    /// Polygons of all closed cells
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> + '_ {
        self.cells.iter().map(|c| &c.polygon)
    }

    /// Per-cell decoration, empty for [`CellStyle::Plain`]
    #[inline]
    pub fn textures(&self) -> &[CellTexture] {
        &self.textures
    }

    /// Neighbor IDs of a cell, empty if the ID is invalid
    pub fn get_neighbors(&self, cell_id: usize) -> &[usize] {
        self.cells
            .get(cell_id)
            .map(|c| c.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Find the closed cell containing `position` (requires spatial-index feature)
    ///
    /// Returns `None` when the position lies in an open boundary region.
    ///
    /// # Example
    ///
    /// ```
    /// # use voronoi_cells::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// # let config = SketchConfigBuilder::new().seed(3).build().unwrap();
    /// # let sketch = Sketch::generate(config).unwrap();
    /// if let Some(cell) = sketch.find_cell_at(Point::new(400.0, 400.0)) {
    ///     assert!(cell.polygon.contains(Point::new(400.0, 400.0)));
    /// }
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_cell_at(&self, position: Point) -> Option<&VoronoiCell> {
        if self.sites.is_empty() {
            return None;
        }
        let site_index = self.spatial_index.find_nearest(position);
        self.cells
            .binary_search_by_key(&site_index, |c| c.site_index)
            .ok()
            .map(|id| &self.cells[id])
    }

    /// Find cells within a given hop count from a center cell (BFS)
    ///
    /// The result includes the center cell and is sorted by ID.
    ///
    /// # Errors
    ///
    /// Returns `CellNotFound` if `center_id` is not a cell.
    pub fn find_cells_within_radius(&self, center_id: usize, hops: usize) -> Result<Vec<usize>> {
        if center_id >= self.cells.len() {
            return Err(CellsError::CellNotFound(center_id));
        }

        let mut visited = HashSet::new();
        let mut current = vec![center_id];
        visited.insert(center_id);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &cell_id in &current {
                for &neighbor in self.get_neighbors(cell_id) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            current = next;
        }

        let mut found: Vec<usize> = visited.into_iter().collect();
        found.sort_unstable();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SketchConfigBuilder, SketchPreset};

    fn small(style: CellStyle, seed: u64) -> Sketch {
        let config = SketchConfigBuilder::new()
            .seed(seed)
            .preset(SketchPreset::Custom {
                width: 400.0,
                height: 400.0,
                point_count: 60,
            })
            .cell_style(style)
            .build()
            .unwrap();
        Sketch::generate(config).unwrap()
    }

    #[test]
    fn test_sketch_generation() {
        let sketch = small(CellStyle::Plain, 42);

        assert_eq!(sketch.sites().len(), 60);
        assert!(!sketch.triangles().is_empty());
        assert!(!sketch.voronoi_edges().is_empty());
        assert!(sketch.cell_count() > 0);
        assert!(sketch.cell_count() < sketch.sites().len());
        assert!(sketch.textures().is_empty());
        assert_eq!(sketch.polygons().count(), sketch.cell_count());
    }

    #[test]
    fn test_same_seed_same_sketch() {
        let a = small(CellStyle::Walkers, 99);
        let b = small(CellStyle::Walkers, 99);

        assert_eq!(a.sites(), b.sites());
        assert_eq!(a.voronoi_edges(), b.voronoi_edges());
        assert_eq!(a.cells(), b.cells());
        assert_eq!(a.textures(), b.textures());
    }

    #[test]
    fn test_rounded_textures() {
        let sketch = small(CellStyle::Rounded, 5);

        assert_eq!(sketch.textures().len(), sketch.cell_count());
        for texture in sketch.textures() {
            let cell = sketch.get_cell(texture.cell_id).unwrap();
            assert!(texture.shape.area() < cell.area());
            assert_eq!(texture.outline.lines.len(), cell.vertex_count());
            assert!(texture.strokes.is_empty());
        }
    }

    #[test]
    fn test_walker_strokes_stay_inside() {
        let sketch = small(CellStyle::Walkers, 11);

        let mut total = 0;
        for texture in sketch.textures() {
            let boundary = texture.shape.segments();
            for stroke in &texture.strokes {
                assert!(!crate::geometry::crosses_any(&boundary, stroke));
                assert!(texture.shape.contains(stroke.end));
            }
            total += texture.strokes.len();
        }
        assert!(total > 0);
    }

    #[test]
    fn test_snapped_sites() {
        let config = SketchConfigBuilder::new()
            .seed(1)
            .preset(SketchPreset::Custom {
                width: 200.0,
                height: 200.0,
                point_count: 50,
            })
            .snap_to_grid(true)
            .build()
            .unwrap();
        let sketch = Sketch::generate(config).unwrap();

        for site in sketch.sites() {
            assert_eq!(site.x, site.x.floor());
            assert_eq!(site.y, site.y.floor());
        }
    }

    #[test]
    fn test_lloyd_sketch() {
        let config = SketchConfigBuilder::new()
            .seed(42)
            .lloyd_iterations(2)
            .unwrap()
            .build()
            .unwrap();
        let sketch = Sketch::generate(config).unwrap();
        assert!(sketch.cell_count() > 0);
    }

    #[test]
    fn test_get_cell() {
        let sketch = small(CellStyle::Plain, 42);

        assert!(sketch.get_cell(0).is_some());
        assert!(sketch.get_cell(sketch.cell_count()).is_none());
        assert!(sketch.get_neighbors(999_999).is_empty());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_cell_at() {
        let sketch = small(CellStyle::Plain, 42);

        for cell in sketch.cells() {
            let found = sketch.find_cell_at(cell.site).unwrap();
            assert_eq!(found.id, cell.id);

            let inside = cell.polygon.centroid();
            assert_eq!(sketch.find_cell_at(inside).unwrap().id, cell.id);
        }
    }

    #[test]
    fn test_find_cells_within_radius() {
        let sketch = small(CellStyle::Plain, 42);
        let center = sketch
            .cells()
            .iter()
            .max_by_key(|c| c.neighbor_count())
            .unwrap()
            .id;

        let r0 = sketch.find_cells_within_radius(center, 0).unwrap();
        assert_eq!(r0, vec![center]);

        let r1 = sketch.find_cells_within_radius(center, 1).unwrap();
        assert_eq!(r1.len(), 1 + sketch.get_neighbors(center).len());

        let r2 = sketch.find_cells_within_radius(center, 2).unwrap();
        assert!(r2.len() >= r1.len());

        assert!(matches!(
            sketch.find_cells_within_radius(999_999, 1),
            Err(CellsError::CellNotFound(999_999))
        ));
    }
}
