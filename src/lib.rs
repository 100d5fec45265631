//! Voronoi cell sketches in the plane
//!
//! A standalone library that triangulates random sites with Bowyer-Watson,
//! extracts the dual Voronoi edges, rebuilds closed cell polygons from the
//! unordered edge soup and fills cells with self-avoiding branching walkers.
//! Everything is returned as plain geometry for any renderer.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voronoi_cells::*;
//!
//! // Generate a sketch
//! let config = SketchConfigBuilder::new()
//!     .seed(42)
//!     .preset(SketchPreset::CellsWalkers)
//!     .build().unwrap();
//!
//! let sketch = Sketch::generate(config).unwrap();
//!
//! // Hand the geometry to a renderer
//! for texture in sketch.textures() {
//!     let outline = texture.outline.to_segments(8);
//!     println!("{} outline pieces, {} strokes", outline.len(), texture.strokes.len());
//! }
//! ```
//!
//! The pipeline stages are also usable on their own:
//!
//! ```rust
//! use voronoi_cells::*;
//!
//! let sites = generate_seeded_points(30, 200.0, 200.0, false, 1);
//! let triangles = triangulate(&sites).unwrap();
//! let edges = voronoi_segments(&triangles);
//! let polygons = reconstruct_polygons(&edges);
//! assert!(polygons.iter().all(|p| p.vertex_count() >= 3));
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-cell lookups using KD-tree
//! - `serde`: Enables serialization support for configuration and geometry

// Modules
pub mod error;
pub mod geometry;
pub mod config;
pub mod cell;
pub mod generation;
pub mod outline;
pub mod sketch;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{CellsError, Result};
pub use geometry::{Edge, Point, Polygon, Segment, Triangle, POINT_EPSILON};
pub use config::{CellStyle, SketchConfig, SketchConfigBuilder, SketchPreset};
pub use cell::VoronoiCell;
pub use generation::{
    build_diagram, fill_region, generate_points, generate_seeded_points, lloyd_relaxation,
    reconstruct_polygons, triangulate, voronoi_edges, voronoi_segments, Diagram, LloydOptions,
    VoronoiEdge, Walker, WalkerOptions,
};
pub use outline::{smooth_outline, CubicBezier, Outline};
pub use sketch::{CellTexture, Sketch};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
