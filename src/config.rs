//! Sketch Configuration and Builder
//!
//! This module provides configuration types for deterministic sketch generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CellsError, Result};
use crate::generation::WalkerOptions;

/// Canvas and site-count presets for the sketch variants
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SketchPreset {
    /// Plain Voronoi diagram: 800x800 canvas, 50 sites
    Voronoi,
    /// Rounded cells: 2000x2000 canvas, 500 whole-pixel sites
    Cells,
    /// Rounded cells filled with walkers: 1000x1000 canvas, 500 whole-pixel sites
    CellsWalkers,
    /// Custom canvas and site count
    Custom {
        /// Canvas width in pixels
        width: f64,
        /// Canvas height in pixels
        height: f64,
        /// Number of random sites
        point_count: usize,
    },
}

impl SketchPreset {
    /// Canvas width in pixels
    pub fn width(self) -> f64 {
        match self {
            SketchPreset::Voronoi => 800.0,
            SketchPreset::Cells => 2000.0,
            SketchPreset::CellsWalkers => 1000.0,
            SketchPreset::Custom { width, .. } => width,
        }
    }

    /// Canvas height in pixels
    pub fn height(self) -> f64 {
        match self {
            SketchPreset::Voronoi => 800.0,
            SketchPreset::Cells => 2000.0,
            SketchPreset::CellsWalkers => 1000.0,
            SketchPreset::Custom { height, .. } => height,
        }
    }

    /// Number of random sites
    pub fn point_count(self) -> usize {
        match self {
            SketchPreset::Voronoi => 50,
            SketchPreset::Cells | SketchPreset::CellsWalkers => 500,
            SketchPreset::Custom { point_count, .. } => point_count,
        }
    }

    /// Whether sites are floored to whole pixels by default
    pub fn snaps_to_grid(self) -> bool {
        matches!(self, SketchPreset::Cells | SketchPreset::CellsWalkers)
    }

    /// How cells are decorated by default
    pub fn cell_style(self) -> CellStyle {
        match self {
            SketchPreset::Voronoi | SketchPreset::Custom { .. } => CellStyle::Plain,
            SketchPreset::Cells => CellStyle::Rounded,
            SketchPreset::CellsWalkers => CellStyle::Walkers,
        }
    }

    /// Get a human-readable name for this preset
    pub fn name(self) -> &'static str {
        match self {
            SketchPreset::Voronoi => "Voronoi",
            SketchPreset::Cells => "Cells",
            SketchPreset::CellsWalkers => "CellsWalkers",
            SketchPreset::Custom { .. } => "Custom",
        }
    }
}

impl Default for SketchPreset {
    fn default() -> Self {
        SketchPreset::Voronoi
    }
}

/// Decoration applied to each closed cell
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStyle {
    /// Bare Voronoi edges only
    #[default]
    Plain,
    /// Shrunk cells with rounded corners
    Rounded,
    /// Rounded cells filled with walker texture
    Walkers,
}

/// Configuration for deterministic sketch generation
///
/// The same configuration always produces the identical sketch.
///
/// # Example
///
/// ```rust
/// use voronoi_cells::*;
///
/// let config = SketchConfigBuilder::new()
///     .seed(42)
///     .preset(SketchPreset::Cells)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.point_count(), 500);
/// assert!(config.snap_to_grid);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchConfig {
    /// Random seed for site placement and walkers
    pub seed: u64,

    /// Canvas size and site count
    pub preset: SketchPreset,

    /// Floor site coordinates to whole pixels
    pub snap_to_grid: bool,

    /// Number of Lloyd's Relaxation iterations applied to the sites
    ///
    /// - 0: Raw random sites (default)
    /// - 2-3: Noticeably more even cells
    pub lloyd_iterations: usize,

    /// Weight of the centroid when shrinking cells (0 keeps cells unchanged)
    pub shrink: f64,

    /// Distance trimmed from each edge end when rounding corners
    pub rounding: f64,

    /// Cell decoration
    pub cell_style: CellStyle,

    /// Walker tuning, used with [`CellStyle::Walkers`]
    pub walker: WalkerOptions,
}

impl SketchConfig {
    /// Canvas width
    #[inline]
    pub fn width(&self) -> f64 {
        self.preset.width()
    }

    /// Canvas height
    #[inline]
    pub fn height(&self) -> f64 {
        self.preset.height()
    }

    /// Number of random sites
    #[inline]
    pub fn point_count(&self) -> usize {
        self.preset.point_count()
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        let preset = SketchPreset::default();
        Self {
            seed: 0,
            preset,
            snap_to_grid: preset.snaps_to_grid(),
            lloyd_iterations: 0,
            shrink: 0.2,
            rounding: 10.0,
            cell_style: preset.cell_style(),
            walker: WalkerOptions::default(),
        }
    }
}

/// Builder for creating SketchConfig with validation
///
/// # Example
///
/// ```rust
/// use voronoi_cells::*;
///
/// let config = SketchConfigBuilder::new()
///     .seed(12345)
///     .preset(SketchPreset::Custom { width: 400.0, height: 300.0, point_count: 80 })
///     .lloyd_iterations(2)
///     .unwrap()
///     .shrink(0.3)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.width(), 400.0);
/// ```
#[derive(Debug, Clone)]
pub struct SketchConfigBuilder {
    seed: Option<u64>,
    preset: SketchPreset,
    snap_to_grid: Option<bool>,
    lloyd_iterations: usize,
    shrink: f64,
    rounding: f64,
    cell_style: Option<CellStyle>,
    walker: WalkerOptions,
}

impl SketchConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random
    /// - preset: Voronoi (800x800, 50 sites)
    /// - snap_to_grid and cell_style: taken from the preset
    /// - lloyd_iterations: 0
    /// - shrink: 0.2
    /// - rounding: 10
    /// - walker: [`WalkerOptions::default`]
    pub fn new() -> Self {
        Self {
            seed: None,
            preset: SketchPreset::default(),
            snap_to_grid: None,
            lloyd_iterations: 0,
            shrink: 0.2,
            rounding: 10.0,
            cell_style: None,
            walker: WalkerOptions::default(),
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the canvas/site-count preset
    pub fn preset(mut self, preset: SketchPreset) -> Self {
        self.preset = preset;
        self
    }

    /// Override whether sites are floored to whole pixels
    pub fn snap_to_grid(mut self, snap: bool) -> Self {
        self.snap_to_grid = Some(snap);
        self
    }

    /// Set the number of Lloyd's Relaxation iterations
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > 20
    pub fn lloyd_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations > 20 {
            return Err(CellsError::InvalidConfig(format!(
                "Lloyd iterations must be <= 20 (got {})",
                iterations
            )));
        }
        self.lloyd_iterations = iterations;
        Ok(self)
    }

    /// Set how far cells shrink toward their centroid
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `0 <= shrink < 1`
    pub fn shrink(mut self, shrink: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&shrink) {
            return Err(CellsError::InvalidConfig(format!(
                "Shrink factor must be within [0, 1) (got {})",
                shrink
            )));
        }
        self.shrink = shrink;
        Ok(self)
    }

    /// Set the corner rounding distance
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if rounding is negative
    pub fn rounding(mut self, rounding: f64) -> Result<Self> {
        if !(rounding >= 0.0) {
            return Err(CellsError::InvalidConfig(format!(
                "Rounding must be >= 0 (got {})",
                rounding
            )));
        }
        self.rounding = rounding;
        Ok(self)
    }

    /// Override the cell decoration
    pub fn cell_style(mut self, style: CellStyle) -> Self {
        self.cell_style = Some(style);
        self
    }

    /// Set walker options
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any option is out of range
    pub fn walker(mut self, options: WalkerOptions) -> Result<Self> {
        options.validate()?;
        self.walker = options;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, a random one is drawn.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a custom preset has a non-positive canvas size.
    pub fn build(self) -> Result<SketchConfig> {
        let (width, height) = (self.preset.width(), self.preset.height());
        if !(width > 0.0 && width.is_finite() && height > 0.0 && height.is_finite()) {
            return Err(CellsError::InvalidConfig(format!(
                "Canvas size must be positive (got {}x{})",
                width, height
            )));
        }

        Ok(SketchConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            preset: self.preset,
            snap_to_grid: self.snap_to_grid.unwrap_or(self.preset.snaps_to_grid()),
            lloyd_iterations: self.lloyd_iterations,
            shrink: self.shrink,
            rounding: self.rounding,
            cell_style: self.cell_style.unwrap_or(self.preset.cell_style()),
            walker: self.walker,
        })
    }
}

impl Default for SketchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
