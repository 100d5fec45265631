//! Error types for sketch generation

use std::fmt;

use crate::geometry::Point;

/// Errors that can occur while building a sketch or querying it
#[derive(Debug, Clone)]
pub enum CellsError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Three collinear vertices were used to build a triangle
    DegenerateTriangle {
        /// First vertex
        a: Point,
        /// Second vertex
        b: Point,
        /// Third vertex
        c: Point,
    },
    /// Generation failed due to geometry issues
    GenerationFailed(String),
    /// Requested cell ID does not exist
    CellNotFound(usize),
}

impl fmt::Display for CellsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellsError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            CellsError::DegenerateTriangle { a, b, c } => write!(
                f,
                "degenerate triangle ({}, {}) ({}, {}) ({}, {}): vertices are collinear",
                a.x, a.y, b.x, b.y, c.x, c.y
            ),
            CellsError::GenerationFailed(msg) => write!(f, "generation failed: {}", msg),
            CellsError::CellNotFound(id) => write!(f, "cell not found: {}", id),
        }
    }
}

impl std::error::Error for CellsError {}

/// Result type alias for sketch operations
pub type Result<T> = std::result::Result<T, CellsError>;
