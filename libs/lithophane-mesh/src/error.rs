//! # Mesh Errors
//!
//! Error types for heightmap-to-mesh conversion.
//!
//! Every variant is an input contract violation detected before any geometry
//! is allocated. The synthesis passes themselves cannot fail.

use config::constants::ConfigError;
use thiserror::Error;

/// Errors that can occur while validating conversion inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// Heightmap too small to enclose a solid
    #[error("Invalid heightmap shape: {rows}x{cols} (need at least 2x2)")]
    InvalidShape { rows: usize, cols: usize },

    /// Row-of-rows input with unequal row lengths
    #[error("Heightmap row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Flat buffer length does not match the declared shape
    #[error("Heightmap buffer has {len} values, expected {rows}x{cols}")]
    SizeMismatch { rows: usize, cols: usize, len: usize },

    /// Negative or non-finite height sample
    #[error("Invalid height {value} at ({row}, {col}): heights must be finite and non-negative")]
    InvalidHeight { row: usize, col: usize, value: f64 },

    /// Build angle outside [0, 90] degrees
    #[error("Invalid build angle: {0}° (must be within [0, 90])")]
    InvalidAngle(f64),

    /// Pixel pitch that is not a positive finite length
    #[error("Invalid pixel pitch: {0} mm (must be positive and finite)")]
    InvalidPitch(f64),

    /// Rejected tolerance configuration
    #[error("Invalid tolerances: {0}")]
    Config(#[from] ConfigError),
}

impl MeshError {
    /// Creates an invalid shape error.
    pub fn invalid_shape(rows: usize, cols: usize) -> Self {
        Self::InvalidShape { rows, cols }
    }

    /// Creates an invalid height error for the sample at `(row, col)`.
    pub fn invalid_height(row: usize, col: usize, value: f64) -> Self {
        Self::InvalidHeight { row, col, value }
    }
}
