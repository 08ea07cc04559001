//! # Configuration Constants
//!
//! Centralized constants for the heightmap-to-mesh pipeline.
//!
//! ## Categories
//!
//! - **Grid**: Shape limits and defaults for heightmap input
//! - **Orientation**: Build angle domain and the 45° workaround
//! - **Projection**: Flat-bottom contact patch sizing
//! - **Precision**: Rounding and merge tolerances used by the repair passes

use std::fmt;

// =============================================================================
// GRID CONSTANTS
// =============================================================================

/// Minimum number of rows and columns in a heightmap.
///
/// A single row or column has no area and cannot enclose a solid.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_GRID_DIMENSION;
///
/// let (rows, cols) = (1, 10);
/// assert!(rows < MIN_GRID_DIMENSION || cols < MIN_GRID_DIMENSION);
/// ```
pub const MIN_GRID_DIMENSION: usize = 2;

/// Default physical size of one heightmap cell in millimeters.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_PIXEL_PITCH_MM;
///
/// // 500 cells across at the default pitch is a 49.9 mm wide print
/// let width = (500 - 1) as f64 * DEFAULT_PIXEL_PITCH_MM;
/// assert!((width - 49.9).abs() < 1e-9);
/// ```
pub const DEFAULT_PIXEL_PITCH_MM: f64 = 0.1;

// =============================================================================
// ORIENTATION CONSTANTS
// =============================================================================

/// Lowest accepted build angle (lying flat on the plate).
pub const MIN_BUILD_ANGLE_DEG: f64 = 0.0;

/// Highest accepted build angle (standing on edge).
pub const MAX_BUILD_ANGLE_DEG: f64 = 90.0;

/// Default print tilt in degrees.
///
/// Steep tilts print lithophanes with fewer visible layer lines while still
/// leaving a flat contact patch on the build plate.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_BUILD_ANGLE_DEG, MAX_BUILD_ANGLE_DEG, MIN_BUILD_ANGLE_DEG};
///
/// assert!(DEFAULT_BUILD_ANGLE_DEG > MIN_BUILD_ANGLE_DEG);
/// assert!(DEFAULT_BUILD_ANGLE_DEG < MAX_BUILD_ANGLE_DEG);
/// ```
pub const DEFAULT_BUILD_ANGLE_DEG: f64 = 75.0;

/// Build angle at which rotated coordinates become numerically unstable.
///
/// At exactly 45° `sin` and `cos` are equal, so distinct grid vertices can
/// rotate onto the same Y/Z values and confuse the plate merge pass.
pub const UNSTABLE_ANGLE_DEG: f64 = 45.0;

/// Half-width of the window around [`UNSTABLE_ANGLE_DEG`] that is perturbed.
pub const UNSTABLE_ANGLE_WINDOW_DEG: f64 = 0.1;

/// Angle used in place of any build angle inside the unstable window.
///
/// # Example
///
/// ```rust
/// use config::constants::{PERTURBED_ANGLE_DEG, UNSTABLE_ANGLE_DEG, UNSTABLE_ANGLE_WINDOW_DEG};
///
/// let requested: f64 = 45.05;
/// let effective = if (requested - UNSTABLE_ANGLE_DEG).abs() < UNSTABLE_ANGLE_WINDOW_DEG {
///     PERTURBED_ANGLE_DEG
/// } else {
///     requested
/// };
/// assert_eq!(effective, 45.1);
/// ```
pub const PERTURBED_ANGLE_DEG: f64 = 45.1;

// =============================================================================
// PROJECTION CONSTANTS
// =============================================================================

/// Target width of the flat contact patch for tilted prints, in millimeters.
///
/// The projector sinks the tilted solid by `FLAT_CONTACT_WIDTH_MM * sin(angle)`
/// so that roughly this much of the underside lands on the plate.
pub const FLAT_CONTACT_WIDTH_MM: f64 = 2.0;

/// Minimum sink depth as a fraction of the rotated model height.
///
/// # Example
///
/// ```rust
/// use config::constants::{FLAT_CONTACT_WIDTH_MM, FLAT_DEPTH_HEIGHT_FRACTION};
///
/// let angle = 75.0_f64.to_radians();
/// let model_height = 48.0;
/// let depth = (FLAT_CONTACT_WIDTH_MM * angle.sin()).max(model_height * FLAT_DEPTH_HEIGHT_FRACTION);
/// assert!(depth > 1.9);
/// ```
pub const FLAT_DEPTH_HEIGHT_FRACTION: f64 = 0.01;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Number of decimal places kept when rounding projected coordinates and
/// when comparing triangles for duplicates.
///
/// # Example
///
/// ```rust
/// use config::constants::COORDINATE_DECIMALS;
///
/// let scale = 10f64.powi(COORDINATE_DECIMALS as i32);
/// let rounded = (1.23456789 * scale).round() / scale;
/// assert_eq!(rounded, 1.234568);
/// ```
pub const COORDINATE_DECIMALS: u32 = 6;

/// Distance below which two vertices are considered coincident (mm).
///
/// Also used as the "on the plate" test for the Z=0 merge pass.
pub const DEGENERATE_EPSILON_MM: f64 = 1e-6;

/// Width of the Y clustering window for plate vertices, in pixel pitches.
///
/// This is the largest Y drift the flat-bottom projection introduces between
/// vertices that were logically identical before it ran.
pub const PLATE_MERGE_PITCH_FACTOR: f64 = 2.0;

/// Largest accepted value for [`Tolerances::coordinate_decimals`].
///
/// Beyond twelve decimals the scaled coordinates of a 1 m print leave the
/// range where `f64` can represent every integer step.
pub const MAX_COORDINATE_DECIMALS: u32 = 12;

// =============================================================================
// TOLERANCES
// =============================================================================

/// Validated bundle of the tolerances consumed by the projection and repair
/// passes.
///
/// # Examples
/// ```
/// use config::constants::Tolerances;
/// let tolerances = Tolerances::default();
/// assert_eq!(tolerances.coordinate_scale(), 1e6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Decimal places kept when rounding coordinates.
    pub coordinate_decimals: u32,
    /// Vertex coincidence distance in millimeters.
    pub degenerate_epsilon: f64,
    /// Plate merge window in pixel pitches.
    pub plate_merge_factor: f64,
}

impl Tolerances {
    /// Builds tolerances, rejecting values the repair passes cannot use.
    ///
    /// # Examples
    /// ```
    /// use config::constants::{ConfigError, Tolerances};
    /// assert!(Tolerances::new(6, 1e-6, 2.0).is_ok());
    /// assert_eq!(
    ///     Tolerances::new(6, 0.0, 2.0).unwrap_err(),
    ///     ConfigError::InvalidEpsilon(0.0)
    /// );
    /// ```
    pub fn new(
        coordinate_decimals: u32,
        degenerate_epsilon: f64,
        plate_merge_factor: f64,
    ) -> Result<Self, ConfigError> {
        if coordinate_decimals == 0 || coordinate_decimals > MAX_COORDINATE_DECIMALS {
            return Err(ConfigError::InvalidDecimals(coordinate_decimals));
        }
        if !(degenerate_epsilon.is_finite() && degenerate_epsilon > 0.0) {
            return Err(ConfigError::InvalidEpsilon(degenerate_epsilon));
        }
        if !(plate_merge_factor.is_finite() && plate_merge_factor > 0.0) {
            return Err(ConfigError::InvalidMergeFactor(plate_merge_factor));
        }
        Ok(Self {
            coordinate_decimals,
            degenerate_epsilon,
            plate_merge_factor,
        })
    }

    /// Multiplier that turns a coordinate into its rounded integer grid step.
    #[inline]
    pub fn coordinate_scale(&self) -> f64 {
        10f64.powi(self.coordinate_decimals as i32)
    }

    /// Rounds a coordinate to `coordinate_decimals` places.
    ///
    /// # Examples
    /// ```
    /// use config::constants::Tolerances;
    /// assert_eq!(Tolerances::default().round(0.1234564), 0.123456);
    /// ```
    #[inline]
    pub fn round(&self, value: f64) -> f64 {
        let scale = self.coordinate_scale();
        (value * scale).round() / scale
    }

    /// Integer key of a coordinate after rounding.
    ///
    /// Negative zero and positive zero map to the same key.
    #[inline]
    pub fn quantize(&self, value: f64) -> i64 {
        (value * self.coordinate_scale()).round() as i64
    }

    /// Y clustering window in millimeters for the given pixel pitch.
    #[inline]
    pub fn plate_merge_window(&self, pixel_pitch_mm: f64) -> f64 {
        self.plate_merge_factor * pixel_pitch_mm
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            coordinate_decimals: COORDINATE_DECIMALS,
            degenerate_epsilon: DEGENERATE_EPSILON_MM,
            plate_merge_factor: PLATE_MERGE_PITCH_FACTOR,
        }
    }
}

/// Error returned when invalid tolerance values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when the decimal count is zero or above [`MAX_COORDINATE_DECIMALS`].
    InvalidDecimals(u32),
    /// Raised when the coincidence epsilon is not a positive finite number.
    InvalidEpsilon(f64),
    /// Raised when the merge factor is not a positive finite number.
    InvalidMergeFactor(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDecimals(value) => {
                write!(
                    f,
                    "coordinate_decimals must be within 1..={MAX_COORDINATE_DECIMALS}: {value}"
                )
            }
            ConfigError::InvalidEpsilon(value) => {
                write!(f, "degenerate_epsilon must be positive: {value}")
            }
            ConfigError::InvalidMergeFactor(value) => {
                write!(f, "plate_merge_factor must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
