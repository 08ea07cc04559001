//! # Conversion Parameters
//!
//! Validated scalar inputs for a conversion: the physical size of one grid
//! cell and the print tilt. Both deserialize through their validating
//! constructors so persisted parameter files cannot smuggle in bad values.

use crate::error::MeshError;
use config::constants::{
    DEFAULT_BUILD_ANGLE_DEG, DEFAULT_PIXEL_PITCH_MM, MAX_BUILD_ANGLE_DEG, MIN_BUILD_ANGLE_DEG,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// BUILD ANGLE
// =============================================================================

/// Tilt of the solid relative to the build plate, in degrees.
///
/// 0° lies flat, 90° stands on edge.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::BuildAngle;
///
/// let angle = BuildAngle::new(75.0).unwrap();
/// assert_eq!(angle.degrees(), 75.0);
/// assert!(BuildAngle::new(120.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BuildAngle(f64);

impl BuildAngle {
    /// Lying flat on the plate.
    pub const FLAT: Self = Self(MIN_BUILD_ANGLE_DEG);

    /// Standing on edge.
    pub const VERTICAL: Self = Self(MAX_BUILD_ANGLE_DEG);

    /// Creates a build angle, rejecting values outside `[0, 90]`.
    pub fn new(degrees: f64) -> Result<Self, MeshError> {
        if !(MIN_BUILD_ANGLE_DEG..=MAX_BUILD_ANGLE_DEG).contains(&degrees) {
            return Err(MeshError::InvalidAngle(degrees));
        }
        Ok(Self(degrees))
    }

    /// Returns the angle in degrees.
    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Returns true for a flat (unrotated) build.
    #[inline]
    pub fn is_flat(self) -> bool {
        self.0 == MIN_BUILD_ANGLE_DEG
    }

    /// Returns true for a vertical build.
    #[inline]
    pub fn is_vertical(self) -> bool {
        self.0 == MAX_BUILD_ANGLE_DEG
    }
}

impl Default for BuildAngle {
    fn default() -> Self {
        Self(DEFAULT_BUILD_ANGLE_DEG)
    }
}

impl TryFrom<f64> for BuildAngle {
    type Error = MeshError;

    fn try_from(degrees: f64) -> Result<Self, Self::Error> {
        Self::new(degrees)
    }
}

impl From<BuildAngle> for f64 {
    fn from(angle: BuildAngle) -> Self {
        angle.0
    }
}

// =============================================================================
// PIXEL PITCH
// =============================================================================

/// Physical size of one heightmap cell in millimeters.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::PixelPitch;
///
/// let pitch = PixelPitch::new(0.25).unwrap();
/// assert_eq!(pitch.mm(), 0.25);
/// assert!(PixelPitch::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PixelPitch(f64);

impl PixelPitch {
    /// Creates a pitch, rejecting zero, negative and non-finite lengths.
    pub fn new(mm: f64) -> Result<Self, MeshError> {
        if !(mm.is_finite() && mm > 0.0) {
            return Err(MeshError::InvalidPitch(mm));
        }
        Ok(Self(mm))
    }

    /// Returns the pitch in millimeters.
    #[inline]
    pub fn mm(self) -> f64 {
        self.0
    }

    /// Physical coordinate of grid index `index`.
    #[inline]
    pub fn offset(self, index: usize) -> f64 {
        index as f64 * self.0
    }
}

impl Default for PixelPitch {
    fn default() -> Self {
        Self(DEFAULT_PIXEL_PITCH_MM)
    }
}

impl TryFrom<f64> for PixelPitch {
    type Error = MeshError;

    fn try_from(mm: f64) -> Result<Self, Self::Error> {
        Self::new(mm)
    }
}

impl From<PixelPitch> for f64 {
    fn from(pitch: PixelPitch) -> Self {
        pitch.0
    }
}

// =============================================================================
// MESH PARAMS
// =============================================================================

/// Parameters for one heightmap-to-mesh conversion.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::{BuildAngle, MeshParams, PixelPitch};
///
/// let params = MeshParams {
///     pixel_pitch: PixelPitch::new(0.5).unwrap(),
///     build_angle: BuildAngle::FLAT,
/// };
/// assert!(params.build_angle.is_flat());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshParams {
    /// Millimeters per grid cell
    pub pixel_pitch: PixelPitch,
    /// Print tilt
    pub build_angle: BuildAngle,
}

impl MeshParams {
    /// Creates parameters from raw values, validating both.
    pub fn new(pixel_pitch_mm: f64, build_angle_deg: f64) -> Result<Self, MeshError> {
        Ok(Self {
            pixel_pitch: PixelPitch::new(pixel_pitch_mm)?,
            build_angle: BuildAngle::new(build_angle_deg)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_bounds_inclusive() {
        assert!(BuildAngle::new(0.0).unwrap().is_flat());
        assert!(BuildAngle::new(90.0).unwrap().is_vertical());
    }

    #[test]
    fn test_angle_rejects_out_of_range() {
        assert_eq!(BuildAngle::new(-0.5), Err(MeshError::InvalidAngle(-0.5)));
        assert_eq!(BuildAngle::new(90.01), Err(MeshError::InvalidAngle(90.01)));
        assert!(BuildAngle::new(f64::NAN).is_err());
    }

    #[test]
    fn test_pitch_rejects_non_positive() {
        assert!(PixelPitch::new(0.0).is_err());
        assert!(PixelPitch::new(-1.0).is_err());
        assert!(PixelPitch::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_pitch_offset() {
        let pitch = PixelPitch::new(0.5).unwrap();
        assert_eq!(pitch.offset(4), 2.0);
    }

    #[test]
    fn test_defaults() {
        let params = MeshParams::default();
        assert_eq!(params.build_angle.degrees(), 75.0);
        assert_eq!(params.pixel_pitch.mm(), 0.1);
    }

    #[test]
    fn test_params_round_trip_json() {
        let params = MeshParams::new(0.25, 30.0).unwrap();
        let json = serde_json::to_string(&params).unwrap();
        let parsed: MeshParams = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn test_params_json_rejects_bad_angle() {
        let result: Result<MeshParams, _> =
            serde_json::from_str(r#"{"pixel_pitch": 0.1, "build_angle": 135.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_params_json_fills_defaults() {
        let parsed: MeshParams = serde_json::from_str(r#"{"build_angle": 0.0}"#).unwrap();
        assert!(parsed.build_angle.is_flat());
        assert_eq!(parsed.pixel_pitch, PixelPitch::default());
    }
}
