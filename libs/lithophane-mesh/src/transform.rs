//! # Rigid Transform & Flat-Bottom Projector
//!
//! Tilts the assembled solid about the X axis for printing and puts it on
//! the build plate.
//!
//! - **Flat** (0°): untouched, the bottom already lies at Z=0.
//! - **Vertical** (90°): rotated, then lifted so the lowest point is at Z=0.
//! - **Tilted**: rotated, sunk below the plate by a flat-contact depth, and
//!   every corner below the plate slid up the tilted bottom plane onto Z=0.
//!
//! ## Projection geometry
//!
//! A corner below the plate at depth `-z` moves by `-z * cot(angle)` in Y
//! before its Z is clamped. For a point on a face parallel to the unrotated
//! bottom this is exactly the point where that face meets the plate, so
//! tilted faces crossing the plate stay planar instead of tearing.

use crate::mesh::Mesh;
use crate::params::BuildAngle;
use config::constants::{
    Tolerances, FLAT_CONTACT_WIDTH_MM, FLAT_DEPTH_HEIGHT_FRACTION, PERTURBED_ANGLE_DEG,
    UNSTABLE_ANGLE_DEG, UNSTABLE_ANGLE_WINDOW_DEG,
};
use glam::{DMat4, DVec3};
use tracing::{debug, warn};

// =============================================================================
// ORIENTATION
// =============================================================================

/// How the solid is placed on the build plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Lying flat, no rotation
    Flat,
    /// Tilted and projected onto a flat bottom
    Tilted {
        /// Angle asked for, in degrees
        requested: f64,
        /// Angle actually applied after the 45° workaround
        effective: f64,
    },
    /// Standing on edge
    Vertical,
}

impl Orientation {
    /// Classifies a build angle.
    pub fn for_angle(angle: BuildAngle) -> Self {
        if angle.is_flat() {
            Self::Flat
        } else if angle.is_vertical() {
            Self::Vertical
        } else {
            Self::Tilted {
                requested: angle.degrees(),
                effective: stable_tilt(angle.degrees()),
            }
        }
    }

    /// Rotation applied about X, in degrees.
    pub fn effective_degrees(&self) -> f64 {
        match self {
            Self::Flat => 0.0,
            Self::Tilted { effective, .. } => *effective,
            Self::Vertical => 90.0,
        }
    }

    /// Returns true if this placement runs the flat-bottom projector.
    #[inline]
    pub fn projects(&self) -> bool {
        matches!(self, Self::Tilted { .. })
    }

    /// Short label for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Tilted { .. } => "tilted",
            Self::Vertical => "vertical",
        }
    }
}

/// Moves a tilt out of the unstable window around 45°.
///
/// At exactly 45° `sin == cos`, and rotated grid points collide in ways the
/// plate merge cannot untangle.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::transform::stable_tilt;
///
/// assert_eq!(stable_tilt(45.0), 45.1);
/// assert_eq!(stable_tilt(44.95), 45.1);
/// assert_eq!(stable_tilt(44.8), 44.8);
/// ```
pub fn stable_tilt(degrees: f64) -> f64 {
    if (degrees - UNSTABLE_ANGLE_DEG).abs() < UNSTABLE_ANGLE_WINDOW_DEG {
        PERTURBED_ANGLE_DEG
    } else {
        degrees
    }
}

// =============================================================================
// ROTATION
// =============================================================================

/// Rotates every corner about the X axis by `degrees`.
///
/// Positive angles lift +Y toward +Z: `y' = y cos - z sin`, `z' = y sin + z cos`.
pub fn rotate_about_x(mesh: &mut Mesh, degrees: f64) {
    mesh.transform(&DMat4::from_rotation_x(degrees.to_radians()));
}

/// Translates the mesh along Z so its lowest corner sits at Z=0.
pub fn rest_on_plate(mesh: &mut Mesh) {
    let min_z = mesh.min_z();
    mesh.translate(DVec3::new(0.0, 0.0, -min_z));
}

// =============================================================================
// FLAT-BOTTOM PROJECTION
// =============================================================================

/// Outcome of one flat-bottom projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// How far below the plate the lowest corner was sunk (mm)
    pub flat_depth: f64,
    /// Triangle corners that were slid onto the plate
    pub clamped_corners: usize,
}

/// Sink depth giving a flat contact patch for a solid tilted by `degrees`.
///
/// `max(2 mm * sin(angle), 1% of the rotated model height)`.
pub fn flat_depth(degrees: f64, model_height: f64) -> f64 {
    (FLAT_CONTACT_WIDTH_MM * degrees.to_radians().sin())
        .max(model_height * FLAT_DEPTH_HEIGHT_FRACTION)
}

/// Sinks an already-rotated mesh below the plate and projects the
/// submerged part onto Z=0 along the tilted bottom plane.
///
/// `degrees` must be the rotation that was applied and lie strictly
/// between 0 and 90. Every coordinate is rounded to
/// `tolerances.coordinate_decimals` places afterwards so corners that
/// should coincide compare equal.
pub fn project_flat_bottom(mesh: &mut Mesh, degrees: f64, tolerances: &Tolerances) -> Projection {
    let (min, max) = mesh.bounding_box();
    let flat_depth = flat_depth(degrees, max.z - min.z);
    mesh.translate(DVec3::new(0.0, 0.0, -(min.z + flat_depth)));

    let radians = degrees.to_radians();
    let cot = radians.cos() / radians.sin();

    let mut clamped_corners = 0;
    for v in mesh.vertices_mut() {
        if v.z < 0.0 {
            v.y -= v.z * cot;
            v.z = 0.0;
            clamped_corners += 1;
        }
        *v = DVec3::new(
            tolerances.round(v.x),
            tolerances.round(v.y),
            tolerances.round(v.z),
        );
    }

    debug!(degrees, flat_depth, clamped_corners, "Projected flat bottom");

    Projection {
        flat_depth,
        clamped_corners,
    }
}

/// Places the solid on the plate for `orientation`.
///
/// Returns the projection summary for tilted builds.
pub fn orient(mesh: &mut Mesh, orientation: Orientation, tolerances: &Tolerances) -> Option<Projection> {
    match orientation {
        Orientation::Flat => None,
        Orientation::Vertical => {
            rotate_about_x(mesh, orientation.effective_degrees());
            rest_on_plate(mesh);
            None
        }
        Orientation::Tilted { requested, effective } => {
            if requested != effective {
                warn!(requested, effective, "Perturbed build angle away from 45°");
            }
            rotate_about_x(mesh, effective);
            Some(project_flat_bottom(mesh, effective, tolerances))
        }
    }
}
