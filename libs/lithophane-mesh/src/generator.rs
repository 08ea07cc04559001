//! # Mesh Generator
//!
//! Runs the full heightmap-to-solid pipeline:
//!
//! ```text
//! HeightMap ─┬─ top surface ───────┐
//!            └─ bottom surface ─ walls ─ assemble ─ orient ─ repair ─ Mesh
//! ```
//!
//! The bottom topology follows the build angle, see
//! [`BottomStrategy::for_angle`]. Plate merging only runs after a tilted
//! projection, the one step that can tear the seam between walls and bottom.

use crate::assemble::assemble;
use crate::error::MeshError;
use crate::heightmap::HeightMap;
use crate::mesh::Mesh;
use crate::params::MeshParams;
use crate::repair::{repair, RepairOptions, RepairReport};
use crate::surface::{build_bottom_surface, build_top_surface, BottomStrategy};
use crate::topology::TopologyReport;
use crate::transform::{orient, Orientation};
use crate::walls::build_walls;
use config::constants::{Tolerances, MIN_GRID_DIMENSION};
use tracing::{debug, info, Level};

/// Summary of one conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    /// Bottom topology used
    pub strategy: BottomStrategy,
    /// Placement on the build plate
    pub orientation: Orientation,
    /// Triangles before orientation and repair
    pub assembled_triangles: usize,
    /// What the repair passes changed
    pub repair: RepairReport,
    /// Triangles in the returned mesh
    pub final_triangles: usize,
    /// Sink depth of the flat contact patch, tilted builds only
    pub flat_depth: Option<f64>,
}

/// Converts heightmaps into printable solids.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::{HeightMap, MeshGenerator, MeshParams};
///
/// let map = HeightMap::filled(10, 10, 1.0).unwrap();
/// let params = MeshParams::new(1.0, 0.0).unwrap();
/// let mesh = MeshGenerator::new().generate(&map, &params).unwrap();
/// assert_eq!(mesh.triangle_count(), 204);
/// assert_eq!(mesh.min_z(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeshGenerator {
    tolerances: Tolerances,
}

impl MeshGenerator {
    /// Creates a generator with the default tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with custom tolerances.
    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    /// Creates a generator from raw tolerance values.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Config`] if any value is out of range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lithophane_mesh::{MeshError, MeshGenerator};
    ///
    /// assert!(MeshGenerator::try_with_tolerances(4, 1e-4, 2.0).is_ok());
    /// assert!(matches!(
    ///     MeshGenerator::try_with_tolerances(0, 1e-4, 2.0),
    ///     Err(MeshError::Config(_))
    /// ));
    /// ```
    pub fn try_with_tolerances(
        coordinate_decimals: u32,
        degenerate_epsilon: f64,
        plate_merge_factor: f64,
    ) -> Result<Self, MeshError> {
        let tolerances =
            Tolerances::new(coordinate_decimals, degenerate_epsilon, plate_merge_factor)?;
        Ok(Self::with_tolerances(tolerances))
    }

    /// Tolerances used for rounding and repair.
    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Converts `heightmap` into a closed, outward-wound solid.
    ///
    /// Both inputs are validated on construction, so this only fails when
    /// the pipeline itself rejects the grid.
    pub fn generate(&self, heightmap: &HeightMap, params: &MeshParams) -> Result<Mesh, MeshError> {
        self.generate_with_report(heightmap, params)
            .map(|(mesh, _)| mesh)
    }

    /// Same as [`MeshGenerator::generate`], also returning a summary.
    pub fn generate_with_report(
        &self,
        heightmap: &HeightMap,
        params: &MeshParams,
    ) -> Result<(Mesh, GenerationReport), MeshError> {
        let MeshParams {
            pixel_pitch: pitch,
            build_angle: angle,
        } = *params;
        let strategy = BottomStrategy::for_angle(angle);
        let orientation = Orientation::for_angle(angle);
        let (rows, cols) = (heightmap.rows(), heightmap.cols());
        if rows < MIN_GRID_DIMENSION || cols < MIN_GRID_DIMENSION {
            return Err(MeshError::invalid_shape(rows, cols));
        }

        let top = build_top_surface(heightmap, pitch);
        let bottom = build_bottom_surface(strategy, rows, cols, pitch);
        let walls = build_walls(&top.perimeter, &bottom);
        let mut mesh = assemble(top, bottom, walls);
        let assembled_triangles = mesh.triangle_count();

        let projection = orient(&mut mesh, orientation, &self.tolerances);

        let options = if orientation.projects() {
            RepairOptions::with_plate_merge(pitch.mm(), self.tolerances)
        } else {
            RepairOptions::cleanup_only(self.tolerances)
        };
        let repair = repair(&mut mesh, &options);

        let report = GenerationReport {
            strategy,
            orientation,
            assembled_triangles,
            repair,
            final_triangles: mesh.triangle_count(),
            flat_depth: projection.map(|p| p.flat_depth),
        };

        if tracing::enabled!(Level::DEBUG) {
            let topology = TopologyReport::analyze(&mesh, &self.tolerances);
            debug!(
                %topology,
                watertight = topology.is_watertight(),
                oriented = topology.is_oriented(),
                "Checked mesh topology"
            );
        }

        info!(
            rows,
            cols,
            pitch = pitch.mm(),
            angle = angle.degrees(),
            strategy = strategy.name(),
            orientation = orientation.name(),
            assembled = assembled_triangles,
            triangles = report.final_triangles,
            "Generated lithophane mesh"
        );

        Ok((mesh, report))
    }

    /// Validates raw inputs and converts them in one call.
    ///
    /// `heights` is row-major, row 0 first.
    ///
    /// # Errors
    ///
    /// Fails fast on the first invalid shape, height, pitch or angle,
    /// before any geometry is built.
    pub fn generate_raw(
        &self,
        rows: usize,
        cols: usize,
        heights: Vec<f64>,
        pixel_pitch_mm: f64,
        build_angle_deg: f64,
    ) -> Result<Mesh, MeshError> {
        let params = MeshParams::new(pixel_pitch_mm, build_angle_deg)?;
        let heightmap = HeightMap::new(rows, cols, heights)?;
        self.generate(&heightmap, &params)
    }
}

/// Converts `heightmap` with default tolerances.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::{generate_mesh, HeightMap, MeshParams};
///
/// let map = HeightMap::from_fn(8, 12, |r, c| 0.8 + 0.1 * ((r + c) % 5) as f64).unwrap();
/// let mesh = generate_mesh(&map, &MeshParams::new(0.5, 90.0).unwrap()).unwrap();
/// assert_eq!(mesh.min_z(), 0.0);
/// ```
pub fn generate_mesh(heightmap: &HeightMap, params: &MeshParams) -> Result<Mesh, MeshError> {
    MeshGenerator::new().generate(heightmap, params)
}
