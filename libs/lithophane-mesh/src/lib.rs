//! # Lithophane Mesh
//!
//! Turns a grid of physical heights into a closed, printable triangle solid.
//!
//! ## Architecture
//!
//! ```text
//! HeightMap + MeshParams
//!     → surface (top relief, bottom)
//!     → walls
//!     → assemble
//!     → transform (tilt, flat-bottom projection)
//!     → repair
//!     → Mesh
//! ```
//!
//! ## Coordinates
//!
//! Cell `(row, col)` sits at `x = col * pitch`, `y = (rows - 1 - row) * pitch`,
//! so row 0 is the far (back) edge. Heights are Z in millimeters above the
//! bottom at Z=0.
//!
//! ## Usage
//!
//! ```rust
//! use lithophane_mesh::{generate_mesh, HeightMap, MeshParams, TopologyReport};
//! use config::constants::Tolerances;
//!
//! let map = HeightMap::from_fn(20, 30, |r, c| 0.6 + 0.05 * ((r * c) % 7) as f64).unwrap();
//! let mesh = generate_mesh(&map, &MeshParams::new(0.5, 0.0).unwrap()).unwrap();
//!
//! let report = TopologyReport::analyze(&mesh, &Tolerances::default());
//! assert!(report.is_watertight());
//! ```

pub mod assemble;
pub mod error;
pub mod generator;
pub mod heightmap;
pub mod mesh;
pub mod params;
pub mod repair;
pub mod surface;
pub mod topology;
pub mod transform;
pub mod walls;

#[cfg(test)]
mod test_support;

pub use error::MeshError;
pub use generator::{generate_mesh, GenerationReport, MeshGenerator};
pub use heightmap::HeightMap;
pub use mesh::{Mesh, Triangle};
pub use params::{BuildAngle, MeshParams, PixelPitch};
pub use repair::{repair, RepairOptions, RepairReport};
pub use surface::BottomStrategy;
pub use topology::TopologyReport;
pub use transform::Orientation;
