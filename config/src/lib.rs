//! # Config Crate
//!
//! Centralized configuration constants for the heightmap-to-mesh pipeline.
//! Every empirically tuned value used by the surface builders, the
//! flat-bottom projector and the repair passes is defined here.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{Tolerances, COORDINATE_DECIMALS, PLATE_MERGE_PITCH_FACTOR};
//!
//! let tolerances = Tolerances::default();
//! assert_eq!(tolerances.coordinate_decimals, COORDINATE_DECIMALS);
//! assert_eq!(tolerances.plate_merge_factor, PLATE_MERGE_PITCH_FACTOR);
//!
//! // Merge window for a 0.1 mm pitch
//! let window = tolerances.plate_merge_window(0.1);
//! assert!((window - 0.2).abs() < 1e-12);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Millimeters**: Every length is in physical millimeters
//! - **Degrees**: Every angle is in degrees at the API surface

pub mod constants;

#[cfg(test)]
mod tests;
