//! # Surface Builders
//!
//! Top relief surface and the two bottom-surface topologies.
//!
//! Both surfaces describe their boundary as a [`Perimeter`]: four point
//! chains, one per [`Side`], each ordered counter-clockwise as seen from
//! above. The wall builder walks top and bottom perimeters side by side, so
//! a single triangulation rule yields outward walls on every side.

mod bottom;
mod top;


pub use bottom::{build_bottom_surface, BottomStrategy, BottomSurface, WallAnchor};
pub use top::{build_top_surface, TopSurface};

use crate::params::PixelPitch;
use glam::DVec3;

// =============================================================================
// SIDE
// =============================================================================

/// One of the four boundaries of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Minimum Y (last heightmap row)
    Front,
    /// Maximum X (last heightmap column)
    Right,
    /// Maximum Y (first heightmap row)
    Back,
    /// Minimum X (first heightmap column)
    Left,
}

impl Side {
    /// All sides in counter-clockwise order, starting at the front.
    pub const ALL: [Side; 4] = [Side::Front, Side::Right, Side::Back, Side::Left];

    /// Position of this side in [`Side::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Front => 0,
            Side::Right => 1,
            Side::Back => 2,
            Side::Left => 3,
        }
    }

    /// Grid `(row, col)` indices along this side in counter-clockwise order.
    ///
    /// Consecutive sides share their corner cell: the last cell of one side
    /// is the first cell of the next.
    pub fn cells(self, rows: usize, cols: usize) -> Vec<(usize, usize)> {
        let last_row = rows - 1;
        let last_col = cols - 1;
        match self {
            Side::Front => (0..cols).map(|c| (last_row, c)).collect(),
            Side::Right => (0..rows).rev().map(|r| (r, last_col)).collect(),
            Side::Back => (0..cols).rev().map(|c| (0, c)).collect(),
            Side::Left => (0..rows).map(|r| (r, 0)).collect(),
        }
    }
}

// =============================================================================
// PERIMETER
// =============================================================================

/// Boundary points of a grid surface, one counter-clockwise chain per side.
#[derive(Debug, Clone, PartialEq)]
pub struct Perimeter {
    chains: [Vec<DVec3>; 4],
}

impl Perimeter {
    /// Samples `position(row, col)` along every side of a `rows x cols` grid.
    pub fn from_grid(rows: usize, cols: usize, position: impl Fn(usize, usize) -> DVec3) -> Self {
        let chains = Side::ALL.map(|side| {
            side.cells(rows, cols)
                .into_iter()
                .map(|(r, c)| position(r, c))
                .collect()
        });
        Self { chains }
    }

    /// Points along `side`, counter-clockwise.
    #[inline]
    pub fn chain(&self, side: Side) -> &[DVec3] {
        &self.chains[side.index()]
    }

    /// Closed counter-clockwise loop without the repeated start point.
    pub fn ring(&self) -> Vec<DVec3> {
        self.chains
            .iter()
            .flat_map(|chain| &chain[..chain.len() - 1])
            .copied()
            .collect()
    }

    /// Number of edge segments around the boundary.
    pub fn segment_count(&self) -> usize {
        self.chains.iter().map(|c| c.len() - 1).sum()
    }
}

/// Physical XY position of grid cell `(row, col)` at height `z`.
///
/// Row 0 maps to maximum Y so the print comes out right-side-up.
#[inline]
pub(crate) fn grid_point(rows: usize, row: usize, col: usize, pitch: PixelPitch, z: f64) -> DVec3 {
    DVec3::new(pitch.offset(col), pitch.offset(rows - 1 - row), z)
}
