//! # Bottom Surface
//!
//! Two interchangeable bottom topologies sharing one output contract:
//! a list of bottom triangles plus, per side, the bottom points the wall
//! for that side attaches to.
//!
//! - **Simplified**: four corners, two triangles. Only valid while the
//!   bottom stays on the plate untouched (flat builds).
//! - **Grid perimeter**: one vertex per boundary cell plus a center vertex,
//!   fanned. Tilted builds need the boundary detail so the projected walls
//!   still meet the bottom after the plate merge.

use super::{grid_point, Perimeter, Side};
use crate::mesh::Triangle;
use crate::params::{BuildAngle, PixelPitch};
use glam::DVec3;

// =============================================================================
// STRATEGY
// =============================================================================

/// Which bottom topology to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BottomStrategy {
    /// Four corners, two triangles, fan walls
    Simplified,
    /// Boundary vertices plus center, strip walls
    GridPerimeter,
}

impl BottomStrategy {
    /// Picks the topology for a build angle.
    ///
    /// Only a flat build keeps its bottom exactly on the plate, so only a
    /// flat build can drop the boundary vertices.
    pub fn for_angle(angle: BuildAngle) -> Self {
        if angle.is_flat() {
            Self::Simplified
        } else {
            Self::GridPerimeter
        }
    }

    /// Short label for logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Simplified => "simplified",
            Self::GridPerimeter => "grid-perimeter",
        }
    }
}

// =============================================================================
// BOTTOM SURFACE
// =============================================================================

/// How the wall along one side reaches the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WallAnchor<'a> {
    /// Fan every top segment to `anchor`, then close with `closing`.
    ///
    /// `anchor` is the bottom corner where the side starts in
    /// counter-clockwise order, `closing` the corner where it ends.
    Fan { anchor: DVec3, closing: DVec3 },
    /// One bottom point per top point, matched index by index.
    Strip(&'a [DVec3]),
}

#[derive(Debug, Clone, PartialEq)]
enum Anchors {
    /// Front-left, front-right, back-right, back-left
    Corners([DVec3; 4]),
    Perimeter(Perimeter),
}

/// Bottom triangles plus the per-side wall attachment points.
#[derive(Debug, Clone)]
pub struct BottomSurface {
    /// Bottom triangles, normals facing -Z
    pub triangles: Vec<Triangle>,
    anchors: Anchors,
}

impl BottomSurface {
    /// Attachment points for the wall along `side`.
    pub fn anchor(&self, side: Side) -> WallAnchor<'_> {
        match &self.anchors {
            Anchors::Corners(corners) => WallAnchor::Fan {
                anchor: corners[side.index()],
                closing: corners[(side.index() + 1) % 4],
            },
            Anchors::Perimeter(perimeter) => WallAnchor::Strip(perimeter.chain(side)),
        }
    }
}

/// Builds the bottom of a `rows x cols` grid at Z=0 with the given topology.
pub fn build_bottom_surface(
    strategy: BottomStrategy,
    rows: usize,
    cols: usize,
    pitch: PixelPitch,
) -> BottomSurface {
    match strategy {
        BottomStrategy::Simplified => simplified(rows, cols, pitch),
        BottomStrategy::GridPerimeter => grid_perimeter(rows, cols, pitch),
    }
}

fn simplified(rows: usize, cols: usize, pitch: PixelPitch) -> BottomSurface {
    let width = pitch.offset(cols - 1);
    let depth = pitch.offset(rows - 1);

    let front_left = DVec3::ZERO;
    let front_right = DVec3::new(width, 0.0, 0.0);
    let back_right = DVec3::new(width, depth, 0.0);
    let back_left = DVec3::new(0.0, depth, 0.0);

    // Looking from below, CCW
    let triangles = vec![
        Triangle::new(front_left, back_right, front_right),
        Triangle::new(front_left, back_left, back_right),
    ];

    BottomSurface {
        triangles,
        anchors: Anchors::Corners([front_left, front_right, back_right, back_left]),
    }
}

fn grid_perimeter(rows: usize, cols: usize, pitch: PixelPitch) -> BottomSurface {
    let perimeter = Perimeter::from_grid(rows, cols, |r, c| grid_point(rows, r, c, pitch, 0.0));
    let center = DVec3::new(
        pitch.offset(cols - 1) / 2.0,
        pitch.offset(rows - 1) / 2.0,
        0.0,
    );

    // Fan in front, right, back, left order; reversed winding faces -Z
    let ring = perimeter.ring();
    let triangles = ring
        .iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(&from, &to)| Triangle::new(center, to, from))
        .collect();

    BottomSurface {
        triangles,
        anchors: Anchors::Perimeter(perimeter),
    }
}
