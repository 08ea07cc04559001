//! # Top Surface
//!
//! Full-resolution relief surface: one vertex per heightmap cell, two
//! triangles per 2x2 cell block. The top carries all printed detail and is
//! never simplified.

use super::{grid_point, Perimeter};
use crate::heightmap::HeightMap;
use crate::mesh::Triangle;
use crate::params::PixelPitch;
use glam::DVec3;

/// Top surface triangles plus the boundary the walls attach to.
#[derive(Debug, Clone)]
pub struct TopSurface {
    /// Relief triangles, normals facing +Z
    pub triangles: Vec<Triangle>,
    /// Boundary vertices at their relief heights
    pub perimeter: Perimeter,
}

/// Builds the relief surface of `heightmap`.
///
/// Vertex `(row, col)` sits at `x = col * pitch`, `y = (rows - 1 - row) * pitch`,
/// `z = height`. Each cell block is split along its
/// `(row, col + 1)`-`(row + 1, col)` diagonal.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::{HeightMap, PixelPitch};
/// use lithophane_mesh::surface::build_top_surface;
///
/// let map = HeightMap::filled(10, 10, 1.0).unwrap();
/// let top = build_top_surface(&map, PixelPitch::new(1.0).unwrap());
/// assert_eq!(top.triangles.len(), 2 * 9 * 9);
/// ```
pub fn build_top_surface(heightmap: &HeightMap, pitch: PixelPitch) -> TopSurface {
    let rows = heightmap.rows();
    let cols = heightmap.cols();

    // Shared positions so every triangle copies the same bits
    let positions: Vec<DVec3> = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r, c)))
        .map(|(r, c)| grid_point(rows, r, c, pitch, heightmap.get(r, c)))
        .collect();
    let at = |r: usize, c: usize| positions[r * cols + c];

    let mut triangles = Vec::with_capacity(2 * (rows - 1) * (cols - 1));
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            triangles.push(Triangle::new(at(r, c), at(r + 1, c), at(r, c + 1)));
            triangles.push(Triangle::new(at(r, c + 1), at(r + 1, c), at(r + 1, c + 1)));
        }
    }

    TopSurface {
        triangles,
        perimeter: Perimeter::from_grid(rows, cols, at),
    }
}
