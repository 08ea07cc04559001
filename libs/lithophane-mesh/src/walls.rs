//! # Wall Builder
//!
//! Side walls joining the top perimeter to the bottom surface.
//!
//! Every perimeter chain runs counter-clockwise seen from above, so along
//! each side "next point" moves to the right when viewed from outside the
//! solid. One triangulation rule therefore gives outward normals on all
//! four walls:
//!
//! ```text
//!   t[j] ---- t[j+1]        top chain
//!    |  \       |
//!    |    \     |
//!   b[j] ---- b[j+1]        bottom chain (or a single fan anchor)
//! ```

use crate::mesh::Triangle;
use crate::surface::{BottomSurface, Perimeter, Side, WallAnchor};

/// Builds the walls for all four sides.
///
/// - Fan anchors emit one triangle per top segment plus one closing
///   triangle, `n` triangles for a side of `n` points.
/// - Strip anchors emit two triangles per top segment.
pub fn build_walls(top: &Perimeter, bottom: &BottomSurface) -> Vec<Triangle> {
    let mut triangles = Vec::new();
    for side in Side::ALL {
        let chain = top.chain(side);
        match bottom.anchor(side) {
            WallAnchor::Fan { anchor, closing } => fan_wall(chain, anchor, closing, &mut triangles),
            WallAnchor::Strip(base) => strip_wall(chain, base, &mut triangles),
        }
    }
    triangles
}

fn fan_wall(
    chain: &[glam::DVec3],
    anchor: glam::DVec3,
    closing: glam::DVec3,
    out: &mut Vec<Triangle>,
) {
    let Some(&last) = chain.last() else {
        return;
    };
    out.push(Triangle::new(anchor, closing, last));
    for segment in chain.windows(2) {
        out.push(Triangle::new(anchor, segment[1], segment[0]));
    }
}

fn strip_wall(chain: &[glam::DVec3], base: &[glam::DVec3], out: &mut Vec<Triangle>) {
    debug_assert_eq!(chain.len(), base.len(), "wall chains must pair up");
    for (top, bottom) in chain.windows(2).zip(base.windows(2)) {
        out.push(Triangle::new(bottom[0], bottom[1], top[1]));
        out.push(Triangle::new(bottom[0], top[1], top[0]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::HeightMap;
    use crate::params::PixelPitch;
    use crate::surface::{build_bottom_surface, build_top_surface, BottomStrategy};
    use glam::DVec3;

    fn walls_for(strategy: BottomStrategy, rows: usize, cols: usize) -> Vec<Triangle> {
        let pitch = PixelPitch::new(1.0).unwrap();
        let map = HeightMap::filled(rows, cols, 1.5).unwrap();
        let top = build_top_surface(&map, pitch);
        let bottom = build_bottom_surface(strategy, rows, cols, pitch);
        build_walls(&top.perimeter, &bottom)
    }

    /// Outward direction of the wall a triangle belongs to.
    fn outward(t: &Triangle, width: f64, depth: f64) -> DVec3 {
        let [a, b, c] = t.vertices;
        let on = |f: fn(DVec3) -> f64, value: f64| [a, b, c].iter().all(|v| f(*v) == value);
        if on(|v| v.y, 0.0) {
            -DVec3::Y
        } else if on(|v| v.y, depth) {
            DVec3::Y
        } else if on(|v| v.x, 0.0) {
            -DVec3::X
        } else if on(|v| v.x, width) {
            DVec3::X
        } else {
            DVec3::ZERO
        }
    }

    #[test]
    fn test_fan_wall_count() {
        // Each side of n points yields n triangles
        assert_eq!(walls_for(BottomStrategy::Simplified, 10, 10).len(), 40);
        assert_eq!(walls_for(BottomStrategy::Simplified, 3, 5).len(), 2 * (3 + 5));
    }

    #[test]
    fn test_strip_wall_count() {
        assert_eq!(walls_for(BottomStrategy::GridPerimeter, 10, 10).len(), 8 * 9);
        assert_eq!(walls_for(BottomStrategy::GridPerimeter, 3, 5).len(), 2 * (2 * 2 + 2 * 4));
    }

    #[test]
    fn test_fan_walls_face_outward() {
        for t in walls_for(BottomStrategy::Simplified, 4, 6) {
            let out = outward(&t, 5.0, 3.0);
            assert_ne!(out, DVec3::ZERO);
            assert!(t.normal().dot(out) > 0.99, "{t:?} faces {:?}", t.normal());
        }
    }

    #[test]
    fn test_strip_walls_face_outward() {
        for t in walls_for(BottomStrategy::GridPerimeter, 4, 6) {
            let out = outward(&t, 5.0, 3.0);
            assert_ne!(out, DVec3::ZERO);
            assert!(t.normal().dot(out) > 0.99, "{t:?} faces {:?}", t.normal());
        }
    }

    #[test]
    fn test_fan_anchors_each_corner_once() {
        let walls = walls_for(BottomStrategy::Simplified, 4, 6);
        let corners = [
            DVec3::ZERO,
            DVec3::new(5.0, 0.0, 0.0),
            DVec3::new(5.0, 3.0, 0.0),
            DVec3::new(0.0, 3.0, 0.0),
        ];
        // The first vertex of every wall triangle is its side's anchor
        for corner in corners {
            assert!(walls.iter().any(|t| t.vertices[0] == corner));
        }
    }
}
