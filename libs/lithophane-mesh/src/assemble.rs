//! # Mesh Assembler
//!
//! Concatenates top, bottom and wall triangles into one mesh. Nothing is
//! deduplicated here: before rotation every face is distinct by
//! construction.

use crate::mesh::{Mesh, Triangle};
use crate::surface::{BottomSurface, TopSurface};

/// Joins the three triangle lists, taking ownership of each.
pub fn assemble(top: TopSurface, bottom: BottomSurface, walls: Vec<Triangle>) -> Mesh {
    let mut mesh =
        Mesh::with_capacity(top.triangles.len() + bottom.triangles.len() + walls.len());
    mesh.extend(top.triangles);
    mesh.extend(bottom.triangles);
    mesh.extend(walls);
    mesh
}
