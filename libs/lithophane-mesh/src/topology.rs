//! # Topology Report
//!
//! Edge-use analysis of a triangle soup. Corners are matched by their
//! quantized coordinates, so points that round to the same grid step count
//! as one vertex.

use crate::mesh::{Mesh, Triangle};
use config::constants::Tolerances;
use std::collections::{HashMap, HashSet};
use std::fmt;

type VertexKey = [i64; 3];

/// Counts of topological defects in a mesh.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::{generate_mesh, HeightMap, MeshParams, TopologyReport};
/// use config::constants::Tolerances;
///
/// let map = HeightMap::filled(4, 4, 1.0).unwrap();
/// let mesh = generate_mesh(&map, &MeshParams::new(1.0, 0.0).unwrap()).unwrap();
/// let report = TopologyReport::analyze(&mesh, &Tolerances::default());
/// assert!(report.is_manifold());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyReport {
    /// Faces analyzed
    pub triangle_count: usize,
    /// Distinct quantized corner positions
    pub vertex_count: usize,
    /// Distinct undirected edges
    pub edge_count: usize,
    /// Edges used by exactly one face
    pub boundary_edges: usize,
    /// Edges used by more than two faces
    pub non_manifold_edges: usize,
    /// Directed edges traversed more than once
    pub misoriented_edges: usize,
    /// Faces with coincident corners
    pub degenerate_triangles: usize,
    /// Faces repeating an earlier face's corner set
    pub duplicate_triangles: usize,
}

impl TopologyReport {
    /// Analyzes `mesh`, matching corners at `tolerances` precision.
    pub fn analyze(mesh: &Mesh, tolerances: &Tolerances) -> Self {
        let key = |v: glam::DVec3| [v.x, v.y, v.z].map(|c| tolerances.quantize(c));

        let mut vertices: HashSet<VertexKey> = HashSet::new();
        let mut undirected: HashMap<(VertexKey, VertexKey), usize> = HashMap::new();
        let mut directed: HashMap<(VertexKey, VertexKey), usize> = HashMap::new();
        let mut faces: HashSet<[VertexKey; 3]> = HashSet::new();

        let mut report = Self {
            triangle_count: mesh.triangle_count(),
            ..Self::default()
        };

        for triangle in mesh.triangles() {
            let corners = triangle.vertices.map(key);
            vertices.extend(corners);

            if is_degenerate(triangle, &corners, tolerances) {
                report.degenerate_triangles += 1;
            }

            let mut sorted = corners;
            sorted.sort_unstable();
            if !faces.insert(sorted) {
                report.duplicate_triangles += 1;
            }

            for i in 0..3 {
                let (a, b) = (corners[i], corners[(i + 1) % 3]);
                if a == b {
                    continue;
                }
                *directed.entry((a, b)).or_default() += 1;
                *undirected.entry((a.min(b), a.max(b))).or_default() += 1;
            }
        }

        report.vertex_count = vertices.len();
        report.edge_count = undirected.len();
        report.boundary_edges = undirected.values().filter(|&&uses| uses == 1).count();
        report.non_manifold_edges = undirected.values().filter(|&&uses| uses > 2).count();
        report.misoriented_edges = directed.values().filter(|&&uses| uses > 1).count();
        report
    }

    /// Every edge is shared by exactly two faces.
    pub fn is_watertight(&self) -> bool {
        self.triangle_count > 0 && self.boundary_edges == 0 && self.non_manifold_edges == 0
    }

    /// Every directed edge is traversed at most once, so neighbors agree on winding.
    pub fn is_oriented(&self) -> bool {
        self.misoriented_edges == 0
    }

    /// Closed, consistently wound, and free of degenerate or repeated faces.
    pub fn is_manifold(&self) -> bool {
        self.is_watertight()
            && self.is_oriented()
            && self.degenerate_triangles == 0
            && self.duplicate_triangles == 0
    }

    /// Euler characteristic `V - E + F`; 2 for a closed genus-0 surface.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertex_count as i64 - self.edge_count as i64 + self.triangle_count as i64
    }
}

fn is_degenerate(triangle: &Triangle, corners: &[VertexKey; 3], tolerances: &Tolerances) -> bool {
    corners[0] == corners[1]
        || corners[1] == corners[2]
        || corners[0] == corners[2]
        || triangle.is_degenerate(tolerances.degenerate_epsilon)
}

impl fmt::Display for TopologyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} triangles, {} vertices, {} edges (boundary {}, non-manifold {}, misoriented {}), \
             degenerate {}, duplicate {}",
            self.triangle_count,
            self.vertex_count,
            self.edge_count,
            self.boundary_edges,
            self.non_manifold_edges,
            self.misoriented_edges,
            self.degenerate_triangles,
            self.duplicate_triangles
        )
    }
}
