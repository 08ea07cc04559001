//! # Mesh Data Structure
//!
//! Triangle-soup representation: every triangle stores its own three
//! absolute corner positions. Triangles that share an edge hold
//! independent, bitwise-identical copies of the shared points.

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

// =============================================================================
// TRIANGLE
// =============================================================================

/// A face given by three absolute points in millimeters.
///
/// Winding is counter-clockwise when viewed from outside the solid, so
/// [`Triangle::normal`] points outward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// Corner positions in winding order
    pub vertices: [DVec3; 3],
}

impl Triangle {
    /// Creates a triangle from three corners in winding order.
    #[inline]
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Unnormalized face normal; its length is twice the area.
    #[inline]
    pub fn cross(&self) -> DVec3 {
        let [a, b, c] = self.vertices;
        (b - a).cross(c - a)
    }

    /// Unit outward normal, or zero for a zero-area face.
    pub fn normal(&self) -> DVec3 {
        self.cross().normalize_or_zero()
    }

    /// Face area in square millimeters.
    pub fn area(&self) -> f64 {
        self.cross().length() * 0.5
    }

    /// Returns true if any two corners lie closer than `epsilon`.
    ///
    /// Collinear but distinct corners do not count: those faces still
    /// contribute their edges to the closed surface.
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        let [a, b, c] = self.vertices;
        a.distance(b) < epsilon || b.distance(c) < epsilon || a.distance(c) < epsilon
    }

    /// Same face with reversed winding.
    pub fn flipped(&self) -> Self {
        let [a, b, c] = self.vertices;
        Self::new(a, c, b)
    }
}

// =============================================================================
// MESH
// =============================================================================

/// An unordered collection of triangles.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::{Mesh, Triangle};
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.push(Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y));
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Wraps an existing triangle list.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Appends a triangle.
    #[inline]
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Appends every triangle of `triangles`.
    pub fn extend(&mut self, triangles: impl IntoIterator<Item = Triangle>) {
        self.triangles.extend(triangles);
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Consumes the mesh, returning its triangles.
    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }

    /// Iterates every triangle corner (shared points appear once per use).
    pub fn vertices(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices)
    }

    /// Mutably iterates every triangle corner.
    pub fn vertices_mut(&mut self) -> impl Iterator<Item = &mut DVec3> + '_ {
        self.triangles.iter_mut().flat_map(|t| t.vertices.iter_mut())
    }

    /// Keeps only the triangles for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Triangle) -> bool) {
        self.triangles.retain(keep);
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners, or zeros for an empty mesh.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let mut corners = self.vertices();
        let Some(first) = corners.next() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        corners.fold((first, first), |(min, max), v| (min.min(v), max.max(v)))
    }

    /// Lowest Z over all corners (zero for an empty mesh).
    pub fn min_z(&self) -> f64 {
        self.bounding_box().0.z
    }

    /// Highest Z over all corners (zero for an empty mesh).
    pub fn max_z(&self) -> f64 {
        self.bounding_box().1.z
    }

    /// Transforms all corners by a 4x4 matrix.
    pub fn transform(&mut self, matrix: &DMat4) {
        for v in self.vertices_mut() {
            *v = matrix.transform_point3(*v);
        }
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in self.vertices_mut() {
            *v += offset;
        }
    }

    /// Exports the triangle soup as plain arrays for a file-format sink.
    pub fn to_soup(&self) -> Vec<[[f64; 3]; 3]> {
        self.triangles
            .iter()
            .map(|t| t.vertices.map(|v| v.to_array()))
            .collect()
    }

    /// Exports corners as a flattened f32 array for GPU preview.
    ///
    /// Returns [x, y, z, x, y, z, ...], nine values per triangle.
    pub fn vertices_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.triangles.len() * 9);
        for v in self.vertices() {
            result.push(v.x as f32);
            result.push(v.y as f32);
            result.push(v.z as f32);
        }
        result
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}
