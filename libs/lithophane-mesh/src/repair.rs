//! # Mesh Repair
//!
//! Post-transform passes that restore a closed 2-manifold surface after the
//! flat-bottom projection:
//!
//! 1. **Plate merge** (tilted builds only): snaps plate vertices whose Y
//!    drifted apart during projection back onto one shared value.
//! 2. **Degenerate removal**: drops faces with two coincident corners.
//! 3. **Duplicate removal**: drops repeated faces, keeping the first.
//!
//! Every pass is idempotent, so running [`repair`] twice changes nothing
//! the second time.

use crate::mesh::{Mesh, Triangle};
use config::constants::Tolerances;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// What to run and with which tolerances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepairOptions {
    /// Pixel pitch in mm when the plate merge should run, `None` to skip it
    pub merge_pitch: Option<f64>,
    /// Coincidence and quantization tolerances
    pub tolerances: Tolerances,
}

impl RepairOptions {
    /// Degenerate and duplicate removal only.
    pub fn cleanup_only(tolerances: Tolerances) -> Self {
        Self {
            merge_pitch: None,
            tolerances,
        }
    }

    /// All passes, merging plate vertices on a grid of `pixel_pitch` mm.
    pub fn with_plate_merge(pixel_pitch: f64, tolerances: Tolerances) -> Self {
        Self {
            merge_pitch: Some(pixel_pitch),
            tolerances,
        }
    }
}

/// Counts from one [`repair`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Triangle corners moved by the plate merge
    pub merged_corners: usize,
    /// Faces dropped for coincident corners
    pub degenerate_removed: usize,
    /// Faces dropped as repeats of an earlier face
    pub duplicates_removed: usize,
}

impl RepairReport {
    /// Returns true if no pass changed the mesh.
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Runs the repair passes in order.
pub fn repair(mesh: &mut Mesh, options: &RepairOptions) -> RepairReport {
    let tolerances = &options.tolerances;
    let merged_corners = match options.merge_pitch {
        Some(pitch) => merge_plate_vertices(mesh, pitch, tolerances),
        None => 0,
    };

    let report = RepairReport {
        merged_corners,
        degenerate_removed: remove_degenerate_triangles(mesh, tolerances.degenerate_epsilon),
        duplicates_removed: remove_duplicate_triangles(mesh, tolerances),
    };

    debug!(
        clean = report.is_clean(),
        remaining = mesh.triangle_count(),
        "Repaired mesh"
    );

    report
}

// =============================================================================
// PLATE MERGE
// =============================================================================

/// Bit pattern of a coordinate with `-0.0` folded into `0.0`.
fn coordinate_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Snaps plate vertices whose Y values drifted apart onto their cluster mean.
///
/// Vertices within `degenerate_epsilon` of Z=0 are grouped by grid column
/// (`round(x / pixel_pitch)`). Inside a column the distinct Y values are
/// sorted and chained into clusters wherever consecutive values lie at most
/// `plate_merge_factor * pixel_pitch` apart. Every vertex in a cluster of two
/// or more distinct values gets the mean of those values as Y and exactly
/// zero as Z; X is never touched.
///
/// Returns the number of triangle corners moved.
pub fn merge_plate_vertices(mesh: &mut Mesh, pixel_pitch: f64, tolerances: &Tolerances) -> usize {
    let epsilon = tolerances.degenerate_epsilon;
    let window = tolerances.plate_merge_window(pixel_pitch);
    let column = |x: f64| (x / pixel_pitch).round() as i64;

    // Distinct Y values per column
    let mut columns: HashMap<i64, Vec<f64>> = HashMap::new();
    let mut seen: HashSet<(i64, u64)> = HashSet::new();
    for v in mesh.vertices().filter(|v| v.z.abs() < epsilon) {
        let col = column(v.x);
        if seen.insert((col, coordinate_bits(v.y))) {
            columns.entry(col).or_default().push(v.y);
        }
    }

    // (column, y) -> merged y
    let mut targets: HashMap<(i64, u64), f64> = HashMap::new();
    for (col, mut ys) in columns {
        ys.sort_by(f64::total_cmp);
        for cluster in chain_clusters(&ys, window) {
            if cluster.len() < 2 {
                continue;
            }
            let mean = cluster.iter().sum::<f64>() / cluster.len() as f64;
            for &y in cluster {
                targets.insert((col, coordinate_bits(y)), mean);
            }
        }
    }

    if targets.is_empty() {
        return 0;
    }

    let mut moved = 0;
    for v in mesh.vertices_mut() {
        if v.z.abs() >= epsilon {
            continue;
        }
        if let Some(&mean) = targets.get(&(column(v.x), coordinate_bits(v.y))) {
            v.y = mean;
            v.z = 0.0;
            moved += 1;
        }
    }

    debug!(moved, pixel_pitch, window, "Merged plate vertices");
    moved
}

/// Splits sorted values wherever a gap exceeds `window`.
fn chain_clusters(sorted: &[f64], window: f64) -> Vec<&[f64]> {
    let mut clusters = Vec::new();
    let mut start = 0;
    for i in 1..sorted.len() {
        if sorted[i] - sorted[i - 1] > window {
            clusters.push(&sorted[start..i]);
            start = i;
        }
    }
    if start < sorted.len() {
        clusters.push(&sorted[start..]);
    }
    clusters
}

// =============================================================================
// FACE CLEANUP
// =============================================================================

/// Removes triangles with any two corners closer than `epsilon`.
///
/// Returns the number of triangles removed.
pub fn remove_degenerate_triangles(mesh: &mut Mesh, epsilon: f64) -> usize {
    let before = mesh.triangle_count();
    mesh.retain(|t| !t.is_degenerate(epsilon));
    let removed = before - mesh.triangle_count();
    debug!(removed, epsilon, "Removed degenerate triangles");
    removed
}

/// Order-independent identity of a face after quantization.
fn face_key(triangle: &Triangle, tolerances: &Tolerances) -> [[i64; 3]; 3] {
    let mut key = triangle
        .vertices
        .map(|v| [v.x, v.y, v.z].map(|c| tolerances.quantize(c)));
    key.sort_unstable();
    key
}

/// Removes faces whose quantized corner set repeats an earlier face.
///
/// Winding is ignored: a face and its flipped twin are duplicates. The
/// first occurrence is kept.
///
/// Returns the number of triangles removed.
pub fn remove_duplicate_triangles(mesh: &mut Mesh, tolerances: &Tolerances) -> usize {
    let before = mesh.triangle_count();
    let mut seen = HashSet::with_capacity(before);
    mesh.retain(|t| seen.insert(face_key(t, tolerances)));
    let removed = before - mesh.triangle_count();
    debug!(removed, unique = seen.len(), "Removed duplicate triangles");
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CapturedEvents;
    use glam::DVec3;

    fn tri(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Triangle {
        Triangle::new(DVec3::from(a), DVec3::from(b), DVec3::from(c))
    }

    #[test]
    fn test_chain_clusters_splits_on_gaps() {
        let values = [0.0, 0.5, 1.0, 3.5, 10.0, 11.0];
        let clusters = chain_clusters(&values, 2.0);
        assert_eq!(
            clusters,
            vec![&[0.0, 0.5, 1.0][..], &[3.5][..], &[10.0, 11.0][..]]
        );
    }

    #[test]
    fn test_chain_clusters_window_is_inclusive() {
        assert_eq!(chain_clusters(&[0.0, 2.0], 2.0).len(), 1);
        assert!(chain_clusters(&[], 2.0).is_empty());
    }

    #[test]
    fn test_merge_snaps_plate_vertices_to_mean() {
        let mut mesh = Mesh::from_triangles(vec![
            tri([1.0, 3.0, 0.0], [2.0, 3.0, 0.0], [1.0, 5.0, 1.0]),
            tri([1.0, 4.0, 0.0], [2.0, 9.0, 0.0], [1.0, 5.0, 1.0]),
        ]);
        let moved = merge_plate_vertices(&mut mesh, 1.0, &Tolerances::default());

        // Column 1 clusters {3, 4}; column 2 has {3, 9}, too far apart
        assert_eq!(moved, 2);
        assert_eq!(mesh.triangles()[0].vertices[0], DVec3::new(1.0, 3.5, 0.0));
        assert_eq!(mesh.triangles()[1].vertices[0], DVec3::new(1.0, 3.5, 0.0));
        assert_eq!(mesh.triangles()[0].vertices[1].y, 3.0);
        assert_eq!(mesh.triangles()[1].vertices[1].y, 9.0);

        // Off-plate corners never move
        assert_eq!(mesh.triangles()[0].vertices[2], DVec3::new(1.0, 5.0, 1.0));
    }

    #[test]
    fn test_merge_uses_distinct_values_for_mean() {
        let mut mesh = Mesh::from_triangles(vec![
            tri([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 5.0]),
            tri([0.0, 1.0, 0.0], [3.0, 0.0, 0.0], [3.0, 0.0, 1.0]),
        ]);
        merge_plate_vertices(&mut mesh, 1.0, &Tolerances::default());
        assert_eq!(mesh.triangles()[0].vertices[0].y, 0.5);
        assert_eq!(mesh.triangles()[1].vertices[0].y, 0.5);
    }

    #[test]
    fn test_merge_zeroes_near_plate_z() {
        let mut mesh = Mesh::from_triangles(vec![tri(
            [0.0, 1.0, 5e-7],
            [0.0, 1.5, -5e-7],
            [0.0, 0.0, 1.0],
        )]);
        merge_plate_vertices(&mut mesh, 1.0, &Tolerances::default());
        let [a, b, _] = mesh.triangles()[0].vertices;
        assert_eq!(a, DVec3::new(0.0, 1.25, 0.0));
        assert_eq!(b, DVec3::new(0.0, 1.25, 0.0));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut mesh = Mesh::from_triangles(vec![
            tri([0.0, 0.0, 0.0], [0.0, 0.7, 0.0], [0.0, 1.9, 0.0]),
            tri([0.0, 6.0, 0.0], [0.0, 7.5, 0.0], [0.0, 3.0, 2.0]),
        ]);
        let tolerances = Tolerances::default();
        assert!(merge_plate_vertices(&mut mesh, 1.0, &tolerances) > 0);
        let once = mesh.clone();
        assert_eq!(merge_plate_vertices(&mut mesh, 1.0, &tolerances), 0);
        assert_eq!(mesh, once);
    }

    #[test]
    fn test_remove_degenerate_triangles() {
        let mut mesh = Mesh::from_triangles(vec![
            tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            tri([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            // Collinear but distinct corners survive
            tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]),
        ]);
        assert_eq!(remove_degenerate_triangles(&mut mesh, 1e-6), 1);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_remove_duplicates_ignores_winding_and_keeps_first() {
        let first = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let mut mesh = Mesh::from_triangles(vec![
            first,
            first.flipped(),
            tri([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1e-9]),
        ]);
        assert_eq!(remove_duplicate_triangles(&mut mesh, &Tolerances::default()), 2);
        assert_eq!(mesh.triangles(), &[first]);
    }

    #[test]
    fn test_repair_without_merge_leaves_plate_alone() {
        let mut mesh = Mesh::from_triangles(vec![tri(
            [0.0, 1.0, 0.0],
            [0.0, 1.5, 0.0],
            [0.0, 0.0, 1.0],
        )]);
        let report = repair(&mut mesh, &RepairOptions::cleanup_only(Tolerances::default()));
        assert!(report.is_clean());
        assert_eq!(mesh.triangles()[0].vertices[1].y, 1.5);
    }

    #[test]
    fn test_repair_collapses_merged_faces() {
        // Both plate corners merge, leaving a degenerate sliver
        let mut mesh = Mesh::from_triangles(vec![
            tri([0.0, 1.0, 0.0], [0.0, 1.5, 0.0], [0.0, 0.0, 1.0]),
            tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ]);
        let options = RepairOptions::with_plate_merge(1.0, Tolerances::default());
        let report = repair(&mut mesh, &options);
        assert_eq!(report.merged_corners, 3);
        assert_eq!(report.degenerate_removed, 1);
        assert_eq!(mesh.triangle_count(), 1);

        assert!(repair(&mut mesh, &options).is_clean());
    }

    #[test]
    fn test_cleanup_passes_report_their_own_removals() {
        let face = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let sliver = tri([2.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, 0.0]);
        let mut mesh = Mesh::from_triangles(vec![face, sliver, sliver, face, face.flipped()]);

        let report = repair(&mut mesh, &RepairOptions::cleanup_only(Tolerances::default()));
        assert_eq!(report.merged_corners, 0);
        assert_eq!(report.degenerate_removed, 2);
        assert_eq!(report.duplicates_removed, 2);
        assert_eq!(mesh.triangles(), &[face]);

        let (_, messages) = CapturedEvents::capture(|| {
            repair(&mut mesh, &RepairOptions::cleanup_only(Tolerances::default()))
        });
        assert_eq!(
            messages,
            ["Removed degenerate triangles", "Removed duplicate triangles", "Repaired mesh"]
        );

        // Empty passes still report zero
        assert_eq!(remove_degenerate_triangles(&mut mesh, 1e-6), 0);
        assert_eq!(remove_duplicate_triangles(&mut mesh, &Tolerances::default()), 0);
    }
}
