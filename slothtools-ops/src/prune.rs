//! Similar-area face pruning
//!
//! Keeps only the faces whose area is close to the largest face's area and
//! deletes everything else. On a tree model this strips leaf and twig
//! geometry while keeping the large trunk faces.
//!
//! The largest face is the first one with maximal area in face order.
//! Similarity is the absolute area difference, inclusive of `threshold`.

use crate::batch::for_each_selected_mesh;
use crate::report::OperatorReport;
use crate::Operator;
use slothtools_core::{DeletePolicy, Error, MeshEditor, Scene, ToolSettings};
use tracing::{debug, info};

/// Face counts after pruning one mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PruneReport {
    pub kept: usize,
    pub removed: usize,
}

impl PruneReport {
    pub fn total(&self) -> usize {
        self.kept + self.removed
    }
}

/// Index of the largest face, first one wins on ties.
/// Faces with a non-finite area are never picked.
pub fn largest_face<M: MeshEditor + ?Sized>(mesh: &M) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for face in 0..mesh.face_count() {
        let area = mesh.face_area(face);
        if !area.is_finite() {
            continue;
        }
        match best {
            Some((_, best_area)) if area <= best_area => {}
            _ => best = Some((face, area)),
        }
    }
    best.map(|(face, _)| face)
}

/// Prune `mesh` down to faces similar in area to its largest face.
///
/// Only the faces are removed; vertices they used stay in the mesh.
pub fn prune<M: MeshEditor + ?Sized>(mesh: &mut M, threshold: f32) -> PruneReport {
    prune_with_policy(mesh, threshold, DeletePolicy::FacesOnly)
}

/// [`prune`] with an explicit deletion policy
pub fn prune_with_policy<M: MeshEditor + ?Sized>(
    mesh: &mut M,
    threshold: f32,
    policy: DeletePolicy,
) -> PruneReport {
    let Some(reference) = largest_face(mesh) else {
        return PruneReport::default();
    };

    mesh.deselect_all();
    mesh.set_face_selected(reference, true);
    let similar = mesh.select_similar_area(threshold);
    debug!(
        reference,
        area = mesh.face_area(reference),
        similar,
        threshold,
        "selected similar faces"
    );

    mesh.invert_selection();
    let removed = mesh.delete_selected_faces(policy);

    PruneReport {
        kept: mesh.face_count(),
        removed,
    }
}

/// Prune every selected mesh object
pub struct CleanTreesSelected;

impl Operator for CleanTreesSelected {
    fn id(&self) -> &'static str {
        "sloths.clean_trees_selected"
    }

    fn label(&self) -> &'static str {
        "Clean Trees (Selected)"
    }

    fn section(&self) -> &'static str {
        "Clean Trees"
    }

    fn execute(&self, scene: &mut Scene, settings: &ToolSettings) -> OperatorReport {
        let settings = settings.clamped();
        let threshold = settings.clean_trees_area_threshold;
        let policy = settings.clean_trees_delete_policy;

        let outcome = match for_each_selected_mesh(scene, |session| {
            prune_with_policy(session, threshold, policy)
        }) {
            Ok(outcome) => outcome,
            Err(Error::NoEligibleInput(message)) => return OperatorReport::cancelled(message),
            Err(other) => return OperatorReport::cancelled(other.to_string()),
        };

        let details = outcome
            .results
            .iter()
            .map(|(name, r)| format!("{}: kept {}, removed {}", name, r.kept, r.removed))
            .collect();
        let cleaned = outcome.succeeded();
        info!(cleaned, failed = outcome.failures.len(), threshold, "cleaned trees");

        OperatorReport::finished(format!("Cleaned {} tree objects", cleaned), cleaned)
            .with_details(details)
            .with_failures(outcome.failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slothtools_core::{Point3f, PolyMesh};

    /// Disconnected right triangles with the given areas
    fn triangles_with_areas(areas: &[f32]) -> PolyMesh {
        let mut mesh = PolyMesh::new();
        for (i, &area) in areas.iter().enumerate() {
            let x = i as f32 * 100.0;
            let a = mesh.add_vertex(Point3f::new(x, 0.0, 0.0));
            let b = mesh.add_vertex(Point3f::new(x + 2.0 * area, 0.0, 0.0));
            let c = mesh.add_vertex(Point3f::new(x, 1.0, 0.0));
            mesh.add_face(vec![a, b, c]);
        }
        mesh
    }

    #[test]
    fn test_empty_mesh_is_a_no_op() {
        let mut mesh = PolyMesh::new();
        assert_eq!(prune(&mut mesh, 0.01), PruneReport { kept: 0, removed: 0 });
    }

    #[test]
    fn test_keeps_only_the_largest_band() {
        let mut mesh = triangles_with_areas(&[10.0, 10.05, 10.1, 2.0, 1.0]);
        let report = prune(&mut mesh, 0.01);
        assert_eq!(report, PruneReport { kept: 1, removed: 4 });
        approx::assert_relative_eq!(mesh.face_area(0), 10.1, epsilon = 1e-3);
    }

    #[test]
    fn test_wider_threshold_keeps_neighbours() {
        let mut mesh = triangles_with_areas(&[10.0, 10.05, 10.1, 2.0, 1.0]);
        let report = prune(&mut mesh, 0.2);
        assert_eq!(report, PruneReport { kept: 3, removed: 2 });
    }

    #[test]
    fn test_tie_picks_first_face() {
        let mesh = triangles_with_areas(&[3.0, 5.0, 5.0, 1.0]);
        assert_eq!(largest_face(&mesh), Some(1));
    }

    #[test]
    fn test_non_finite_face_is_not_the_reference() {
        let mut mesh = triangles_with_areas(&[1.0, 1.0, 1.0, 0.5]);
        mesh.vertices[10].y = f32::NAN;

        assert_eq!(largest_face(&mesh), Some(0));
        let report = prune(&mut mesh, 0.01);
        assert_eq!(report, PruneReport { kept: 3, removed: 1 });
        assert!((0..mesh.face_count()).all(|f| mesh.face_area(f).is_finite()));
    }

    #[test]
    fn test_identical_faces_far_from_origin_are_all_kept() {
        let mut mesh = PolyMesh::new();
        for i in 0..8 {
            let x = 5000.0 + i as f32 * 3.0;
            let a = mesh.add_vertex(Point3f::new(x, 5000.0, 5000.0));
            let b = mesh.add_vertex(Point3f::new(x + 1.0, 5000.0, 5000.0));
            let c = mesh.add_vertex(Point3f::new(x + 1.0, 5001.0, 5000.0));
            let d = mesh.add_vertex(Point3f::new(x, 5001.0, 5000.0));
            mesh.add_face(vec![a, b, c, d]);
        }
        assert_eq!(prune(&mut mesh, 0.01), PruneReport { kept: 8, removed: 0 });
    }

    #[test]
    fn test_remaining_faces_are_unselected() {
        let mut mesh = triangles_with_areas(&[4.0, 4.0, 1.0]);
        prune(&mut mesh, 0.0);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.selected_count(), 0);
        assert_eq!(mesh.vertex_count(), 9);
    }

    #[test]
    fn test_loose_vertex_policy_drops_orphans() {
        let mut mesh = triangles_with_areas(&[4.0, 4.0, 1.0]);
        let report = prune_with_policy(&mut mesh, 0.0, DeletePolicy::FacesAndLooseVertices);
        assert_eq!(report.removed, 1);
        assert_eq!(mesh.vertex_count(), 6);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_counts_always_add_up() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let n = rng.gen_range(0..40);
            let areas: Vec<f32> = (0..n).map(|_| rng.gen_range(0.1..20.0)).collect();
            let threshold = rng.gen_range(0.0..1.0);
            let mut mesh = triangles_with_areas(&areas);

            let report = prune(&mut mesh, threshold);
            assert_eq!(report.total(), n);
            assert_eq!(report.kept, mesh.face_count());
            if n > 0 {
                assert!(report.kept >= 1);
            }
        }
    }
}
