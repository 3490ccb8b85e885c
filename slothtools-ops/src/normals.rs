//! Clearing custom split normals

use crate::batch::for_each_selected_mesh;
use crate::report::OperatorReport;
use crate::Operator;
use slothtools_core::{MeshEditor, Scene, ToolSettings};
use tracing::info;

/// Drop custom split normals from every selected mesh object
pub struct ClearCustomSplitNormalsSelected;

impl Operator for ClearCustomSplitNormalsSelected {
    fn id(&self) -> &'static str {
        "sloths.clear_custom_split_normals_selected"
    }

    fn label(&self) -> &'static str {
        "Clear Custom Split Normals (Selected)"
    }

    fn section(&self) -> &'static str {
        "Geometry"
    }

    fn poll(&self, scene: &Scene) -> bool {
        scene.objects.iter().any(|o| o.selected)
    }

    fn execute(&self, scene: &mut Scene, _settings: &ToolSettings) -> OperatorReport {
        let outcome = match for_each_selected_mesh(scene, |session| {
            session.select_all();
            session.clear_custom_normals()
        }) {
            Ok(outcome) => outcome,
            Err(error) => return OperatorReport::cancelled(error.to_string()),
        };

        let had_normals = outcome.results.iter().filter(|(_, had)| *had).count();
        let cleared = outcome.succeeded();
        info!(cleared, had_normals, "cleared custom split normals");

        OperatorReport::finished(format!("Cleared split normals on {} objects", cleared), cleared)
            .with_failures(outcome.failures)
    }
}
