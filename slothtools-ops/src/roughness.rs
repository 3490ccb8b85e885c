//! Uniform material roughness

use crate::report::OperatorReport;
use crate::Operator;
use slothtools_core::{MaterialGraphEditor, Scene, ToolSettings, ROUGHNESS_INPUT};
use tracing::info;

/// Set the principled Roughness input, optionally unlinking it.
///
/// Returns false when there is no principled node or it has no Roughness input.
pub fn set_roughness<M: MaterialGraphEditor + ?Sized>(
    graph: &mut M,
    value: f32,
    disconnect: bool,
) -> bool {
    let Some(node) = graph.principled_node() else {
        return false;
    };
    if !graph.set_input_default(node, ROUGHNESS_INPUT, value) {
        return false;
    }
    if disconnect && graph.is_input_linked(node, ROUGHNESS_INPUT) {
        graph.remove_input_links(node, ROUGHNESS_INPUT);
    }
    true
}

pub struct SetAllMaterialsRoughness;

impl Operator for SetAllMaterialsRoughness {
    fn id(&self) -> &'static str {
        "sloths.set_all_materials_roughness"
    }

    fn label(&self) -> &'static str {
        "Set Roughness For All Materials"
    }

    fn section(&self) -> &'static str {
        "Materials"
    }

    fn execute(&self, scene: &mut Scene, settings: &ToolSettings) -> OperatorReport {
        let settings = settings.clamped();
        let mut changed = 0;
        for material in &mut scene.materials {
            if set_roughness(
                material,
                settings.roughness_value,
                settings.disconnect_roughness_inputs,
            ) {
                changed += 1;
            }
        }
        info!(changed, value = settings.roughness_value, "set roughness");
        OperatorReport::finished(format!("Roughness set on {} materials", changed), changed)
    }
}
