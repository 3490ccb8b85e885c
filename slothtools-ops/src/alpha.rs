//! Removing transparency from materials

use crate::report::OperatorReport;
use crate::Operator;
use slothtools_core::{
    BlendMethod, Material, MaterialGraphEditor, Scene, ShadowMethod, ToolSettings, ALPHA_INPUT,
};
use tracing::{debug, info};

/// Force the principled Alpha input to 1.0, optionally unlinking it.
///
/// Returns true when the graph has a principled node, whether or not it
/// exposes an Alpha input.
pub fn clear_alpha<M: MaterialGraphEditor + ?Sized>(graph: &mut M, disconnect: bool) -> bool {
    let Some(node) = graph.principled_node() else {
        return false;
    };
    if graph.has_input(node, ALPHA_INPUT) {
        graph.set_input_default(node, ALPHA_INPUT, 1.0);
        if disconnect && graph.is_input_linked(node, ALPHA_INPUT) {
            graph.remove_input_links(node, ALPHA_INPUT);
        }
    }
    true
}

/// Make a material fully opaque
pub fn remove_material_alpha(material: &mut Material, disconnect: bool) -> bool {
    material.blend_method = BlendMethod::Opaque;
    material.shadow_method = ShadowMethod::Opaque;
    clear_alpha(material, disconnect)
}

pub struct RemoveAlphaAllMaterials;

impl Operator for RemoveAlphaAllMaterials {
    fn id(&self) -> &'static str {
        "sloths.remove_alpha_all_materials"
    }

    fn label(&self) -> &'static str {
        "Remove Alpha From All Materials"
    }

    fn section(&self) -> &'static str {
        "Materials"
    }

    fn execute(&self, scene: &mut Scene, settings: &ToolSettings) -> OperatorReport {
        let mut changed = 0;
        for material in &mut scene.materials {
            if remove_material_alpha(material, settings.disconnect_alpha_inputs) {
                debug!(material = %material.name, "alpha removed");
                changed += 1;
            }
        }
        info!(changed, "removed alpha");
        OperatorReport::finished(format!("Updated {} materials", changed), changed)
    }
}
