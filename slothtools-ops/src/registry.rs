//! Lookup of operators by id

use crate::{
    CleanTreesSelected, ClearCustomSplitNormalsSelected, Operator, OperatorReport,
    RemapImagePathsToPng, RemoveAlphaAllMaterials, SetAllMaterialsRoughness,
};
use slothtools_core::{Error, Result, Scene, ToolSettings};
use tracing::{info, warn};

/// All operators, in panel order
pub struct OperatorRegistry {
    operators: Vec<Box<dyn Operator>>,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self {
            operators: vec![
                Box::new(ClearCustomSplitNormalsSelected) as Box<dyn Operator>,
                Box::new(RemoveAlphaAllMaterials) as Box<dyn Operator>,
                Box::new(SetAllMaterialsRoughness) as Box<dyn Operator>,
                Box::new(RemapImagePathsToPng) as Box<dyn Operator>,
                Box::new(CleanTreesSelected) as Box<dyn Operator>,
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Operator> {
        self.operators.iter().map(|op| op.as_ref())
    }

    pub fn get(&self, id: &str) -> Option<&dyn Operator> {
        self.iter().find(|op| op.id() == id)
    }

    /// Run an operator by id.
    ///
    /// An operator whose poll fails is not executed and yields a cancelled report.
    pub fn run(&self, id: &str, scene: &mut Scene, settings: &ToolSettings) -> Result<OperatorReport> {
        let op = self
            .get(id)
            .ok_or_else(|| Error::UnknownOperator(id.to_string()))?;

        if !op.poll(scene) {
            warn!(operator = id, "poll failed");
            return Ok(OperatorReport::cancelled(format!(
                "{} cannot run in the current context",
                op.label()
            )));
        }

        info!(operator = id, "running");
        Ok(op.execute(scene, settings))
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_order_and_lookup() {
        let registry = OperatorRegistry::new();
        let sections: Vec<_> = registry.iter().map(|op| op.section()).collect();
        assert_eq!(
            sections,
            vec!["Geometry", "Materials", "Materials", "Textures", "Clean Trees"]
        );
        assert!(registry.get("sloths.clean_trees_selected").is_some());
        assert!(registry.get("sloths.nope").is_none());
    }

    #[test]
    fn test_unknown_operator_is_an_error() {
        let registry = OperatorRegistry::new();
        let mut scene = Scene::new();
        let result = registry.run("sloths.nope", &mut scene, &ToolSettings::default());
        assert!(matches!(result, Err(Error::UnknownOperator(_))));
    }

    #[test]
    fn test_poll_failure_cancels() {
        let registry = OperatorRegistry::new();
        let mut scene = Scene::new();
        let report = registry
            .run(
                "sloths.clear_custom_split_normals_selected",
                &mut scene,
                &ToolSettings::default(),
            )
            .unwrap();
        assert!(report.is_cancelled());
    }
}
