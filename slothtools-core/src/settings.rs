//! Settings shared by all operators

use crate::mesh::DeletePolicy;
use serde::{Deserialize, Serialize};

/// Tool settings; every field has a default so partial config files load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Remove node links feeding the principled Alpha input
    pub disconnect_alpha_inputs: bool,
    /// Roughness applied to every material, in [0, 1]
    pub roughness_value: f32,
    pub disconnect_roughness_inputs: bool,
    /// `.dds` to `.png`
    pub png_convert_dds: bool,
    /// `.jpg` and `.jpeg` to `.png`
    pub png_convert_jpg: bool,
    /// `.webp` to `.png`
    pub png_convert_webp: bool,
    /// Largest absolute area difference from the biggest face that still counts as similar.
    /// Smaller is stricter.
    pub clean_trees_area_threshold: f32,
    pub clean_trees_delete_policy: DeletePolicy,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            disconnect_alpha_inputs: true,
            roughness_value: 1.0,
            disconnect_roughness_inputs: true,
            png_convert_dds: true,
            png_convert_jpg: true,
            png_convert_webp: true,
            clean_trees_area_threshold: 0.01,
            clean_trees_delete_policy: DeletePolicy::FacesOnly,
        }
    }
}

impl ToolSettings {
    /// Copy with numeric fields clamped into their valid ranges
    pub fn clamped(&self) -> Self {
        Self {
            roughness_value: clamp_unit(self.roughness_value),
            clean_trees_area_threshold: clamp_unit(self.clean_trees_area_threshold),
            ..self.clone()
        }
    }

    /// Lowercase extensions, dot included, that the texture remap rewrites to `.png`
    pub fn png_source_extensions(&self) -> Vec<&'static str> {
        let mut extensions = Vec::new();
        if self.png_convert_dds {
            extensions.push(".dds");
        }
        if self.png_convert_jpg {
            extensions.extend([".jpg", ".jpeg"]);
        }
        if self.png_convert_webp {
            extensions.push(".webp");
        }
        extensions
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
