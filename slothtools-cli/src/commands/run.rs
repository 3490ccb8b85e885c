//! Operator execution

use anyhow::{bail, Context, Result};
use clap::Args;
use slothtools_core::{DeletePolicy, Scene, ToolSettings};
use slothtools_ops::{OperatorRegistry, ReportLevel};
use std::path::PathBuf;
use tracing::{info, warn};

/// Scene input, output and selection
#[derive(Args, Debug)]
pub struct SceneArgs {
    /// Scene to operate on (.obj or .json)
    #[arg(short, long)]
    pub scene: PathBuf,

    /// Where to write the result; nothing is written without it
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Settings JSON; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Select these objects (by name) instead of the scene's saved selection
    #[arg(long)]
    pub select: Vec<String>,
}

/// Per-run overrides of the tool settings
#[derive(Args, Debug, Default)]
pub struct SettingsOverrides {
    /// Keep links feeding the Alpha input
    #[arg(long)]
    pub keep_alpha_links: bool,

    /// Roughness to apply, clamped to [0, 1]
    #[arg(long)]
    pub roughness: Option<f32>,

    /// Keep links feeding the Roughness input
    #[arg(long)]
    pub keep_roughness_links: bool,

    /// Do not convert .dds paths
    #[arg(long)]
    pub no_dds: bool,

    /// Do not convert .jpg/.jpeg paths
    #[arg(long)]
    pub no_jpg: bool,

    /// Do not convert .webp paths
    #[arg(long)]
    pub no_webp: bool,

    /// Largest absolute face-area difference clean-trees keeps, in world
    /// units squared; clamped to [0, 1]
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Also delete vertices left without faces
    #[arg(long)]
    pub delete_loose: bool,
}

impl SettingsOverrides {
    pub fn apply(&self, settings: &mut ToolSettings) {
        if self.keep_alpha_links {
            settings.disconnect_alpha_inputs = false;
        }
        if let Some(value) = self.roughness {
            settings.roughness_value = value;
        }
        if self.keep_roughness_links {
            settings.disconnect_roughness_inputs = false;
        }
        if self.no_dds {
            settings.png_convert_dds = false;
        }
        if self.no_jpg {
            settings.png_convert_jpg = false;
        }
        if self.no_webp {
            settings.png_convert_webp = false;
        }
        if let Some(threshold) = self.threshold {
            settings.clean_trees_area_threshold = threshold;
        }
        if self.delete_loose {
            settings.clean_trees_delete_policy = DeletePolicy::FacesAndLooseVertices;
        }
    }
}

#[derive(Args, Debug)]
pub struct ToolArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    #[command(flatten)]
    pub overrides: SettingsOverrides,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Operator id, see `slothtools list`
    pub operator: String,

    #[command(flatten)]
    pub tool: ToolArgs,
}

pub fn execute(args: RunArgs) -> Result<()> {
    execute_operator(&args.operator, args.tool)
}

fn load_settings(args: &ToolArgs) -> Result<ToolSettings> {
    let mut settings = match &args.scene.config {
        Some(path) => slothtools_io::read_settings(path)
            .with_context(|| format!("reading settings {}", path.display()))?,
        None => ToolSettings::default(),
    };
    args.overrides.apply(&mut settings);
    Ok(settings.clamped())
}

fn apply_selection(scene: &mut Scene, names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Ok(());
    }
    scene.deselect_all_objects();
    let mut first = None;
    for name in names {
        let id = scene.select_by_name(name)?;
        first.get_or_insert(id);
    }
    scene.set_active(first);
    Ok(())
}

pub fn execute_operator(id: &str, args: ToolArgs) -> Result<()> {
    let settings = load_settings(&args)?;
    let mut scene = slothtools_io::read_scene(&args.scene.scene)
        .with_context(|| format!("reading scene {}", args.scene.scene.display()))?;
    apply_selection(&mut scene, &args.scene.select)?;

    let registry = OperatorRegistry::new();
    let report = registry.run(id, &mut scene, &settings)?;

    for line in &report.details {
        info!("{}", line);
    }
    for failure in &report.failures {
        warn!(item = %failure.item, "{}", failure.error);
    }
    match report.level {
        ReportLevel::Info => println!("{}", report),
        ReportLevel::Warning => println!("warning: {}", report),
    }

    if report.is_cancelled() {
        bail!("{} cancelled", id);
    }

    if let Some(output) = &args.scene.output {
        slothtools_io::write_scene(&scene, output)
            .with_context(|| format!("writing scene {}", output.display()))?;
        info!(path = %output.display(), "wrote scene");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slothtools_core::{ObjectKind, SceneObject};

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let overrides = SettingsOverrides {
            keep_alpha_links: true,
            roughness: Some(0.3),
            no_webp: true,
            threshold: Some(0.2),
            delete_loose: true,
            ..Default::default()
        };
        let mut settings = ToolSettings::default();
        overrides.apply(&mut settings);

        assert!(!settings.disconnect_alpha_inputs);
        assert!(settings.disconnect_roughness_inputs);
        assert_eq!(settings.roughness_value, 0.3);
        assert!(settings.png_convert_dds);
        assert!(!settings.png_convert_webp);
        assert_eq!(settings.clean_trees_area_threshold, 0.2);
        assert_eq!(
            settings.clean_trees_delete_policy,
            DeletePolicy::FacesAndLooseVertices
        );
    }

    #[test]
    fn test_selection_by_name() {
        let mut scene = Scene::new();
        let a = scene.add_object(SceneObject::new("A", ObjectKind::Empty));
        let b = scene.add_object(SceneObject::new("B", ObjectKind::Empty));
        scene.objects[a.0].selected = true;

        apply_selection(&mut scene, &["B".to_string()]).unwrap();
        assert_eq!(scene.selected_objects(), vec![b]);
        assert_eq!(scene.active, Some(b));

        assert!(apply_selection(&mut scene, &["Missing".to_string()]).is_err());
    }
}
