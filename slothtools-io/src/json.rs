//! JSON scenes and settings

use crate::{IoError, SceneReader, SceneWriter};
use slothtools_core::{Result, Scene, ToolSettings};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub struct JsonSceneReader;
pub struct JsonSceneWriter;

fn open(path: &Path) -> std::result::Result<BufReader<File>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(BufReader::new(File::open(path)?))
}

fn save<T: serde::Serialize>(value: &T, path: &Path) -> std::result::Result<(), IoError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

impl SceneReader for JsonSceneReader {
    fn read_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let path = path.as_ref();
        let scene: Scene = serde_json::from_reader(open(path)?).map_err(IoError::from)?;
        for object in &scene.objects {
            if let Some(mesh) = object.as_mesh() {
                mesh.validate()?;
            }
        }
        debug!(path = %path.display(), objects = scene.objects.len(), materials = scene.materials.len(), "read scene");
        Ok(scene)
    }
}

impl SceneWriter for JsonSceneWriter {
    fn write_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()> {
        save(scene, path.as_ref())?;
        Ok(())
    }
}

/// Load tool settings; missing fields take their defaults
pub fn read_settings<P: AsRef<Path>>(path: P) -> Result<ToolSettings> {
    let settings: ToolSettings =
        serde_json::from_reader(open(path.as_ref())?).map_err(IoError::from)?;
    Ok(settings)
}

pub fn write_settings<P: AsRef<Path>>(settings: &ToolSettings, path: P) -> Result<()> {
    save(settings, path.as_ref())?;
    Ok(())
}
