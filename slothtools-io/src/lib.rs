//! I/O operations for slothtools scenes
//!
//! Meshes come in and go out as Wavefront OBJ; complete scenes (objects,
//! materials, images, selection) and tool settings are stored as JSON.

pub mod wavefront;
pub mod json;
pub mod error;

pub use error::*;
pub use json::{JsonSceneReader, JsonSceneWriter};
pub use wavefront::{ObjReader, ObjWriter};

use slothtools_core::{Result, Scene};
use std::path::Path;

/// Trait for reading scenes from files
pub trait SceneReader {
    fn read_scene<P: AsRef<Path>>(path: P) -> Result<Scene>;
}

/// Trait for writing scenes to files
pub trait SceneWriter {
    fn write_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()>;
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

/// Auto-detect format and read a scene
pub fn read_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("obj") => ObjReader::read_scene(path),
        Some("json") => JsonSceneReader::read_scene(path),
        _ => Err(slothtools_core::Error::UnsupportedFormat(format!(
            "Unsupported scene format: {:?}",
            path.extension()
        ))),
    }
}

/// Auto-detect format and write a scene
pub fn write_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("obj") => ObjWriter::write_scene(scene, path),
        Some("json") => JsonSceneWriter::write_scene(scene, path),
        _ => Err(slothtools_core::Error::UnsupportedFormat(format!(
            "Unsupported scene format: {:?}",
            path.extension()
        ))),
    }
}

pub use json::{read_settings, write_settings};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format() {
        assert!(read_scene("tree.fbx").is_err());
        assert!(write_scene(&Scene::new(), "tree.blend").is_err());
    }
}
