//! Wavefront OBJ support
//!
//! Each `o` block becomes one mesh object. Only geometry is carried: the
//! reader ignores texture coordinates, normals and material libraries, and
//! the writer emits positions and polygons in local space.

use crate::{IoError, SceneReader, SceneWriter};
use slothtools_core::{ObjectKind, Point3f, PolyMesh, Result, Scene, SceneObject};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

pub struct ObjReader;
pub struct ObjWriter;

impl ObjReader {
    /// Convert parsed OBJ data into scene objects, one per OBJ object
    pub fn objects_from_data(data: &obj::ObjData) -> Result<Vec<SceneObject>> {
        let mut objects = Vec::with_capacity(data.objects.len());

        for object in &data.objects {
            let mut mesh = PolyMesh::new();
            let mut local: HashMap<usize, usize> = HashMap::new();

            for group in &object.groups {
                for poly in &group.polys {
                    let mut face = Vec::with_capacity(poly.0.len());
                    for index in &poly.0 {
                        let global = index.0;
                        let position = data.position.get(global).ok_or_else(|| {
                            IoError::ParseError {
                                message: format!(
                                    "object '{}' references vertex {} of {}",
                                    object.name,
                                    global + 1,
                                    data.position.len()
                                ),
                            }
                        })?;
                        let v = *local.entry(global).or_insert_with(|| {
                            mesh.add_vertex(Point3f::new(position[0], position[1], position[2]))
                        });
                        face.push(v);
                    }
                    if face.len() < 3 {
                        warn!(object = %object.name, corners = face.len(), "skipping degenerate polygon");
                        continue;
                    }
                    mesh.add_face(face);
                }
            }

            mesh.validate()?;
            debug!(object = %object.name, vertices = mesh.vertex_count(), faces = mesh.face_count(), "read OBJ object");
            objects.push(SceneObject::mesh(object.name.clone(), mesh));
        }
        Ok(objects)
    }
}

impl SceneReader for ObjReader {
    /// Every imported object is selected and the first one is active
    fn read_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let parsed = obj::Obj::load(path).map_err(|e| IoError::ParseError {
            message: e.to_string(),
        })?;

        let mut scene = Scene::new();
        for mut object in Self::objects_from_data(&parsed.data)? {
            object.selected = true;
            scene.add_object(object);
        }
        if !scene.objects.is_empty() {
            scene.set_active(Some(slothtools_core::ObjectId(0)));
        }
        Ok(scene)
    }
}

impl ObjWriter {
    /// Write all mesh objects of `scene` as OBJ text
    pub fn write_to<W: Write>(scene: &Scene, writer: &mut W) -> std::result::Result<(), IoError> {
        writeln!(writer, "# slothtools OBJ export")?;
        let mut offset = 1;

        for object in &scene.objects {
            let mesh = match &object.kind {
                ObjectKind::Mesh(mesh) => mesh,
                _ => continue,
            };
            writeln!(writer, "o {}", object.name)?;
            for v in &mesh.vertices {
                writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
            }
            for face in &mesh.faces {
                write!(writer, "f")?;
                for &v in &face.vertices {
                    write!(writer, " {}", v + offset)?;
                }
                writeln!(writer)?;
            }
            offset += mesh.vertex_count();
        }
        Ok(())
    }
}

impl SceneWriter for ObjWriter {
    fn write_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| IoError::WriteError {
            message: format!("{}: {}", path.display(), e),
        })?;
        let mut writer = BufWriter::new(file);
        Self::write_to(scene, &mut writer)?;
        writer.flush().map_err(IoError::from)?;
        Ok(())
    }
}
