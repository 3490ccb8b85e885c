//! Scene objects, selection state and edit sessions

use crate::image::{Image, ImageId};
use crate::material::Material;
use crate::mesh::PolyMesh;
use crate::transform::Transform3D;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Index of an object in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub usize);

/// Interaction mode of the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    #[default]
    Object,
    EditMesh,
}

/// Data carried by a scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "data")]
pub enum ObjectKind {
    Mesh(PolyMesh),
    Empty,
    Camera,
    Light,
}

impl ObjectKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ObjectKind::Mesh(_) => "MESH",
            ObjectKind::Empty => "EMPTY",
            ObjectKind::Camera => "CAMERA",
            ObjectKind::Light => "LIGHT",
        }
    }
}

/// An object placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    #[serde(default)]
    pub matrix_world: Transform3D,
    #[serde(default)]
    pub selected: bool,
    /// False for linked or locked data that cannot be edited in place
    #[serde(default = "default_editable")]
    pub editable: bool,
}

fn default_editable() -> bool {
    true
}

impl SceneObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            matrix_world: Transform3D::identity(),
            selected: false,
            editable: true,
        }
    }

    /// A mesh object at the origin
    pub fn mesh(name: impl Into<String>, mesh: PolyMesh) -> Self {
        Self::new(name, ObjectKind::Mesh(mesh))
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, ObjectKind::Mesh(_))
    }

    pub fn as_mesh(&self) -> Option<&PolyMesh> {
        match &self.kind {
            ObjectKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Open an edit session on the object's mesh.
    ///
    /// Fails without touching the mesh when the object is not a mesh or
    /// its data cannot be edited.
    pub fn enter_edit_mode(&mut self) -> Result<EditSession<'_>> {
        if !self.editable {
            return Err(Error::NotEditable {
                object: self.name.clone(),
            });
        }
        let world = self.matrix_world;
        match &mut self.kind {
            ObjectKind::Mesh(mesh) => {
                debug!(object = %self.name, faces = mesh.face_count(), "entered edit mode");
                Ok(EditSession { mesh, world })
            }
            other => Err(Error::Unsupported(format!(
                "object '{}' of type {} has no editable mesh",
                self.name,
                other.type_name()
            ))),
        }
    }
}

/// Exclusive edit access to one object's mesh, measured in world space
#[derive(Debug)]
pub struct EditSession<'a> {
    pub(crate) mesh: &'a mut PolyMesh,
    pub(crate) world: Transform3D,
}

impl EditSession<'_> {
    pub fn mesh(&self) -> &PolyMesh {
        self.mesh
    }
}

/// `base`, or `base.001`, `base.002`, ... if `taken` already claims it
pub fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (1u32..)
        .map(|n| format!("{}.{:03}", base, n))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Caller-visible selection, saved before an operator runs and restored after
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub active: Option<ObjectId>,
    pub selected: Vec<ObjectId>,
    pub mode: EditorMode,
}

/// Everything the operators work on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub active: Option<ObjectId>,
    #[serde(default)]
    pub mode: EditorMode,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn add_image(&mut self, image: Image) -> ImageId {
        self.images.push(image);
        ImageId(self.images.len() - 1)
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    pub fn image(&self, id: ImageId) -> Option<&Image> {
        self.images.get(id.0)
    }

    pub fn image_mut(&mut self, id: ImageId) -> Option<&mut Image> {
        self.images.get_mut(id.0)
    }

    /// Look up an object by name
    pub fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .position(|o| o.name == name)
            .map(ObjectId)
    }

    /// Selected objects in scene order
    pub fn selected_objects(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.selected)
            .map(|(i, _)| ObjectId(i))
            .collect()
    }

    /// Selected mesh objects in scene order
    pub fn selected_meshes(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.selected && o.is_mesh())
            .map(|(i, _)| ObjectId(i))
            .collect()
    }

    pub fn deselect_all_objects(&mut self) {
        for object in &mut self.objects {
            object.selected = false;
        }
    }

    /// Select an object by name, failing if it does not exist
    pub fn select_by_name(&mut self, name: &str) -> Result<ObjectId> {
        let id = self
            .find_object(name)
            .ok_or_else(|| Error::UnknownObject(name.to_string()))?;
        self.objects[id.0].selected = true;
        Ok(id)
    }

    /// Make `id` the only selected object and the active one
    pub fn select_only(&mut self, id: ObjectId) {
        self.deselect_all_objects();
        if let Some(object) = self.objects.get_mut(id.0) {
            object.selected = true;
            self.active = Some(id);
        }
    }

    pub fn set_active(&mut self, id: Option<ObjectId>) {
        self.active = id.filter(|id| id.0 < self.objects.len());
    }

    /// Switch the editor mode.
    ///
    /// Entering mesh edit mode requires an active, editable mesh object.
    pub fn set_mode(&mut self, mode: EditorMode) -> Result<()> {
        if mode == EditorMode::EditMesh {
            let active = self
                .active
                .and_then(|id| self.objects.get(id.0))
                .ok_or_else(|| Error::NoEligibleInput("No active object".to_string()))?;
            if !active.is_mesh() {
                return Err(Error::Unsupported(format!(
                    "active object '{}' is not a mesh",
                    active.name
                )));
            }
            if !active.editable {
                return Err(Error::NotEditable {
                    object: active.name.clone(),
                });
            }
        }
        self.mode = mode;
        Ok(())
    }

    /// Snapshot of active object, selection and mode
    pub fn selection_state(&self) -> SelectionState {
        SelectionState {
            active: self.active,
            selected: self.selected_objects(),
            mode: self.mode,
        }
    }

    /// Put back a snapshot taken with [`Scene::selection_state`].
    ///
    /// Mode restoration can fail if the active object is no longer editable;
    /// the selection itself is always restored.
    pub fn restore_selection(&mut self, state: &SelectionState) -> Result<()> {
        self.deselect_all_objects();
        for id in &state.selected {
            if let Some(object) = self.objects.get_mut(id.0) {
                object.selected = true;
            }
        }
        self.set_active(state.active);
        if state.mode == EditorMode::Object {
            self.mode = EditorMode::Object;
            Ok(())
        } else {
            self.set_mode(state.mode)
        }
    }
}
