//! Running an edit over every selected mesh object

use crate::report::ItemFailure;
use slothtools_core::{EditSession, EditorMode, Error, ObjectId, Result, Scene};
use tracing::{debug, warn};

/// Per-object results of a batch edit
#[derive(Debug)]
pub struct BatchOutcome<T> {
    /// Object name and edit result, in scene order
    pub results: Vec<(String, T)>,
    pub failures: Vec<ItemFailure>,
}

impl<T> BatchOutcome<T> {
    pub fn succeeded(&self) -> usize {
        self.results.len()
    }
}

/// Apply `edit` to each selected mesh object in turn.
///
/// Each object is made the only selected and active object and opened in
/// edit mode before `edit` runs. An object that cannot be edited is recorded
/// as a failure and left untouched; the remaining objects are still processed.
/// The caller's selection, active object and mode are restored afterwards.
///
/// Fails with [`Error::NoEligibleInput`] when no mesh object is selected.
pub fn for_each_selected_mesh<T, F>(scene: &mut Scene, mut edit: F) -> Result<BatchOutcome<T>>
where
    F: FnMut(&mut EditSession<'_>) -> T,
{
    let meshes = scene.selected_meshes();
    if meshes.is_empty() {
        return Err(Error::NoEligibleInput("No mesh objects selected".to_string()));
    }

    let saved = scene.selection_state();
    scene.mode = EditorMode::Object;

    let mut outcome = BatchOutcome {
        results: Vec::with_capacity(meshes.len()),
        failures: Vec::new(),
    };

    for id in meshes {
        let name = scene.objects[id.0].name.clone();
        scene.select_only(id);
        match edit_object(scene, id, &mut edit) {
            Ok(value) => {
                debug!(object = %name, "edited");
                outcome.results.push((name, value));
            }
            Err(error) => {
                warn!(object = %name, %error, "skipping object");
                outcome.failures.push(ItemFailure { item: name, error });
            }
        }
    }

    if let Err(error) = scene.restore_selection(&saved) {
        warn!(%error, "could not restore the previous editor mode");
    }
    Ok(outcome)
}

fn edit_object<T, F>(scene: &mut Scene, id: ObjectId, edit: &mut F) -> Result<T>
where
    F: FnMut(&mut EditSession<'_>) -> T,
{
    scene.set_mode(EditorMode::EditMesh)?;
    let result = match scene.object_mut(id) {
        Some(object) => object.enter_edit_mode().map(|mut session| edit(&mut session)),
        None => Err(Error::UnknownObject(format!("#{}", id.0))),
    };
    scene.mode = EditorMode::Object;
    result
}
