//! Editing capabilities the operators are written against
//!
//! Any host that can satisfy these traits can run the operators. The
//! in-memory scene model implements all of them.

use crate::image::ImageId;
use crate::material::{Material, SocketValue};
use crate::mesh::{DeletePolicy, PolyMesh};
use crate::scene::{unique_name, EditSession, Scene};

/// Face-level editing of a single mesh
pub trait MeshEditor {
    fn face_count(&self) -> usize;

    /// Area of a face, recomputed from current vertex positions
    fn face_area(&self, face: usize) -> f32;

    fn is_face_selected(&self, face: usize) -> bool;

    fn set_face_selected(&mut self, face: usize, selected: bool);

    /// Delete every selected face, returning how many were removed
    fn delete_selected_faces(&mut self, policy: DeletePolicy) -> usize;

    /// Drop custom split normals; returns whether any were present
    fn clear_custom_normals(&mut self) -> bool;

    fn select_all(&mut self) {
        for face in 0..self.face_count() {
            self.set_face_selected(face, true);
        }
    }

    fn deselect_all(&mut self) {
        for face in 0..self.face_count() {
            self.set_face_selected(face, false);
        }
    }

    fn invert_selection(&mut self) {
        for face in 0..self.face_count() {
            let selected = self.is_face_selected(face);
            self.set_face_selected(face, !selected);
        }
    }

    fn selected_count(&self) -> usize {
        (0..self.face_count())
            .filter(|&f| self.is_face_selected(f))
            .count()
    }

    /// Grow the selection to every face whose area is within `threshold` of a
    /// selected face's area (absolute difference, inclusive).
    ///
    /// Returns the number of faces added. With nothing selected this does nothing.
    fn select_similar_area(&mut self, threshold: f32) -> usize {
        let reference: Vec<f32> = (0..self.face_count())
            .filter(|&f| self.is_face_selected(f))
            .map(|f| self.face_area(f))
            .collect();
        if reference.is_empty() {
            return 0;
        }

        let mut added = 0;
        for face in 0..self.face_count() {
            if self.is_face_selected(face) {
                continue;
            }
            let area = self.face_area(face);
            if reference.iter().any(|r| (area - r).abs() <= threshold) {
                self.set_face_selected(face, true);
                added += 1;
            }
        }
        added
    }
}

impl MeshEditor for PolyMesh {
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face_area(&self, face: usize) -> f32 {
        PolyMesh::face_area(self, face)
    }

    fn is_face_selected(&self, face: usize) -> bool {
        self.faces[face].selected
    }

    fn set_face_selected(&mut self, face: usize, selected: bool) {
        self.faces[face].selected = selected;
    }

    fn delete_selected_faces(&mut self, policy: DeletePolicy) -> usize {
        self.remove_selected_faces(policy)
    }

    fn clear_custom_normals(&mut self) -> bool {
        let had = self.has_custom_normals();
        for face in &mut self.faces {
            face.split_normals = None;
        }
        had
    }
}

/// Edit sessions measure areas in world space, as the viewport shows them
impl MeshEditor for EditSession<'_> {
    fn face_count(&self) -> usize {
        self.mesh.faces.len()
    }

    fn face_area(&self, face: usize) -> f32 {
        self.mesh.face_area_world(face, &self.world)
    }

    fn is_face_selected(&self, face: usize) -> bool {
        self.mesh.faces[face].selected
    }

    fn set_face_selected(&mut self, face: usize, selected: bool) {
        self.mesh.faces[face].selected = selected;
    }

    fn delete_selected_faces(&mut self, policy: DeletePolicy) -> usize {
        self.mesh.remove_selected_faces(policy)
    }

    fn clear_custom_normals(&mut self) -> bool {
        MeshEditor::clear_custom_normals(&mut *self.mesh)
    }
}

/// Scalar inputs of a material's shader graph
pub trait MaterialGraphEditor {
    /// Index of the first principled shader node, if the material renders through nodes
    fn principled_node(&self) -> Option<usize>;

    fn has_input(&self, node: usize, input: &str) -> bool;

    fn input_default(&self, node: usize, input: &str) -> Option<f32>;

    /// Set a scalar input's default value; false if the input does not exist
    fn set_input_default(&mut self, node: usize, input: &str, value: f32) -> bool;

    fn is_input_linked(&self, node: usize, input: &str) -> bool;

    /// Remove every link into the input, returning how many were removed
    fn remove_input_links(&mut self, node: usize, input: &str) -> usize;
}

impl MaterialGraphEditor for Material {
    fn principled_node(&self) -> Option<usize> {
        self.active_tree()?.nodes.iter().position(|n| n.is_principled())
    }

    fn has_input(&self, node: usize, input: &str) -> bool {
        self.node_tree
            .as_ref()
            .and_then(|t| t.nodes.get(node))
            .and_then(|n| n.input(input))
            .is_some()
    }

    fn input_default(&self, node: usize, input: &str) -> Option<f32> {
        self.node_tree
            .as_ref()?
            .nodes
            .get(node)?
            .input(input)?
            .default_value
            .as_float()
    }

    fn set_input_default(&mut self, node: usize, input: &str, value: f32) -> bool {
        let socket = self
            .node_tree
            .as_mut()
            .and_then(|t| t.nodes.get_mut(node))
            .and_then(|n| n.input_mut(input));
        match socket {
            Some(socket) => {
                socket.default_value = SocketValue::Float(value);
                true
            }
            None => false,
        }
    }

    fn is_input_linked(&self, node: usize, input: &str) -> bool {
        self.node_tree
            .as_ref()
            .map(|t| t.links_into(node, input).next().is_some())
            .unwrap_or(false)
    }

    fn remove_input_links(&mut self, node: usize, input: &str) -> usize {
        self.node_tree
            .as_mut()
            .map(|t| t.unlink_input(node, input))
            .unwrap_or(0)
    }
}

/// File paths of images sampled by texture nodes
pub trait TexturePathRewriter {
    fn material_count(&self) -> usize;

    /// `(node index, image)` for every image texture node with an image, in node order.
    /// Empty for materials that do not render through nodes.
    fn image_texture_nodes(&self, material: usize) -> Vec<(usize, ImageId)>;

    fn image_path(&self, image: ImageId) -> Option<&str>;

    fn set_image_path(&mut self, image: ImageId, path: String);

    /// Rename an image. Names stay unique among images, so a clash gets a
    /// `.001`-style suffix.
    fn set_image_name(&mut self, image: ImageId, name: String);

    /// Rename a node, unique within its material's tree like image names
    fn set_node_name(&mut self, material: usize, node: usize, name: String);
}

impl TexturePathRewriter for Scene {
    fn material_count(&self) -> usize {
        self.materials.len()
    }

    fn image_texture_nodes(&self, material: usize) -> Vec<(usize, ImageId)> {
        self.materials
            .get(material)
            .and_then(|m| m.active_tree())
            .map(|tree| {
                tree.nodes
                    .iter()
                    .enumerate()
                    .filter_map(|(i, n)| n.image().map(|img| (i, img)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn image_path(&self, image: ImageId) -> Option<&str> {
        self.image(image).map(|i| i.filepath.as_str())
    }

    fn set_image_path(&mut self, image: ImageId, path: String) {
        if let Some(img) = self.image_mut(image) {
            img.filepath = path;
        }
    }

    fn set_image_name(&mut self, image: ImageId, name: String) {
        let name = unique_name(&name, |candidate| {
            self.images
                .iter()
                .enumerate()
                .any(|(i, img)| i != image.0 && img.name == candidate)
        });
        if let Some(img) = self.image_mut(image) {
            img.name = name;
        }
    }

    fn set_node_name(&mut self, material: usize, node: usize, name: String) {
        let Some(tree) = self
            .materials
            .get_mut(material)
            .and_then(|m| m.node_tree.as_mut())
        else {
            return;
        };
        if node >= tree.nodes.len() {
            return;
        }
        let name = unique_name(&name, |candidate| {
            tree.nodes
                .iter()
                .enumerate()
                .any(|(i, n)| i != node && n.name == candidate)
        });
        tree.nodes[node].name = name;
    }
}
