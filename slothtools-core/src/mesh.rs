//! Polygon mesh data structures and functionality

use crate::point::*;
use crate::transform::Transform3D;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A planar polygon referencing three or more mesh vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub vertices: Vec<usize>,
    #[serde(default)]
    pub selected: bool,
    /// Custom split normals, one per corner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_normals: Option<Vec<Vector3f>>,
}

impl Face {
    pub fn new(vertices: Vec<usize>) -> Self {
        Self {
            vertices,
            selected: false,
            split_normals: None,
        }
    }

    /// Number of corners
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// How faces are removed from a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Remove the faces and nothing else. Vertices only those faces used stay behind.
    #[default]
    FacesOnly,
    /// Remove the faces, then drop vertices no remaining face references.
    FacesAndLooseVertices,
}

/// A polygon mesh with per-face selection state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<Face>,
}

impl PolyMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and polygon index lists
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<Vec<usize>>) -> Self {
        Self {
            vertices,
            faces: faces.into_iter().map(Face::new).collect(),
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no faces
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh, returning its index
    pub fn add_face(&mut self, vertices: Vec<usize>) -> usize {
        let index = self.faces.len();
        self.faces.push(Face::new(vertices));
        index
    }

    /// Check that every vertex is finite and every face has at least three
    /// corners and valid indices
    pub fn validate(&self) -> Result<()> {
        let finite = |v: &Point3f| v.coords.iter().all(|c| c.is_finite());
        if let Some(bad) = self.vertices.iter().position(|v| !finite(v)) {
            return Err(Error::InvalidData(format!(
                "vertex {} has a non-finite position",
                bad
            )));
        }
        for (i, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(Error::InvalidData(format!(
                    "face {} has {} vertices, need at least 3",
                    i,
                    face.len()
                )));
            }
            if let Some(&bad) = face.vertices.iter().find(|&&v| v >= self.vertices.len()) {
                return Err(Error::InvalidData(format!(
                    "face {} references vertex {} but mesh has {}",
                    i,
                    bad,
                    self.vertices.len()
                )));
            }
            if let Some(normals) = &face.split_normals {
                if normals.len() != face.len() {
                    return Err(Error::InvalidData(format!(
                        "face {} has {} split normals for {} corners",
                        i,
                        normals.len(),
                        face.len()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Area of a face in local space
    pub fn face_area(&self, index: usize) -> f32 {
        polygon_area(self.faces[index].vertices.iter().map(|&v| self.vertices[v]))
    }

    /// Area of a face after mapping it through `transform`.
    ///
    /// Only the linear part of the transform applies.
    pub fn face_area_world(&self, index: usize, transform: &Transform3D) -> f32 {
        let face = &self.faces[index];
        let Some(&first) = face.vertices.first() else {
            return 0.0;
        };
        let origin = self.vertices[first];
        polygon_area(
            face.vertices
                .iter()
                .map(|&v| Point3f::from(transform.transform_vector(&(self.vertices[v] - origin)))),
        )
    }

    /// Whether any face carries custom split normals
    pub fn has_custom_normals(&self) -> bool {
        self.faces.iter().any(|f| f.split_normals.is_some())
    }

    /// Remove selected faces according to `policy`, returning how many were removed
    pub fn remove_selected_faces(&mut self, policy: DeletePolicy) -> usize {
        let before = self.faces.len();
        self.faces.retain(|f| !f.selected);
        let removed = before - self.faces.len();

        if policy == DeletePolicy::FacesAndLooseVertices && removed > 0 {
            self.remove_loose_vertices();
        }
        removed
    }

    /// Drop vertices not referenced by any face and re-index the faces
    pub fn remove_loose_vertices(&mut self) -> usize {
        let mut used = vec![false; self.vertices.len()];
        for face in &self.faces {
            for &v in &face.vertices {
                used[v] = true;
            }
        }

        let mut remap = vec![usize::MAX; self.vertices.len()];
        let mut kept = Vec::with_capacity(self.vertices.len());
        for (old, vertex) in self.vertices.iter().enumerate() {
            if used[old] {
                remap[old] = kept.len();
                kept.push(*vertex);
            }
        }

        let removed = self.vertices.len() - kept.len();
        self.vertices = kept;
        for face in &mut self.faces {
            for v in &mut face.vertices {
                *v = remap[*v];
            }
        }
        removed
    }
}

/// Area of a planar polygon using Newell's normal.
///
/// Corners are taken relative to the first one, so the result does not
/// depend on how far the polygon sits from the origin.
pub fn polygon_area<I>(corners: I) -> f32
where
    I: IntoIterator<Item = Point3f>,
{
    let corners: Vec<Point3f> = corners.into_iter().collect();
    if corners.len() < 3 {
        return 0.0;
    }

    let origin = corners[0];
    let mut normal = Vector3f::zeros();
    for pair in corners[1..].windows(2) {
        normal += (pair[0] - origin).cross(&(pair[1] - origin));
    }
    normal.norm() * 0.5
}
