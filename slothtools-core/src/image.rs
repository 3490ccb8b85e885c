//! Image datablocks referenced by texture nodes

use serde::{Deserialize, Serialize};

/// Index of an image in the scene's image table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub usize);

/// An image file used by one or more texture nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub name: String,
    /// Path as stored in the scene; may be relative or empty for generated images
    #[serde(default)]
    pub filepath: String,
}

impl Image {
    pub fn new(name: impl Into<String>, filepath: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filepath: filepath.into(),
        }
    }
}
