//! Core data structures and traits for slothtools
//!
//! This crate provides the scene model the cleanup operators work on:
//! polygon meshes, material node graphs, image datablocks, scene objects
//! with their selection state, the shared tool settings, and the narrow
//! editing traits every operator is written against.

pub mod point;
pub mod transform;
pub mod mesh;
pub mod material;
pub mod image;
pub mod scene;
pub mod settings;
pub mod traits;
pub mod error;

pub use point::*;
pub use transform::*;
pub use mesh::*;
pub use material::*;
pub use image::*;
pub use scene::*;
pub use settings::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3};
