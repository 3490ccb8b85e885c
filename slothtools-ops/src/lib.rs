//! Batch cleanup operators
//!
//! Each operator runs synchronously over a [`Scene`], mutates it in place and
//! returns an [`OperatorReport`] summarising what changed:
//! - Similar-area face pruning ("clean trees")
//! - Clearing custom split normals
//! - Removing material alpha
//! - Setting material roughness
//! - Remapping texture paths to `.png`

pub mod report;
pub mod batch;
pub mod prune;
pub mod normals;
pub mod alpha;
pub mod roughness;
pub mod texture_paths;
pub mod registry;

pub use report::*;
pub use batch::*;
pub use prune::*;
pub use normals::*;
pub use alpha::*;
pub use roughness::*;
pub use texture_paths::*;
pub use registry::*;

use slothtools_core::{Scene, ToolSettings};

/// A user-invokable scene operation
pub trait Operator {
    /// Stable identifier, e.g. `sloths.clean_trees_selected`
    fn id(&self) -> &'static str;

    /// Human readable name
    fn label(&self) -> &'static str;

    /// Panel group the operator is listed under
    fn section(&self) -> &'static str;

    /// Whether the operator can run on the current scene at all
    fn poll(&self, _scene: &Scene) -> bool {
        true
    }

    fn execute(&self, scene: &mut Scene, settings: &ToolSettings) -> OperatorReport;
}
