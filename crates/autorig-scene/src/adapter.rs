//! Host collaborator traits.
//!
//! The rig pipeline never touches host objects directly. Everything it
//! creates, removes, or looks up goes through [`SceneAdapter`], and binding
//! goes through [`AutoWeighting`], so the pipeline can run against
//! [`crate::MemoryScene`] in tests and against a real host in production.

use autorig_spec::{Skeleton, Vec3, WeightMap};

use crate::error::SceneResult;
use crate::node::{NodeKind, SceneNode};

/// Named-object store of the host scene.
pub trait SceneAdapter {
    /// Adds a node. Fails if the name is taken.
    fn create_node(&mut self, node: SceneNode) -> SceneResult<()>;

    /// Removes a node by name. Returns false if it did not exist.
    ///
    /// Children of the removed node are left unparented.
    fn remove_node(&mut self, name: &str) -> bool;

    /// Looks up a node by name.
    fn find_node(&self, name: &str) -> Option<&SceneNode>;

    /// All nodes of a kind, in scene order.
    fn find_nodes_by_kind(&self, kind: NodeKind) -> Vec<&SceneNode>;

    /// Names of currently selected nodes, in selection order.
    fn selected_nodes(&self) -> Vec<&str>;

    /// Moves a node.
    fn set_location(&mut self, name: &str, location: Vec3) -> SceneResult<()>;

    /// Parents `child` to `parent`, or clears its parent when `parent` is `None`.
    fn set_parent(&mut self, child: &str, parent: Option<&str>) -> SceneResult<()>;
}

/// Host automatic-weighting algorithm.
pub trait AutoWeighting {
    /// Computes per-vertex bone weights binding a mesh node to a skeleton.
    ///
    /// `max_influences` caps the number of bones weighted per vertex.
    fn compute_weights(
        &mut self,
        mesh: &str,
        skeleton: &Skeleton,
        max_influences: u8,
    ) -> SceneResult<WeightMap>;
}
