//! In-memory reference host.

use autorig_spec::{Skeleton, Vec3, WeightMap};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapter::{AutoWeighting, SceneAdapter};
use crate::error::{SceneError, SceneResult};
use crate::node::{NodeData, NodeKind, SceneNode};
use crate::weighting::envelope_weights;

/// A scene held entirely in memory.
///
/// Nodes keep insertion order, which is the order type queries return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryScene {
    nodes: Vec<SceneNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    selection: Vec<String>,
}

impl MemoryScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a scene from JSON.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds a node, builder style. Panics on a duplicate name.
    #[cfg(test)]
    pub(crate) fn with_node(mut self, node: SceneNode) -> Self {
        self.create_node(node).unwrap();
        self
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in scene order.
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Adds a node to the selection. Fails if the node does not exist.
    pub fn select(&mut self, name: &str) -> SceneResult<()> {
        if self.find_node(name).is_none() {
            return Err(SceneError::not_found(name));
        }
        if !self.selection.iter().any(|s| s == name) {
            self.selection.push(name.to_string());
        }
        Ok(())
    }

    /// Clears the selection.
    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    fn node_mut(&mut self, name: &str) -> SceneResult<&mut SceneNode> {
        self.nodes
            .iter_mut()
            .find(|n| n.name == name)
            .ok_or_else(|| SceneError::not_found(name))
    }

    fn is_ancestor(&self, candidate: &str, of: &str) -> bool {
        let mut current = self.find_node(of).and_then(|n| n.parent.as_deref());
        let mut steps = 0;
        while let Some(name) = current {
            if name == candidate {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                return false;
            }
            current = self.find_node(name).and_then(|n| n.parent.as_deref());
        }
        false
    }
}

impl SceneAdapter for MemoryScene {
    fn create_node(&mut self, node: SceneNode) -> SceneResult<()> {
        if self.find_node(&node.name).is_some() {
            return Err(SceneError::DuplicateNode { name: node.name });
        }
        debug!(node = %node.name, kind = %node.kind(), "created scene node");
        self.nodes.push(node);
        Ok(())
    }

    fn remove_node(&mut self, name: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.name != name);
        if self.nodes.len() == before {
            return false;
        }
        for node in &mut self.nodes {
            if node.parent.as_deref() == Some(name) {
                node.parent = None;
            }
        }
        self.selection.retain(|s| s != name);
        debug!(node = %name, "removed scene node");
        true
    }

    fn find_node(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    fn find_nodes_by_kind(&self, kind: NodeKind) -> Vec<&SceneNode> {
        self.nodes.iter().filter(|n| n.kind() == kind).collect()
    }

    fn selected_nodes(&self) -> Vec<&str> {
        self.selection.iter().map(String::as_str).collect()
    }

    fn set_location(&mut self, name: &str, location: Vec3) -> SceneResult<()> {
        self.node_mut(name)?.location = location;
        Ok(())
    }

    fn set_parent(&mut self, child: &str, parent: Option<&str>) -> SceneResult<()> {
        if let Some(parent) = parent {
            if self.find_node(parent).is_none() {
                return Err(SceneError::not_found(parent));
            }
            if parent == child || self.is_ancestor(child, parent) {
                return Err(SceneError::ParentCycle {
                    child: child.to_string(),
                    parent: parent.to_string(),
                });
            }
        }
        self.node_mut(child)?.parent = parent.map(str::to_string);
        Ok(())
    }
}

impl AutoWeighting for MemoryScene {
    fn compute_weights(
        &mut self,
        mesh: &str,
        skeleton: &Skeleton,
        max_influences: u8,
    ) -> SceneResult<WeightMap> {
        let node = self.find_node(mesh).ok_or_else(|| SceneError::not_found(mesh))?;
        match &node.data {
            NodeData::Mesh { vertices } if vertices.is_empty() => {
                Err(SceneError::weighting_failed(mesh, "mesh has no vertices"))
            }
            NodeData::Mesh { .. } => {
                if skeleton.bone_count() == 0 {
                    return Err(SceneError::weighting_failed(mesh, "skeleton has no bones"));
                }
                Ok(envelope_weights(
                    &node.world_vertices(),
                    skeleton,
                    max_influences,
                ))
            }
            other => Err(SceneError::WrongKind {
                name: mesh.to_string(),
                expected: NodeKind::Mesh.as_str(),
                actual: other.kind().as_str(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use autorig_spec::LandmarkSet;

    fn body() -> SceneNode {
        SceneNode::mesh("Body", vec![[0.0, 0.0, 1.0], [-0.6, 0.0, 1.1]])
    }

    #[test]
    fn test_create_rejects_duplicates() {
        let mut scene = MemoryScene::new();
        scene.create_node(SceneNode::armature("Rig")).unwrap();
        let err = scene.create_node(SceneNode::armature("Rig")).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateNode { .. }));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_find_by_kind_keeps_scene_order() {
        let scene = MemoryScene::new()
            .with_node(SceneNode::mesh("B", vec![]))
            .with_node(SceneNode::armature("Rig"))
            .with_node(SceneNode::mesh("A", vec![]));
        let names: Vec<_> = scene
            .find_nodes_by_kind(NodeKind::Mesh)
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_remove_unparents_children_and_deselects() {
        let mut scene = MemoryScene::new()
            .with_node(SceneNode::armature("Rig"))
            .with_node(body());
        scene.set_parent("Body", Some("Rig")).unwrap();
        scene.select("Rig").unwrap();

        assert!(scene.remove_node("Rig"));
        assert!(!scene.remove_node("Rig"));
        assert_eq!(scene.find_node("Body").unwrap().parent, None);
        assert!(scene.selected_nodes().is_empty());
    }

    #[test]
    fn test_set_parent_rejects_cycles_and_unknown_nodes() {
        let mut scene = MemoryScene::new()
            .with_node(SceneNode::armature("Rig"))
            .with_node(body());
        scene.set_parent("Body", Some("Rig")).unwrap();

        let err = scene.set_parent("Rig", Some("Body")).unwrap_err();
        assert!(matches!(err, SceneError::ParentCycle { .. }));

        let err = scene.set_parent("Body", Some("Missing")).unwrap_err();
        assert!(matches!(err, SceneError::NodeNotFound { .. }));

        scene.set_parent("Body", None).unwrap();
        assert_eq!(scene.find_node("Body").unwrap().parent, None);
    }

    #[test]
    fn test_set_location() {
        let mut scene = MemoryScene::new().with_node(SceneNode::empty("ref_head", [0.0; 3], 0.05));
        scene.set_location("ref_head", [0.0, 0.0, 1.9]).unwrap();
        assert_eq!(scene.find_node("ref_head").unwrap().location, [0.0, 0.0, 1.9]);
        assert!(scene.set_location("ref_neck", [0.0; 3]).is_err());
    }

    #[test]
    fn test_selection_order_and_validation() {
        let mut scene = MemoryScene::new()
            .with_node(body())
            .with_node(SceneNode::mesh("Hat", vec![[0.0, 0.0, 1.8]]));
        scene.select("Hat").unwrap();
        scene.select("Body").unwrap();
        scene.select("Hat").unwrap();
        assert_eq!(scene.selected_nodes(), vec!["Hat", "Body"]);
        assert!(scene.select("Nope").is_err());
        scene.deselect_all();
        assert!(scene.selected_nodes().is_empty());
    }

    #[test]
    fn test_compute_weights() {
        let skeleton = Skeleton::from_landmarks(&LandmarkSet::defaults()).unwrap();
        let mut scene = MemoryScene::new()
            .with_node(body())
            .with_node(SceneNode::mesh("Empty", vec![]))
            .with_node(SceneNode::armature("Rig"));

        let weights = scene.compute_weights("Body", &skeleton, 4).unwrap();
        assert_eq!(weights.vertex_count(), 2);
        assert!(weights.is_normalized(1e-9));

        let err = scene.compute_weights("Empty", &skeleton, 4).unwrap_err();
        assert!(matches!(err, SceneError::WeightingFailed { .. }));

        let err = scene.compute_weights("Rig", &skeleton, 4).unwrap_err();
        assert!(matches!(err, SceneError::WrongKind { .. }));

        let err = scene.compute_weights("Body", &Skeleton::new(), 4).unwrap_err();
        assert!(matches!(err, SceneError::WeightingFailed { .. }));
    }

    #[test]
    fn test_scene_from_json() {
        let json = r#"{
            "nodes": [
                {"name": "Body", "kind": "mesh", "vertices": [[0.0, 0.0, 1.0]]},
                {"name": "Rig", "kind": "armature"}
            ]
        }"#;
        let scene = MemoryScene::from_json(json).unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.find_node("Rig").unwrap().kind(), NodeKind::Armature);
    }
}
