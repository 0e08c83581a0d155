//! Scene node types.

use std::fmt;

use autorig_spec::Vec3;
use serde::{Deserialize, Serialize};

/// Kind of scene node, used for type queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Non-rendering helper (landmark markers).
    Empty,
    /// Skeleton object.
    Armature,
    /// Deformable mesh.
    Mesh,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Empty => "empty",
            NodeKind::Armature => "armature",
            NodeKind::Mesh => "mesh",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific node payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeData {
    /// Sphere-shaped helper.
    Empty { radius: f64 },
    /// Skeleton object; bone data is owned by the rig session.
    Armature,
    /// Mesh with vertex positions in object space.
    Mesh { vertices: Vec<Vec3> },
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Empty { .. } => NodeKind::Empty,
            NodeData::Armature => NodeKind::Armature,
            NodeData::Mesh { .. } => NodeKind::Mesh,
        }
    }
}

/// A named object in the host scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Unique node name.
    pub name: String,
    /// World location.
    #[serde(default)]
    pub location: Vec3,
    /// Parent node name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Kind-specific data.
    #[serde(flatten)]
    pub data: NodeData,
}

impl SceneNode {
    /// Creates a sphere empty at a location.
    pub fn empty(name: impl Into<String>, location: Vec3, radius: f64) -> Self {
        Self {
            name: name.into(),
            location,
            parent: None,
            data: NodeData::Empty { radius },
        }
    }

    /// Creates an armature node at the origin.
    pub fn armature(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: [0.0; 3],
            parent: None,
            data: NodeData::Armature,
        }
    }

    /// Creates a mesh node at the origin.
    pub fn mesh(name: impl Into<String>, vertices: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            location: [0.0; 3],
            parent: None,
            data: NodeData::Mesh { vertices },
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// Mesh vertices translated to world space; empty for non-mesh nodes.
    pub fn world_vertices(&self) -> Vec<Vec3> {
        match &self.data {
            NodeData::Mesh { vertices } => vertices
                .iter()
                .map(|v| {
                    [
                        v[0] + self.location[0],
                        v[1] + self.location[1],
                        v[2] + self.location[2],
                    ]
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_node_json() {
        let json = r#"{
            "name": "Body",
            "kind": "mesh",
            "location": [0.0, 0.0, 1.0],
            "vertices": [[0.0, 0.0, 0.0], [0.1, 0.0, 0.2]]
        }"#;
        let node: SceneNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind(), NodeKind::Mesh);
        assert_eq!(node.world_vertices(), vec![[0.0, 0.0, 1.0], [0.1, 0.0, 1.2]]);
    }

    #[test]
    fn test_empty_has_no_vertices() {
        let node = SceneNode::empty("ref_head", [0.0, 0.0, 1.7], 0.05);
        assert_eq!(node.kind(), NodeKind::Empty);
        assert!(node.world_vertices().is_empty());
    }
}
