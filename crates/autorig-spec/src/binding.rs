//! Mesh-to-skeleton binding data.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One bone's influence on a vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexInfluence {
    pub bone: String,
    pub weight: f64,
}

impl VertexInfluence {
    pub fn new(bone: impl Into<String>, weight: f64) -> Self {
        Self {
            bone: bone.into(),
            weight,
        }
    }
}

/// Per-vertex bone weights, indexed by vertex.
///
/// Produced by the host's automatic weighting algorithm; the pipeline only
/// inspects it for reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightMap {
    vertices: Vec<Vec<VertexInfluence>>,
}

impl WeightMap {
    /// Creates a weight map from per-vertex influence lists.
    pub fn new(vertices: Vec<Vec<VertexInfluence>>) -> Self {
        Self { vertices }
    }

    /// Number of weighted vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Influences on a single vertex.
    pub fn vertex(&self, index: usize) -> Option<&[VertexInfluence]> {
        self.vertices.get(index).map(Vec::as_slice)
    }

    /// Bones that influence at least one vertex.
    pub fn influencing_bones(&self) -> BTreeSet<&str> {
        self.vertices
            .iter()
            .flatten()
            .filter(|inf| inf.weight > 0.0)
            .map(|inf| inf.bone.as_str())
            .collect()
    }

    /// Largest number of influences on any vertex.
    pub fn max_influences(&self) -> usize {
        self.vertices.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns true if every vertex's weights sum to 1 within `epsilon`.
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        self.vertices.iter().all(|influences| {
            let total: f64 = influences.iter().map(|inf| inf.weight).sum();
            (total - 1.0).abs() <= epsilon
        })
    }
}

/// A mesh bound to the skeleton's armature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    /// Mesh node name.
    pub mesh: String,
    /// Armature node name the mesh is parented to.
    pub armature: String,
    /// Vertex weights over bone names.
    pub weights: WeightMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WeightMap {
        WeightMap::new(vec![
            vec![
                VertexInfluence::new("spine_mid", 0.75),
                VertexInfluence::new("spine_bottom", 0.25),
            ],
            vec![VertexInfluence::new("head", 1.0)],
        ])
    }

    #[test]
    fn test_weight_map_queries() {
        let map = sample();
        assert_eq!(map.vertex_count(), 2);
        assert_eq!(map.max_influences(), 2);
        assert_eq!(map.vertex(1).unwrap()[0].bone, "head");
        assert!(map.vertex(2).is_none());

        let bones: Vec<_> = map.influencing_bones().into_iter().collect();
        assert_eq!(bones, vec!["head", "spine_bottom", "spine_mid"]);
    }

    #[test]
    fn test_weight_map_normalization() {
        assert!(sample().is_normalized(1e-9));
        let skewed = WeightMap::new(vec![vec![VertexInfluence::new("head", 0.5)]]);
        assert!(!skewed.is_normalized(1e-9));
        assert!(WeightMap::default().is_normalized(1e-9));
    }
}
