//! Loaders for the JSON inputs accepted by the CLI.
//!
//! - Rig configuration: a [`RigConfig`] object, every field optional
//! - Landmark overrides: `{"head": [0.0, 0.0, 1.8], ...}`
//! - Mesh files: `{"name": "Body", "vertices": [[x, y, z], ...]}`

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use autorig_scene::SceneNode;
use autorig_spec::{LandmarkName, RigConfig, Vec3};
use serde::{Deserialize, Serialize};

/// A mesh as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshFile {
    pub name: String,
    #[serde(default)]
    pub location: Vec3,
    pub vertices: Vec<Vec3>,
}

impl MeshFile {
    /// Converts to a mesh scene node.
    pub fn into_node(self) -> SceneNode {
        let mut node = SceneNode::mesh(self.name, self.vertices);
        node.location = self.location;
        node
    }
}

fn read(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file: {}", what, path.display()))
}

/// Loads and validates a rig configuration.
pub fn load_config(path: &Path) -> Result<RigConfig> {
    let content = read(path, "config")?;
    let config = RigConfig::from_json(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}

/// Loads the config at `path`, or the defaults when no path is given.
pub fn load_config_or_default(path: Option<&Path>) -> Result<RigConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(RigConfig::default()),
    }
}

/// Loads a landmark override map.
pub fn load_landmark_overrides(path: &Path) -> Result<BTreeMap<LandmarkName, Vec3>> {
    let content = read(path, "landmark")?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse landmark file: {}", path.display()))
}

/// Loads a mesh file.
pub fn load_mesh(path: &Path) -> Result<MeshFile> {
    let content = read(path, "mesh")?;
    let mesh: MeshFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse mesh file: {}", path.display()))?;
    if mesh.name.is_empty() {
        anyhow::bail!("Mesh file {} has an empty name", path.display());
    }
    Ok(mesh)
}
