//! Error types for host scene operations.

use autorig_spec::CodedError;
use thiserror::Error;

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors reported by a host scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A node with this name already exists.
    #[error("Scene already contains a node named '{name}'")]
    DuplicateNode { name: String },

    /// No node with this name exists.
    #[error("Scene node '{name}' not found")]
    NodeNotFound { name: String },

    /// A node exists but has the wrong kind for the operation.
    #[error("Scene node '{name}' is a {actual}, expected a {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Parenting would make a node its own ancestor.
    #[error("Cannot parent '{child}' to '{parent}': would create a cycle")]
    ParentCycle { child: String, parent: String },

    /// Automatic weighting could not produce weights.
    #[error("Automatic weighting failed for '{mesh}': {reason}")]
    WeightingFailed { mesh: String, reason: String },

    /// Failed to parse scene data from JSON.
    #[error("Failed to parse scene data: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SceneError {
    /// Creates a node-not-found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NodeNotFound { name: name.into() }
    }

    /// Creates a weighting failure.
    pub fn weighting_failed(mesh: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::WeightingFailed {
            mesh: mesh.into(),
            reason: reason.into(),
        }
    }
}

impl CodedError for SceneError {
    fn code(&self) -> &'static str {
        match self {
            SceneError::DuplicateNode { .. } => "SCENE_001",
            SceneError::NodeNotFound { .. } => "SCENE_002",
            SceneError::WrongKind { .. } => "SCENE_003",
            SceneError::ParentCycle { .. } => "SCENE_004",
            SceneError::WeightingFailed { .. } => "SCENE_005",
            SceneError::Parse(_) => "SCENE_006",
        }
    }

    fn category(&self) -> &'static str {
        "scene"
    }
}
