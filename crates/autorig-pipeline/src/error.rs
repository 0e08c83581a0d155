//! Error types for rig session operations.

use autorig_scene::SceneError;
use autorig_spec::{
    CodedError, HierarchyError, IkChainError, LandmarkViolation, PipelineStage,
};
use thiserror::Error;

/// Status text reported when no mesh can be found for binding.
pub const NO_MESH_MESSAGE: &str =
    "No mesh found for weight painting. Please specify a mesh object.";

/// Result type for rig session operations.
pub type RigResult<T> = Result<T, RigError>;

/// Errors that can occur while running a rig stage.
///
/// No variant leaves the session changed: a failed stage is a no-op.
#[derive(Debug, Error)]
pub enum RigError {
    /// A stage was invoked before its prerequisite completed.
    #[error("{}", .required.pending_hint())]
    Sequence {
        operation: PipelineStage,
        required: PipelineStage,
    },

    /// A landmark sanity check failed.
    #[error(transparent)]
    Validation(#[from] LandmarkViolation),

    /// No mesh node is available to bind.
    #[error("{}", no_mesh_message(.requested.as_deref()))]
    NoMeshFound { requested: Option<String> },

    /// The host scene rejected an operation.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The built skeleton is structurally invalid.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    /// An IK chain could not be attached.
    #[error(transparent)]
    IkChain(#[from] IkChainError),
}

fn no_mesh_message(requested: Option<&str>) -> String {
    match requested {
        Some(name) => format!("Mesh '{}' not found. {}", name, NO_MESH_MESSAGE),
        None => NO_MESH_MESSAGE.to_string(),
    }
}

impl RigError {
    /// Creates a sequence error for a stage whose prerequisite is pending.
    pub fn sequence(operation: PipelineStage, required: PipelineStage) -> Self {
        Self::Sequence {
            operation,
            required,
        }
    }

    /// Returns true if the error only reflects step ordering.
    pub fn is_sequence(&self) -> bool {
        matches!(self, RigError::Sequence { .. })
    }
}

impl CodedError for RigError {
    fn code(&self) -> &'static str {
        match self {
            RigError::Sequence { .. } => "RIG_001",
            RigError::Validation(_) => "RIG_002",
            RigError::NoMeshFound { .. } => "RIG_003",
            RigError::Scene(_) => "RIG_004",
            RigError::Hierarchy(_) => "RIG_005",
            RigError::IkChain(_) => "RIG_006",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            RigError::Sequence { .. } => "sequence",
            RigError::Validation(_) => "validation",
            RigError::NoMeshFound { .. } | RigError::Scene(_) => "scene",
            RigError::Hierarchy(_) | RigError::IkChain(_) => "skeleton",
        }
    }
}
