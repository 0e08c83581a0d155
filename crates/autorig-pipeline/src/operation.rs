//! Operation dispatch for UI drivers.
//!
//! A UI driver names operations by their snake_case identifier, invokes them
//! through [`RigSession::invoke`], and shows the resulting [`StepReport`].

use std::fmt;
use std::str::FromStr;

use autorig_scene::{AutoWeighting, SceneAdapter};
use autorig_spec::{CodedError, PipelineStage};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RigResult;
use crate::session::RigSession;

/// A user-invocable rig operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateLandmarks,
    Validate,
    CreateArmature,
    AdjustBones,
    WeightPaint,
    TestDeformation,
    Reset,
}

impl Operation {
    /// All operations, pipeline stages first in order, then reset.
    pub const ALL: [Operation; 7] = [
        Operation::CreateLandmarks,
        Operation::Validate,
        Operation::CreateArmature,
        Operation::AdjustBones,
        Operation::WeightPaint,
        Operation::TestDeformation,
        Operation::Reset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateLandmarks => "create_landmarks",
            Operation::Validate => "validate",
            Operation::CreateArmature => "create_armature",
            Operation::AdjustBones => "adjust_bones",
            Operation::WeightPaint => "weight_paint",
            Operation::TestDeformation => "test_deformation",
            Operation::Reset => "reset",
        }
    }

    /// The stage that marks this operation complete; `None` for reset.
    pub fn completes(&self) -> Option<PipelineStage> {
        match self {
            Operation::CreateLandmarks => Some(PipelineStage::CreateReferencePoints),
            Operation::Validate => Some(PipelineStage::ValidateReferencePoints),
            Operation::CreateArmature => Some(PipelineStage::CreateArmature),
            Operation::AdjustBones => Some(PipelineStage::AdjustBones),
            Operation::WeightPaint => Some(PipelineStage::WeightPaint),
            Operation::TestDeformation => Some(PipelineStage::TestDeformation),
            Operation::Reset => None,
        }
    }

    /// The stage that must be complete before this operation may run.
    pub fn required_stage(&self) -> Option<PipelineStage> {
        self.completes().and_then(|stage| stage.prerequisite())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown operation name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = Operation::ALL.iter().map(Operation::as_str).collect();
        write!(
            f,
            "unknown operation '{}' (expected one of: {})",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for UnknownOperation {}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Outcome of one invoked operation, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub operation: Operation,
    pub success: bool,
    /// Status text on success, guidance or failure reason otherwise.
    pub message: String,
    /// Error code on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl StepReport {
    /// Builds a report from a stage outcome.
    pub fn from_result(operation: Operation, result: RigResult<String>) -> Self {
        match result {
            Ok(message) => Self {
                operation,
                success: true,
                message,
                code: None,
            },
            Err(err) => Self {
                operation,
                success: false,
                message: err.message(),
                code: Some(err.code()),
            },
        }
    }

    /// Serializes the report to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<S: SceneAdapter + AutoWeighting> RigSession<S> {
    /// Runs an operation and reports the outcome.
    ///
    /// `mesh` is only consulted by [`Operation::WeightPaint`].
    pub fn invoke(&mut self, operation: Operation, mesh: Option<&str>) -> StepReport {
        let result = match operation {
            Operation::CreateLandmarks => self.create_landmarks(),
            Operation::Validate => self.validate(),
            Operation::CreateArmature => self.create_armature(),
            Operation::AdjustBones => self.adjust_bones(),
            Operation::WeightPaint => self.weight_paint(mesh),
            Operation::TestDeformation => self.test_deformation(),
            Operation::Reset => Ok(self.reset()),
        };
        let report = StepReport::from_result(operation, result);
        if !report.success {
            warn!(operation = %operation, code = ?report.code, "{}", report.message);
        }
        report
    }
}
