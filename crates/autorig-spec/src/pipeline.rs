//! Pipeline stages and completion state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A completable stage of the rig pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    CreateReferencePoints,
    ValidateReferencePoints,
    CreateArmature,
    AdjustBones,
    WeightPaint,
    TestDeformation,
}

impl PipelineStage {
    /// All stages in execution order.
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::CreateReferencePoints,
        PipelineStage::ValidateReferencePoints,
        PipelineStage::CreateArmature,
        PipelineStage::AdjustBones,
        PipelineStage::WeightPaint,
        PipelineStage::TestDeformation,
    ];

    /// Position of the stage in execution order.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The stage that must be complete before this one may run.
    pub fn prerequisite(&self) -> Option<PipelineStage> {
        match self.index() {
            0 => None,
            i => Some(PipelineStage::ALL[i - 1]),
        }
    }

    /// Returns the snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::CreateReferencePoints => "create_reference_points",
            PipelineStage::ValidateReferencePoints => "validate_reference_points",
            PipelineStage::CreateArmature => "create_armature",
            PipelineStage::AdjustBones => "adjust_bones",
            PipelineStage::WeightPaint => "weight_paint",
            PipelineStage::TestDeformation => "test_deformation",
        }
    }

    /// Progress label shown by UI drivers.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::CreateReferencePoints => "Create Reference Points",
            PipelineStage::ValidateReferencePoints => "Validate Reference Points",
            PipelineStage::CreateArmature => "Create Armature",
            PipelineStage::AdjustBones => "Adjust Bones",
            PipelineStage::WeightPaint => "Weight Paint",
            PipelineStage::TestDeformation => "Test Deformation",
        }
    }

    /// Guidance shown when a later stage is attempted before this one.
    pub fn pending_hint(&self) -> &'static str {
        match self {
            PipelineStage::CreateReferencePoints => "Please create reference points first.",
            PipelineStage::ValidateReferencePoints => "Please validate reference points first.",
            PipelineStage::CreateArmature => "Please create the armature first.",
            PipelineStage::AdjustBones => "Please adjust bones first.",
            PipelineStage::WeightPaint => "Please complete weight painting first.",
            PipelineStage::TestDeformation => "Please test deformation first.",
        }
    }

    /// The phase reached once this stage completes.
    pub fn phase(&self) -> RigPhase {
        match self {
            PipelineStage::CreateReferencePoints => RigPhase::LandmarksCreated,
            PipelineStage::ValidateReferencePoints => RigPhase::Validated,
            PipelineStage::CreateArmature => RigPhase::ArmatureBuilt,
            PipelineStage::AdjustBones => RigPhase::BonesAdjusted,
            PipelineStage::WeightPaint => RigPhase::WeightPainted,
            PipelineStage::TestDeformation => RigPhase::DeformationTested,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The furthest point the pipeline has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RigPhase {
    Empty,
    LandmarksCreated,
    Validated,
    ArmatureBuilt,
    BonesAdjusted,
    WeightPainted,
    DeformationTested,
}

/// One row of the progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageStatus {
    pub stage: PipelineStage,
    pub label: &'static str,
    pub completed: bool,
}

/// Six ordered completion flags.
///
/// Flags only ever form a contiguous completed prefix: completing a stage
/// requires its prerequisite and clears every later stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    completed: [bool; 6],
}

impl PipelineState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the stage is complete.
    pub fn is_complete(&self, stage: PipelineStage) -> bool {
        self.completed[stage.index()]
    }

    /// Returns true if the stage's prerequisite is satisfied.
    pub fn can_run(&self, stage: PipelineStage) -> bool {
        stage
            .prerequisite()
            .map_or(true, |required| self.is_complete(required))
    }

    /// Marks a stage complete and invalidates every later stage.
    ///
    /// Returns false, leaving the state untouched, if the prerequisite is not met.
    pub fn complete(&mut self, stage: PipelineStage) -> bool {
        if !self.can_run(stage) {
            return false;
        }
        self.completed[stage.index()] = true;
        for later in &mut self.completed[stage.index() + 1..] {
            *later = false;
        }
        true
    }

    /// Clears every flag.
    pub fn reset(&mut self) {
        self.completed = [false; 6];
    }

    /// The furthest phase reached.
    pub fn phase(&self) -> RigPhase {
        PipelineStage::ALL
            .iter()
            .rev()
            .find(|stage| self.is_complete(**stage))
            .map_or(RigPhase::Empty, PipelineStage::phase)
    }

    /// The next stage to run, or `None` if all are complete.
    pub fn next_stage(&self) -> Option<PipelineStage> {
        PipelineStage::ALL
            .iter()
            .copied()
            .find(|stage| !self.is_complete(*stage))
    }

    /// Returns true if every stage is complete.
    pub fn is_finished(&self) -> bool {
        self.completed.iter().all(|done| *done)
    }

    /// Progress rows in declared order.
    pub fn completion_status(&self) -> Vec<StageStatus> {
        PipelineStage::ALL
            .iter()
            .map(|stage| StageStatus {
                stage: *stage,
                label: stage.label(),
                completed: self.is_complete(*stage),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prerequisites_are_linear() {
        assert_eq!(PipelineStage::CreateReferencePoints.prerequisite(), None);
        for pair in PipelineStage::ALL.windows(2) {
            assert_eq!(pair[1].prerequisite(), Some(pair[0]));
        }
    }

    #[test]
    fn test_complete_requires_prerequisite() {
        let mut state = PipelineState::new();
        assert!(!state.complete(PipelineStage::CreateArmature));
        assert_eq!(state, PipelineState::new());

        assert!(state.complete(PipelineStage::CreateReferencePoints));
        assert!(state.complete(PipelineStage::ValidateReferencePoints));
        assert_eq!(state.phase(), RigPhase::Validated);
        assert_eq!(state.next_stage(), Some(PipelineStage::CreateArmature));
    }

    #[test]
    fn test_completing_earlier_stage_clears_later_flags() {
        let mut state = PipelineState::new();
        for stage in PipelineStage::ALL {
            assert!(state.complete(stage));
        }
        assert!(state.is_finished());
        assert_eq!(state.phase(), RigPhase::DeformationTested);

        assert!(state.complete(PipelineStage::CreateReferencePoints));
        assert_eq!(state.phase(), RigPhase::LandmarksCreated);
        assert!(!state.is_complete(PipelineStage::ValidateReferencePoints));
        assert!(!state.is_complete(PipelineStage::TestDeformation));
    }

    #[test]
    fn test_reset_returns_to_empty() {
        let mut state = PipelineState::new();
        state.complete(PipelineStage::CreateReferencePoints);
        state.reset();
        assert_eq!(state.phase(), RigPhase::Empty);
        assert_eq!(state.next_stage(), Some(PipelineStage::CreateReferencePoints));
    }

    #[test]
    fn test_completion_status_order_and_labels() {
        let mut state = PipelineState::new();
        state.complete(PipelineStage::CreateReferencePoints);
        let status = state.completion_status();
        let labels: Vec<_> = status.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![
                "Create Reference Points",
                "Validate Reference Points",
                "Create Armature",
                "Adjust Bones",
                "Weight Paint",
                "Test Deformation",
            ]
        );
        assert!(status[0].completed);
        assert!(status[1..].iter().all(|s| !s.completed));
    }

    #[test]
    fn test_stage_serde() {
        let json = serde_json::to_string(&PipelineStage::WeightPaint).unwrap();
        assert_eq!(json, "\"weight_paint\"");
        let phase: RigPhase = serde_json::from_str("\"bones_adjusted\"").unwrap();
        assert_eq!(phase, RigPhase::BonesAdjusted);
    }
}
