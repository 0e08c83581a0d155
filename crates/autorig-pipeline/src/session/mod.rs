//! The rig session.
//!
//! A [`RigSession`] owns a host scene and walks a humanoid rig through six
//! ordered stages:
//!
//! 1. [`RigSession::create_landmarks`] places 19 landmark markers
//! 2. [`RigSession::validate`] checks the markers for anatomical sanity
//! 3. [`RigSession::create_armature`] builds the 14-bone skeleton
//! 4. [`RigSession::adjust_bones`] sets bone roll and elbow IK chains
//! 5. [`RigSession::weight_paint`] binds a mesh with automatic weights
//! 6. [`RigSession::test_deformation`] applies a shoulder test pose
//!
//! Each stage requires the previous one. A stage computes its result in full
//! before committing anything, so a failed stage leaves the session and the
//! scene as they were. Completing a stage again invalidates every later stage.

mod armature;
mod binding;
mod deformation;
mod landmarks;
mod orientation;


pub use armature::ARMATURE_CREATED_MESSAGE;
pub use deformation::DEFORMATION_TESTED_MESSAGE;
pub use landmarks::{LANDMARKS_CREATED_MESSAGE, VALIDATED_MESSAGE};
pub use orientation::{limb_roll, orient_skeleton, BONES_ADJUSTED_MESSAGE};

use autorig_scene::{AutoWeighting, NodeKind, SceneAdapter, SceneError};
use autorig_spec::{
    Binding, ConfigError, LandmarkName, LandmarkSet, PipelineStage, PipelineState, RigConfig,
    RigPhase, Skeleton, StageStatus,
};
use tracing::{info, warn};

use crate::error::{RigError, RigResult};

/// Status text returned by [`RigSession::reset`].
pub const RESET_MESSAGE: &str = "Rigging process has been reset.";

/// A single humanoid rig in progress against a host scene.
#[derive(Debug)]
pub struct RigSession<S> {
    scene: S,
    config: RigConfig,
    state: PipelineState,
    skeleton: Option<Skeleton>,
    binding: Option<Binding>,
}

impl<S: SceneAdapter + AutoWeighting> RigSession<S> {
    /// Creates a session over a scene.
    pub fn new(scene: S, config: RigConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scene,
            config,
            state: PipelineState::new(),
            skeleton: None,
            binding: None,
        })
    }

    /// Creates a session with the default configuration.
    pub fn with_defaults(scene: S) -> Self {
        Self {
            scene,
            config: RigConfig::default(),
            state: PipelineState::new(),
            skeleton: None,
            binding: None,
        }
    }

    /// Resets the rig and hands the scene back.
    pub fn close(mut self) -> S {
        self.reset();
        self.scene
    }

    /// Removes every landmark marker and the armature from the scene and
    /// clears all progress. Always succeeds.
    ///
    /// Nodes that share a rig name but are of another kind are left alone.
    pub fn reset(&mut self) -> String {
        let mut removed = 0;
        for name in LandmarkName::ALL {
            let marker = self.marker_name(name);
            if self.remove_rig_node(&marker, NodeKind::Empty) {
                removed += 1;
            }
        }
        let armature = self.config.armature_name.clone();
        if self.remove_rig_node(&armature, NodeKind::Armature) {
            removed += 1;
        }
        self.skeleton = None;
        self.binding = None;
        self.state.reset();
        info!(removed, "rig reset");
        RESET_MESSAGE.to_string()
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// The furthest phase reached.
    pub fn phase(&self) -> RigPhase {
        self.state.phase()
    }

    /// Progress rows for display, in stage order.
    pub fn completion_status(&self) -> Vec<StageStatus> {
        self.state.completion_status()
    }

    /// The current skeleton, once the armature has been built.
    pub fn skeleton(&self) -> Option<&Skeleton> {
        self.skeleton.as_ref()
    }

    /// The current mesh binding, once weight painting has run.
    pub fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable access to the scene, for moving markers or selecting meshes.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Scene node name of a landmark marker.
    pub fn marker_name(&self, landmark: LandmarkName) -> String {
        self.config.marker_name(landmark.as_str())
    }

    /// Reads landmark positions from the marker nodes currently in the scene.
    ///
    /// Landmarks whose marker is missing, or whose name is held by a node
    /// that is not a marker, are absent from the result.
    pub fn read_landmarks(&self) -> LandmarkSet {
        LandmarkName::ALL
            .iter()
            .filter_map(|name| {
                self.scene
                    .find_node(&self.marker_name(*name))
                    .filter(|node| node.kind() == NodeKind::Empty)
                    .map(|node| (*name, node.location))
            })
            .collect()
    }

    /// Fails if `name` is taken by a scene node that is not of `kind`.
    fn ensure_name_available(&self, name: &str, kind: NodeKind) -> RigResult<()> {
        match self.scene.find_node(name) {
            Some(node) if node.kind() != kind => {
                warn!(node = name, actual = %node.kind(), expected = %kind, "rig name taken");
                Err(SceneError::WrongKind {
                    name: name.to_string(),
                    expected: kind.as_str(),
                    actual: node.kind().as_str(),
                }
                .into())
            }
            _ => Ok(()),
        }
    }

    /// Removes `name` only if it is a node of `kind`.
    fn remove_rig_node(&mut self, name: &str, kind: NodeKind) -> bool {
        let owned = self
            .scene
            .find_node(name)
            .is_some_and(|node| node.kind() == kind);
        owned && self.scene.remove_node(name)
    }

    /// Fails with a sequence error unless the stage's prerequisite is complete.
    fn ensure_ready(&self, stage: PipelineStage) -> RigResult<()> {
        match stage.prerequisite() {
            Some(required) if !self.state.is_complete(required) => {
                warn!(stage = %stage, required = %required, "stage rejected: prerequisite pending");
                Err(RigError::sequence(stage, required))
            }
            _ => Ok(()),
        }
    }

    /// Marks a stage complete and drops artifacts of the stages it invalidates.
    fn commit(&mut self, stage: PipelineStage) {
        self.state.complete(stage);
        if stage < PipelineStage::CreateArmature {
            self.skeleton = None;
        }
        if stage < PipelineStage::WeightPaint {
            self.binding = None;
        }
        if stage < PipelineStage::TestDeformation {
            if let Some(skeleton) = self.skeleton.as_mut() {
                skeleton.clear_pose();
            }
        }
        info!(stage = %stage, phase = ?self.state.phase(), "stage complete");
    }
}
