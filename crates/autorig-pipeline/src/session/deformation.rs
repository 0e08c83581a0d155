use autorig_scene::{AutoWeighting, SceneAdapter};
use autorig_spec::PipelineStage;
use tracing::debug;

use super::RigSession;
use crate::error::{RigError, RigResult};

pub const DEFORMATION_TESTED_MESSAGE: &str =
    "Test pose applied. Review deformation quality and make any necessary adjustments.";

impl<S: SceneAdapter + AutoWeighting> RigSession<S> {
    /// Poses the shoulders in opposite directions about the vertical axis.
    pub fn test_deformation(&mut self) -> RigResult<String> {
        let stage = PipelineStage::TestDeformation;
        self.ensure_ready(stage)?;

        let mut skeleton = self
            .skeleton
            .clone()
            .ok_or_else(|| RigError::sequence(stage, PipelineStage::CreateArmature))?;
        let angle = self.config.test_pose_angle;
        skeleton.clear_pose();
        for (bone, z) in [("left_shoulder", angle), ("right_shoulder", -angle)] {
            if skeleton.set_pose_rotation(bone, [0.0, 0.0, z]) {
                debug!(bone, z, "posed bone");
            }
        }

        self.skeleton = Some(skeleton);
        self.commit(stage);
        Ok(DEFORMATION_TESTED_MESSAGE.to_string())
    }
}
