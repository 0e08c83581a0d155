use std::f64::consts::PI;

use autorig_scene::{AutoWeighting, SceneAdapter};
use autorig_spec::{IkChain, IkChainError, PipelineStage, Skeleton, ELBOW_IK_TARGETS, ROLL_BONES};
use tracing::{debug, warn};

use super::RigSession;
use crate::error::{RigError, RigResult};

pub const BONES_ADJUSTED_MESSAGE: &str = "Bone adjustments completed. Ready for weight painting.";

/// Roll for a limb bone: right-side bones keep zero roll, the rest are flipped.
pub fn limb_roll(bone: &str) -> f64 {
    if bone.contains("right") {
        0.0
    } else {
        PI
    }
}

/// Sets limb roll and attaches elbow IK chains targeting `armature`.
///
/// A missing wrist bone does not fail the stage: the chain is attached
/// without a subtarget.
pub fn orient_skeleton(
    skeleton: &mut Skeleton,
    armature: &str,
    chain_length: u8,
) -> Result<(), IkChainError> {
    for bone in ROLL_BONES {
        let roll = limb_roll(bone);
        if skeleton.set_roll(bone, roll) {
            debug!(bone, roll, "set bone roll");
        }
    }

    for (bone, wrist) in ELBOW_IK_TARGETS {
        if !skeleton.contains(bone) {
            continue;
        }
        let mut chain = IkChain::new(bone, armature, chain_length);
        if skeleton.contains(wrist) {
            chain = chain.with_subtarget(wrist);
        } else {
            warn!(bone, subtarget = wrist, "IK chain attached without subtarget");
        }
        skeleton.set_ik_chain(chain)?;
    }
    Ok(())
}

impl<S: SceneAdapter + AutoWeighting> RigSession<S> {
    /// Orients limb bones and attaches elbow IK chains.
    pub fn adjust_bones(&mut self) -> RigResult<String> {
        let stage = PipelineStage::AdjustBones;
        self.ensure_ready(stage)?;

        let mut skeleton = self
            .skeleton
            .clone()
            .ok_or_else(|| RigError::sequence(stage, PipelineStage::CreateArmature))?;
        orient_skeleton(
            &mut skeleton,
            &self.config.armature_name,
            self.config.ik_chain_length,
        )?;

        self.skeleton = Some(skeleton);
        self.commit(stage);
        Ok(BONES_ADJUSTED_MESSAGE.to_string())
    }
}
