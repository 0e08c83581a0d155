use autorig_scene::{AutoWeighting, NodeKind, SceneAdapter, SceneNode};
use autorig_spec::{PipelineStage, Skeleton};
use tracing::debug;

use super::RigSession;
use crate::error::RigResult;

pub const ARMATURE_CREATED_MESSAGE: &str =
    "Armature created. Review bone placement and proceed to adjustment.";

impl<S: SceneAdapter + AutoWeighting> RigSession<S> {
    /// Builds the skeleton from the current marker positions and replaces the
    /// armature node in the scene.
    ///
    /// Fails without touching the scene if a node of another kind holds the
    /// armature name.
    pub fn create_armature(&mut self) -> RigResult<String> {
        let stage = PipelineStage::CreateArmature;
        self.ensure_ready(stage)?;

        let armature = self.config.armature_name.clone();
        self.ensure_name_available(&armature, NodeKind::Armature)?;

        let landmarks = self.read_landmarks();
        let skeleton = Skeleton::from_landmarks(&landmarks)?;
        skeleton.check_hierarchy()?;
        for bone in skeleton.bones() {
            debug!(
                bone = %bone.name,
                parent = bone.parent.as_deref().unwrap_or("-"),
                length = bone.length(),
                "placed bone"
            );
        }

        self.remove_rig_node(&armature, NodeKind::Armature);
        self.scene.create_node(SceneNode::armature(armature))?;

        self.skeleton = Some(skeleton);
        self.commit(stage);
        Ok(ARMATURE_CREATED_MESSAGE.to_string())
    }
}
