use autorig_scene::{AutoWeighting, NodeKind, SceneAdapter, SceneNode};
use autorig_spec::{validate_landmarks, LandmarkName, PipelineStage, Vec3};
use tracing::{debug, warn};

use super::RigSession;
use crate::error::RigResult;

pub const LANDMARKS_CREATED_MESSAGE: &str =
    "Reference points created. Adjust them to match your character's anatomy.";

pub const VALIDATED_MESSAGE: &str = "Reference points validated successfully.";

impl<S: SceneAdapter + AutoWeighting> RigSession<S> {
    /// Replaces any existing landmark markers with all 19 at default positions.
    pub fn create_landmarks(&mut self) -> RigResult<String> {
        let stage = PipelineStage::CreateReferencePoints;
        self.ensure_ready(stage)?;

        for name in LandmarkName::ALL {
            self.ensure_name_available(&self.marker_name(name), NodeKind::Empty)?;
        }
        for name in LandmarkName::ALL {
            let marker = self.marker_name(name);
            if self.remove_rig_node(&marker, NodeKind::Empty) {
                debug!(marker = %marker, "removed stale marker");
            }
        }
        for name in LandmarkName::ALL {
            let marker = SceneNode::empty(
                self.marker_name(name),
                name.default_position(),
                self.config.marker_radius,
            );
            self.scene.create_node(marker)?;
        }

        self.commit(stage);
        Ok(LANDMARKS_CREATED_MESSAGE.to_string())
    }

    /// Moves a landmark marker, as a user dragging it in the host would.
    pub fn move_landmark(&mut self, landmark: LandmarkName, position: Vec3) -> RigResult<()> {
        let marker = self.marker_name(landmark);
        self.scene.set_location(&marker, position)?;
        debug!(marker = %marker, ?position, "moved marker");
        Ok(())
    }

    /// Checks the markers in the scene, stopping at the first failed rule.
    pub fn validate(&mut self) -> RigResult<String> {
        let stage = PipelineStage::ValidateReferencePoints;
        self.ensure_ready(stage)?;

        let landmarks = self.read_landmarks();
        if let Err(violation) = validate_landmarks(&landmarks, self.config.symmetry_tolerance) {
            warn!(rule = violation.rule(), "landmark validation failed");
            return Err(violation.into());
        }

        self.commit(stage);
        Ok(VALIDATED_MESSAGE.to_string())
    }
}
