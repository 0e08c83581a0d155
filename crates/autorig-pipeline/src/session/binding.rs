use autorig_scene::{AutoWeighting, NodeKind, SceneAdapter};
use autorig_spec::{Binding, PipelineStage};
use tracing::{info, warn};

use super::RigSession;
use crate::error::{RigError, RigResult};

impl<S: SceneAdapter + AutoWeighting> RigSession<S> {
    /// Binds a mesh to the armature with automatic weights.
    ///
    /// Without an explicit `mesh`, the first selected mesh is used, then the
    /// first mesh in the scene. The armature itself is never a candidate.
    pub fn weight_paint(&mut self, mesh: Option<&str>) -> RigResult<String> {
        let stage = PipelineStage::WeightPaint;
        self.ensure_ready(stage)?;

        let mesh = self.resolve_mesh(mesh)?;
        let armature = self.config.armature_name.clone();
        let Some(skeleton) = self.skeleton.as_ref() else {
            return Err(RigError::sequence(stage, PipelineStage::CreateArmature));
        };

        let weights =
            self.scene
                .compute_weights(&mesh, skeleton, self.config.max_bone_influences)?;
        self.scene.set_parent(&mesh, Some(&armature))?;
        info!(
            mesh = %mesh,
            vertices = weights.vertex_count(),
            bones = weights.influencing_bones().len(),
            "mesh bound to armature"
        );

        let message = format!("Automatic weight painting applied to {}.", mesh);
        self.binding = Some(Binding {
            mesh,
            armature,
            weights,
        });
        self.commit(stage);
        Ok(message)
    }

    fn resolve_mesh(&self, requested: Option<&str>) -> RigResult<String> {
        let armature = self.config.armature_name.as_str();
        let is_mesh = |name: &str| {
            name != armature
                && self
                    .scene
                    .find_node(name)
                    .map_or(false, |node| node.kind() == NodeKind::Mesh)
        };

        if let Some(name) = requested {
            if is_mesh(name) {
                return Ok(name.to_string());
            }
            warn!(mesh = name, "requested mesh not found");
            return Err(RigError::NoMeshFound {
                requested: Some(name.to_string()),
            });
        }

        let selected = self
            .scene
            .selected_nodes()
            .into_iter()
            .find(|name| is_mesh(*name));
        if let Some(name) = selected {
            return Ok(name.to_string());
        }

        self.scene
            .find_nodes_by_kind(NodeKind::Mesh)
            .into_iter()
            .find(|node| node.name != armature)
            .map(|node| node.name.clone())
            .ok_or_else(|| {
                warn!("no mesh available for weight painting");
                RigError::NoMeshFound { requested: None }
            })
    }
}
