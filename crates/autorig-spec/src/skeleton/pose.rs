//! Forward kinematics for the current pose.

use std::collections::BTreeMap;

use glam::{DAffine3, DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

use super::Skeleton;
use crate::landmark::Vec3;

/// World-space head and tail of a bone after posing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PosedBone {
    pub head: Vec3,
    pub tail: Vec3,
}

impl Skeleton {
    /// Evaluates the pose, returning posed endpoints for every bone.
    ///
    /// Each bone rotates about its own (already posed) head in world axes, and
    /// the rotation carries down to all of its descendants.
    pub fn posed_bones(&self) -> BTreeMap<String, PosedBone> {
        let mut transforms: BTreeMap<&str, DAffine3> = BTreeMap::new();
        let mut posed = BTreeMap::new();

        for bone in self.bones() {
            let inherited = bone
                .parent
                .as_deref()
                .and_then(|parent| transforms.get(parent))
                .copied()
                .unwrap_or(DAffine3::IDENTITY);

            let head = inherited.transform_point3(DVec3::from_array(bone.head));
            let [x, y, z] = self.pose_rotation(&bone.name);
            let rotation = DQuat::from_euler(EulerRot::XYZ, x, y, z);
            let local = DAffine3::from_translation(head)
                * DAffine3::from_quat(rotation)
                * DAffine3::from_translation(-head);
            let world = local * inherited;

            let tail = world.transform_point3(DVec3::from_array(bone.tail));
            transforms.insert(bone.name.as_str(), world);
            posed.insert(
                bone.name.clone(),
                PosedBone {
                    head: head.to_array(),
                    tail: tail.to_array(),
                },
            );
        }

        posed
    }
}
