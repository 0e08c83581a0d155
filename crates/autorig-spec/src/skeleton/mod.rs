//! Bone hierarchy, IK chains, and pose.

mod ik_chain;
mod pose;
mod topology;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{HierarchyError, IkChainError};
use crate::landmark::{LandmarkName, LandmarkSet, Vec3};

pub use ik_chain::IkChain;
pub use pose::PosedBone;
pub use topology::{
    expected_bone_count, Limb, DEFAULT_IK_CHAIN_LENGTH, ELBOW_IK_TARGETS, LIMB_CHAINS,
    ROLL_BONES, SPINE_CHAIN,
};

/// A rigid segment of the skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bone {
    /// Unique bone name, taken from the landmark the bone starts at.
    pub name: String,
    /// Bone head position [X, Y, Z].
    pub head: Vec3,
    /// Bone tail position [X, Y, Z].
    pub tail: Vec3,
    /// Parent bone name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Roll in radians (rotation about the bone's own head→tail axis).
    #[serde(default)]
    pub roll: f64,
}

impl Bone {
    /// Creates an unparented bone with zero roll.
    pub fn new(name: impl Into<String>, head: Vec3, tail: Vec3) -> Self {
        Self {
            name: name.into(),
            head,
            tail,
            parent: None,
            roll: 0.0,
        }
    }

    /// Sets the parent bone.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Distance from head to tail.
    pub fn length(&self) -> f64 {
        let d = [
            self.tail[0] - self.head[0],
            self.tail[1] - self.head[1],
            self.tail[2] - self.head[2],
        ];
        (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
    }
}

/// The rig's bones, IK chains, and current pose.
///
/// Bones are kept in insertion order with every parent listed before its
/// children, which [`Skeleton::add_bone`] enforces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skeleton {
    bones: Vec<Bone>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    ik_chains: Vec<IkChain>,
    /// Per-bone Euler rotation (XYZ, radians).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pose: BTreeMap<String, Vec3>,
}

impl Skeleton {
    /// Creates an empty skeleton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the humanoid skeleton from landmark positions.
    ///
    /// The spine chain is built first, each bone parented to the previous one.
    /// Each limb's first bone is parented to its spine attachment, the rest to
    /// their chain predecessor.
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Result<Self, HierarchyError> {
        let mut skeleton = Skeleton::new();

        let mut parent: Option<String> = None;
        for pair in SPINE_CHAIN.windows(2) {
            let bone = place_bone(landmarks, pair[0], pair[1], parent.take())?;
            parent = Some(bone.name.clone());
            skeleton.add_bone(bone)?;
        }

        for limb in &LIMB_CHAINS {
            let mut parent = Some(limb.attach_to.as_str().to_string());
            for pair in limb.joints.windows(2) {
                let bone = place_bone(landmarks, pair[0], pair[1], parent.take())?;
                parent = Some(bone.name.clone());
                skeleton.add_bone(bone)?;
            }
        }

        Ok(skeleton)
    }

    /// Appends a bone. Its parent, if any, must already be present.
    pub fn add_bone(&mut self, bone: Bone) -> Result<(), HierarchyError> {
        if self.contains(&bone.name) {
            return Err(HierarchyError::DuplicateBone(bone.name));
        }
        if let Some(parent) = &bone.parent {
            if !self.contains(parent) {
                return Err(HierarchyError::UnknownParent {
                    bone: bone.name.clone(),
                    parent: parent.clone(),
                });
            }
        }
        self.bones.push(bone);
        Ok(())
    }

    /// All bones, parents before children.
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Number of bones.
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Looks up a bone by name.
    pub fn bone(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|b| b.name == name)
    }

    /// Returns true if a bone with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.bone(name).is_some()
    }

    /// Sets a bone's roll. Returns false if the bone does not exist.
    pub fn set_roll(&mut self, name: &str, roll: f64) -> bool {
        match self.bones.iter_mut().find(|b| b.name == name) {
            Some(bone) => {
                bone.roll = roll;
                true
            }
            None => false,
        }
    }

    /// Bones without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &Bone> {
        self.bones.iter().filter(|b| b.parent.is_none())
    }

    /// Direct children of a bone.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Bone> + 'a {
        self.bones
            .iter()
            .filter(move |b| b.parent.as_deref() == Some(name))
    }

    /// Number of ancestors above a bone, or `None` if the bone is unknown.
    ///
    /// Also `None` if the parent links from the bone form a cycle.
    pub fn depth(&self, name: &str) -> Option<usize> {
        let mut current = self.bone(name)?;
        let mut depth = 0;
        while let Some(parent) = current.parent.as_deref() {
            current = self.bone(parent)?;
            depth += 1;
            if depth > self.bones.len() {
                return None;
            }
        }
        Some(depth)
    }

    /// Checks that names are unique, parents exist and precede their
    /// children, and there are no cycles.
    ///
    /// Skeletons built through [`Skeleton::add_bone`] always pass; this is for
    /// skeletons deserialized from elsewhere.
    pub fn check_hierarchy(&self) -> Result<(), HierarchyError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for bone in &self.bones {
            if let Some(parent) = bone.parent.as_deref() {
                if !self.contains(parent) {
                    return Err(HierarchyError::UnknownParent {
                        bone: bone.name.clone(),
                        parent: parent.to_string(),
                    });
                }
            }
            if !seen.insert(bone.name.as_str()) {
                return Err(HierarchyError::DuplicateBone(bone.name.clone()));
            }
        }

        for bone in &self.bones {
            if self.depth(&bone.name).is_none() {
                return Err(HierarchyError::Cycle(bone.name.clone()));
            }
        }

        let mut placed: HashSet<&str> = HashSet::new();
        for bone in &self.bones {
            if let Some(parent) = bone.parent.as_deref() {
                if !placed.contains(parent) {
                    return Err(HierarchyError::ParentAfterChild {
                        bone: bone.name.clone(),
                        parent: parent.to_string(),
                    });
                }
            }
            placed.insert(bone.name.as_str());
        }

        Ok(())
    }

    /// IK chains, in the order they were added.
    pub fn ik_chains(&self) -> &[IkChain] {
        &self.ik_chains
    }

    /// The IK chain constraining a bone, if any.
    pub fn ik_chain(&self, bone: &str) -> Option<&IkChain> {
        self.ik_chains.iter().find(|c| c.bone == bone)
    }

    /// Adds an IK chain after validating it, replacing any existing chain on
    /// the same bone.
    pub fn set_ik_chain(&mut self, chain: IkChain) -> Result<(), IkChainError> {
        chain.validate(self)?;
        match self.ik_chains.iter_mut().find(|c| c.bone == chain.bone) {
            Some(existing) => *existing = chain,
            None => self.ik_chains.push(chain),
        }
        Ok(())
    }

    /// Sets a bone's pose rotation. Returns false if the bone does not exist.
    pub fn set_pose_rotation(&mut self, name: &str, rotation: Vec3) -> bool {
        if !self.contains(name) {
            return false;
        }
        self.pose.insert(name.to_string(), rotation);
        true
    }

    /// A bone's pose rotation, zero if unposed.
    pub fn pose_rotation(&self, name: &str) -> Vec3 {
        self.pose.get(name).copied().unwrap_or([0.0; 3])
    }

    /// Returns true if any bone carries a pose rotation.
    pub fn is_posed(&self) -> bool {
        !self.pose.is_empty()
    }

    /// Returns every bone to its rest pose.
    pub fn clear_pose(&mut self) {
        self.pose.clear();
    }
}

fn place_bone(
    landmarks: &LandmarkSet,
    start: LandmarkName,
    end: LandmarkName,
    parent: Option<String>,
) -> Result<Bone, HierarchyError> {
    let missing = |landmark| HierarchyError::MissingLandmark {
        bone: start.as_str().to_string(),
        landmark,
    };
    let head = landmarks.get(start).ok_or_else(|| missing(start))?;
    let tail = landmarks.get(end).ok_or_else(|| missing(end))?;

    let mut bone = Bone::new(start.as_str(), head, tail);
    bone.parent = parent;
    Ok(bone)
}
