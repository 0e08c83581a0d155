//! IK chain definition.

use serde::{Deserialize, Serialize};

use super::Skeleton;
use crate::error::IkChainError;

/// An IK constraint on a bone.
///
/// The chain bends `chain_length` bones, counted from the constrained bone up
/// the hierarchy, so that the subtarget bone is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IkChain {
    /// Bone carrying the constraint.
    pub bone: String,
    /// Object the constraint targets (the armature itself).
    pub target: String,
    /// Bone inside the target the chain reaches for.
    /// Absent when the wrist bone is missing; the constraint still exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtarget: Option<String>,
    /// Number of bones in the chain, starting at `bone`.
    pub chain_length: u8,
}

impl IkChain {
    /// Creates a chain without a subtarget.
    pub fn new(bone: impl Into<String>, target: impl Into<String>, chain_length: u8) -> Self {
        Self {
            bone: bone.into(),
            target: target.into(),
            subtarget: None,
            chain_length,
        }
    }

    /// Sets the subtarget bone.
    pub fn with_subtarget(mut self, subtarget: impl Into<String>) -> Self {
        self.subtarget = Some(subtarget.into());
        self
    }

    /// Returns true if the chain has a subtarget to reach for.
    pub fn has_subtarget(&self) -> bool {
        self.subtarget.is_some()
    }

    /// Validates the chain against a skeleton.
    pub fn validate(&self, skeleton: &Skeleton) -> Result<(), IkChainError> {
        if self.target.is_empty() {
            return Err(IkChainError::EmptyTarget);
        }
        if self.chain_length == 0 {
            return Err(IkChainError::InvalidChainLength);
        }
        let available = skeleton
            .depth(&self.bone)
            .ok_or_else(|| IkChainError::UnknownBone(self.bone.clone()))?
            + 1;
        if usize::from(self.chain_length) > available {
            return Err(IkChainError::ChainTooLong {
                bone: self.bone.clone(),
                length: self.chain_length,
                available,
            });
        }
        if let Some(subtarget) = &self.subtarget {
            if !skeleton.contains(subtarget) {
                return Err(IkChainError::UnknownSubtarget(subtarget.clone()));
            }
        }
        Ok(())
    }
}
