//! AutoRig Spec Library
//!
//! This crate provides the data model and rules for the AutoRig humanoid rig
//! pipeline. It has no knowledge of the host scene: everything here is pure
//! data plus the checks that operate on it.
//!
//! # Overview
//!
//! A rig is built from a sparse set of anatomical landmarks:
//!
//! - **Landmarks**: 19 named points ([`LandmarkName`]) with default placement
//! - **Validation**: cheap anatomical sanity checks over a [`LandmarkSet`]
//! - **Skeleton**: a bone forest derived from the landmarks, plus IK chains and a pose
//! - **Pipeline state**: six ordered completion flags gating each stage
//!
//! # Example
//!
//! ```
//! use autorig_spec::{LandmarkSet, Skeleton, validate_landmarks};
//!
//! let landmarks = LandmarkSet::defaults();
//! validate_landmarks(&landmarks, 0.1).unwrap();
//!
//! let skeleton = Skeleton::from_landmarks(&landmarks).unwrap();
//! assert_eq!(skeleton.bone_count(), 14);
//! ```
//!
//! # Modules
//!
//! - [`landmark`]: Landmark names and default positions
//! - [`validation`]: Landmark sanity checks
//! - [`skeleton`]: Bones, IK chains, topology tables, and posing
//! - [`binding`]: Per-vertex weight maps produced by automatic weighting
//! - [`pipeline`]: Pipeline stages and completion state
//! - [`config`]: Rig configuration
//! - [`error`]: Error types

pub mod binding;
pub mod config;
pub mod error;
pub mod landmark;
pub mod pipeline;
pub mod skeleton;
pub mod validation;

// Re-export commonly used types at the crate root
pub use binding::{Binding, VertexInfluence, WeightMap};
pub use config::RigConfig;
pub use error::{CodedError, ConfigError, HierarchyError, IkChainError, LandmarkViolation};
pub use landmark::{LandmarkName, LandmarkSet, Side, Vec3};
pub use pipeline::{PipelineStage, PipelineState, RigPhase, StageStatus};
pub use skeleton::{
    Bone, IkChain, Limb, PosedBone, Skeleton, DEFAULT_IK_CHAIN_LENGTH, ELBOW_IK_TARGETS,
    LIMB_CHAINS, ROLL_BONES, SPINE_CHAIN,
};
pub use validation::{validate_all, validate_landmarks, LandmarkCheck};
