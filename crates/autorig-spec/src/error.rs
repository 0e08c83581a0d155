//! Error types for landmark validation, skeleton construction, and configuration.

use thiserror::Error;

use crate::landmark::LandmarkName;

/// Common interface for errors surfaced to rig UI drivers.
///
/// Implemented by the host-side and pipeline error types so a driver can
/// report any failure uniformly without depending on every crate's enum.
pub trait CodedError: std::error::Error {
    /// Stable code such as "RIG_001" or "SCENE_002".
    fn code(&self) -> &'static str;

    /// Human-readable message, normally the `Display` text.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category for grouping, such as "sequence", "validation",
    /// "scene" or "skeleton".
    fn category(&self) -> &'static str;
}

/// An anatomical sanity check that failed during landmark validation.
///
/// The display text is the guidance shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LandmarkViolation {
    /// A landmark marker is absent from the scene.
    #[error("Reference point '{0}' is missing.")]
    Missing(LandmarkName),

    /// The head landmark is not above the neck landmark.
    #[error("Validation failed: Head should be above neck")]
    HeadBelowNeck { head_z: f64, neck_z: f64 },

    /// The neck landmark is not above the top of the spine.
    #[error("Validation failed: Neck should be above spine_top")]
    NeckBelowSpineTop { neck_z: f64, spine_top_z: f64 },

    /// Left and right shoulders differ in height by at least the tolerance.
    #[error("Validation failed: Shoulders should be at similar heights")]
    ShouldersUneven { delta: f64, tolerance: f64 },

    /// Left and right hips differ in height by at least the tolerance.
    #[error("Validation failed: Hips should be at similar heights")]
    HipsUneven { delta: f64, tolerance: f64 },
}

impl LandmarkViolation {
    /// Returns a stable rule identifier for machine-readable output.
    pub fn rule(&self) -> &'static str {
        match self {
            LandmarkViolation::Missing(_) => "landmark_present",
            LandmarkViolation::HeadBelowNeck { .. } => "head_above_neck",
            LandmarkViolation::NeckBelowSpineTop { .. } => "neck_above_spine_top",
            LandmarkViolation::ShouldersUneven { .. } => "shoulders_level",
            LandmarkViolation::HipsUneven { .. } => "hips_level",
        }
    }
}

/// Structural problems in a bone hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// A landmark required to place a bone is absent.
    #[error("cannot place bone '{bone}': landmark '{landmark}' is missing")]
    MissingLandmark { bone: String, landmark: LandmarkName },

    /// Two bones share a name.
    #[error("duplicate bone name: {0}")]
    DuplicateBone(String),

    /// A bone names a parent that does not exist.
    #[error("bone '{bone}' references unknown parent '{parent}'")]
    UnknownParent { bone: String, parent: String },

    /// Following parent links from a bone returns to that bone.
    #[error("bone hierarchy contains a cycle through '{0}'")]
    Cycle(String),

    /// A bone is listed before its parent.
    #[error("bone '{bone}' is listed before its parent '{parent}'")]
    ParentAfterChild { bone: String, parent: String },
}

/// Errors that can occur when validating an IK chain against a skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IkChainError {
    /// The constrained bone does not exist.
    UnknownBone(String),
    /// The subtarget bone does not exist.
    UnknownSubtarget(String),
    /// Chain length must be at least 1.
    InvalidChainLength,
    /// Chain length exceeds the bones available up to the root.
    ChainTooLong { bone: String, length: u8, available: usize },
    /// Target name is empty.
    EmptyTarget,
}

impl std::fmt::Display for IkChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IkChainError::UnknownBone(bone) => write!(f, "IK chain bone '{}' does not exist", bone),
            IkChainError::UnknownSubtarget(bone) => {
                write!(f, "IK subtarget bone '{}' does not exist", bone)
            }
            IkChainError::InvalidChainLength => write!(f, "IK chain length must be at least 1"),
            IkChainError::ChainTooLong {
                bone,
                length,
                available,
            } => write!(
                f,
                "IK chain on '{}' has length {} but only {} bones lead to the root",
                bone, length, available
            ),
            IkChainError::EmptyTarget => write!(f, "IK target name cannot be empty"),
        }
    }
}

impl std::error::Error for IkChainError {}

/// Invalid rig configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A name field is empty.
    #[error("config field '{0}' cannot be empty")]
    EmptyName(&'static str),

    /// A numeric field is outside its accepted range.
    #[error("config field '{field}' must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f64,
    },

    /// The armature name is also the name of a landmark marker.
    #[error("armature_name '{0}' is already used by a landmark marker")]
    ArmatureNameClash(String),
}
