//! Fixed humanoid topology tables.

use crate::landmark::LandmarkName;

/// Landmarks threaded by the spine chain, root first.
/// Bone *i* spans landmark *i* to landmark *i + 1*.
pub const SPINE_CHAIN: [LandmarkName; 5] = [
    LandmarkName::SpineBottom,
    LandmarkName::SpineMid,
    LandmarkName::SpineTop,
    LandmarkName::Neck,
    LandmarkName::Head,
];

/// A limb chain hanging off the spine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limb {
    /// Limb identifier (e.g. "left_arm").
    pub name: &'static str,
    /// Landmarks along the limb, proximal first.
    pub joints: &'static [LandmarkName],
    /// Spine bone the first limb bone is parented to.
    pub attach_to: LandmarkName,
}

impl Limb {
    /// Number of bones this limb produces.
    pub fn bone_count(&self) -> usize {
        self.joints.len().saturating_sub(1)
    }
}

/// The four limb chains, arms first.
pub const LIMB_CHAINS: [Limb; 4] = [
    Limb {
        name: "left_arm",
        joints: &[
            LandmarkName::LeftShoulder,
            LandmarkName::LeftElbow,
            LandmarkName::LeftWrist,
        ],
        attach_to: LandmarkName::SpineTop,
    },
    Limb {
        name: "right_arm",
        joints: &[
            LandmarkName::RightShoulder,
            LandmarkName::RightElbow,
            LandmarkName::RightWrist,
        ],
        attach_to: LandmarkName::SpineTop,
    },
    Limb {
        name: "left_leg",
        joints: &[
            LandmarkName::LeftHip,
            LandmarkName::LeftKnee,
            LandmarkName::LeftAnkle,
            LandmarkName::LeftToe,
        ],
        attach_to: LandmarkName::SpineBottom,
    },
    Limb {
        name: "right_leg",
        joints: &[
            LandmarkName::RightHip,
            LandmarkName::RightKnee,
            LandmarkName::RightAnkle,
            LandmarkName::RightToe,
        ],
        attach_to: LandmarkName::SpineBottom,
    },
];

/// Arm and leg bones that receive the mirrored roll convention.
pub const ROLL_BONES: [&str; 8] = [
    "left_shoulder",
    "left_elbow",
    "right_shoulder",
    "right_elbow",
    "left_hip",
    "left_knee",
    "right_hip",
    "right_knee",
];

/// (constrained bone, subtarget bone) pairs that get an IK chain.
pub const ELBOW_IK_TARGETS: [(&str, &str); 2] = [
    ("left_elbow", "left_wrist"),
    ("right_elbow", "right_wrist"),
];

/// IK chain length covering elbow and shoulder.
pub const DEFAULT_IK_CHAIN_LENGTH: u8 = 2;

/// Total bones produced by the spine and limb tables.
pub fn expected_bone_count() -> usize {
    SPINE_CHAIN.len() - 1 + LIMB_CHAINS.iter().map(Limb::bone_count).sum::<usize>()
}
