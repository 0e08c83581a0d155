//! Tests for skeleton construction, hierarchy checks, IK chains, and posing.

use pretty_assertions::assert_eq;

use super::*;
use crate::error::{HierarchyError, IkChainError};
use crate::landmark::{LandmarkName, LandmarkSet};

fn default_skeleton() -> Skeleton {
    Skeleton::from_landmarks(&LandmarkSet::defaults()).unwrap()
}

fn approx(a: Vec3, b: Vec3) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
}

// =========================================================================
// Construction
// =========================================================================

#[test]
fn test_builds_fourteen_bones() {
    let skeleton = default_skeleton();
    assert_eq!(skeleton.bone_count(), 14);
    assert_eq!(skeleton.bone_count(), expected_bone_count());
}

#[test]
fn test_bone_order_is_spine_then_limbs() {
    let skeleton = default_skeleton();
    let names: Vec<&str> = skeleton
        .bones()
        .iter()
        .map(|b| b.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "spine_bottom",
            "spine_mid",
            "spine_top",
            "neck",
            "left_shoulder",
            "left_elbow",
            "right_shoulder",
            "right_elbow",
            "left_hip",
            "left_knee",
            "left_ankle",
            "right_hip",
            "right_knee",
            "right_ankle",
        ]
    );
}

#[test]
fn test_spine_is_a_singly_linked_chain() {
    let skeleton = default_skeleton();
    assert_eq!(skeleton.bone("spine_bottom").unwrap().parent, None);
    assert_eq!(
        skeleton.bone("spine_mid").unwrap().parent.as_deref(),
        Some("spine_bottom")
    );
    assert_eq!(
        skeleton.bone("spine_top").unwrap().parent.as_deref(),
        Some("spine_mid")
    );
    assert_eq!(
        skeleton.bone("neck").unwrap().parent.as_deref(),
        Some("spine_top")
    );

    let roots: Vec<_> = skeleton.roots().map(|b| b.name.as_str()).collect();
    assert_eq!(roots, vec!["spine_bottom"]);
}

#[test]
fn test_bones_span_consecutive_landmarks() {
    let skeleton = default_skeleton();
    let neck = skeleton.bone("neck").unwrap();
    assert_eq!(neck.head, LandmarkName::Neck.default_position());
    assert_eq!(neck.tail, LandmarkName::Head.default_position());

    let ankle = skeleton.bone("left_ankle").unwrap();
    assert_eq!(ankle.head, LandmarkName::LeftAnkle.default_position());
    assert_eq!(ankle.tail, LandmarkName::LeftToe.default_position());
}

#[test]
fn test_limb_roots_attach_to_spine() {
    let skeleton = default_skeleton();
    for (bone, parent) in [
        ("left_shoulder", "spine_top"),
        ("right_shoulder", "spine_top"),
        ("left_hip", "spine_bottom"),
        ("right_hip", "spine_bottom"),
        ("left_elbow", "left_shoulder"),
        ("right_knee", "right_hip"),
        ("right_ankle", "right_knee"),
    ] {
        assert_eq!(
            skeleton.bone(bone).unwrap().parent.as_deref(),
            Some(parent),
            "parent of {}",
            bone
        );
    }
}

#[test]
fn test_children_of_spine_top() {
    let skeleton = default_skeleton();
    let mut children: Vec<_> = skeleton
        .children("spine_top")
        .map(|b| b.name.as_str())
        .collect();
    children.sort();
    assert_eq!(children, vec!["left_shoulder", "neck", "right_shoulder"]);
}

#[test]
fn test_construction_is_deterministic() {
    assert_eq!(default_skeleton(), default_skeleton());
}

#[test]
fn test_missing_landmark_fails_construction() {
    let landmarks: LandmarkSet = LandmarkSet::defaults()
        .iter()
        .filter(|(name, _)| *name != LandmarkName::RightToe)
        .collect();
    let err = Skeleton::from_landmarks(&landmarks).unwrap_err();
    assert_eq!(
        err,
        HierarchyError::MissingLandmark {
            bone: "right_ankle".to_string(),
            landmark: LandmarkName::RightToe,
        }
    );
}

// =========================================================================
// Hierarchy checks
// =========================================================================

#[test]
fn test_built_skeleton_is_acyclic() {
    let skeleton = default_skeleton();
    assert_eq!(skeleton.check_hierarchy(), Ok(()));
    for bone in skeleton.bones() {
        assert!(skeleton.depth(&bone.name).is_some());
    }
    assert_eq!(skeleton.depth("spine_bottom"), Some(0));
    assert_eq!(skeleton.depth("left_elbow"), Some(4));
    assert_eq!(skeleton.depth("right_ankle"), Some(3));
}

#[test]
fn test_add_bone_rejects_duplicates_and_orphans() {
    let mut skeleton = Skeleton::new();
    skeleton
        .add_bone(Bone::new("root", [0.0; 3], [0.0, 0.0, 1.0]))
        .unwrap();

    let err = skeleton
        .add_bone(Bone::new("root", [0.0; 3], [0.0, 0.0, 1.0]))
        .unwrap_err();
    assert_eq!(err, HierarchyError::DuplicateBone("root".to_string()));

    let err = skeleton
        .add_bone(Bone::new("arm", [0.0; 3], [1.0, 0.0, 0.0]).with_parent("chest"))
        .unwrap_err();
    assert!(matches!(err, HierarchyError::UnknownParent { .. }));
}

#[test]
fn test_check_hierarchy_detects_cycle() {
    let json = r#"{
        "bones": [
            {"name": "a", "head": [0, 0, 0], "tail": [0, 0, 1], "parent": "b"},
            {"name": "b", "head": [0, 0, 1], "tail": [0, 0, 2], "parent": "a"}
        ]
    }"#;
    let skeleton: Skeleton = serde_json::from_str(json).unwrap();
    assert!(matches!(
        skeleton.check_hierarchy(),
        Err(HierarchyError::Cycle(_))
    ));
    assert_eq!(skeleton.depth("a"), None);
}

#[test]
fn test_check_hierarchy_detects_parent_after_child() {
    let json = r#"{
        "bones": [
            {"name": "child", "head": [0, 0, 1], "tail": [0, 0, 2], "parent": "root"},
            {"name": "root", "head": [0, 0, 0], "tail": [0, 0, 1]}
        ]
    }"#;
    let skeleton: Skeleton = serde_json::from_str(json).unwrap();
    assert!(matches!(
        skeleton.check_hierarchy(),
        Err(HierarchyError::ParentAfterChild { .. })
    ));
}

#[test]
fn test_bone_length() {
    let bone = Bone::new("b", [0.0, 0.0, 0.0], [3.0, 4.0, 0.0]);
    assert!((bone.length() - 5.0).abs() < 1e-12);
}

// =========================================================================
// IK chains
// =========================================================================

#[test]
fn test_ik_chain_validates_against_skeleton() {
    let skeleton = default_skeleton();
    let chain = IkChain::new("left_elbow", "HumanoidRig", 2).with_subtarget("left_wrist");
    // left_wrist is a landmark, not a bone: the arm chain ends at the elbow bone.
    assert_eq!(
        chain.validate(&skeleton),
        Err(IkChainError::UnknownSubtarget("left_wrist".to_string()))
    );

    let chain = IkChain::new("left_elbow", "HumanoidRig", 2);
    assert_eq!(chain.validate(&skeleton), Ok(()));
}

#[test]
fn test_ik_chain_length_bounds() {
    let skeleton = default_skeleton();
    let too_long = IkChain::new("left_elbow", "HumanoidRig", 6);
    assert_eq!(
        too_long.validate(&skeleton),
        Err(IkChainError::ChainTooLong {
            bone: "left_elbow".to_string(),
            length: 6,
            available: 5,
        })
    );
    assert_eq!(
        IkChain::new("left_elbow", "HumanoidRig", 5).validate(&skeleton),
        Ok(())
    );
    assert_eq!(
        IkChain::new("left_elbow", "HumanoidRig", 0).validate(&skeleton),
        Err(IkChainError::InvalidChainLength)
    );
    assert_eq!(
        IkChain::new("tail", "HumanoidRig", 1).validate(&skeleton),
        Err(IkChainError::UnknownBone("tail".to_string()))
    );
    assert_eq!(
        IkChain::new("left_elbow", "", 1).validate(&skeleton),
        Err(IkChainError::EmptyTarget)
    );
}

#[test]
fn test_set_ik_chain_replaces_existing() {
    let mut skeleton = default_skeleton();
    skeleton
        .set_ik_chain(IkChain::new("left_elbow", "HumanoidRig", 1))
        .unwrap();
    skeleton
        .set_ik_chain(IkChain::new("left_elbow", "HumanoidRig", 2))
        .unwrap();
    assert_eq!(skeleton.ik_chains().len(), 1);
    assert_eq!(skeleton.ik_chain("left_elbow").unwrap().chain_length, 2);
}

#[test]
fn test_ik_chain_serde_omits_missing_subtarget() {
    let chain = IkChain::new("right_elbow", "HumanoidRig", 2);
    let json = serde_json::to_string(&chain).unwrap();
    assert!(!json.contains("subtarget"));

    let parsed: IkChain = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, chain);
    assert!(!parsed.has_subtarget());
}

// =========================================================================
// Pose
// =========================================================================

#[test]
fn test_rest_pose_matches_bind_positions() {
    let skeleton = default_skeleton();
    let posed = skeleton.posed_bones();
    for bone in skeleton.bones() {
        let p = posed[&bone.name];
        assert!(approx(p.head, bone.head), "{} head moved", bone.name);
        assert!(approx(p.tail, bone.tail), "{} tail moved", bone.name);
    }
}

#[test]
fn test_pose_rotation_propagates_to_children() {
    let mut skeleton = default_skeleton();
    let quarter = std::f64::consts::FRAC_PI_2;
    assert!(skeleton.set_pose_rotation("left_shoulder", [0.0, 0.0, quarter]));
    assert!(!skeleton.set_pose_rotation("tail", [0.0, 0.0, quarter]));

    let posed = skeleton.posed_bones();

    // Shoulder head stays put; its tail swings about Z through the head.
    let shoulder = posed["left_shoulder"];
    assert!(approx(shoulder.head, [-0.2, 0.0, 1.4]));
    assert!(approx(shoulder.tail, [-0.2, -0.3, 1.2]));

    // The elbow inherits the rotation.
    let elbow = posed["left_elbow"];
    assert!(approx(elbow.head, shoulder.tail));
    assert!(approx(elbow.tail, [-0.2, -0.5, 1.0]));

    // The other arm is unaffected.
    let right = posed["right_elbow"];
    assert!(approx(right.tail, [0.7, 0.0, 1.0]));
}

#[test]
fn test_clear_pose() {
    let mut skeleton = default_skeleton();
    skeleton.set_pose_rotation("right_shoulder", [0.0, 0.0, -0.5]);
    assert!(skeleton.is_posed());
    assert_eq!(skeleton.pose_rotation("right_shoulder"), [0.0, 0.0, -0.5]);
    skeleton.clear_pose();
    assert!(!skeleton.is_posed());
    assert_eq!(skeleton.pose_rotation("right_shoulder"), [0.0; 3]);
}

#[test]
fn test_skeleton_serde_round_trip() {
    let mut skeleton = default_skeleton();
    skeleton
        .set_ik_chain(IkChain::new("right_elbow", "HumanoidRig", 2))
        .unwrap();
    let json = serde_json::to_string(&skeleton).unwrap();
    let parsed: Skeleton = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, skeleton);
}
