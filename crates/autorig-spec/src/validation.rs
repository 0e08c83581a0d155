//! Landmark sanity checks.
//!
//! These are deliberately cheap: height ordering along the spine and
//! left/right level checks. They catch malformed user adjustments before a
//! skeleton topology is committed, not general mesh problems.

use crate::error::LandmarkViolation;
use crate::landmark::{LandmarkName, LandmarkSet};

/// The geometric checks, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkCheck {
    /// head.z > neck.z
    HeadAboveNeck,
    /// neck.z > spine_top.z
    NeckAboveSpineTop,
    /// |left_shoulder.z - right_shoulder.z| < tolerance
    ShouldersLevel,
    /// |left_hip.z - right_hip.z| < tolerance
    HipsLevel,
}

impl LandmarkCheck {
    /// All checks in the order they are evaluated.
    pub const ALL: [LandmarkCheck; 4] = [
        LandmarkCheck::HeadAboveNeck,
        LandmarkCheck::NeckAboveSpineTop,
        LandmarkCheck::ShouldersLevel,
        LandmarkCheck::HipsLevel,
    ];

    /// The two landmarks this check compares.
    pub fn operands(&self) -> (LandmarkName, LandmarkName) {
        match self {
            LandmarkCheck::HeadAboveNeck => (LandmarkName::Head, LandmarkName::Neck),
            LandmarkCheck::NeckAboveSpineTop => (LandmarkName::Neck, LandmarkName::SpineTop),
            LandmarkCheck::ShouldersLevel => {
                (LandmarkName::LeftShoulder, LandmarkName::RightShoulder)
            }
            LandmarkCheck::HipsLevel => (LandmarkName::LeftHip, LandmarkName::RightHip),
        }
    }

    /// Evaluates the check. Returns `None` when either operand is absent.
    pub fn evaluate(
        &self,
        landmarks: &LandmarkSet,
        tolerance: f64,
    ) -> Option<Result<(), LandmarkViolation>> {
        let (a, b) = self.operands();
        let a_z = landmarks.z(a)?;
        let b_z = landmarks.z(b)?;

        let outcome = match self {
            LandmarkCheck::HeadAboveNeck => {
                if a_z > b_z {
                    Ok(())
                } else {
                    Err(LandmarkViolation::HeadBelowNeck {
                        head_z: a_z,
                        neck_z: b_z,
                    })
                }
            }
            LandmarkCheck::NeckAboveSpineTop => {
                if a_z > b_z {
                    Ok(())
                } else {
                    Err(LandmarkViolation::NeckBelowSpineTop {
                        neck_z: a_z,
                        spine_top_z: b_z,
                    })
                }
            }
            LandmarkCheck::ShouldersLevel => {
                let delta = (a_z - b_z).abs();
                if delta < tolerance {
                    Ok(())
                } else {
                    Err(LandmarkViolation::ShouldersUneven { delta, tolerance })
                }
            }
            LandmarkCheck::HipsLevel => {
                let delta = (a_z - b_z).abs();
                if delta < tolerance {
                    Ok(())
                } else {
                    Err(LandmarkViolation::HipsUneven { delta, tolerance })
                }
            }
        };
        Some(outcome)
    }
}

/// Validates landmarks, stopping at the first failing check.
///
/// Presence of all 19 landmarks is checked first, then each
/// [`LandmarkCheck`] in declared order.
pub fn validate_landmarks(
    landmarks: &LandmarkSet,
    tolerance: f64,
) -> Result<(), LandmarkViolation> {
    if let Some(missing) = landmarks.first_missing() {
        return Err(LandmarkViolation::Missing(missing));
    }

    for check in LandmarkCheck::ALL {
        if let Some(Err(violation)) = check.evaluate(landmarks, tolerance) {
            return Err(violation);
        }
    }

    Ok(())
}

/// Collects every violation instead of stopping at the first.
///
/// Geometric checks whose operands are missing are skipped; the missing
/// landmarks are already reported.
pub fn validate_all(landmarks: &LandmarkSet, tolerance: f64) -> Vec<LandmarkViolation> {
    let mut violations: Vec<LandmarkViolation> = LandmarkName::ALL
        .iter()
        .filter(|name| !landmarks.contains(**name))
        .map(|name| LandmarkViolation::Missing(*name))
        .collect();

    violations.extend(
        LandmarkCheck::ALL
            .iter()
            .filter_map(|check| check.evaluate(landmarks, tolerance))
            .filter_map(Result::err),
    );

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn with(overrides: &[(LandmarkName, [f64; 3])]) -> LandmarkSet {
        let map: BTreeMap<_, _> = overrides.iter().copied().collect();
        LandmarkSet::defaults().with_overrides(&map)
    }

    #[test]
    fn test_defaults_pass() {
        assert_eq!(validate_landmarks(&LandmarkSet::defaults(), 0.1), Ok(()));
        assert!(validate_all(&LandmarkSet::defaults(), 0.1).is_empty());
    }

    #[test]
    fn test_inverted_head_and_neck() {
        let set = with(&[
            (LandmarkName::Head, [0.0, 0.0, 1.0]),
            (LandmarkName::Neck, [0.0, 0.0, 1.5]),
        ]);
        let err = validate_landmarks(&set, 0.1).unwrap_err();
        assert_eq!(
            err,
            LandmarkViolation::HeadBelowNeck {
                head_z: 1.0,
                neck_z: 1.5
            }
        );
    }

    #[test]
    fn test_equal_heights_fail_strict_ordering() {
        let set = with(&[(LandmarkName::Neck, [0.0, 0.0, 1.3])]);
        let err = validate_landmarks(&set, 0.1).unwrap_err();
        assert_eq!(err.rule(), "neck_above_spine_top");
    }

    #[test]
    fn test_short_circuits_on_first_failure() {
        let set = with(&[
            (LandmarkName::Head, [0.0, 0.0, 1.0]),
            (LandmarkName::LeftHip, [-0.1, 0.0, 0.3]),
        ]);
        let err = validate_landmarks(&set, 0.1).unwrap_err();
        assert_eq!(err.rule(), "head_above_neck");

        let all = validate_all(&set, 0.1);
        let rules: Vec<_> = all.iter().map(|v| v.rule()).collect();
        assert_eq!(rules, vec!["head_above_neck", "hips_level"]);
    }

    #[test]
    fn test_shoulder_tolerance() {
        let set = with(&[(LandmarkName::LeftShoulder, [-0.2, 0.0, 1.6])]);
        let err = validate_landmarks(&set, 0.1);
        assert!(matches!(
            err,
            Err(LandmarkViolation::ShouldersUneven { .. })
        ));

        let set = with(&[(LandmarkName::LeftShoulder, [-0.2, 0.0, 1.45])]);
        assert_eq!(validate_landmarks(&set, 0.1), Ok(()));
    }

    #[test]
    fn test_missing_landmark_reported_before_geometry() {
        let set: LandmarkSet = LandmarkSet::defaults()
            .iter()
            .filter(|(name, _)| *name != LandmarkName::RightHip)
            .collect();
        assert_eq!(
            validate_landmarks(&set, 0.1),
            Err(LandmarkViolation::Missing(LandmarkName::RightHip))
        );
        // The hip check is skipped because an operand is missing.
        assert_eq!(
            validate_all(&set, 0.1),
            vec![LandmarkViolation::Missing(LandmarkName::RightHip)]
        );
    }
}
