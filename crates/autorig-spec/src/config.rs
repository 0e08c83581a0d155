//! Rig configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::landmark::LandmarkName;
use crate::skeleton::DEFAULT_IK_CHAIN_LENGTH;

/// Default prefix for landmark marker node names.
pub const DEFAULT_MARKER_PREFIX: &str = "ref_";

/// Default armature node name.
pub const DEFAULT_ARMATURE_NAME: &str = "HumanoidRig";

/// Tunables for a rig session.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RigConfig {
    /// Prefix prepended to landmark names to form marker node names.
    #[serde(default = "default_marker_prefix")]
    pub marker_prefix: String,
    /// Display radius of landmark markers.
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f64,
    /// Name of the armature node.
    #[serde(default = "default_armature_name")]
    pub armature_name: String,
    /// Maximum height difference allowed between left/right shoulders and hips.
    #[serde(default = "default_symmetry_tolerance")]
    pub symmetry_tolerance: f64,
    /// Length of the elbow IK chains.
    #[serde(default = "default_ik_chain_length")]
    pub ik_chain_length: u8,
    /// Shoulder rotation about the vertical axis applied by the deformation test (radians).
    #[serde(default = "default_test_pose_angle")]
    pub test_pose_angle: f64,
    /// Maximum bone influences per vertex requested from automatic weighting (1-8).
    #[serde(default = "default_max_bone_influences")]
    pub max_bone_influences: u8,
}

fn default_marker_prefix() -> String {
    DEFAULT_MARKER_PREFIX.to_string()
}

fn default_marker_radius() -> f64 {
    0.05
}

fn default_armature_name() -> String {
    DEFAULT_ARMATURE_NAME.to_string()
}

fn default_symmetry_tolerance() -> f64 {
    0.1
}

fn default_ik_chain_length() -> u8 {
    DEFAULT_IK_CHAIN_LENGTH
}

fn default_test_pose_angle() -> f64 {
    0.5
}

fn default_max_bone_influences() -> u8 {
    4
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            marker_prefix: default_marker_prefix(),
            marker_radius: default_marker_radius(),
            armature_name: default_armature_name(),
            symmetry_tolerance: default_symmetry_tolerance(),
            ik_chain_length: default_ik_chain_length(),
            test_pose_angle: default_test_pose_angle(),
            max_bone_influences: default_max_bone_influences(),
        }
    }
}

impl RigConfig {
    /// Parses a config from JSON. Call [`RigConfig::validate`] before use.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the armature node name.
    pub fn armature_name(mut self, name: impl Into<String>) -> Self {
        self.armature_name = name.into();
        self
    }

    /// Sets the marker prefix.
    pub fn marker_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.marker_prefix = prefix.into();
        self
    }

    /// Sets the symmetry tolerance.
    pub fn symmetry_tolerance(mut self, tolerance: f64) -> Self {
        self.symmetry_tolerance = tolerance;
        self
    }

    /// Sets the elbow IK chain length.
    pub fn ik_chain_length(mut self, length: u8) -> Self {
        self.ik_chain_length = length;
        self
    }

    /// Sets the test pose angle.
    pub fn test_pose_angle(mut self, angle: f64) -> Self {
        self.test_pose_angle = angle;
        self
    }

    /// Sets the maximum bone influences per vertex.
    pub fn max_bone_influences(mut self, count: u8) -> Self {
        self.max_bone_influences = count;
        self
    }

    /// Returns the marker node name for a landmark identifier.
    pub fn marker_name(&self, landmark: &str) -> String {
        format!("{}{}", self.marker_prefix, landmark)
    }

    /// Checks names and value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.armature_name.is_empty() {
            return Err(ConfigError::EmptyName("armature_name"));
        }
        if self.marker_prefix.is_empty() {
            return Err(ConfigError::EmptyName("marker_prefix"));
        }
        if LandmarkName::ALL
            .iter()
            .any(|name| self.marker_name(name.as_str()) == self.armature_name)
        {
            return Err(ConfigError::ArmatureNameClash(self.armature_name.clone()));
        }
        if !(self.symmetry_tolerance > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "symmetry_tolerance",
                expected: "greater than 0",
                value: self.symmetry_tolerance,
            });
        }
        if !(self.marker_radius > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "marker_radius",
                expected: "greater than 0",
                value: self.marker_radius,
            });
        }
        if self.ik_chain_length == 0 {
            return Err(ConfigError::OutOfRange {
                field: "ik_chain_length",
                expected: "at least 1",
                value: 0.0,
            });
        }
        if !(1..=8).contains(&self.max_bone_influences) {
            return Err(ConfigError::OutOfRange {
                field: "max_bone_influences",
                expected: "between 1 and 8",
                value: f64::from(self.max_bone_influences),
            });
        }
        if !self.test_pose_angle.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "test_pose_angle",
                expected: "finite",
                value: self.test_pose_angle,
            });
        }
        Ok(())
    }
}
