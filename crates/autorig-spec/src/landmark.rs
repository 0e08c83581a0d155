//! Landmark names and default anatomical placement.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A position in rig space [X, Y, Z], Z up.
pub type Vec3 = [f64; 3];

/// Body side of a landmark, mirrored about the X = 0 plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// On the mirror plane (head, neck, spine).
    Center,
    /// Negative X.
    Left,
    /// Positive X.
    Right,
}

/// The 19 fixed anatomical landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkName {
    Head,
    Neck,
    SpineTop,
    SpineMid,
    SpineBottom,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftToe,
    RightToe,
}

impl LandmarkName {
    /// All landmarks, top of the body first.
    pub const ALL: [LandmarkName; 19] = [
        LandmarkName::Head,
        LandmarkName::Neck,
        LandmarkName::SpineTop,
        LandmarkName::SpineMid,
        LandmarkName::SpineBottom,
        LandmarkName::LeftShoulder,
        LandmarkName::RightShoulder,
        LandmarkName::LeftElbow,
        LandmarkName::RightElbow,
        LandmarkName::LeftWrist,
        LandmarkName::RightWrist,
        LandmarkName::LeftHip,
        LandmarkName::RightHip,
        LandmarkName::LeftKnee,
        LandmarkName::RightKnee,
        LandmarkName::LeftAnkle,
        LandmarkName::RightAnkle,
        LandmarkName::LeftToe,
        LandmarkName::RightToe,
    ];

    /// Returns the snake_case identifier, which is also the derived bone name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LandmarkName::Head => "head",
            LandmarkName::Neck => "neck",
            LandmarkName::SpineTop => "spine_top",
            LandmarkName::SpineMid => "spine_mid",
            LandmarkName::SpineBottom => "spine_bottom",
            LandmarkName::LeftShoulder => "left_shoulder",
            LandmarkName::RightShoulder => "right_shoulder",
            LandmarkName::LeftElbow => "left_elbow",
            LandmarkName::RightElbow => "right_elbow",
            LandmarkName::LeftWrist => "left_wrist",
            LandmarkName::RightWrist => "right_wrist",
            LandmarkName::LeftHip => "left_hip",
            LandmarkName::RightHip => "right_hip",
            LandmarkName::LeftKnee => "left_knee",
            LandmarkName::RightKnee => "right_knee",
            LandmarkName::LeftAnkle => "left_ankle",
            LandmarkName::RightAnkle => "right_ankle",
            LandmarkName::LeftToe => "left_toe",
            LandmarkName::RightToe => "right_toe",
        }
    }

    /// Returns the default position used when landmarks are first created.
    pub fn default_position(&self) -> Vec3 {
        match self {
            LandmarkName::Head => [0.0, 0.0, 1.7],
            LandmarkName::Neck => [0.0, 0.0, 1.5],
            LandmarkName::SpineTop => [0.0, 0.0, 1.3],
            LandmarkName::SpineMid => [0.0, 0.0, 1.0],
            LandmarkName::SpineBottom => [0.0, 0.0, 0.8],
            LandmarkName::LeftShoulder => [-0.2, 0.0, 1.4],
            LandmarkName::RightShoulder => [0.2, 0.0, 1.4],
            LandmarkName::LeftElbow => [-0.5, 0.0, 1.2],
            LandmarkName::RightElbow => [0.5, 0.0, 1.2],
            LandmarkName::LeftWrist => [-0.7, 0.0, 1.0],
            LandmarkName::RightWrist => [0.7, 0.0, 1.0],
            LandmarkName::LeftHip => [-0.1, 0.0, 0.8],
            LandmarkName::RightHip => [0.1, 0.0, 0.8],
            LandmarkName::LeftKnee => [-0.15, 0.0, 0.5],
            LandmarkName::RightKnee => [0.15, 0.0, 0.5],
            LandmarkName::LeftAnkle => [-0.15, 0.0, 0.1],
            LandmarkName::RightAnkle => [0.15, 0.0, 0.1],
            LandmarkName::LeftToe => [-0.15, 0.1, 0.0],
            LandmarkName::RightToe => [0.15, 0.1, 0.0],
        }
    }

    /// Returns which side of the body this landmark sits on.
    pub fn side(&self) -> Side {
        let name = self.as_str();
        if name.starts_with("left_") {
            Side::Left
        } else if name.starts_with("right_") {
            Side::Right
        } else {
            Side::Center
        }
    }

    /// Returns the landmark on the opposite side, or itself for center landmarks.
    pub fn mirror(&self) -> LandmarkName {
        match self {
            LandmarkName::LeftShoulder => LandmarkName::RightShoulder,
            LandmarkName::RightShoulder => LandmarkName::LeftShoulder,
            LandmarkName::LeftElbow => LandmarkName::RightElbow,
            LandmarkName::RightElbow => LandmarkName::LeftElbow,
            LandmarkName::LeftWrist => LandmarkName::RightWrist,
            LandmarkName::RightWrist => LandmarkName::LeftWrist,
            LandmarkName::LeftHip => LandmarkName::RightHip,
            LandmarkName::RightHip => LandmarkName::LeftHip,
            LandmarkName::LeftKnee => LandmarkName::RightKnee,
            LandmarkName::RightKnee => LandmarkName::LeftKnee,
            LandmarkName::LeftAnkle => LandmarkName::RightAnkle,
            LandmarkName::RightAnkle => LandmarkName::LeftAnkle,
            LandmarkName::LeftToe => LandmarkName::RightToe,
            LandmarkName::RightToe => LandmarkName::LeftToe,
            center => *center,
        }
    }
}

impl fmt::Display for LandmarkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown landmark identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLandmark(pub String);

impl fmt::Display for UnknownLandmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown landmark '{}'", self.0)
    }
}

impl std::error::Error for UnknownLandmark {}

impl FromStr for LandmarkName {
    type Err = UnknownLandmark;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LandmarkName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownLandmark(s.to_string()))
    }
}

/// A set of landmark positions.
///
/// Landmarks read back from a scene may be incomplete if the user deleted a
/// marker, so every lookup is fallible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    positions: BTreeMap<LandmarkName, Vec3>,
}

impl LandmarkSet {
    /// Creates an empty landmark set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set with all 19 landmarks at their default positions.
    pub fn defaults() -> Self {
        LandmarkName::ALL
            .iter()
            .map(|name| (*name, name.default_position()))
            .collect()
    }

    /// Returns a copy of this set with the given positions replaced.
    pub fn with_overrides(mut self, overrides: &BTreeMap<LandmarkName, Vec3>) -> Self {
        for (name, position) in overrides {
            self.positions.insert(*name, *position);
        }
        self
    }

    /// Sets a landmark position.
    pub fn insert(&mut self, name: LandmarkName, position: Vec3) {
        self.positions.insert(name, position);
    }

    /// Returns the position of a landmark, if present.
    pub fn get(&self, name: LandmarkName) -> Option<Vec3> {
        self.positions.get(&name).copied()
    }

    /// Returns the height (Z) of a landmark, if present.
    pub fn z(&self, name: LandmarkName) -> Option<f64> {
        self.get(name).map(|p| p[2])
    }

    /// Returns true if the landmark is present.
    pub fn contains(&self, name: LandmarkName) -> bool {
        self.positions.contains_key(&name)
    }

    /// Returns the first landmark, in [`LandmarkName::ALL`] order, that is absent.
    pub fn first_missing(&self) -> Option<LandmarkName> {
        LandmarkName::ALL
            .iter()
            .copied()
            .find(|name| !self.contains(*name))
    }

    /// Number of landmarks present.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no landmarks are present.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates over present landmarks in name order.
    pub fn iter(&self) -> impl Iterator<Item = (LandmarkName, Vec3)> + '_ {
        self.positions.iter().map(|(name, pos)| (*name, *pos))
    }

    /// Returns the largest distance between a left/right pair once one side is
    /// reflected across X = 0. Pairs with a missing side are skipped.
    pub fn max_asymmetry(&self) -> f64 {
        self.iter()
            .filter(|(name, _)| name.side() == Side::Left)
            .filter_map(|(name, left)| {
                let right = self.get(name.mirror())?;
                let dx = -left[0] - right[0];
                let dy = left[1] - right[1];
                let dz = left[2] - right[2];
                Some((dx * dx + dy * dy + dz * dz).sqrt())
            })
            .fold(0.0, f64::max)
    }
}

impl FromIterator<(LandmarkName, Vec3)> for LandmarkSet {
    fn from_iter<T: IntoIterator<Item = (LandmarkName, Vec3)>>(iter: T) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}
