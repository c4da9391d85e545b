use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The landmark vocabulary of the upstream pose estimator (33-point
/// MediaPipe topology), keyed in camelCase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LandmarkName {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl LandmarkName {
    /// The same joint on the other side of the body. Midline points map to themselves.
    pub fn mirrored(self) -> Self {
        use LandmarkName::*;
        match self {
            Nose => Nose,
            LeftEyeInner => RightEyeInner,
            LeftEye => RightEye,
            LeftEyeOuter => RightEyeOuter,
            RightEyeInner => LeftEyeInner,
            RightEye => LeftEye,
            RightEyeOuter => LeftEyeOuter,
            LeftEar => RightEar,
            RightEar => LeftEar,
            MouthLeft => MouthRight,
            MouthRight => MouthLeft,
            LeftShoulder => RightShoulder,
            RightShoulder => LeftShoulder,
            LeftElbow => RightElbow,
            RightElbow => LeftElbow,
            LeftWrist => RightWrist,
            RightWrist => LeftWrist,
            LeftPinky => RightPinky,
            RightPinky => LeftPinky,
            LeftIndex => RightIndex,
            RightIndex => LeftIndex,
            LeftThumb => RightThumb,
            RightThumb => LeftThumb,
            LeftHip => RightHip,
            RightHip => LeftHip,
            LeftKnee => RightKnee,
            RightKnee => LeftKnee,
            LeftAnkle => RightAnkle,
            RightAnkle => LeftAnkle,
            LeftHeel => RightHeel,
            RightHeel => LeftHeel,
            LeftFootIndex => RightFootIndex,
            RightFootIndex => LeftFootIndex,
        }
    }
}

/// A single body joint in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    #[inline(always)]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// All landmarks observed at one timestamp.
///
/// Keys are the estimator's landmark names. A missing key means the joint
/// was not observed in this frame. Names outside [`LandmarkName`] are kept
/// but never read by the evaluators.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseFrame {
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub landmarks: BTreeMap<String, Landmark>,
}

impl PoseFrame {
    pub fn new(timestamp: f64) -> Self {
        Self {
            timestamp,
            landmarks: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: LandmarkName, x: f32, y: f32) -> Self {
        self.insert(name, Landmark::new(x, y));
        self
    }

    pub fn insert(&mut self, name: LandmarkName, landmark: Landmark) {
        self.landmarks.insert(name.as_ref().to_string(), landmark);
    }

    pub fn remove(&mut self, name: LandmarkName) -> Option<Landmark> {
        self.landmarks.remove(name.as_ref())
    }

    pub fn get(&self, name: LandmarkName) -> Option<&Landmark> {
        self.landmarks.get(name.as_ref())
    }

    pub fn point(&self, name: LandmarkName) -> Option<Point> {
        self.get(name).map(Landmark::point)
    }

    pub fn contains(&self, name: LandmarkName) -> bool {
        self.landmarks.contains_key(name.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    /// Swaps every left/right label, keeping coordinates. Unknown names are kept as-is.
    pub fn swap_sides(&self) -> PoseFrame {
        let mut out = PoseFrame::new(self.timestamp);
        for (key, lm) in &self.landmarks {
            let key = match key.parse::<LandmarkName>() {
                Ok(name) => name.mirrored().as_ref().to_string(),
                Err(_) => key.clone(),
            };
            out.landmarks.insert(key, *lm);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_use_camel_case_keys() {
        assert_eq!(LandmarkName::LeftHip.as_ref(), "leftHip");
        assert_eq!(LandmarkName::RightFootIndex.to_string(), "rightFootIndex");
        assert_eq!("leftShoulder".parse::<LandmarkName>().ok(), Some(LandmarkName::LeftShoulder));
    }

    #[test]
    fn swap_sides_moves_labels_not_coordinates() {
        let frame = PoseFrame::new(1.0)
            .with(LandmarkName::LeftHip, 0.4, 0.6)
            .with(LandmarkName::Nose, 0.5, 0.1);
        let swapped = frame.swap_sides();
        assert_eq!(swapped.point(LandmarkName::RightHip), Some(Point::new(0.4, 0.6)));
        assert!(!swapped.contains(LandmarkName::LeftHip));
        assert!(swapped.contains(LandmarkName::Nose));
    }
}
