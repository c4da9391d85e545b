use crate::geometry::{midpoint, Point};
use crate::pose::{LandmarkName, PoseFrame};
use std::collections::BTreeMap;

/// A pose that has been checked against a movement's required joints.
///
/// Required joints are copied out up front so evaluators read them without
/// re-checking presence. Optional joints are looked up in the original frame.
pub struct Joints<'a> {
    required: BTreeMap<LandmarkName, Point>,
    pose: &'a PoseFrame,
}

impl<'a> Joints<'a> {
    /// Position of a required joint.
    pub fn at(&self, name: LandmarkName) -> Point {
        match self.required.get(&name) {
            Some(p) => *p,
            None => self.pose.point(name).unwrap_or_default(),
        }
    }

    pub fn optional(&self, name: LandmarkName) -> Option<Point> {
        self.pose.point(name)
    }

    /// Midpoint of a required left/right pair.
    pub fn center(&self, left: LandmarkName, right: LandmarkName) -> Point {
        midpoint(self.at(left), self.at(right))
    }

    /// Midpoint of an optional pair, only when both sides were observed.
    pub fn optional_center(&self, left: LandmarkName, right: LandmarkName) -> Option<Point> {
        match (self.optional(left), self.optional(right)) {
            (Some(l), Some(r)) => Some(midpoint(l, r)),
            _ => None,
        }
    }
}

/// Required joints absent from `pose`, in declaration order.
pub fn missing_landmarks(pose: &PoseFrame, required: &[LandmarkName]) -> Vec<LandmarkName> {
    required
        .iter()
        .copied()
        .filter(|name| !pose.contains(*name))
        .collect()
}

/// Presence check only; visibility scores are not consulted.
pub fn validate<'a>(
    pose: &'a PoseFrame,
    required: &[LandmarkName],
) -> Result<Joints<'a>, Vec<LandmarkName>> {
    let mut points = BTreeMap::new();
    let mut missing = Vec::new();

    for &name in required {
        match pose.point(name) {
            Some(p) => {
                points.insert(name, p);
            }
            None => missing.push(name),
        }
    }

    if missing.is_empty() {
        Ok(Joints {
            required: points,
            pose,
        })
    } else {
        Err(missing)
    }
}
