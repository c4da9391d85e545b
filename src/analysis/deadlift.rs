use super::rules::{Direction, ScoreCard, Tier, TieredRule};
use super::types::Movement;
use super::validation::Joints;
use super::MovementEvaluator;
use crate::config::DeadliftRules;
use crate::geometry::{angle_from_horizontal, distance};
use crate::pose::{LandmarkName, PoseFrame};

use LandmarkName::{
    LeftAnkle, LeftHip, LeftKnee, LeftShoulder, RightAnkle, RightHip, RightKnee, RightShoulder,
};

pub const REQUIRED: [LandmarkName; 6] = [
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
];

pub const METRIC_BACK: &str = "backAngle";
pub const METRIC_HINGE: &str = "hipHingeDistance";
pub const METRIC_KNEE_TOE: &str = "kneeOverToe";
pub const METRIC_TORSO: &str = "torsoOffset";

pub struct DeadliftEvaluator<'a> {
    pub rules: &'a DeadliftRules,
}

impl<'a> DeadliftEvaluator<'a> {
    pub fn new(rules: &'a DeadliftRules) -> Self {
        Self { rules }
    }

    fn back_rule(&self) -> TieredRule {
        let r = self.rules;
        TieredRule {
            metric: METRIC_BACK,
            direction: Direction::Above,
            fail: Tier {
                threshold: r.deadlift_back_fail,
                penalty: r.penalty_deadlift_back_fail,
                message: "Back angle too steep - keep a flat, neutral spine",
            },
            warn: Some(Tier {
                threshold: r.deadlift_back_warn,
                penalty: r.penalty_deadlift_back_warn,
                message: "Watch your back angle - stay braced",
            }),
            pass: Some("Good back position!"),
        }
    }

    fn hinge_rule(&self) -> TieredRule {
        let r = self.rules;
        TieredRule {
            metric: METRIC_HINGE,
            direction: Direction::Below,
            fail: Tier {
                threshold: r.deadlift_hinge_fail,
                penalty: r.penalty_deadlift_hinge_fail,
                message: "Not enough hip hinge - push your hips back",
            },
            warn: Some(Tier {
                threshold: r.deadlift_hinge_warn,
                penalty: r.penalty_deadlift_hinge_warn,
                message: "Hinge a little more at the hips",
            }),
            pass: Some("Great hip hinge!"),
        }
    }

    fn knee_toe_rule(&self) -> TieredRule {
        TieredRule {
            metric: METRIC_KNEE_TOE,
            direction: Direction::Above,
            fail: Tier {
                threshold: self.rules.deadlift_knee_toe_fail,
                penalty: self.rules.penalty_deadlift_knee_toe,
                message: "Knees drifting past your toes - keep your shins vertical",
            },
            warn: None,
            pass: None,
        }
    }
}

/// Magnitude of the torso's inclination measured from the horizontal axis.
pub fn back_angle(j: &Joints) -> f32 {
    let shoulders = j.center(LeftShoulder, RightShoulder);
    let hips = j.center(LeftHip, RightHip);
    angle_from_horizontal(shoulders, hips).abs()
}

pub fn hip_hinge_distance(j: &Joints) -> f32 {
    distance(j.center(LeftHip, RightHip), j.center(LeftKnee, RightKnee))
}

pub fn knee_over_toe(j: &Joints) -> Option<f32> {
    let ankles = j.optional_center(LeftAnkle, RightAnkle)?;
    Some((j.center(LeftKnee, RightKnee).x - ankles.x).abs())
}

pub fn torso_offset(j: &Joints) -> f32 {
    (j.center(LeftShoulder, RightShoulder).x - j.center(LeftHip, RightHip).x).abs()
}

/// Shoulder-center height; grows as the lifter bends over.
pub fn rep_signal(pose: &PoseFrame) -> Option<f32> {
    let l = pose.point(LeftShoulder)?;
    let r = pose.point(RightShoulder)?;
    Some((l.y + r.y) / 2.0)
}

impl MovementEvaluator for DeadliftEvaluator<'_> {
    fn movement(&self) -> Movement {
        Movement::Deadlift
    }

    fn required_landmarks(&self) -> &'static [LandmarkName] {
        &REQUIRED
    }

    fn rules(&self) -> Vec<TieredRule> {
        vec![
            self.back_rule(),
            self.hinge_rule(),
            self.knee_toe_rule(),
        ]
    }

    fn evaluate(&self, joints: &Joints, card: &mut ScoreCard) -> bool {
        card.apply(&self.back_rule(), back_angle(joints));
        card.apply(&self.hinge_rule(), hip_hinge_distance(joints));

        if let Some(offset) = knee_over_toe(joints) {
            card.apply(&self.knee_toe_rule(), offset);
        }

        // Locked out once the shoulders are stacked over the hips.
        let torso = torso_offset(joints);
        card.record(METRIC_TORSO, torso);
        torso < self.rules.deadlift_lockout_offset
    }
}
