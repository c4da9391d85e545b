use super::rules::{Direction, ScoreCard, Tier, TieredRule};
use super::types::Movement;
use super::validation::Joints;
use super::MovementEvaluator;
use crate::config::BenchRules;
use crate::geometry::{angle_between, distance, relative_asymmetry};
use crate::pose::{LandmarkName, PoseFrame};

use LandmarkName::{LeftElbow, LeftShoulder, LeftWrist, RightElbow, RightShoulder, RightWrist};

pub const REQUIRED: [LandmarkName; 6] = [
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
];

pub const METRIC_ELBOW: &str = "elbowAngle";
pub const METRIC_ELBOW_LEFT: &str = "leftElbowAngle";
pub const METRIC_ELBOW_RIGHT: &str = "rightElbowAngle";
pub const METRIC_BAR_PATH: &str = "barPathDeviation";
pub const METRIC_SYMMETRY: &str = "armSymmetry";

pub struct BenchEvaluator<'a> {
    pub rules: &'a BenchRules,
}

impl<'a> BenchEvaluator<'a> {
    pub fn new(rules: &'a BenchRules) -> Self {
        Self { rules }
    }

    fn elbow_rule(&self) -> TieredRule {
        let r = self.rules;
        TieredRule {
            metric: METRIC_ELBOW,
            direction: Direction::Above,
            fail: Tier {
                threshold: r.bench_elbow_fail,
                penalty: r.penalty_bench_elbow_fail,
                message: "Elbows flared too wide - tuck them toward your torso",
            },
            warn: Some(Tier {
                threshold: r.bench_elbow_warn,
                penalty: r.penalty_bench_elbow_warn,
                message: "Slight elbow flare - tuck your elbows a little more",
            }),
            pass: Some("Good elbow position!"),
        }
    }

    fn bar_path_rule(&self) -> TieredRule {
        let r = self.rules;
        TieredRule {
            metric: METRIC_BAR_PATH,
            direction: Direction::Above,
            fail: Tier {
                threshold: r.bench_path_fail,
                penalty: r.penalty_bench_path_fail,
                message: "Bar path drifting - keep your wrists stacked over your shoulders",
            },
            warn: Some(Tier {
                threshold: r.bench_path_warn,
                penalty: r.penalty_bench_path_warn,
                message: "Minor bar drift - press straight up",
            }),
            pass: Some("Straight bar path!"),
        }
    }

    fn symmetry_rule(&self) -> TieredRule {
        TieredRule {
            metric: METRIC_SYMMETRY,
            direction: Direction::Above,
            fail: Tier {
                threshold: self.rules.bench_symmetry_fail,
                penalty: self.rules.penalty_bench_symmetry,
                message: "Uneven arm extension - press evenly with both arms",
            },
            warn: None,
            pass: None,
        }
    }
}

/// (left, right) angle at each elbow in degrees.
pub fn elbow_angles(j: &Joints) -> (f32, f32) {
    (
        angle_between(j.at(LeftShoulder), j.at(LeftElbow), j.at(LeftWrist)),
        angle_between(j.at(RightShoulder), j.at(RightElbow), j.at(RightWrist)),
    )
}

pub fn bar_path_deviation(j: &Joints) -> f32 {
    let wrists = j.center(LeftWrist, RightWrist);
    let shoulders = j.center(LeftShoulder, RightShoulder);
    (wrists.x - shoulders.x).abs()
}

pub fn arm_symmetry(j: &Joints) -> f32 {
    let left = distance(j.at(LeftShoulder), j.at(LeftWrist));
    let right = distance(j.at(RightShoulder), j.at(RightWrist));
    relative_asymmetry(left, right)
}

/// Wrist-center height; grows as the bar comes down.
pub fn rep_signal(pose: &PoseFrame) -> Option<f32> {
    let l = pose.point(LeftWrist)?;
    let r = pose.point(RightWrist)?;
    Some((l.y + r.y) / 2.0)
}

impl MovementEvaluator for BenchEvaluator<'_> {
    fn movement(&self) -> Movement {
        Movement::Bench
    }

    fn required_landmarks(&self) -> &'static [LandmarkName] {
        &REQUIRED
    }

    fn rules(&self) -> Vec<TieredRule> {
        vec![
            self.elbow_rule(),
            self.bar_path_rule(),
            self.symmetry_rule(),
        ]
    }

    fn evaluate(&self, joints: &Joints, card: &mut ScoreCard) -> bool {
        let (left, right) = elbow_angles(joints);
        let elbow = (left + right) / 2.0;
        card.record(METRIC_ELBOW_LEFT, left);
        card.record(METRIC_ELBOW_RIGHT, right);
        card.apply(&self.elbow_rule(), elbow);

        card.apply(&self.bar_path_rule(), bar_path_deviation(joints));
        card.apply(&self.symmetry_rule(), arm_symmetry(joints));

        // Lockout: both arms close to straight.
        elbow >= self.rules.bench_lockout_angle
    }
}
