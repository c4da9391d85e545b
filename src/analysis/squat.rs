use super::rules::{Direction, ScoreCard, Tier, TieredRule};
use super::types::Movement;
use super::validation::Joints;
use super::MovementEvaluator;
use crate::config::SquatRules;
use crate::geometry::{distance, relative_asymmetry, safe_ratio};
use crate::pose::{LandmarkName, PoseFrame};

use LandmarkName::{
    LeftAnkle, LeftHip, LeftKnee, LeftShoulder, RightAnkle, RightHip, RightKnee, RightShoulder,
};

pub const REQUIRED: [LandmarkName; 6] = [LeftHip, RightHip, LeftKnee, RightKnee, LeftAnkle, RightAnkle];

pub const METRIC_DEPTH: &str = "depthRatio";
pub const METRIC_VALGUS: &str = "kneeValgusRatio";
pub const METRIC_LEAN: &str = "forwardLean";
pub const METRIC_SYMMETRY: &str = "legSymmetry";

pub struct SquatEvaluator<'a> {
    pub rules: &'a SquatRules,
}

impl<'a> SquatEvaluator<'a> {
    pub fn new(rules: &'a SquatRules) -> Self {
        Self { rules }
    }

    fn depth_rule(&self) -> TieredRule {
        let r = self.rules;
        TieredRule {
            metric: METRIC_DEPTH,
            direction: Direction::Below,
            fail: Tier {
                threshold: r.squat_depth_fail,
                penalty: r.penalty_squat_depth_fail,
                message: "Squat is too shallow - sink your hips lower",
            },
            warn: Some(Tier {
                threshold: r.squat_depth_warn,
                penalty: r.penalty_squat_depth_warn,
                message: "Go a little deeper for full range of motion",
            }),
            pass: Some("Excellent depth!"),
        }
    }

    fn valgus_rule(&self) -> TieredRule {
        let r = self.rules;
        TieredRule {
            metric: METRIC_VALGUS,
            direction: Direction::Below,
            fail: Tier {
                threshold: r.squat_valgus_fail,
                penalty: r.penalty_squat_valgus_fail,
                message: "Knees caving inward - push your knees out over your toes",
            },
            warn: Some(Tier {
                threshold: r.squat_valgus_warn,
                penalty: r.penalty_squat_valgus_warn,
                message: "Slight knee cave - focus on driving your knees out",
            }),
            pass: Some("Great knee tracking!"),
        }
    }

    fn lean_rule(&self) -> TieredRule {
        let r = self.rules;
        TieredRule {
            metric: METRIC_LEAN,
            direction: Direction::Above,
            fail: Tier {
                threshold: r.squat_lean_fail,
                penalty: r.penalty_squat_lean_fail,
                message: "Excessive forward lean - keep your chest up",
            },
            warn: Some(Tier {
                threshold: r.squat_lean_warn,
                penalty: r.penalty_squat_lean_warn,
                message: "Slight forward lean - brace your core",
            }),
            pass: Some("Good upright torso!"),
        }
    }

    fn symmetry_rule(&self) -> TieredRule {
        TieredRule {
            metric: METRIC_SYMMETRY,
            direction: Direction::Above,
            fail: Tier {
                threshold: self.rules.squat_symmetry_fail,
                penalty: self.rules.penalty_squat_symmetry,
                message: "Uneven stance - distribute weight evenly on both legs",
            },
            warn: None,
            pass: None,
        }
    }
}

/// (avg knee y - avg hip y) / (avg ankle y - avg hip y), image Y pointing down.
pub fn depth_ratio(j: &Joints) -> f32 {
    let hip_y = j.center(LeftHip, RightHip).y;
    let knee_y = j.center(LeftKnee, RightKnee).y;
    let ankle_y = j.center(LeftAnkle, RightAnkle).y;
    safe_ratio(knee_y - hip_y, ankle_y - hip_y)
}

/// Knee width over hip width. Values well under 1 mean the knees collapse inward.
pub fn knee_valgus_ratio(j: &Joints) -> f32 {
    let knee_span = (j.at(LeftKnee).x - j.at(RightKnee).x).abs();
    let hip_span = (j.at(LeftHip).x - j.at(RightHip).x).abs();
    safe_ratio(knee_span, hip_span)
}

pub fn forward_lean(j: &Joints) -> Option<f32> {
    let shoulders = j.optional_center(LeftShoulder, RightShoulder)?;
    Some((shoulders.x - j.center(LeftHip, RightHip).x).abs())
}

pub fn leg_symmetry(j: &Joints) -> f32 {
    let left = distance(j.at(LeftHip), j.at(LeftKnee));
    let right = distance(j.at(RightHip), j.at(RightKnee));
    relative_asymmetry(left, right)
}

/// Hip-center height; grows as the lifter sinks.
pub fn rep_signal(pose: &PoseFrame) -> Option<f32> {
    let l = pose.point(LeftHip)?;
    let r = pose.point(RightHip)?;
    Some((l.y + r.y) / 2.0)
}

impl MovementEvaluator for SquatEvaluator<'_> {
    fn movement(&self) -> Movement {
        Movement::Squat
    }

    fn required_landmarks(&self) -> &'static [LandmarkName] {
        &REQUIRED
    }

    fn rules(&self) -> Vec<TieredRule> {
        vec![
            self.depth_rule(),
            self.valgus_rule(),
            self.lean_rule(),
            self.symmetry_rule(),
        ]
    }

    fn evaluate(&self, joints: &Joints, card: &mut ScoreCard) -> bool {
        let depth = depth_ratio(joints);
        card.apply(&self.depth_rule(), depth);
        card.apply(&self.valgus_rule(), knee_valgus_ratio(joints));

        if let Some(lean) = forward_lean(joints) {
            card.apply(&self.lean_rule(), lean);
        }

        card.apply(&self.symmetry_rule(), leg_symmetry(joints));

        // Bottom position: deep enough and hips at or below the knee line.
        let hip_y = joints.center(LeftHip, RightHip).y;
        let knee_y = joints.center(LeftKnee, RightKnee).y;
        depth > self.rules.squat_rep_depth && hip_y > knee_y
    }
}
