mod common;

use common::{assert_close, squat_pose};
use formforge::analysis::squat::{METRIC_DEPTH, METRIC_LEAN, METRIC_SYMMETRY, METRIC_VALGUS};
use formforge::analysis::types::{INCOMPLETE_POSE_ERROR, INCOMPLETE_POSE_FEEDBACK};
use formforge::pose::LandmarkName::*;
use formforge::{FormAnalyzer, Movement, PoseFrame};
use rstest::rstest;

fn analyzer() -> FormAnalyzer {
    FormAnalyzer::default()
}

#[test]
fn test_perfect_squat() {
    let fb = analyzer().analyze(Movement::Squat, &squat_pose());

    assert_eq!(fb.score, 100.0);
    assert!(fb.errors.is_empty());
    assert_eq!(fb.feedback, vec!["Excellent depth!", "Great knee tracking!"]);
    assert_eq!(fb.rep_completed, Some(false));

    assert_close(fb.metric(METRIC_DEPTH).unwrap(), 0.5);
    assert_close(fb.metric(METRIC_VALGUS).unwrap(), 1.0);
    assert_close(fb.metric(METRIC_SYMMETRY).unwrap(), 0.0);
    // No shoulders: the lean check is skipped entirely.
    assert_eq!(fb.metric(METRIC_LEAN), None);
}

#[test]
fn test_missing_ankle_is_incomplete() {
    let mut pose = squat_pose();
    pose.remove(RightAnkle);

    let fb = analyzer().analyze(Movement::Squat, &pose);
    assert_eq!(fb.score, 0.0);
    assert_eq!(fb.feedback, vec![INCOMPLETE_POSE_FEEDBACK]);
    assert_eq!(fb.errors, vec![INCOMPLETE_POSE_ERROR]);
    assert!(fb.details.is_none());
    assert!(fb.is_incomplete());
    assert_eq!(
        analyzer().missing_landmarks(Movement::Squat, &pose),
        vec![RightAnkle]
    );
}

#[rstest]
#[case::shallow(0.62, 75.0, Some("Squat is too shallow - sink your hips lower"), None)]
#[case::almost(0.68, 95.0, None, Some("Go a little deeper for full range of motion"))]
#[case::deep(0.8, 100.0, None, Some("Excellent depth!"))]
fn test_depth_tiers(
    #[case] knee_y: f32,
    #[case] score: f32,
    #[case] error: Option<&str>,
    #[case] feedback: Option<&str>,
) {
    let pose = squat_pose()
        .with(LeftKnee, 0.4, knee_y)
        .with(RightKnee, 0.6, knee_y);
    let fb = analyzer().analyze(Movement::Squat, &pose);

    assert_close(fb.score, score);
    if let Some(e) = error {
        assert!(fb.errors.iter().any(|x| x == e), "{:?}", fb.errors);
    }
    if let Some(f) = feedback {
        assert!(fb.feedback.iter().any(|x| x == f), "{:?}", fb.feedback);
    }
}

#[rstest]
#[case::caving(0.45, 0.55, 70.0, "Knees caving inward - push your knees out over your toes")]
#[case::slight(0.42, 0.58, 90.0, "Slight knee cave - focus on driving your knees out")]
fn test_knee_valgus(
    #[case] left_x: f32,
    #[case] right_x: f32,
    #[case] score: f32,
    #[case] message: &str,
) {
    let pose = squat_pose()
        .with(LeftKnee, left_x, 0.8)
        .with(RightKnee, right_x, 0.8);
    let fb = analyzer().analyze(Movement::Squat, &pose);

    assert_close(fb.score, score);
    let all: Vec<&String> = fb.errors.iter().chain(fb.feedback.iter()).collect();
    assert!(all.iter().any(|m| *m == message), "{:?}", all);
}

#[rstest]
#[case::upright(0.4, 0.6, 100.0, "Good upright torso!")]
#[case::slight(0.47, 0.67, 95.0, "Slight forward lean - brace your core")]
#[case::excessive(0.55, 0.75, 80.0, "Excessive forward lean - keep your chest up")]
fn test_forward_lean(
    #[case] left_x: f32,
    #[case] right_x: f32,
    #[case] score: f32,
    #[case] message: &str,
) {
    let pose = squat_pose()
        .with(LeftShoulder, left_x, 0.2)
        .with(RightShoulder, right_x, 0.2);
    let fb = analyzer().analyze(Movement::Squat, &pose);

    assert_close(fb.score, score);
    assert!(fb.metric(METRIC_LEAN).is_some());
    let all: Vec<&String> = fb.errors.iter().chain(fb.feedback.iter()).collect();
    assert!(all.iter().any(|m| *m == message), "{:?}", all);
}

#[test]
fn test_uneven_legs() {
    // Left thigh 0.2 long, right thigh 0.1 long.
    let pose = squat_pose().with(RightKnee, 0.6, 0.7);
    let fb = analyzer().analyze(Movement::Squat, &pose);

    assert_close(fb.metric(METRIC_SYMMETRY).unwrap(), 0.5);
    assert_close(fb.score, 85.0);
    assert!(fb
        .errors
        .contains(&"Uneven stance - distribute weight evenly on both legs".to_string()));
}

#[test]
fn test_every_hard_tier_stacks() {
    let pose = squat_pose()
        .with(LeftKnee, 0.45, 0.6)
        .with(RightKnee, 0.55, 0.64)
        .with(LeftShoulder, 0.6, 0.2)
        .with(RightShoulder, 0.8, 0.2);
    let fb = analyzer().analyze(Movement::Squat, &pose);

    // 25 + 30 + 20 + 15
    assert_close(fb.score, 10.0);
    assert_eq!(fb.errors.len(), 4);
    assert!(fb.feedback.is_empty());
    assert_eq!(fb.rep_completed, Some(false));
}

#[test]
fn test_every_soft_tier_stacks() {
    let pose = squat_pose()
        .with(LeftKnee, 0.42, 0.68)
        .with(RightKnee, 0.58, 0.68)
        .with(LeftShoulder, 0.47, 0.2)
        .with(RightShoulder, 0.67, 0.2);
    let fb = analyzer().analyze(Movement::Squat, &pose);

    assert_close(fb.metric(METRIC_DEPTH).unwrap(), 0.2);
    assert_close(fb.metric(METRIC_VALGUS).unwrap(), 0.8);
    assert_close(fb.metric(METRIC_LEAN).unwrap(), 0.07);
    // 5 + 10 + 5
    assert_close(fb.score, 80.0);
    assert!(fb.errors.is_empty());
    assert_eq!(
        fb.feedback,
        vec![
            "Go a little deeper for full range of motion",
            "Slight knee cave - focus on driving your knees out",
            "Slight forward lean - brace your core",
        ]
    );
}

#[test]
fn test_rep_flag_needs_depth_and_hips_below_knees() {
    // Hips lower in the image than both knees and ankles.
    let pose = squat_with_heights(0.8, 0.6, 0.7);
    let fb = analyzer().analyze(Movement::Squat, &pose);
    assert_eq!(fb.rep_completed, Some(true));

    let standing = squat_with_heights(0.6, 0.8, 1.0);
    let fb = analyzer().analyze(Movement::Squat, &standing);
    assert_eq!(fb.rep_completed, Some(false));
}

fn squat_with_heights(hip_y: f32, knee_y: f32, ankle_y: f32) -> PoseFrame {
    squat_pose()
        .with(LeftHip, 0.4, hip_y)
        .with(RightHip, 0.6, hip_y)
        .with(LeftKnee, 0.4, knee_y)
        .with(RightKnee, 0.6, knee_y)
        .with(LeftAnkle, 0.4, ankle_y)
        .with(RightAnkle, 0.6, ankle_y)
}

#[test]
fn test_custom_thresholds_apply() {
    let mut config = formforge::config::AnalysisConfig::default();
    config.squat.squat_depth_warn = 0.6;
    config.squat.penalty_squat_depth_warn = 12.0;
    let analyzer = FormAnalyzer::new(config).unwrap();

    let fb = analyzer.analyze(Movement::Squat, &squat_pose());
    assert_close(fb.score, 88.0);
}
