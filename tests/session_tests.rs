mod common;

use common::{assert_close, squat_at, squat_pose, ONE_REP};
use formforge::pose::LandmarkName::*;
use formforge::session::{analyze_session, ErrorCount};
use formforge::{FormAnalyzer, Movement, PoseFrame};

fn one_rep_session() -> Vec<PoseFrame> {
    let mut frames: Vec<PoseFrame> = ONE_REP
        .iter()
        .enumerate()
        .map(|(i, &y)| squat_at(i as f64, y))
        .collect();

    let mut lost = squat_at(20.0, 0.5);
    lost.remove(LeftAnkle);
    frames.push(lost);
    frames
}

#[test]
fn test_session_summary() {
    let frames = one_rep_session();
    let report = analyze_session(&FormAnalyzer::default(), Movement::Squat, &frames);

    assert_eq!(report.movement, Movement::Squat);
    assert_eq!(report.frame_count, 10);
    assert_eq!(report.evaluated_frames, 9);
    assert_eq!(report.incomplete_frames, 1);
    assert_eq!(report.rep_count(), 1);
    assert_close(report.mean_score, 100.0);
    assert_close(report.min_score, 100.0);
    assert_eq!(report.frames.len(), 10);
    assert!(report.frames[9].is_incomplete());
    // Incomplete frames are not counted as form errors.
    assert!(report.error_counts.is_empty());
}

#[test]
fn test_reps_use_timestamp_order() {
    let mut frames = one_rep_session();
    frames.reverse();
    let report = analyze_session(&FormAnalyzer::default(), Movement::Squat, &frames);

    assert_eq!(report.rep_count(), 1);
    assert_eq!(report.reps[0].started_at, 2.0);
    // Frame results keep the caller's order.
    assert!(report.frames[0].is_incomplete());
}

#[test]
fn test_error_counts_most_frequent_first() {
    let shallow = squat_pose()
        .with(LeftKnee, 0.4, 0.62)
        .with(RightKnee, 0.6, 0.62);
    let caving = squat_pose()
        .with(LeftKnee, 0.45, 0.8)
        .with(RightKnee, 0.55, 0.8);
    let frames = vec![shallow.clone(), caving, shallow, squat_pose()];

    let report = analyze_session(&FormAnalyzer::default(), Movement::Squat, &frames);
    assert_eq!(
        report.error_counts,
        vec![
            ErrorCount {
                message: "Squat is too shallow - sink your hips lower".to_string(),
                count: 2
            },
            ErrorCount {
                message: "Knees caving inward - push your knees out over your toes".to_string(),
                count: 1
            },
        ]
    );
    assert_close(report.min_score, 70.0);
    assert_close(report.max_score, 100.0);
    assert_close(report.mean_score, (75.0 + 70.0 + 75.0 + 100.0) / 4.0);
}

#[test]
fn test_empty_session() {
    let report = analyze_session(&FormAnalyzer::default(), Movement::Bench, &[]);
    assert_eq!(report.frame_count, 0);
    assert_eq!(report.mean_score, 0.0);
    assert_eq!(report.min_score, 0.0);
    assert!(report.reps.is_empty());
}

#[test]
fn test_report_serializes_camel_case() {
    let report = analyze_session(&FormAnalyzer::default(), Movement::Squat, &one_rep_session());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["movement"], "squat");
    assert_eq!(json["frameCount"], 10);
    assert_eq!(json["reps"][0]["rep"], 1);
    assert!(json["reps"][0]["completedAt"].is_number());
}
