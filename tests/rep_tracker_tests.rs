mod common;

use common::{assert_close, squat_at, ONE_REP};
use formforge::analysis::{RepPhase, RepTracker};
use formforge::config::RepTrackerConfig;
use formforge::pose::LandmarkName::*;
use formforge::{FormAnalyzer, Movement, PoseFrame};

fn tracker() -> RepTracker {
    RepTracker::new(Movement::Squat, RepTrackerConfig::default())
}

fn feed(tracker: &mut RepTracker, signals: &[f32], t0: f64) -> Vec<formforge::analysis::RepEvent> {
    signals
        .iter()
        .enumerate()
        .filter_map(|(i, &s)| tracker.observe_signal(t0 + i as f64, s))
        .collect()
}

#[test]
fn test_counts_one_full_cycle() {
    let mut t = tracker();
    let reps = feed(&mut t, &ONE_REP, 0.0);

    assert_eq!(reps.len(), 1);
    assert_eq!(t.count(), 1);
    assert_eq!(t.phase(), RepPhase::Top);

    let rep = reps[0];
    assert_eq!(rep.rep, 1);
    assert_close(rep.depth, 0.15);
    assert_eq!(rep.started_at, 2.0);
    assert_eq!(rep.completed_at, 8.0);
}

#[test]
fn test_phases_follow_the_cycle() {
    let mut t = tracker();
    let mut phases = Vec::new();
    for (i, &s) in ONE_REP.iter().enumerate() {
        t.observe_signal(i as f64, s);
        phases.push(t.phase());
    }
    assert_eq!(
        phases,
        vec![
            RepPhase::Top,
            RepPhase::Top,
            RepPhase::Descending,
            RepPhase::Descending,
            RepPhase::Descending,
            RepPhase::Bottom,
            RepPhase::Ascending,
            RepPhase::Ascending,
            RepPhase::Top,
        ]
    );
}

#[test]
fn test_counts_consecutive_reps() {
    let mut t = tracker();
    let mut reps = feed(&mut t, &ONE_REP, 0.0);
    reps.extend(feed(&mut t, &ONE_REP, 10.0));
    reps.extend(feed(&mut t, &ONE_REP, 20.0));

    assert_eq!(reps.iter().map(|r| r.rep).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(reps[2].started_at, 22.0);
}

#[test]
fn test_shallow_bobbing_is_not_a_rep() {
    let mut t = tracker();
    let signals = [0.5, 0.52, 0.53, 0.52, 0.5, 0.52, 0.54, 0.51, 0.5];
    assert!(feed(&mut t, &signals, 0.0).is_empty());
    assert_eq!(t.phase(), RepPhase::Top);
}

#[test]
fn test_half_rep_without_lockout() {
    let mut t = tracker();
    // Comes back up only to 0.55, never within the lockout band of 0.5.
    let signals = [0.5, 0.56, 0.6, 0.65, 0.62, 0.58, 0.55, 0.55];
    assert!(feed(&mut t, &signals, 0.0).is_empty());
    assert_eq!(t.phase(), RepPhase::Ascending);
    assert_eq!(t.count(), 0);
}

#[test]
fn test_redescent_extends_the_bottom() {
    let mut t = tracker();
    let signals = [0.5, 0.56, 0.65, 0.62, 0.58, 0.7, 0.66, 0.6, 0.51];
    let reps = feed(&mut t, &signals, 0.0);
    assert_eq!(reps.len(), 1);
    assert_close(reps[0].depth, 0.2);
}

#[test]
fn test_history_is_bounded_and_non_finite_ignored() {
    let config = RepTrackerConfig {
        rep_history_len: 4,
        ..Default::default()
    };
    let mut t = RepTracker::new(Movement::Bench, config);
    for i in 0..10 {
        t.observe_signal(i as f64, 0.5);
    }
    assert_eq!(t.history_len(), 4);

    t.observe_signal(11.0, f32::NAN);
    assert_eq!(t.history_len(), 4);

    t.reset();
    assert_eq!(t.history_len(), 0);
    assert_eq!(t.count(), 0);
}

#[test]
fn test_frames_without_tracked_joints_are_skipped() {
    let mut t = tracker();
    let frame = PoseFrame::new(0.0).with(LeftKnee, 0.4, 0.8);
    assert_eq!(t.observe(&frame), None);
    assert_eq!(t.history_len(), 0);
}

#[test]
fn test_observes_squat_frames() {
    let mut t = FormAnalyzer::default().rep_tracker(Movement::Squat);
    let reps: Vec<_> = ONE_REP
        .iter()
        .enumerate()
        .filter_map(|(i, &y)| t.observe(&squat_at(i as f64 * 0.1, y)))
        .collect();
    assert_eq!(reps.len(), 1);
    assert_eq!(t.movement(), Movement::Squat);
}

#[test]
fn test_bench_and_deadlift_signals() {
    let bench = PoseFrame::new(0.0)
        .with(LeftWrist, 0.4, 0.3)
        .with(RightWrist, 0.6, 0.5);
    assert_close(Movement::Bench.rep_signal(&bench).unwrap(), 0.4);
    assert_eq!(Movement::Deadlift.rep_signal(&bench), None);

    let deadlift = PoseFrame::new(0.0)
        .with(LeftShoulder, 0.4, 0.2)
        .with(RightShoulder, 0.6, 0.4);
    assert_close(Movement::Deadlift.rep_signal(&deadlift).unwrap(), 0.3);
}

#[test]
fn test_sparse_samples_jump_from_bottom_to_top() {
    let mut t = tracker();
    let reps = feed(&mut t, &[0.5, 0.6, 0.7, 0.5], 0.0);
    assert_eq!(reps.len(), 1);
    assert_eq!(t.phase(), RepPhase::Top);
    assert_eq!(reps[0].completed_at, 3.0);

    let mut t = tracker();
    let reps = feed(&mut t, &[0.5, 0.6, 0.7, 0.5, 0.6, 0.7, 0.5, 0.5], 0.0);
    assert_eq!(reps.iter().map(|r| r.rep).collect::<Vec<_>>(), vec![1, 2]);
    assert_close(reps[1].depth, 0.2);
    assert_eq!(reps[1].started_at, 4.0);
}
