#![allow(dead_code)]

use formforge::pose::{LandmarkName, PoseFrame};
use LandmarkName::*;

/// Scenario A: a clean, well-proportioned squat without shoulders.
pub fn squat_pose() -> PoseFrame {
    PoseFrame::new(0.0)
        .with(LeftHip, 0.4, 0.6)
        .with(RightHip, 0.6, 0.6)
        .with(LeftKnee, 0.4, 0.8)
        .with(RightKnee, 0.6, 0.8)
        .with(LeftAnkle, 0.4, 1.0)
        .with(RightAnkle, 0.6, 1.0)
}

/// Squat with the hip center at height `hip_y`, everything else from [`squat_pose`].
pub fn squat_at(timestamp: f64, hip_y: f32) -> PoseFrame {
    let mut p = squat_pose()
        .with(LeftHip, 0.4, hip_y)
        .with(RightHip, 0.6, hip_y);
    p.timestamp = timestamp;
    p
}

/// Bench pose with shoulders at y=0.3, elbows at y=0.5 and the given wrists.
pub fn bench_pose(left_wrist: (f32, f32), right_wrist: (f32, f32)) -> PoseFrame {
    PoseFrame::new(0.0)
        .with(LeftShoulder, 0.3, 0.3)
        .with(RightShoulder, 0.7, 0.3)
        .with(LeftElbow, 0.3, 0.5)
        .with(RightElbow, 0.7, 0.5)
        .with(LeftWrist, left_wrist.0, left_wrist.1)
        .with(RightWrist, right_wrist.0, right_wrist.1)
}

/// Scenario C: both elbows bent at 90 degrees, wrists centered under the shoulders.
pub fn bench_flare_pose() -> PoseFrame {
    bench_pose((0.5, 0.5), (0.5, 0.5))
}

/// A hinged deadlift with a nearly horizontal torso and a clear hip-knee gap.
pub fn deadlift_pose() -> PoseFrame {
    PoseFrame::new(0.0)
        .with(LeftShoulder, 0.3, 0.49)
        .with(RightShoulder, 0.3, 0.51)
        .with(LeftHip, 0.6, 0.54)
        .with(RightHip, 0.6, 0.56)
        .with(LeftKnee, 0.6, 0.74)
        .with(RightKnee, 0.6, 0.76)
}

/// Signal trace for one clean rep: top at 0.5, bottom at 0.65.
pub const ONE_REP: [f32; 9] = [0.5, 0.52, 0.56, 0.6, 0.65, 0.62, 0.58, 0.53, 0.505];

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {} but got {}",
        expected,
        actual
    );
}
