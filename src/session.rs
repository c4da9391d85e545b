use crate::analysis::{FormAnalyzer, FormFeedback, Movement, RepEvent};
use crate::pose::PoseFrame;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCount {
    pub message: String,
    pub count: usize,
}

/// Aggregate view over a recorded set of frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub movement: Movement,
    pub frame_count: usize,
    /// Frames that passed landmark validation.
    pub evaluated_frames: usize,
    pub incomplete_frames: usize,
    pub mean_score: f32,
    pub min_score: f32,
    pub max_score: f32,
    /// Frames whose single-frame rep flag was set.
    pub rep_flag_frames: usize,
    pub reps: Vec<RepEvent>,
    /// Most frequent first.
    pub error_counts: Vec<ErrorCount>,
    pub frames: Vec<FormFeedback>,
}

impl SessionReport {
    pub fn rep_count(&self) -> usize {
        self.reps.len()
    }
}

/// Grades every frame, then replays them in timestamp order through a fresh
/// rep tracker. Frame results stay in input order.
pub fn analyze_session(analyzer: &FormAnalyzer, movement: Movement, frames: &[PoseFrame]) -> SessionReport {
    let results = analyzer.analyze_batch(movement, frames);

    let mut order: Vec<usize> = (0..frames.len()).collect();
    order.sort_by(|&a, &b| frames[a].timestamp.total_cmp(&frames[b].timestamp));

    let mut tracker = analyzer.rep_tracker(movement);
    let reps: Vec<RepEvent> = order
        .iter()
        .filter_map(|&i| tracker.observe(&frames[i]))
        .collect();

    let mut evaluated = 0usize;
    let mut incomplete = 0usize;
    let mut rep_flags = 0usize;
    let mut sum = 0.0f32;
    let mut min_score = f32::INFINITY;
    let mut max_score = f32::NEG_INFINITY;
    let mut errors: HashMap<&str, usize> = HashMap::new();

    for fb in &results {
        if fb.is_incomplete() {
            incomplete += 1;
            continue;
        }
        evaluated += 1;
        sum += fb.score;
        min_score = min_score.min(fb.score);
        max_score = max_score.max(fb.score);
        if fb.rep_completed == Some(true) {
            rep_flags += 1;
        }
        for e in &fb.errors {
            *errors.entry(e.as_str()).or_insert(0) += 1;
        }
    }

    let (mean_score, min_score, max_score) = if evaluated > 0 {
        (sum / evaluated as f32, min_score, max_score)
    } else {
        (0.0, 0.0, 0.0)
    };

    let mut error_counts: Vec<ErrorCount> = errors
        .into_iter()
        .map(|(message, count)| ErrorCount {
            message: message.to_string(),
            count,
        })
        .collect();
    error_counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.message.cmp(&b.message)));

    info!(
        "{} session: {} frames, {} evaluated, {} reps, mean score {:.1}",
        movement,
        frames.len(),
        evaluated,
        reps.len(),
        mean_score
    );

    SessionReport {
        movement,
        frame_count: frames.len(),
        evaluated_frames: evaluated,
        incomplete_frames: incomplete,
        mean_score,
        min_score,
        max_score,
        rep_flag_frames: rep_flags,
        reps,
        error_counts,
        frames: results,
    }
}
