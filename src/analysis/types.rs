use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString};

pub const MAX_SCORE: f32 = 100.0;
pub const MIN_SCORE: f32 = 0.0;

pub const INCOMPLETE_POSE_FEEDBACK: &str = "Position yourself so your full body is visible";
pub const INCOMPLETE_POSE_ERROR: &str = "Incomplete pose detection";

/// The closed set of movements the engine knows how to grade.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Movement {
    Squat,
    #[strum(to_string = "bench", serialize = "bench-press", serialize = "benchpress")]
    Bench,
    Deadlift,
}

/// The outcome of grading one pose frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFeedback {
    /// Always within [0, 100].
    pub score: f32,
    pub feedback: Vec<String>,
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rep_completed: Option<bool>,
    /// Computed metrics. Only present when the pose passed validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, f32>>,
}

impl FormFeedback {
    /// Zero score with nothing to say. Returned for an absent or empty pose.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Zero score because required joints were not observed.
    pub fn incomplete() -> Self {
        Self {
            score: MIN_SCORE,
            feedback: vec![INCOMPLETE_POSE_FEEDBACK.to_string()],
            errors: vec![INCOMPLETE_POSE_ERROR.to_string()],
            rep_completed: None,
            details: None,
        }
    }

    pub fn is_incomplete(&self) -> bool {
        self.details.is_none()
            && self.errors.len() == 1
            && self.errors[0] == INCOMPLETE_POSE_ERROR
    }

    pub fn metric(&self, name: &str) -> Option<f32> {
        self.details.as_ref().and_then(|d| d.get(name).copied())
    }
}
