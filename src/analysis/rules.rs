use super::types::{FormFeedback, MAX_SCORE, MIN_SCORE};
use std::collections::BTreeMap;

/// Which side of a threshold counts as bad form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Triggered when the metric is strictly below the threshold.
    Below,
    /// Triggered when the metric is strictly above the threshold.
    Above,
}

impl Direction {
    #[inline(always)]
    fn triggers(self, value: f32, threshold: f32) -> bool {
        match self {
            Direction::Below => value < threshold,
            Direction::Above => value > threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub threshold: f32,
    pub penalty: f32,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Fail,
    Warn,
    Pass,
}

/// A graded check: a hard tier, an optional soft tier and an optional
/// message for passing it. Hard tiers write to `errors`, everything else
/// to `feedback`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TieredRule {
    pub metric: &'static str,
    pub direction: Direction,
    pub fail: Tier,
    pub warn: Option<Tier>,
    pub pass: Option<&'static str>,
}

impl TieredRule {
    pub fn classify(&self, value: f32) -> Verdict {
        if self.direction.triggers(value, self.fail.threshold) {
            return Verdict::Fail;
        }
        match self.warn {
            Some(w) if self.direction.triggers(value, w.threshold) => Verdict::Warn,
            _ => Verdict::Pass,
        }
    }
}

/// Running tally for one evaluation: starts at 100 and loses points as
/// rules trigger.
#[derive(Debug, Clone)]
pub struct ScoreCard {
    penalties: f32,
    feedback: Vec<String>,
    errors: Vec<String>,
    details: BTreeMap<String, f32>,
}

impl Default for ScoreCard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreCard {
    pub fn new() -> Self {
        Self {
            penalties: 0.0,
            feedback: Vec::new(),
            errors: Vec::new(),
            details: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, metric: &str, value: f32) {
        self.details.insert(metric.to_string(), value);
    }

    pub fn fail(&mut self, penalty: f32, message: &str) {
        self.penalties += penalty;
        self.errors.push(message.to_string());
    }

    pub fn warn(&mut self, penalty: f32, message: &str) {
        self.penalties += penalty;
        self.feedback.push(message.to_string());
    }

    pub fn praise(&mut self, message: &str) {
        self.feedback.push(message.to_string());
    }

    /// Records the metric and applies whichever tier it lands in.
    pub fn apply(&mut self, rule: &TieredRule, value: f32) -> Verdict {
        self.record(rule.metric, value);
        let verdict = rule.classify(value);
        match verdict {
            Verdict::Fail => self.fail(rule.fail.penalty, rule.fail.message),
            Verdict::Warn => {
                if let Some(w) = rule.warn {
                    self.warn(w.penalty, w.message);
                }
            }
            Verdict::Pass => {
                if let Some(msg) = rule.pass {
                    self.praise(msg);
                }
            }
        }
        verdict
    }

    pub fn penalties(&self) -> f32 {
        self.penalties
    }

    pub fn score(&self) -> f32 {
        (MAX_SCORE - self.penalties).clamp(MIN_SCORE, MAX_SCORE)
    }

    pub fn finish(self, rep_completed: bool) -> FormFeedback {
        FormFeedback {
            score: self.score(),
            feedback: self.feedback,
            errors: self.errors,
            rep_completed: Some(rep_completed),
            details: Some(self.details),
        }
    }
}
