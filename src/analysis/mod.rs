pub mod bench;
pub mod deadlift;
pub mod reps;
pub mod rules;
pub mod squat;
pub mod types;
pub mod validation;

pub use self::reps::{RepEvent, RepPhase, RepTracker};
pub use self::rules::ScoreCard;
pub use self::types::{FormFeedback, Movement};

use self::bench::BenchEvaluator;
use self::deadlift::DeadliftEvaluator;
use self::rules::TieredRule;
use self::squat::SquatEvaluator;
use self::validation::Joints;
use crate::config::AnalysisConfig;
use crate::error::{FormError, FormResult};
use crate::pose::{LandmarkName, PoseFrame};
use rayon::prelude::*;
use tracing::debug;

/// Movement-specific grading logic.
///
/// Implementations declare the joints they need; the analyzer validates the
/// frame against that set before calling `evaluate`, so `evaluate` only ever
/// sees complete poses.
pub trait MovementEvaluator {
    fn movement(&self) -> Movement;

    fn required_landmarks(&self) -> &'static [LandmarkName];

    /// Every graded rule, in evaluation order.
    fn rules(&self) -> Vec<TieredRule>;

    /// Applies every rule to `card` and returns the single-frame rep flag.
    fn evaluate(&self, joints: &Joints, card: &mut ScoreCard) -> bool;
}

impl Movement {
    pub fn required_landmarks(self) -> &'static [LandmarkName] {
        match self {
            Movement::Squat => &squat::REQUIRED,
            Movement::Bench => &bench::REQUIRED,
            Movement::Deadlift => &deadlift::REQUIRED,
        }
    }

    /// Vertical position of the body part that travels during a rep, used by
    /// [`RepTracker`]. Larger is lower in the image.
    pub fn rep_signal(self, pose: &PoseFrame) -> Option<f32> {
        match self {
            Movement::Squat => squat::rep_signal(pose),
            Movement::Bench => bench::rep_signal(pose),
            Movement::Deadlift => deadlift::rep_signal(pose),
        }
    }
}

/// Stateless form grader. Holds only the rule thresholds, so one instance
/// can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct FormAnalyzer {
    config: AnalysisConfig,
}

impl FormAnalyzer {
    pub fn new(config: AnalysisConfig) -> FormResult<Self> {
        config.validate()?;
        debug!("Form analyzer ready: {:?}", config);
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn with_evaluator<R>(&self, movement: Movement, f: impl FnOnce(&dyn MovementEvaluator) -> R) -> R {
        match movement {
            Movement::Squat => f(&SquatEvaluator::new(&self.config.squat)),
            Movement::Bench => f(&BenchEvaluator::new(&self.config.bench)),
            Movement::Deadlift => f(&DeadliftEvaluator::new(&self.config.deadlift)),
        }
    }

    /// Grades one frame.
    pub fn analyze(&self, movement: Movement, pose: &PoseFrame) -> FormFeedback {
        self.with_evaluator(movement, |evaluator| {
            match validation::validate(pose, evaluator.required_landmarks()) {
                Ok(joints) => {
                    let mut card = ScoreCard::new();
                    let rep_completed = evaluator.evaluate(&joints, &mut card);
                    card.finish(rep_completed)
                }
                Err(missing) => {
                    debug!(
                        "{} frame @{} missing landmarks: {:?}",
                        evaluator.movement(),
                        pose.timestamp,
                        missing
                    );
                    FormFeedback::incomplete()
                }
            }
        })
    }

    /// Grades one frame for a movement given by name.
    ///
    /// An unknown name is an error. An absent or empty pose yields
    /// [`FormFeedback::empty`].
    pub fn analyze_named(&self, movement: &str, pose: Option<&PoseFrame>) -> FormResult<FormFeedback> {
        let movement: Movement = movement
            .trim()
            .parse()
            .map_err(|_| FormError::UnsupportedMovement(movement.to_string()))?;

        match pose {
            Some(p) if !p.is_empty() => Ok(self.analyze(movement, p)),
            _ => {
                debug!("No landmarks supplied for {}", movement);
                Ok(FormFeedback::empty())
            }
        }
    }

    /// Grades many independent frames in parallel. Output order matches input.
    pub fn analyze_batch(&self, movement: Movement, frames: &[PoseFrame]) -> Vec<FormFeedback> {
        frames
            .par_iter()
            .map(|frame| self.analyze(movement, frame))
            .collect()
    }

    pub fn missing_landmarks(&self, movement: Movement, pose: &PoseFrame) -> Vec<LandmarkName> {
        validation::missing_landmarks(pose, movement.required_landmarks())
    }

    pub fn rules(&self, movement: Movement) -> Vec<TieredRule> {
        self.with_evaluator(movement, |evaluator| evaluator.rules())
    }

    pub fn rep_tracker(&self, movement: Movement) -> RepTracker {
        RepTracker::new(movement, self.config.reps.clone())
    }
}
