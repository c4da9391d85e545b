use super::types::Movement;
use crate::config::RepTrackerConfig;
use crate::pose::PoseFrame;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepPhase {
    Top,
    Descending,
    Bottom,
    Ascending,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepEvent {
    /// 1-based rep number.
    pub rep: usize,
    /// Distance between the top of the rep and its deepest sample.
    pub depth: f32,
    pub started_at: f64,
    pub completed_at: f64,
}

/// Counts full repetitions across a stream of frames.
///
/// Each movement supplies a vertical signal (see [`Movement::rep_signal`]).
/// A rep is one `Top -> Descending -> Bottom -> Ascending -> Top` cycle.
/// The top reference is the lowest signal in a bounded history window,
/// frozen when the descent starts.
#[derive(Debug, Clone)]
pub struct RepTracker {
    movement: Movement,
    config: RepTrackerConfig,
    history: VecDeque<f32>,
    phase: RepPhase,
    count: usize,
    top: f32,
    deepest: f32,
    last: f32,
    started_at: f64,
}

impl RepTracker {
    pub fn new(movement: Movement, config: RepTrackerConfig) -> Self {
        let capacity = config.rep_history_len.max(2);
        Self {
            movement,
            config,
            history: VecDeque::with_capacity(capacity.min(256)),
            phase: RepPhase::Top,
            count: 0,
            top: 0.0,
            deepest: 0.0,
            last: 0.0,
            started_at: 0.0,
        }
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    pub fn phase(&self) -> RepPhase {
        self.phase
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.phase = RepPhase::Top;
        self.count = 0;
        self.top = 0.0;
        self.deepest = 0.0;
        self.last = 0.0;
        self.started_at = 0.0;
    }

    /// Feeds one frame. Frames missing the tracked joints are ignored.
    pub fn observe(&mut self, pose: &PoseFrame) -> Option<RepEvent> {
        let signal = self.movement.rep_signal(pose)?;
        self.observe_signal(pose.timestamp, signal)
    }

    pub fn observe_signal(&mut self, timestamp: f64, signal: f32) -> Option<RepEvent> {
        if !signal.is_finite() {
            return None;
        }

        let capacity = self.config.rep_history_len.max(2);
        while self.history.len() >= capacity {
            self.history.pop_front();
        }
        self.history.push_back(signal);

        let mut event = None;
        match self.phase {
            RepPhase::Top => {
                let top = self.history.iter().copied().fold(f32::INFINITY, f32::min);
                if signal - top > self.config.rep_descent_threshold {
                    self.top = top;
                    self.deepest = signal;
                    self.started_at = timestamp;
                    self.phase = RepPhase::Descending;
                }
            }
            RepPhase::Descending => {
                if signal > self.deepest {
                    self.deepest = signal;
                } else if self.deepest - signal >= self.config.rep_reversal_threshold {
                    self.phase = RepPhase::Bottom;
                }
            }
            RepPhase::Bottom => {
                if signal > self.deepest {
                    self.deepest = signal;
                    self.phase = RepPhase::Descending;
                } else if signal <= self.last {
                    self.phase = RepPhase::Ascending;
                }
            }
            RepPhase::Ascending => {
                if signal > self.deepest {
                    self.deepest = signal;
                    self.phase = RepPhase::Descending;
                }
            }
        }

        // A single sample can jump from the bottom straight back to the top.
        if matches!(self.phase, RepPhase::Bottom | RepPhase::Ascending)
            && signal - self.top < self.config.rep_lockout_threshold
        {
            self.count += 1;
            self.phase = RepPhase::Top;
            let rep = RepEvent {
                rep: self.count,
                depth: self.deepest - self.top,
                started_at: self.started_at,
                completed_at: timestamp,
            };
            debug!("{} rep {} completed: {:?}", self.movement, self.count, rep);
            event = Some(rep);
        }

        self.last = signal;
        event
    }
}
