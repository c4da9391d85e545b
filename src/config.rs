use crate::error::{FormError, FormResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Longest rep-tracker history a rules file may ask for.
pub const MAX_REP_HISTORY: usize = 10_000;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    #[command(flatten)]
    pub squat: SquatRules,
    #[command(flatten)]
    pub bench: BenchRules,
    #[command(flatten)]
    pub deadlift: DeadliftRules,
    #[command(flatten)]
    pub reps: RepTrackerConfig,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SquatRules {
    // === DEPTH (lower ratio = shallower) ===
    #[arg(long, default_value_t = 0.1)]
    pub squat_depth_fail: f32,
    #[arg(long, default_value_t = 0.3)]
    pub squat_depth_warn: f32,
    #[arg(long, default_value_t = 25.0)]
    pub penalty_squat_depth_fail: f32,
    #[arg(long, default_value_t = 5.0)]
    pub penalty_squat_depth_warn: f32,

    // === KNEE VALGUS (knee span / hip span) ===
    #[arg(long, default_value_t = 0.7)]
    pub squat_valgus_fail: f32,
    #[arg(long, default_value_t = 0.85)]
    pub squat_valgus_warn: f32,
    #[arg(long, default_value_t = 30.0)]
    pub penalty_squat_valgus_fail: f32,
    #[arg(long, default_value_t = 10.0)]
    pub penalty_squat_valgus_warn: f32,

    // === FORWARD LEAN (shoulder/hip horizontal offset) ===
    #[arg(long, default_value_t = 0.1)]
    pub squat_lean_fail: f32,
    #[arg(long, default_value_t = 0.05)]
    pub squat_lean_warn: f32,
    #[arg(long, default_value_t = 20.0)]
    pub penalty_squat_lean_fail: f32,
    #[arg(long, default_value_t = 5.0)]
    pub penalty_squat_lean_warn: f32,

    // === SYMMETRY ===
    #[arg(long, default_value_t = 0.15)]
    pub squat_symmetry_fail: f32,
    #[arg(long, default_value_t = 15.0)]
    pub penalty_squat_symmetry: f32,

    #[arg(long, default_value_t = 0.2)]
    pub squat_rep_depth: f32,
}

impl Default for SquatRules {
    fn default() -> Self {
        Self {
            squat_depth_fail: 0.1,
            squat_depth_warn: 0.3,
            penalty_squat_depth_fail: 25.0,
            penalty_squat_depth_warn: 5.0,
            squat_valgus_fail: 0.7,
            squat_valgus_warn: 0.85,
            penalty_squat_valgus_fail: 30.0,
            penalty_squat_valgus_warn: 10.0,
            squat_lean_fail: 0.1,
            squat_lean_warn: 0.05,
            penalty_squat_lean_fail: 20.0,
            penalty_squat_lean_warn: 5.0,
            squat_symmetry_fail: 0.15,
            penalty_squat_symmetry: 15.0,
            squat_rep_depth: 0.2,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BenchRules {
    // === ELBOW ANGLE (degrees) ===
    #[arg(long, default_value_t = 100.0)]
    pub bench_elbow_fail: f32,
    #[arg(long, default_value_t = 85.0)]
    pub bench_elbow_warn: f32,
    #[arg(long, default_value_t = 25.0)]
    pub penalty_bench_elbow_fail: f32,
    #[arg(long, default_value_t = 10.0)]
    pub penalty_bench_elbow_warn: f32,

    // === BAR PATH (wrist/shoulder horizontal offset) ===
    #[arg(long, default_value_t = 0.08)]
    pub bench_path_fail: f32,
    #[arg(long, default_value_t = 0.04)]
    pub bench_path_warn: f32,
    #[arg(long, default_value_t = 20.0)]
    pub penalty_bench_path_fail: f32,
    #[arg(long, default_value_t = 5.0)]
    pub penalty_bench_path_warn: f32,

    // === SYMMETRY ===
    #[arg(long, default_value_t = 0.1)]
    pub bench_symmetry_fail: f32,
    #[arg(long, default_value_t = 15.0)]
    pub penalty_bench_symmetry: f32,

    // Arms count as locked out at or above this mean elbow angle.
    #[arg(long, default_value_t = 160.0)]
    pub bench_lockout_angle: f32,
}

impl Default for BenchRules {
    fn default() -> Self {
        Self {
            bench_elbow_fail: 100.0,
            bench_elbow_warn: 85.0,
            penalty_bench_elbow_fail: 25.0,
            penalty_bench_elbow_warn: 10.0,
            bench_path_fail: 0.08,
            bench_path_warn: 0.04,
            penalty_bench_path_fail: 20.0,
            penalty_bench_path_warn: 5.0,
            bench_symmetry_fail: 0.1,
            penalty_bench_symmetry: 15.0,
            bench_lockout_angle: 160.0,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeadliftRules {
    // === BACK ANGLE (degrees from horizontal) ===
    #[arg(long, default_value_t = 30.0)]
    pub deadlift_back_fail: f32,
    #[arg(long, default_value_t = 15.0)]
    pub deadlift_back_warn: f32,
    #[arg(long, default_value_t = 30.0)]
    pub penalty_deadlift_back_fail: f32,
    #[arg(long, default_value_t = 10.0)]
    pub penalty_deadlift_back_warn: f32,

    // === HIP HINGE (hip-center to knee-center distance) ===
    #[arg(long, default_value_t = 0.1)]
    pub deadlift_hinge_fail: f32,
    #[arg(long, default_value_t = 0.15)]
    pub deadlift_hinge_warn: f32,
    #[arg(long, default_value_t = 25.0)]
    pub penalty_deadlift_hinge_fail: f32,
    #[arg(long, default_value_t = 5.0)]
    pub penalty_deadlift_hinge_warn: f32,

    // === KNEE OVER TOE ===
    #[arg(long, default_value_t = 0.08)]
    pub deadlift_knee_toe_fail: f32,
    #[arg(long, default_value_t = 15.0)]
    pub penalty_deadlift_knee_toe: f32,

    // Torso counts as upright below this shoulder/hip horizontal offset.
    #[arg(long, default_value_t = 0.05)]
    pub deadlift_lockout_offset: f32,
}

impl Default for DeadliftRules {
    fn default() -> Self {
        Self {
            deadlift_back_fail: 30.0,
            deadlift_back_warn: 15.0,
            penalty_deadlift_back_fail: 30.0,
            penalty_deadlift_back_warn: 10.0,
            deadlift_hinge_fail: 0.1,
            deadlift_hinge_warn: 0.15,
            penalty_deadlift_hinge_fail: 25.0,
            penalty_deadlift_hinge_warn: 5.0,
            deadlift_knee_toe_fail: 0.08,
            penalty_deadlift_knee_toe: 15.0,
            deadlift_lockout_offset: 0.05,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RepTrackerConfig {
    /// Samples kept for the moving top-of-rep reference.
    #[arg(long, default_value_t = 90)]
    pub rep_history_len: usize,
    #[arg(long, default_value_t = 0.05)]
    pub rep_descent_threshold: f32,
    #[arg(long, default_value_t = 0.02)]
    pub rep_reversal_threshold: f32,
    #[arg(long, default_value_t = 0.02)]
    pub rep_lockout_threshold: f32,
}

impl Default for RepTrackerConfig {
    fn default() -> Self {
        Self {
            rep_history_len: 90,
            rep_descent_threshold: 0.05,
            rep_reversal_threshold: 0.02,
            rep_lockout_threshold: 0.02,
        }
    }
}

impl AnalysisConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> FormResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> FormResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Checks tier ordering and that every value is usable.
    pub fn validate(&self) -> FormResult<()> {
        let s = &self.squat;
        let b = &self.bench;
        let d = &self.deadlift;
        let r = &self.reps;

        let values = [
            ("squat_depth_fail", s.squat_depth_fail),
            ("squat_depth_warn", s.squat_depth_warn),
            ("penalty_squat_depth_fail", s.penalty_squat_depth_fail),
            ("penalty_squat_depth_warn", s.penalty_squat_depth_warn),
            ("squat_valgus_fail", s.squat_valgus_fail),
            ("squat_valgus_warn", s.squat_valgus_warn),
            ("penalty_squat_valgus_fail", s.penalty_squat_valgus_fail),
            ("penalty_squat_valgus_warn", s.penalty_squat_valgus_warn),
            ("squat_lean_fail", s.squat_lean_fail),
            ("squat_lean_warn", s.squat_lean_warn),
            ("penalty_squat_lean_fail", s.penalty_squat_lean_fail),
            ("penalty_squat_lean_warn", s.penalty_squat_lean_warn),
            ("squat_symmetry_fail", s.squat_symmetry_fail),
            ("penalty_squat_symmetry", s.penalty_squat_symmetry),
            ("squat_rep_depth", s.squat_rep_depth),
            ("bench_elbow_fail", b.bench_elbow_fail),
            ("bench_elbow_warn", b.bench_elbow_warn),
            ("penalty_bench_elbow_fail", b.penalty_bench_elbow_fail),
            ("penalty_bench_elbow_warn", b.penalty_bench_elbow_warn),
            ("bench_path_fail", b.bench_path_fail),
            ("bench_path_warn", b.bench_path_warn),
            ("penalty_bench_path_fail", b.penalty_bench_path_fail),
            ("penalty_bench_path_warn", b.penalty_bench_path_warn),
            ("bench_symmetry_fail", b.bench_symmetry_fail),
            ("penalty_bench_symmetry", b.penalty_bench_symmetry),
            ("bench_lockout_angle", b.bench_lockout_angle),
            ("deadlift_back_fail", d.deadlift_back_fail),
            ("deadlift_back_warn", d.deadlift_back_warn),
            ("penalty_deadlift_back_fail", d.penalty_deadlift_back_fail),
            ("penalty_deadlift_back_warn", d.penalty_deadlift_back_warn),
            ("deadlift_hinge_fail", d.deadlift_hinge_fail),
            ("deadlift_hinge_warn", d.deadlift_hinge_warn),
            ("penalty_deadlift_hinge_fail", d.penalty_deadlift_hinge_fail),
            ("penalty_deadlift_hinge_warn", d.penalty_deadlift_hinge_warn),
            ("deadlift_knee_toe_fail", d.deadlift_knee_toe_fail),
            ("penalty_deadlift_knee_toe", d.penalty_deadlift_knee_toe),
            ("deadlift_lockout_offset", d.deadlift_lockout_offset),
            ("rep_descent_threshold", r.rep_descent_threshold),
            ("rep_reversal_threshold", r.rep_reversal_threshold),
            ("rep_lockout_threshold", r.rep_lockout_threshold),
        ];
        for (name, v) in values {
            if !v.is_finite() || v < 0.0 {
                return Err(FormError::Config(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, v
                )));
            }
        }

        // Metrics where a low value is bad: fail tier sits below warn tier.
        let low_is_bad = [
            ("squat_depth", s.squat_depth_fail, s.squat_depth_warn),
            ("squat_valgus", s.squat_valgus_fail, s.squat_valgus_warn),
            ("deadlift_hinge", d.deadlift_hinge_fail, d.deadlift_hinge_warn),
        ];
        for (name, fail, warn) in low_is_bad {
            if fail > warn {
                return Err(FormError::Config(format!(
                    "{}_fail ({}) must not exceed {}_warn ({})",
                    name, fail, name, warn
                )));
            }
        }

        let high_is_bad = [
            ("squat_lean", s.squat_lean_fail, s.squat_lean_warn),
            ("bench_elbow", b.bench_elbow_fail, b.bench_elbow_warn),
            ("bench_path", b.bench_path_fail, b.bench_path_warn),
            ("deadlift_back", d.deadlift_back_fail, d.deadlift_back_warn),
        ];
        for (name, fail, warn) in high_is_bad {
            if fail < warn {
                return Err(FormError::Config(format!(
                    "{}_fail ({}) must not be below {}_warn ({})",
                    name, fail, name, warn
                )));
            }
        }

        if b.bench_lockout_angle > 180.0 {
            return Err(FormError::Config(format!(
                "bench_lockout_angle must be within 0..=180 (got {})",
                b.bench_lockout_angle
            )));
        }

        if !(2..=MAX_REP_HISTORY).contains(&r.rep_history_len) {
            return Err(FormError::Config(format!(
                "rep_history_len must be within 2..={} (got {})",
                MAX_REP_HISTORY, r.rep_history_len
            )));
        }

        Ok(())
    }

    /// Overwrites fields with the values the user typed on the command line.
    /// Defaults filled in by clap do not clobber values loaded from a file.
    pub fn merge_from_cli(&mut self, cli: &AnalysisConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident: $($field:ident),+ $(,)?) => {
                $(
                    if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                        self.$group.$field = cli.$group.$field.clone();
                    }
                )+
            };
        }

        update_if_present!(squat:
            squat_depth_fail,
            squat_depth_warn,
            penalty_squat_depth_fail,
            penalty_squat_depth_warn,
            squat_valgus_fail,
            squat_valgus_warn,
            penalty_squat_valgus_fail,
            penalty_squat_valgus_warn,
            squat_lean_fail,
            squat_lean_warn,
            penalty_squat_lean_fail,
            penalty_squat_lean_warn,
            squat_symmetry_fail,
            penalty_squat_symmetry,
            squat_rep_depth,
        );

        update_if_present!(bench:
            bench_elbow_fail,
            bench_elbow_warn,
            penalty_bench_elbow_fail,
            penalty_bench_elbow_warn,
            bench_path_fail,
            bench_path_warn,
            penalty_bench_path_fail,
            penalty_bench_path_warn,
            bench_symmetry_fail,
            penalty_bench_symmetry,
            bench_lockout_angle,
        );

        update_if_present!(deadlift:
            deadlift_back_fail,
            deadlift_back_warn,
            penalty_deadlift_back_fail,
            penalty_deadlift_back_warn,
            deadlift_hinge_fail,
            deadlift_hinge_warn,
            penalty_deadlift_hinge_fail,
            penalty_deadlift_hinge_warn,
            deadlift_knee_toe_fail,
            penalty_deadlift_knee_toe,
            deadlift_lockout_offset,
        );

        update_if_present!(reps:
            rep_history_len,
            rep_descent_threshold,
            rep_reversal_threshold,
            rep_lockout_threshold,
        );
    }
}
