use crate::reports;
use clap::Args;
use formforge::analysis::FormAnalyzer;
use formforge::config::AnalysisConfig;
use formforge::error::FormResult;
use formforge::loader;
use formforge::session::analyze_session;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    #[command(flatten)]
    pub rules: AnalysisConfig,

    #[arg(short, long)]
    pub movement: String,

    #[arg(short, long)]
    pub input: PathBuf,

    /// Print the full report as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: SessionArgs, analyzer: &FormAnalyzer) -> FormResult<()> {
    let movement = super::parse_movement(&args.movement)?;
    let frames = loader::load_frames_from_file(&args.input)?;
    let report = analyze_session(analyzer, movement, &frames);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    reports::print_session_summary(&report);
    reports::print_rep_report(&report.reps);
    reports::print_error_report(&report.error_counts);
    Ok(())
}
