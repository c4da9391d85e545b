use crate::reports;
use clap::Args;
use formforge::analysis::{FormAnalyzer, FormFeedback};
use formforge::config::AnalysisConfig;
use formforge::error::FormResult;
use formforge::loader;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub rules: AnalysisConfig,

    /// squat, bench or deadlift.
    #[arg(short, long)]
    pub movement: String,

    /// Landmark frames as JSON (array or single frame) or long-format CSV.
    #[arg(short, long)]
    pub input: PathBuf,

    /// One JSON result per line instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: AnalyzeArgs, analyzer: &FormAnalyzer) -> FormResult<()> {
    let movement = super::parse_movement(&args.movement)?;
    let frames = loader::load_frames_from_file(&args.input)?;
    info!("Grading {} {} frames from {:?}", frames.len(), movement, args.input);

    // Frames with no landmarks at all report an empty result, not an incomplete one.
    let results: Vec<(f64, FormFeedback)> = frames
        .iter()
        .zip(analyzer.analyze_batch(movement, &frames))
        .map(|(frame, fb)| {
            let fb = if frame.is_empty() { FormFeedback::empty() } else { fb };
            (frame.timestamp, fb)
        })
        .collect();

    if args.json {
        for (_, fb) in &results {
            println!("{}", serde_json::to_string(fb)?);
        }
    } else {
        reports::print_frame_report(movement, &results);
    }
    Ok(())
}
