use crate::reports;
use clap::Args;
use formforge::analysis::{FormAnalyzer, Movement};
use formforge::config::AnalysisConfig;
use formforge::error::FormResult;
use strum::IntoEnumIterator;

#[derive(Args, Debug, Clone)]
pub struct RulesArgs {
    #[command(flatten)]
    pub rules: AnalysisConfig,

    /// Limit the listing to one movement.
    #[arg(short, long)]
    pub movement: Option<String>,
}

pub fn run(args: RulesArgs, analyzer: &FormAnalyzer) -> FormResult<()> {
    let movements: Vec<Movement> = match &args.movement {
        Some(name) => vec![super::parse_movement(name)?],
        None => Movement::iter().collect(),
    };

    for movement in movements {
        reports::print_rules_table(movement, &analyzer.rules(movement));
    }
    Ok(())
}
