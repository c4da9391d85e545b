use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use formforge::analysis::FormAnalyzer;
use formforge::config::AnalysisConfig;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Biomechanical form analysis for pose landmark frames", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON rules file. Flags typed on the command line still win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Grade every frame in a landmark file.
    Analyze(cmd::analyze::AnalyzeArgs),
    /// Summarize a recorded set and count reps.
    Session(cmd::session::SessionArgs),
    /// Print the active thresholds and penalties.
    Rules(cmd::rules::RulesArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // Logs go to stderr so `--json` output stays machine readable.
    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let Some((_, sub_matches)) = matches.subcommand() else {
        error!("No subcommand given");
        process::exit(2);
    };

    let cli_rules = match &cli.command {
        Commands::Analyze(args) => &args.rules,
        Commands::Session(args) => &args.rules,
        Commands::Rules(args) => &args.rules,
    };

    // File rules form the base; explicit CLI flags are layered on top.
    let config = if let Some(path) = &cli.config {
        info!("Loading rules from: {}", path);
        match AnalysisConfig::load_from_file(path) {
            Ok(mut file_rules) => {
                file_rules.merge_from_cli(cli_rules, sub_matches);
                file_rules
            }
            Err(e) => {
                error!("Failed to load rules file '{}': {}", path, e);
                process::exit(1);
            }
        }
    } else {
        info!("No rules file given. Using built-in thresholds.");
        cli_rules.clone()
    };

    let analyzer = match FormAnalyzer::new(config) {
        Ok(a) => a,
        Err(e) => {
            error!("FATAL ERROR INITIALIZING ANALYZER: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Analyze(args) => cmd::analyze::run(args, &analyzer),
        Commands::Session(args) => cmd::session::run(args, &analyzer),
        Commands::Rules(args) => cmd::rules::run(args, &analyzer),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
