//! Command-line interface.
//!
//! Two subcommands share one scan/apply pipeline and differ only in the
//! classifier strategy they plug into it: `rules` uses the built-in extension
//! table, `remote` asks the OpenAI API for folder recommendations.

use crate::category::CategoryTable;
use crate::config::ScanConfig;
use crate::logger::RunLogger;
use crate::openai::OpenAiClient;
use crate::organizer::Organizer;
use crate::plan::Classifier;
use crate::remote::RemoteClassifier;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Log file written in the working directory.
pub const LOG_FILE: &str = "tidysort.log";

/// Diagnostic snapshot side file written before remote classification.
pub const SNAPSHOT_FILE: &str = "file_structure.json";

#[derive(Parser, Debug)]
#[command(name = "tidysort")]
#[command(version, about = "Sort a directory's files into category subfolders")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Scan filter configuration file (default: tidysort.toml if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log planned moves without touching the filesystem
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Organize using the built-in extension rules
    Rules {
        /// Directory to organize
        path: PathBuf,
    },
    /// Organize using folder recommendations from the OpenAI API
    Remote {
        /// Directory to organize
        path: PathBuf,

        /// API credential for the completion service
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: String,
    },
}

/// Wires up the logger, filter, and classifier, then runs the organizer.
pub fn run(cli: Cli) -> Result<(), String> {
    let config = ScanConfig::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let filter = config
        .compile()
        .map_err(|e| format!("Error compiling scan filters: {}", e))?;

    let logger = RunLogger::open(Path::new(LOG_FILE))
        .map_err(|e| format!("Error opening log file {}: {}", LOG_FILE, e))?;

    let (path, classifier, snapshot_file): (PathBuf, Box<dyn Classifier>, Option<PathBuf>) =
        match cli.command {
            Command::Rules { path } => (path, Box::new(CategoryTable::new()), None),
            Command::Remote { path, api_key } => (
                path,
                Box::new(RemoteClassifier::new(Box::new(OpenAiClient::new(api_key)))),
                Some(PathBuf::from(SNAPSHOT_FILE)),
            ),
        };

    let mut organizer = Organizer::new(logger, classifier).with_dry_run(cli.dry_run);
    if let Some(snapshot_path) = snapshot_file {
        organizer = organizer.with_snapshot_file(snapshot_path);
    }

    let report = organizer.run(&path, &filter).map_err(|e| e.to_string())?;

    let moved_word = if cli.dry_run { "planned" } else { "moved" };
    if report.is_complete_success() {
        println!(
            "{} {} file(s) {}, {} left in place.",
            "✓".green(),
            report.moved,
            moved_word,
            report.skipped
        );
    } else {
        println!(
            "{} {} file(s) {}, {} left in place, {} failed. See {} for details.",
            "⚠".yellow(),
            report.moved,
            moved_word,
            report.skipped,
            report.failed.len(),
            LOG_FILE
        );
    }

    Ok(())
}
