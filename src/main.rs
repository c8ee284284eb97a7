use clap::Parser;
use std::process::ExitCode;
use tidysort::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
