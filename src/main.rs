use clap::Parser;
use colored::*;
use log::{debug, error};

use assessment_extract::cli::Cli;
use assessment_extract::{commands, logging};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.global.verbose, cli.global.log_file.as_deref()) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
    debug!("Starting assessment-extract {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = commands::run(cli) {
        error!("Command failed: {:#}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", "Caused by:".yellow(), cause);
        }
        std::process::exit(1);
    }
}
