use super::commands::{ConfigCommands, FindArgs, GradeArgs, InspectCommands};
use crate::config::Config;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "assessment-extract")]
#[command(
    about = "Extract assessment questions, scores and dashboard rules from the assessment workbook"
)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Workbook to read (overrides the config file)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,
    /// Sheet holding the assessment
    #[arg(short, long, global = true)]
    pub sheet: Option<String>,
    /// Config file to use instead of the default lookup
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory the JSON files are written to
    #[arg(short, long, global = true)]
    pub out_dir: Option<PathBuf>,
    /// Write the JSON files without echoing them
    #[arg(long, global = true)]
    pub no_print: bool,
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Send log output to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl GlobalArgs {
    /// Load the config and apply command-line overrides
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(file) = &self.file {
            config.workbook = file.clone();
        }
        if let Some(sheet) = &self.sheet {
            config.sheet = sheet.clone();
        }
        if let Some(out_dir) = &self.out_dir {
            config.output_dir = out_dir.clone();
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Quick extraction of questions and dashboard rows (assessment_extracted.json)
    Extract,
    /// Full question conversion with dropdown options and scores (assessments.json)
    Convert,
    /// Recommendation rules of the results dashboard (dashboard.json)
    Dashboard,
    /// Run extract, convert and dashboard in turn
    All,
    /// Show the score reference table and parsed scoring formulas
    Scores,
    /// Look at raw workbook content
    #[command(subcommand)]
    Inspect(InspectCommands),
    /// Search cells for keywords
    Find(FindArgs),
    /// Score an answers file against the exported assessment
    Grade(GradeArgs),
    /// Configuration file management
    #[command(subcommand)]
    Config(ConfigCommands),
}
