use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct GradeArgs {
    /// JSON object mapping question id to the chosen option label
    #[arg(short, long)]
    pub answers: PathBuf,

    /// Converted assessment (defaults to assessments.json in the output directory)
    #[arg(long)]
    pub assessments: Option<PathBuf>,

    /// Dashboard rules (defaults to dashboard.json in the output directory, skipped when absent)
    #[arg(long)]
    pub dashboard: Option<PathBuf>,

    /// Assessment title to grade when the file holds several
    #[arg(long)]
    pub title: Option<String>,

    /// Save the report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}
