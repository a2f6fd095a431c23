use anyhow::Result;
use log::info;
use std::path::PathBuf;

use super::output::emit_json;
use crate::config::Config;
use crate::extract::summary::extract_summary;
use crate::workbook::Workbook;

pub const OUTPUT_FILE: &str = "assessment_extracted.json";

/// Quick extraction: raw option cells parsed line by line plus the
/// dashboard rows as plain value lists
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written `assessment_extracted.json`
/// * `Err(anyhow::Error)` - Workbook could not be read or output not written
pub fn extract_command(config: &Config, print: bool) -> Result<PathBuf> {
    let workbook = Workbook::open(&config.workbook, &config.sheet)?;
    let summary = extract_summary(&workbook, config);
    info!(
        "Extracted {} questions and {} dashboard rows",
        summary.assessment_questions.len(),
        summary.dashboard_summary.len()
    );

    let path = config.output_path(OUTPUT_FILE);
    emit_json(&summary, &path, print)?;
    Ok(path)
}
