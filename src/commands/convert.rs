use anyhow::Result;
use log::info;
use std::path::PathBuf;

use super::output::emit_json;
use crate::config::Config;
use crate::extract::questions::convert_assessment;
use crate::workbook::Workbook;

pub const OUTPUT_FILE: &str = "assessments.json";

/// Full conversion: question types from the dropdowns, option scores from
/// the scoring formulas
pub fn convert_command(config: &Config, print: bool) -> Result<PathBuf> {
    let workbook = Workbook::open(&config.workbook, &config.sheet)?;
    let export = convert_assessment(&workbook, config)?;

    let question_count: usize = export.assessments.iter().map(|a| a.questions.len()).sum();
    info!("Converted {} questions", question_count);

    let path = config.output_path(OUTPUT_FILE);
    emit_json(&export, &path, print)?;
    Ok(path)
}
