use anyhow::Result;
use log::{info, warn};
use std::path::PathBuf;

use super::output::emit_json;
use crate::config::Config;
use crate::extract::dashboard::extract_dashboard;
use crate::workbook::Workbook;

pub const OUTPUT_FILE: &str = "dashboard.json";

pub fn dashboard_command(config: &Config, print: bool) -> Result<PathBuf> {
    let workbook = Workbook::open(&config.workbook, &config.sheet)?;
    let export = extract_dashboard(&workbook, config);

    let rules = &export.dashboard_config.rules;
    if rules.is_empty() {
        warn!(
            "No dashboard rules found in rows {:?}",
            config.dashboard_rows()
        );
    } else {
        info!("Extracted {} dashboard rules", rules.len());
    }

    let path = config.output_path(OUTPUT_FILE);
    emit_json(&export, &path, print)?;
    Ok(path)
}
