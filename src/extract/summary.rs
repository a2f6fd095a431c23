//! Quick extraction written to `assessment_extracted.json`
//!
//! Questions keep the raw option cell parsed line by line; the dashboard
//! block below the questions is copied as lists of non-empty values.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::options::{ResponseConfig, parse_response_config};
use super::{COL_CONTENT, COL_QUESTION, COL_STAGE};
use crate::config::Config;
use crate::workbook::{Workbook, cell};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryQuestion {
    pub stage: Value,
    pub question: Value,
    pub response_config: ResponseConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryExport {
    pub assessment_questions: Vec<SummaryQuestion>,
    pub dashboard_summary: Vec<Vec<Value>>,
}

pub fn extract_questions(workbook: &Workbook, config: &Config) -> Vec<SummaryQuestion> {
    let mut questions = Vec::new();

    for row in config.question_rows() {
        let question = workbook.value(row, COL_QUESTION);
        if cell::is_blank(question) {
            debug!("Row {}: no question", row);
            continue;
        }

        questions.push(SummaryQuestion {
            stage: cell::to_json(workbook.value(row, COL_STAGE)),
            question: cell::to_json(question),
            response_config: parse_response_config(workbook.value(row, COL_CONTENT)),
        });
    }

    questions
}

/// Non-empty values of each dashboard row, left to right. Rows past the end
/// of the sheet are not listed.
pub fn extract_dashboard_summary(workbook: &Workbook, config: &Config) -> Vec<Vec<Value>> {
    let (last_row, last_col) = workbook.end();
    let summary = &config.summary;

    (summary.dashboard_first_row..=summary.dashboard_last_row.min(last_row))
        .map(|row| {
            (1..=last_col)
                .map(|col| workbook.value(row, col))
                .filter(|data| !cell::is_blank(data))
                .map(cell::to_json)
                .collect()
        })
        .collect()
}

pub fn extract_summary(workbook: &Workbook, config: &Config) -> SummaryExport {
    SummaryExport {
        assessment_questions: extract_questions(workbook, config),
        dashboard_summary: extract_dashboard_summary(workbook, config),
    }
}
