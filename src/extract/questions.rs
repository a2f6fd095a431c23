//! Full conversion written to `assessments.json`
//!
//! Each question row is classified as free text or single select. Select
//! options come from the dropdown (data validation) on the option cell and
//! their scores from the scoring formula next to it.

use anyhow::Result;
use calamine::Data;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::formula::{ScoreRefs, map_formula_scores, score_for};
use super::{COL_CONTENT, COL_FORMULA, COL_QUESTION, COL_STAGE, EXPORT_VERSION, OPEN_ENDED_MARKER};
use crate::config::Config;
use crate::workbook::address::parse_range_reference;
use crate::workbook::{DataValidation, SheetXml, Workbook, cell};

/// Marker in the question text for free-text answers
const TYPE_IT_IN_MARKER: &str = "Type it in";

/// Question cells that belong to the results block, not to the questions
const RESULT_HEADER: &str = "Your Result:";
const RESULT_MARKERS: [&str; 2] = ["Recommendation", "Greater than"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Text,
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: String,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub stage: String,
    pub indicator: String,
    pub text: String,
    pub options: Vec<QuestionOption>,
    pub guidance: String,
    pub key_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentExport {
    pub version: String,
    #[serde(rename = "exportedAt")]
    pub exported_at: String,
    pub assessments: Vec<Assessment>,
}

/// Millisecond timestamp ids, bumped so that every id is unique
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a fixed value instead of the clock
    pub fn starting_at(first: i64) -> Self {
        Self { last: first - 1 }
    }

    pub fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last
    }
}

/// Text between the last `(` and the last `)`, when they are in that order
pub fn extract_guidance(question: &str) -> String {
    match (question.rfind('('), question.rfind(')')) {
        (Some(start), Some(end)) if end > start => question[start + 1..end].to_string(),
        _ => String::new(),
    }
}

/// Dropdown labels from an inline list formula (`"A,B,C"`)
pub fn inline_list_labels(formula1: &str) -> Vec<String> {
    let inner = if formula1.len() >= 2 && formula1.starts_with('"') && formula1.ends_with('"') {
        &formula1[1..formula1.len() - 1]
    } else {
        formula1
    };
    inner.split(',').map(|label| label.trim().to_string()).collect()
}

fn is_result_row(question: &Data) -> bool {
    match cell::as_str(question) {
        Some(text) => {
            text == RESULT_HEADER || RESULT_MARKERS.iter().any(|marker| text.contains(marker))
        }
        None => false,
    }
}

fn is_free_text(question: &Data, content: &Data) -> bool {
    let is_lorem = cell::as_str(content).is_some_and(|c| c.contains(OPEN_ENDED_MARKER));
    let is_type_in = cell::as_str(question).is_some_and(|q| q.contains(TYPE_IT_IN_MARKER));
    is_lorem || is_type_in
}

/// Converts the question rows of one sheet
pub struct QuestionConverter<'a> {
    workbook: &'a Workbook,
    sheet_xml: SheetXml,
    refs: ScoreRefs,
    ids: IdGenerator,
    /// Sheets opened to resolve cross-sheet dropdown sources, by name
    other_sheets: HashMap<String, Workbook>,
}

impl<'a> QuestionConverter<'a> {
    pub fn new(workbook: &'a Workbook, config: &Config) -> Result<Self> {
        let sheet_xml = workbook.sheet_xml()?;
        let refs = ScoreRefs::read_or_zero(workbook, config.scores.convert_rows);
        Ok(Self::with_parts(workbook, sheet_xml, refs, IdGenerator::new()))
    }

    pub fn with_parts(
        workbook: &'a Workbook,
        sheet_xml: SheetXml,
        refs: ScoreRefs,
        ids: IdGenerator,
    ) -> Self {
        Self {
            workbook,
            sheet_xml,
            refs,
            ids,
            other_sheets: HashMap::new(),
        }
    }

    pub fn convert(&mut self, config: &Config) -> Result<Vec<Question>> {
        let mut questions = Vec::new();
        for row in config.question_rows() {
            if let Some(question) = self.convert_row(row)? {
                questions.push(question);
            }
        }
        Ok(questions)
    }

    fn convert_row(&mut self, row: u32) -> Result<Option<Question>> {
        let stage_cell = self.workbook.value(row, COL_STAGE);
        let question_cell = self.workbook.value(row, COL_QUESTION);
        let content_cell = self.workbook.value(row, COL_CONTENT);

        if cell::is_blank(question_cell) && cell::is_blank(stage_cell) {
            return Ok(None);
        }
        if is_result_row(question_cell) {
            debug!("Row {}: results block, skipping", row);
            return Ok(None);
        }

        let text = cell::text(question_cell).unwrap_or_default();
        let stage = cell::text(stage_cell).unwrap_or_default();
        let key_text = cell::text(content_cell)
            .filter(|c| !c.contains(OPEN_ENDED_MARKER))
            .unwrap_or_default();

        let validation = self.sheet_xml.validation_for(row, COL_CONTENT).cloned();
        let kind = match &validation {
            _ if is_free_text(question_cell, content_cell) => QuestionType::Text,
            Some(v) if v.is_list() => QuestionType::Select,
            _ => QuestionType::Text,
        };

        let options = match (kind, &validation) {
            (QuestionType::Select, Some(v)) => self.scored_options(row, v)?,
            _ => Vec::new(),
        };

        // Rows without a stage are section filler, not questions
        if stage.is_empty() {
            debug!("Row {}: no stage, skipping", row);
            return Ok(None);
        }

        Ok(Some(Question {
            id: self.ids.next_id(),
            kind,
            indicator: stage.clone(),
            stage,
            guidance: extract_guidance(&text),
            text,
            options,
            key_text,
        }))
    }

    fn scored_options(
        &mut self,
        row: u32,
        validation: &DataValidation,
    ) -> Result<Vec<QuestionOption>> {
        let labels = self.list_labels(validation)?;
        let mapped = map_formula_scores(self.workbook.formula(row, COL_FORMULA), &self.refs);

        Ok(labels
            .into_iter()
            .map(|label| {
                let score = score_for(&mapped, &label).map(|s| s as i64).unwrap_or(0);
                QuestionOption { label, score }
            })
            .collect())
    }

    /// Labels of a list validation: inline lists are split, range references
    /// are read from the referenced cells
    fn list_labels(&mut self, validation: &DataValidation) -> Result<Vec<String>> {
        let Some(formula1) = validation.formula1.as_deref() else {
            warn!("List validation on {} has no source", validation.sqref);
            return Ok(Vec::new());
        };

        if formula1.starts_with('"') {
            return Ok(inline_list_labels(formula1));
        }

        match parse_range_reference(formula1) {
            Some((sheet, range)) => {
                let workbook = self.workbook;
                let source: &Workbook = match sheet {
                    Some(name) if name != workbook.sheet_name() => {
                        match self.other_sheets.entry(name) {
                            Entry::Occupied(entry) => entry.into_mut(),
                            Entry::Vacant(entry) => {
                                debug!("Opening sheet '{}' for dropdown labels", entry.key());
                                let opened = Workbook::open(workbook.path(), entry.key())?;
                                entry.insert(opened)
                            }
                        }
                    }
                    _ => workbook,
                };
                Ok(range
                    .cells()
                    .filter_map(|(r, c)| cell::text(source.value(r, c)))
                    .map(|label| label.trim().to_string())
                    .collect())
            }
            None => {
                warn!("Unsupported list source '{}', using it as-is", formula1);
                Ok(inline_list_labels(formula1))
            }
        }
    }
}

pub fn export_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn convert_assessment(workbook: &Workbook, config: &Config) -> Result<AssessmentExport> {
    let mut converter = QuestionConverter::new(workbook, config)?;
    let questions = converter.convert(config)?;

    Ok(AssessmentExport {
        version: EXPORT_VERSION.to_string(),
        exported_at: export_timestamp(Utc::now()),
        assessments: vec![Assessment {
            title: workbook.sheet_name().to_string(),
            questions,
        }],
    })
}
