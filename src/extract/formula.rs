//! Formula-to-score mapper
//!
//! Scoring formulas in column D look like
//! `IF(C10="Older than 5 years",$I$1,IF(C10="1-5 years",$I$2,0))`. Each
//! quoted label followed by a `$I$<n>` reference gets the value of that
//! reference cell from the score reference table.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::COL_SCORE_REF;
use crate::workbook::{Workbook, cell};

static LABEL_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)"\s*,\s*(\$I\$\d+)"#).expect("label/reference pattern"));

/// Score reference table keyed by absolute address (`$I$1`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreRefs {
    refs: BTreeMap<u32, Option<f64>>,
}

impl ScoreRefs {
    /// Read `I1..I<rows>`; blank or non-numeric cells are kept as `None`
    pub fn read(workbook: &Workbook, rows: u32) -> Self {
        let refs = (1..=rows)
            .map(|row| (row, cell::as_f64(workbook.value(row, COL_SCORE_REF))))
            .collect();
        Self { refs }
    }

    /// Read `I1..I<rows>` with blank or non-numeric cells counted as zero
    pub fn read_or_zero(workbook: &Workbook, rows: u32) -> Self {
        let refs = (1..=rows)
            .map(|row| (row, Some(cell::as_f64(workbook.value(row, COL_SCORE_REF)).unwrap_or(0.0))))
            .collect();
        Self { refs }
    }

    pub fn from_values<I: IntoIterator<Item = (u32, Option<f64>)>>(values: I) -> Self {
        Self {
            refs: values.into_iter().collect(),
        }
    }

    /// `Some(value)` when the reference is part of the table
    pub fn get(&self, reference: &str) -> Option<Option<f64>> {
        let row = reference.strip_prefix("$I$")?.parse::<u32>().ok()?;
        self.refs.get(&row).copied()
    }

    /// Entries as (`$I$n`, value) in row order
    pub fn entries(&self) -> impl Iterator<Item = (String, Option<f64>)> + '_ {
        self.refs.iter().map(|(row, value)| (format!("$I${}", row), *value))
    }
}

/// Quoted label / `$I$n` pairs in formula order
pub fn score_pairs(formula: &str) -> Vec<(String, String)> {
    LABEL_REF
        .captures_iter(formula)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Map each label in the formula to its score.
///
/// References outside the table count as zero. A label that appears twice
/// keeps its first position and its last score.
pub fn map_formula_scores(formula: Option<&str>, refs: &ScoreRefs) -> Vec<(String, Option<f64>)> {
    let Some(formula) = formula.filter(|f| !f.is_empty()) else {
        return Vec::new();
    };

    let mut mapped: Vec<(String, Option<f64>)> = Vec::new();
    for (label, reference) in score_pairs(formula) {
        let score = refs.get(&reference).unwrap_or_else(|| {
            debug!("Reference {} not in score table, using 0 for '{}'", reference, label);
            Some(0.0)
        });

        match mapped.iter_mut().find(|(existing, _)| *existing == label) {
            Some(entry) => entry.1 = score,
            None => mapped.push((label, score)),
        }
    }
    mapped
}

/// Score for one label out of a mapped formula
pub fn score_for(mapped: &[(String, Option<f64>)], label: &str) -> Option<f64> {
    mapped
        .iter()
        .find(|(candidate, _)| candidate == label)
        .and_then(|(_, score)| *score)
}
