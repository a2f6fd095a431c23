use anyhow::Result;
use colored::*;
use serde_json::Value;

use crate::config::Config;
use crate::extract::COL_FORMULA;
use crate::extract::formula::{ScoreRefs, map_formula_scores};
use crate::workbook::Workbook;

/// One row of the formula preview
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaPreview {
    pub row: u32,
    pub formula: Option<String>,
    /// Label to score, in formula order
    pub parsed: Vec<(String, Option<f64>)>,
}

/// Column D formula of every preview row, mapped onto the reference table.
/// Rows without a formula are listed with an empty mapping.
pub fn preview_formulas(
    workbook: &Workbook,
    config: &Config,
    refs: &ScoreRefs,
) -> Vec<FormulaPreview> {
    (config.scores.preview_first_row..=config.scores.preview_last_row)
        .map(|row| {
            let formula = workbook.formula(row, COL_FORMULA);
            FormulaPreview {
                row,
                formula: formula.map(str::to_string),
                parsed: map_formula_scores(formula, refs),
            }
        })
        .collect()
}

/// Print the score reference table and how the first scoring formulas map
/// onto it
pub fn scores_command(config: &Config) -> Result<()> {
    let workbook = Workbook::open(&config.workbook, &config.sheet)?;
    let refs = ScoreRefs::read(&workbook, config.scores.check_rows);

    println!("{}", "Score references:".bold());
    for (reference, value) in refs.entries() {
        match value {
            Some(value) => println!("{} = {}", reference, value),
            None => println!("{} = {}", reference, "None".dimmed()),
        }
    }
    println!("{}", "-".repeat(30));

    for preview in preview_formulas(&workbook, config, &refs) {
        match &preview.formula {
            Some(formula) => println!("Row {} Formula: ={}", preview.row, formula),
            None => println!("Row {} Formula: None", preview.row),
        }
        println!("Parsed: {}", parsed_text(&preview.parsed));
    }

    Ok(())
}

/// `{"label": score, ...}` keeping formula order
fn parsed_text(mapped: &[(String, Option<f64>)]) -> String {
    let entries: Vec<String> = mapped
        .iter()
        .map(|(label, score)| {
            let score = score.map_or_else(|| "null".to_string(), |s| s.to_string());
            format!("{}: {}", Value::String(label.clone()), score)
        })
        .collect();
    format!("{{{}}}", entries.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_text_keeps_formula_order() {
        let mapped = vec![
            ("Older than 5 years".to_string(), Some(15.0)),
            ("1-5 years".to_string(), Some(10.0)),
            ("Missing".to_string(), None),
        ];
        assert_eq!(
            parsed_text(&mapped),
            r#"{"Older than 5 years": 15, "1-5 years": 10, "Missing": null}"#
        );
        assert_eq!(parsed_text(&[]), "{}");
    }
}
