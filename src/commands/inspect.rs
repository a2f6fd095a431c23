//! Read-only views of the workbook used while mapping out its layout

use anyhow::Result;
use colored::*;

use crate::config::Config;
use crate::extract::{COL_CONTENT, COL_FORMULA, COL_QUESTION};
use crate::workbook::address::{column_index, column_letters};
use crate::workbook::cell::debug_text;
use crate::workbook::{SheetXml, Workbook};

/// Scoring formula rows shown by `inspect formulas`
const FORMULA_ROWS: std::ops::RangeInclusive<u32> = 8..=11;
/// Header rows of the helper columns
const HELPER_HEADER_ROWS: [u32; 2] = [3, 5];
const HELPER_DATA_ROWS: std::ops::RangeInclusive<u32> = 7..=11;
const HELPER_FIRST_COL: &str = "G";
const HELPER_LAST_COL: &str = "R";
const DASHBOARD_LAST_COL: u32 = 4;

/// Sheet names, sizes and their first rows
pub fn sheets_command(config: &Config, head: u32) -> Result<()> {
    let shapes = Workbook::survey(&config.workbook)?;
    println!("{} {}", "Sheets:".bold(), shapes.len());

    for shape in shapes {
        println!();
        println!(
            "{} ({} rows x {} columns)",
            shape.name.cyan().bold(),
            shape.rows,
            shape.columns
        );

        let workbook = Workbook::open(&config.workbook, &shape.name)?;
        let (_, last_col) = workbook.end();
        for row in 1..=head.min(shape.rows as u32) {
            let cells: Vec<String> = (1..=last_col)
                .map(|col| debug_text(workbook.value(row, col)))
                .collect();
            println!("  {}: {}", row, cells.join(" | "));
        }
    }
    Ok(())
}

/// Question text (B) and option cell (C) for a row window
pub fn cells_command(config: &Config, first_row: u32, last_row: u32) -> Result<()> {
    let workbook = Workbook::open(&config.workbook, &config.sheet)?;

    for row in first_row..=last_row {
        println!(
            "Row {}: Q='{}' | C='{}'",
            row,
            debug_text(workbook.value(row, COL_QUESTION)),
            debug_text(workbook.value(row, COL_CONTENT))
        );
    }
    Ok(())
}

pub fn validations_command(config: &Config) -> Result<()> {
    let sheet_xml = SheetXml::load(&config.workbook, &config.sheet)?;
    let validations = sheet_xml.validations();

    if validations.is_empty() {
        println!("{}", "No data validations on this sheet".yellow());
        return Ok(());
    }

    println!("{} {}", "Data validations:".bold(), validations.len());
    for validation in validations {
        println!(
            "Range: {} | Type: {} | Formula1: {}",
            validation.sqref,
            if validation.kind.is_empty() { "None" } else { validation.kind.as_str() },
            validation.formula1.as_deref().unwrap_or("None")
        );
    }
    Ok(())
}

/// Scoring formulas of the first questions, then the helper columns with
/// their headers
pub fn formulas_command(config: &Config) -> Result<()> {
    let workbook = Workbook::open(&config.workbook, &config.sheet)?;

    println!("{}", "Scoring formulas (column D):".bold());
    for row in FORMULA_ROWS {
        println!("D{}: {}", row, raw_text(&workbook, row, COL_FORMULA));
    }

    let (Some(first_col), Some(last_col)) =
        (column_index(HELPER_FIRST_COL), column_index(HELPER_LAST_COL))
    else {
        return Ok(());
    };

    println!();
    println!(
        "{}",
        format!("Helper columns {}..{}:", HELPER_FIRST_COL, HELPER_LAST_COL).bold()
    );
    for row in HELPER_HEADER_ROWS {
        let headers: Vec<String> = (first_col..=last_col)
            .map(|col| format!("{}={}", column_letters(col), debug_text(workbook.value(row, col))))
            .collect();
        println!("Header row {}: {}", row, headers.join(", "));
    }

    for row in HELPER_DATA_ROWS {
        println!("Row {}:", row);
        for col in first_col..=last_col {
            println!("  {}{}: {}", column_letters(col), row, raw_text(&workbook, row, col));
        }
    }
    Ok(())
}

/// Dashboard rows, columns A..D, with the fill colour of each cell
pub fn dashboard_command(config: &Config, first_row: u32, last_row: u32) -> Result<()> {
    let workbook = Workbook::open(&config.workbook, &config.sheet)?;
    let sheet_xml = workbook.sheet_xml()?;

    for row in first_row..=last_row {
        let cells: Vec<String> = (1..=DASHBOARD_LAST_COL)
            .map(|col| {
                let color = sheet_xml.fill_color(row, col).unwrap_or("None");
                format!("'{} [Color:{}]'", debug_text(workbook.value(row, col)), color)
            })
            .collect();
        println!("Row {}: [{}]", row, cells.join(", "));
    }
    Ok(())
}

/// Formula text with its `=` when the cell has one, the value otherwise
fn raw_text(workbook: &Workbook, row: u32, col: u32) -> String {
    match workbook.formula(row, col) {
        Some(formula) => format!("={}", formula),
        None => debug_text(workbook.value(row, col)),
    }
}
