use anyhow::Result;
use colored::*;
use log::debug;

use crate::cli::commands::FindArgs;
use crate::config::Config;
use crate::workbook::Workbook;
use crate::workbook::address::format_cell;
use crate::workbook::cell::text;

/// Matched cell text is cut to this many characters in the window search
const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub keyword: String,
    pub sheet: String,
    pub row: u32,
    pub col: u32,
    pub value: String,
}

/// Cells in `rows x cols` whose text contains one of `keywords`
pub fn search(
    workbook: &Workbook,
    keywords: &[String],
    last_row: u32,
    last_col: u32,
) -> Vec<Hit> {
    let mut hits = Vec::new();
    for row in 1..=last_row {
        for col in 1..=last_col {
            let Some(value) = text(workbook.value(row, col)) else {
                continue;
            };
            for keyword in keywords.iter().filter(|k| value.contains(k.as_str())) {
                hits.push(Hit {
                    keyword: keyword.clone(),
                    sheet: workbook.sheet_name().to_string(),
                    row,
                    col,
                    value: value.clone(),
                });
            }
        }
    }
    hits
}

pub fn find_command(config: &Config, args: &FindArgs) -> Result<()> {
    let keywords = args.keywords();
    debug!("Searching for {:?}", keywords);

    let hits = if args.all_sheets {
        let mut hits = Vec::new();
        for shape in Workbook::survey(&config.workbook)? {
            let workbook = Workbook::open(&config.workbook, &shape.name)?;
            let (last_row, last_col) = workbook.end();
            hits.extend(search(&workbook, &keywords, last_row, last_col));
        }
        for hit in &hits {
            println!(
                "Found '{}' in {} at {}: {}",
                hit.keyword.green(),
                hit.sheet.cyan(),
                format_cell(hit.row, hit.col),
                hit.value
            );
        }
        hits
    } else {
        let workbook = Workbook::open(&config.workbook, &config.sheet)?;
        let hits = search(&workbook, &keywords, args.max_row, args.max_col);
        for hit in &hits {
            let preview: String = hit.value.chars().take(PREVIEW_CHARS).collect();
            println!(
                "Found '{}' at ({}, {}): {}...",
                hit.keyword.green(),
                hit.row,
                hit.col,
                preview
            );
        }
        hits
    };

    if hits.is_empty() {
        println!("{} {}", "No matches for".yellow(), keywords.join(", "));
    }
    Ok(())
}
