//! Option/score parser for multi-line option cells
//!
//! A cell such as
//!
//! ```text
//! GREAT 15
//! OK 5
//! POOR -10
//! ```
//!
//! becomes three options whose score is the trailing integer of each line.

use calamine::Data;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{OPEN_ENDED_MARKER, saturating_int};

static SCORED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s+(-?[0-9]+)$").expect("scored line pattern"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOption {
    pub label: String,
    pub score: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseConfig {
    /// The cell held something other than text
    Unknown { raw: String },
    OpenEnded,
    Dropdown { options: Vec<ScoredOption> },
}

/// Classify an option cell and parse its options
pub fn parse_response_config(cell: &Data) -> ResponseConfig {
    let Data::String(text) = cell else {
        return ResponseConfig::Unknown {
            raw: cell.to_string(),
        };
    };

    if text.contains(OPEN_ENDED_MARKER) {
        return ResponseConfig::OpenEnded;
    }

    ResponseConfig::Dropdown {
        options: parse_options(text),
    }
}

/// One option per non-blank line
pub fn parse_options(text: &str) -> Vec<ScoredOption> {
    text.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_option_line)
        .collect()
}

/// Split a trimmed line into label and trailing integer score. Scores past
/// the i64 range are clamped.
pub fn parse_option_line(line: &str) -> ScoredOption {
    if let Some(caps) = SCORED_LINE.captures(line) {
        return ScoredOption {
            label: caps[1].trim().to_string(),
            score: saturating_int(&caps[2]),
        };
    }

    ScoredOption {
        label: line.to_string(),
        score: None,
    }
}
