//! Extraction heuristics for the assessment workbook
//!
//! Column layout of the question sheet (1-based):
//! A stage, B question, C options or example text, D scoring formula,
//! I score reference table.

pub mod dashboard;
pub mod formula;
pub mod grading;
pub mod options;
pub mod questions;
pub mod summary;

pub const COL_STAGE: u32 = 1;
pub const COL_QUESTION: u32 = 2;
pub const COL_CONTENT: u32 = 3;
pub const COL_FORMULA: u32 = 4;
pub const COL_SCORE_REF: u32 = 9;

/// Version stamped into every exported document
pub const EXPORT_VERSION: &str = "1.0.0";

/// Placeholder text marking a free-text answer
pub const OPEN_ENDED_MARKER: &str = "Lorem ipsum";

/// Value of an ASCII digit run with an optional leading `-`, clamped to the
/// i64 range
pub fn saturating_int(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
