//! A1-style cell addressing
//!
//! Rows and columns are 1-based everywhere in this crate, matching what a
//! spreadsheet user sees. `$` absolute markers are accepted and ignored.

use std::fmt;

/// Convert a 1-based column index to its letters (1 -> "A", 27 -> "AA")
pub fn column_letters(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        col = (col - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Convert column letters to a 1-based index ("A" -> 1, "AA" -> 27)
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }

    let mut index: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index)
}

/// Format a 1-based (row, column) pair as "C7"
pub fn format_cell(row: u32, col: u32) -> String {
    format!("{}{}", column_letters(col), row)
}

/// Parse "C7" or "$C$7" into a 1-based (row, column) pair
pub fn parse_cell(reference: &str) -> Option<(u32, u32)> {
    let cleaned: String = reference.trim().chars().filter(|c| *c != '$').collect();
    let split = cleaned.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cleaned.split_at(split);

    let col = column_index(letters)?;
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row, col))
}

/// Rectangular block of cells, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl CellRange {
    pub fn single(row: u32, col: u32) -> Self {
        Self {
            first_row: row,
            first_col: col,
            last_row: row,
            last_col: col,
        }
    }

    /// Parse "C7", "C7:C12" or "$K$1:$K$4"
    pub fn parse(text: &str) -> Option<Self> {
        match text.split_once(':') {
            Some((start, end)) => {
                let (r1, c1) = parse_cell(start)?;
                let (r2, c2) = parse_cell(end)?;
                Some(Self {
                    first_row: r1.min(r2),
                    first_col: c1.min(c2),
                    last_row: r1.max(r2),
                    last_col: c1.max(c2),
                })
            }
            None => parse_cell(text).map(|(row, col)| Self::single(row, col)),
        }
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.first_row..=self.last_row)
            .flat_map(move |row| (self.first_col..=self.last_col).map(move |col| (row, col)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = format_cell(self.first_row, self.first_col);
        if self.first_row == self.last_row && self.first_col == self.last_col {
            write!(f, "{}", start)
        } else {
            write!(f, "{}:{}", start, format_cell(self.last_row, self.last_col))
        }
    }
}

/// Parse a space-separated sqref list ("C7 C9:C12"). Unparsable parts are dropped.
pub fn parse_sqref(sqref: &str) -> Vec<CellRange> {
    sqref.split_whitespace().filter_map(CellRange::parse).collect()
}

/// Split an optionally sheet-qualified reference ("'Basic Assessment'!$K$1:$K$4")
/// into its sheet name and range.
pub fn parse_range_reference(text: &str) -> Option<(Option<String>, CellRange)> {
    let text = text.trim().trim_start_matches('=');
    match text.rsplit_once('!') {
        Some((sheet, range)) => {
            let sheet = sheet.trim_matches('\'').replace("''", "'");
            Some((Some(sheet), CellRange::parse(range)?))
        }
        None => Some((None, CellRange::parse(text)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(9), "I");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(703), "AAA");
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A"), Some(1));
        assert_eq!(column_index("r"), Some(18));
        assert_eq!(column_index("AA"), Some(27));
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("A1"), None);
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("C7"), Some((7, 3)));
        assert_eq!(parse_cell("$I$1"), Some((1, 9)));
        assert_eq!(parse_cell("C0"), None);
        assert_eq!(parse_cell("7"), None);
        assert_eq!(parse_cell("C"), None);
    }

    #[test]
    fn test_range_contains() {
        let range = CellRange::parse("C9:C12").unwrap();
        assert!(range.contains(9, 3));
        assert!(range.contains(12, 3));
        assert!(!range.contains(13, 3));
        assert!(!range.contains(10, 4));
        assert_eq!(range.to_string(), "C9:C12");
    }

    #[test]
    fn test_parse_sqref_multiple_ranges() {
        let ranges = parse_sqref("C7 C9:C12 bogus");
        assert_eq!(ranges.len(), 2);
        assert!(ranges.iter().any(|r| r.contains(7, 3)));
        assert!(!ranges.iter().any(|r| r.contains(8, 3)));
    }

    #[test]
    fn test_parse_range_reference_with_sheet() {
        let (sheet, range) = parse_range_reference("'Basic Assessment'!$K$1:$K$4").unwrap();
        assert_eq!(sheet.as_deref(), Some("Basic Assessment"));
        assert_eq!(range.cells().count(), 4);

        let (sheet, range) = parse_range_reference("$K$1:$K$2").unwrap();
        assert!(sheet.is_none());
        assert_eq!(range.cells().collect::<Vec<_>>(), vec![(1, 11), (2, 11)]);

        assert!(parse_range_reference("\"Yes,No\"").is_none());
    }
}
