use anyhow::{Context, Result, anyhow};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use log::debug;
use std::path::{Path, PathBuf};

use super::sheet_xml::SheetXml;

static EMPTY: Data = Data::Empty;

/// One worksheet loaded in both modes: computed values and raw formulas
#[derive(Debug, Clone)]
pub struct Workbook {
    path: PathBuf,
    sheet: String,
    sheet_names: Vec<String>,
    values: Range<Data>,
    formulas: Range<String>,
}

/// Sheet name with the size of its used range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetShape {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

impl Workbook {
    pub fn open<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook: Xlsx<_> = open_workbook(path)
            .with_context(|| format!("Failed to open workbook: {}", path.display()))?;
        let sheet_names = workbook.sheet_names().to_owned();

        if sheet_names.is_empty() {
            return Err(anyhow!("Excel file contains no sheets"));
        }
        if !sheet_names.iter().any(|name| name == sheet_name) {
            return Err(anyhow!(
                "Sheet '{}' not found (available: {})",
                sheet_name,
                sheet_names.join(", ")
            ));
        }

        let values = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| anyhow!("Error reading sheet '{}': {}", sheet_name, e))?;
        let formulas = workbook
            .worksheet_formula(sheet_name)
            .map_err(|e| anyhow!("Error reading formulas of sheet '{}': {}", sheet_name, e))?;

        debug!(
            "Opened '{}' from {}: values {:?}, formulas {:?}",
            sheet_name,
            path.display(),
            values.get_size(),
            formulas.get_size()
        );

        Ok(Self {
            path: path.to_path_buf(),
            sheet: sheet_name.to_string(),
            sheet_names,
            values,
            formulas,
        })
    }

    /// Names and used-range sizes of every sheet in the file
    pub fn survey<P: AsRef<Path>>(path: P) -> Result<Vec<SheetShape>> {
        let path = path.as_ref();
        let mut workbook: Xlsx<_> = open_workbook(path)
            .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

        let mut shapes = Vec::new();
        for name in workbook.sheet_names().to_owned() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| anyhow!("Error reading sheet '{}': {}", name, e))?;
            let (rows, columns) = range.get_size();
            shapes.push(SheetShape { name, rows, columns });
        }
        Ok(shapes)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet
    }

    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Computed value at a 1-based position; empty outside the used range
    pub fn value(&self, row: u32, col: u32) -> &Data {
        if row == 0 || col == 0 {
            return &EMPTY;
        }
        self.values.get_value((row - 1, col - 1)).unwrap_or(&EMPTY)
    }

    /// Formula text (without the leading `=`) at a 1-based position
    pub fn formula(&self, row: u32, col: u32) -> Option<&str> {
        if row == 0 || col == 0 {
            return None;
        }
        self.formulas
            .get_value((row - 1, col - 1))
            .map(String::as_str)
            .filter(|f| !f.is_empty())
    }

    /// Last used (row, column), 1-based; (0, 0) for an empty sheet
    pub fn end(&self) -> (u32, u32) {
        self.values
            .end()
            .map(|(row, col)| (row + 1, col + 1))
            .unwrap_or((0, 0))
    }

    pub fn sheet_xml(&self) -> Result<SheetXml> {
        SheetXml::load(&self.path, &self.sheet)
    }
}
