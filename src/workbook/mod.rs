//! Workbook access
//!
//! Wraps calamine for cell values and formulas, and reads the worksheet XML
//! directly for data validations and fills.

pub mod address;
pub mod cell;
mod reader;
mod sheet_xml;

pub use reader::{SheetShape, Workbook};
pub use sheet_xml::{DataValidation, SheetXml};
