//! Fixture workbook shared by the integration tests
//!
//! Layout of the "Basic Assessment" sheet:
//! - I1..I4 hold the score references 15, 10, 5, -5
//! - rows 7..12 hold questions (stage, question, option cell, scoring formula)
//! - rows 37..40 hold dashboard rules, row 37 filled red
//! - rows 43..46 hold the results block

#![allow(dead_code)]

use assessment_extract::config::Config;
use rust_xlsxwriter::{Color, DataValidation, Format, Formula, Workbook};
use std::path::{Path, PathBuf};

pub const SHEET: &str = "Basic Assessment";
pub const LISTS_SHEET: &str = "Lists";

pub fn write_assessment_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("assessment.xlsx");
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET).unwrap();

    for (row, score) in [(0, 15.0), (1, 10.0), (2, 5.0), (3, -5.0)] {
        sheet.write_number(row, 8, score).unwrap();
    }
    for (row, label) in [(0, "Retail"), (1, "Services"), (2, "Manufacturing")] {
        sheet.write_string(row, 10, label).unwrap();
    }

    // Row 7: dropdown with an inline list
    sheet.write_string(6, 0, "Idea").unwrap();
    sheet
        .write_string(6, 1, "How old is the business? (years since registration)")
        .unwrap();
    sheet.write_string(6, 2, "Older than 5 years").unwrap();
    sheet
        .write_formula(6, 3, r#"=IF(C7="Older than 5 years",$I$1,IF(C7="1-5 years",$I$2,0))"#)
        .unwrap();
    let age = DataValidation::new()
        .allow_list_strings(&["Older than 5 years", "1-5 years", "Less than 1 year"])
        .unwrap();
    sheet.add_data_validation(6, 2, 6, 2, &age).unwrap();

    // Row 8: free text
    sheet.write_string(7, 0, "Idea").unwrap();
    sheet
        .write_string(7, 1, "Describe your product (Type it in)")
        .unwrap();
    sheet.write_string(7, 2, "Lorem ipsum dolor sit amet").unwrap();

    // Row 9: option lines without a dropdown
    sheet.write_string(8, 0, "Market").unwrap();
    sheet.write_string(8, 1, "Do you have paying customers?").unwrap();
    sheet.write_string(8, 2, "Yes 10\nNo -5").unwrap();

    // Row 10: note without a stage
    sheet.write_string(9, 1, "Answer the market questions honestly").unwrap();

    // Row 11: dropdown fed from a range on the same sheet
    sheet.write_string(10, 0, "Market").unwrap();
    sheet.write_string(10, 1, "Which sector are you in?").unwrap();
    sheet.write_string(10, 2, "Retail").unwrap();
    sheet
        .write_formula(
            10,
            3,
            r#"=IF(C11="Retail",$I$2,IF(C11="Services",$I$3,IF(C11="Other",$I$9,0)))"#,
        )
        .unwrap();
    let sector = DataValidation::new().allow_list_formula(Formula::new("=$K$1:$K$3"));
    sheet.add_data_validation(10, 2, 10, 2, &sector).unwrap();

    // Row 12: dropdown fed from another sheet
    sheet.write_string(11, 0, "Team").unwrap();
    sheet.write_string(11, 1, "How big is the team?").unwrap();
    sheet.write_string(11, 2, "1-2").unwrap();
    sheet
        .write_formula(11, 3, r#"=IF(C12="1-2",$I$3,IF(C12="3+",$I$1,0))"#)
        .unwrap();
    let team = DataValidation::new().allow_list_formula(Formula::new("='Lists'!$A$1:$A$2"));
    sheet.add_data_validation(11, 2, 11, 2, &team).unwrap();

    // Dashboard rules
    let red = Format::new().set_background_color(Color::RGB(0xFF0000));
    sheet
        .write_string_with_format(36, 1, "Greater than 20", &red)
        .unwrap();
    sheet
        .write_string(36, 2, "You have a strong business case")
        .unwrap();
    sheet.write_string(37, 1, "Between 10 and 20").unwrap();
    sheet.write_string(37, 2, "Between 10").unwrap();
    sheet.write_string(38, 1, "Between 10 and 20").unwrap();
    sheet
        .write_string(38, 2, "Some areas need more work before you scale")
        .unwrap();
    sheet.write_string(39, 1, "Less than 10").unwrap();
    sheet
        .write_string(39, 2, "Reconsider the plan before investing further")
        .unwrap();

    // Results block
    sheet.write_string(42, 1, "Your Result:").unwrap();
    sheet.write_number(42, 3, 42.0).unwrap();
    sheet.write_string(43, 1, "Recommendation").unwrap();
    sheet.write_string(43, 2, "See below").unwrap();
    sheet.write_string(45, 1, "End").unwrap();

    let lists = workbook.add_worksheet();
    lists.set_name(LISTS_SHEET).unwrap();
    lists.write_string(0, 0, "1-2").unwrap();
    lists.write_string(1, 0, "3+").unwrap();

    workbook.save(&path).unwrap();
    path
}

pub fn config_for(workbook: &Path, output_dir: &Path) -> Config {
    Config {
        workbook: workbook.to_path_buf(),
        sheet: SHEET.to_string(),
        output_dir: output_dir.to_path_buf(),
        ..Config::default()
    }
}
