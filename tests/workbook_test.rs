mod common;

use assessment_extract::workbook::cell::is_blank;
use assessment_extract::workbook::{SheetXml, Workbook};

#[test]
fn test_survey_lists_every_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_assessment_workbook(dir.path());

    let shapes = Workbook::survey(&path).unwrap();
    let names: Vec<&str> = shapes.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec![common::SHEET, common::LISTS_SHEET]);
    assert_eq!((shapes[1].rows, shapes[1].columns), (2, 1));
}

#[test]
fn test_values_and_formulas() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_assessment_workbook(dir.path());
    let workbook = Workbook::open(&path, common::SHEET).unwrap();

    assert_eq!(workbook.value(7, 1).to_string(), "Idea");
    assert_eq!(workbook.value(1, 9).to_string(), "15");
    assert!(is_blank(workbook.value(200, 200)));
    assert!(is_blank(workbook.value(0, 1)));

    let formula = workbook.formula(7, 4).unwrap();
    assert!(formula.starts_with("IF(C7="));
    assert!(workbook.formula(7, 3).is_none());

    assert_eq!(workbook.end(), (46, 11));
}

#[test]
fn test_validations_from_package() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_assessment_workbook(dir.path());
    let sheet_xml = SheetXml::load(&path, common::SHEET).unwrap();

    assert_eq!(sheet_xml.validations().len(), 3);

    let age = sheet_xml.validation_for(7, 3).unwrap();
    assert!(age.is_list());
    assert_eq!(
        age.formula1.as_deref(),
        Some("\"Older than 5 years,1-5 years,Less than 1 year\"")
    );

    let sector = sheet_xml.validation_for(11, 3).unwrap();
    assert_eq!(sector.formula1.as_deref(), Some("$K$1:$K$3"));

    assert!(sheet_xml.validation_for(9, 3).is_none());
}

#[test]
fn test_fill_colour_of_styled_cell() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_assessment_workbook(dir.path());
    let sheet_xml = SheetXml::load(&path, common::SHEET).unwrap();

    let color = sheet_xml.fill_color(37, 2).unwrap();
    assert!(color.ends_with("FF0000"), "unexpected colour {}", color);
    assert!(sheet_xml.fill_color(38, 2).is_none());
}

#[test]
fn test_unknown_sheet_in_package() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_assessment_workbook(dir.path());
    assert!(SheetXml::load(&path, "Nope").is_err());
}
