mod common;

use assessment_extract::extract::dashboard::{Operator, extract_dashboard};
use assessment_extract::extract::options::{ResponseConfig, ScoredOption};
use assessment_extract::extract::questions::{QuestionType, convert_assessment};
use assessment_extract::extract::summary::extract_summary;
use assessment_extract::workbook::Workbook;
use serde_json::json;

fn open_fixture(dir: &tempfile::TempDir) -> (Workbook, assessment_extract::config::Config) {
    let path = common::write_assessment_workbook(dir.path());
    let config = common::config_for(&path, dir.path());
    let workbook = Workbook::open(&path, common::SHEET).unwrap();
    (workbook, config)
}

#[test]
fn test_summary_questions_and_results_block() {
    let dir = tempfile::tempdir().unwrap();
    let (workbook, config) = open_fixture(&dir);

    let summary = extract_summary(&workbook, &config);
    // Rows 7, 8, 9, 10 (the note without a stage), 11 and 12
    let questions = &summary.assessment_questions;
    assert_eq!(questions.len(), 6);

    assert_eq!(questions[0].stage, json!("Idea"));
    assert_eq!(
        questions[0].response_config,
        ResponseConfig::Dropdown {
            options: vec![ScoredOption {
                label: "Older than 5 years".to_string(),
                score: None,
            }]
        }
    );
    assert_eq!(questions[1].response_config, ResponseConfig::OpenEnded);
    assert_eq!(
        questions[2].response_config,
        ResponseConfig::Dropdown {
            options: vec![
                ScoredOption {
                    label: "Yes".to_string(),
                    score: Some(10),
                },
                ScoredOption {
                    label: "No".to_string(),
                    score: Some(-5),
                },
            ]
        }
    );

    // Note row keeps a null stage and an empty option cell
    assert!(questions[3].stage.is_null());
    assert_eq!(
        questions[3].response_config,
        ResponseConfig::Unknown { raw: String::new() }
    );

    assert_eq!(
        summary.dashboard_summary,
        vec![
            vec![json!("Your Result:"), json!(42.0)],
            vec![json!("Recommendation"), json!("See below")],
            vec![],
            vec![json!("End")],
        ]
    );
}

#[test]
fn test_summary_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let (workbook, config) = open_fixture(&dir);

    let value = serde_json::to_value(extract_summary(&workbook, &config)).unwrap();
    assert_eq!(value["assessment_questions"][1]["response_config"], json!({"type": "open_ended"}));
    assert_eq!(
        value["assessment_questions"][2]["response_config"]["options"][1],
        json!({"label": "No", "score": -5})
    );
    assert_eq!(value["assessment_questions"][3]["response_config"]["type"], "unknown");
}

#[test]
fn test_convert_assessment() {
    let dir = tempfile::tempdir().unwrap();
    let (workbook, config) = open_fixture(&dir);

    let export = convert_assessment(&workbook, &config).unwrap();
    assert_eq!(export.version, "1.0.0");
    assert!(export.exported_at.ends_with('Z'));
    assert_eq!(export.assessments.len(), 1);

    let assessment = &export.assessments[0];
    assert_eq!(assessment.title, common::SHEET);

    // The note row without a stage is not a question
    let questions = &assessment.questions;
    assert_eq!(questions.len(), 5);
    assert!(questions.windows(2).all(|pair| pair[0].id < pair[1].id));

    let age = &questions[0];
    assert_eq!(age.kind, QuestionType::Select);
    assert_eq!(age.stage, "Idea");
    assert_eq!(age.indicator, "Idea");
    assert_eq!(age.guidance, "years since registration");
    assert_eq!(age.key_text, "Older than 5 years");
    let options: Vec<(&str, i64)> = age
        .options
        .iter()
        .map(|o| (o.label.as_str(), o.score))
        .collect();
    assert_eq!(
        options,
        vec![("Older than 5 years", 15), ("1-5 years", 10), ("Less than 1 year", 0)]
    );

    let product = &questions[1];
    assert_eq!(product.kind, QuestionType::Text);
    assert_eq!(product.key_text, "");
    assert_eq!(product.guidance, "Type it in");
    assert!(product.options.is_empty());

    let customers = &questions[2];
    assert_eq!(customers.kind, QuestionType::Text);
    assert_eq!(customers.key_text, "Yes 10\nNo -5");

    let sector = &questions[3];
    assert_eq!(sector.kind, QuestionType::Select);
    let options: Vec<(&str, i64)> = sector
        .options
        .iter()
        .map(|o| (o.label.as_str(), o.score))
        .collect();
    assert_eq!(
        options,
        vec![("Retail", 10), ("Services", 5), ("Manufacturing", 0)]
    );

    let team = &questions[4];
    assert_eq!(team.stage, "Team");
    let options: Vec<(&str, i64)> = team
        .options
        .iter()
        .map(|o| (o.label.as_str(), o.score))
        .collect();
    assert_eq!(options, vec![("1-2", 5), ("3+", 15)]);
}

#[test]
fn test_convert_json_uses_export_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let (workbook, config) = open_fixture(&dir);

    let value = serde_json::to_value(convert_assessment(&workbook, &config).unwrap()).unwrap();
    assert!(value.get("exportedAt").is_some());
    let first = &value["assessments"][0]["questions"][0];
    assert_eq!(first["type"], "select");
    assert!(first["id"].is_i64());
    assert_eq!(value["assessments"][0]["questions"][1]["type"], "text");
}

#[test]
fn test_dashboard_rules() {
    let dir = tempfile::tempdir().unwrap();
    let (workbook, config) = open_fixture(&dir);

    let export = extract_dashboard(&workbook, &config);
    assert_eq!(export.dashboard_config.title, "Business Viability Assessment Results");

    let rules = &export.dashboard_config.rules;
    let ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["rule_1", "rule_2", "rule_3"]);

    assert_eq!(rules[0].condition_text, "Greater than 20");
    assert_eq!(rules[0].logic.operator, Operator::Gt);
    assert_eq!(rules[0].logic.min, Some(21));
    assert_eq!(rules[0].style.color, "green");

    // The short "Between 10" row is skipped
    assert_eq!(rules[1].logic.operator, Operator::Between);
    assert_eq!(rules[1].message, json!("Some areas need more work before you scale"));
    assert_eq!(rules[1].style.variant, "success-light");

    assert_eq!(rules[2].logic.operator, Operator::Lt);
    assert_eq!(rules[2].logic.max, Some(9));

    assert_eq!(export.matching_rule(15).map(|r| r.id.as_str()), Some("rule_2"));
    assert_eq!(export.matching_rule(5).map(|r| r.id.as_str()), Some("rule_3"));
}

#[test]
fn test_missing_sheet_lists_available_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_assessment_workbook(dir.path());

    let err = Workbook::open(&path, "Advanced Assessment").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Advanced Assessment"));
    assert!(message.contains(common::SHEET));
    assert!(message.contains(common::LISTS_SHEET));
}
