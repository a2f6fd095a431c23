use anyhow::{Context, Result, anyhow};
use colored::*;
use log::{info, warn};
use serde_json::Value;
use std::collections::HashMap;

use super::output::{emit_json, read_json, to_pretty_json};
use crate::cli::commands::GradeArgs;
use crate::config::Config;
use crate::extract::dashboard::DashboardExport;
use crate::extract::grading::{GradeReport, grade};
use crate::extract::questions::AssessmentExport;

/// Answers file values may be strings or numbers; both compare as text
pub fn answers_from_json(value: Value) -> Result<HashMap<String, String>> {
    let Value::Object(map) = value else {
        return Err(anyhow!("Answers must be a JSON object of question id to option label"));
    };

    Ok(map
        .into_iter()
        .filter_map(|(id, answer)| match answer {
            Value::String(label) => Some((id, label)),
            Value::Null => None,
            other => Some((id, other.to_string())),
        })
        .collect())
}

pub fn grade_command(config: &Config, args: &GradeArgs, print: bool) -> Result<()> {
    let answers = answers_from_json(read_json(&args.answers)?)
        .with_context(|| format!("Invalid answers file: {}", args.answers.display()))?;

    let assessments_path = args
        .assessments
        .clone()
        .unwrap_or_else(|| config.output_path(super::convert::OUTPUT_FILE));
    let export: AssessmentExport = read_json(&assessments_path)?;

    let assessment = match &args.title {
        Some(title) => export
            .assessments
            .iter()
            .find(|a| &a.title == title)
            .ok_or_else(|| {
                anyhow!(
                    "No assessment titled '{}' in {}",
                    title,
                    assessments_path.display()
                )
            })?,
        None => export
            .assessments
            .first()
            .ok_or_else(|| anyhow!("No assessments in {}", assessments_path.display()))?,
    };

    let dashboard = load_dashboard(config, args)?;
    let report = grade(assessment, &answers, dashboard.as_ref());
    info!(
        "Graded '{}': {}/{}",
        assessment.title, report.total_score, report.max_possible_score
    );

    print_report(&report);

    match &args.report {
        Some(path) => emit_json(&report, path, print)?,
        None if print => println!("{}", to_pretty_json(&report)?),
        None => {}
    }
    Ok(())
}

/// Explicit dashboard file must exist; the default one is optional
fn load_dashboard(config: &Config, args: &GradeArgs) -> Result<Option<DashboardExport>> {
    if let Some(path) = &args.dashboard {
        return read_json(path).map(Some);
    }

    let path = config.output_path(super::dashboard::OUTPUT_FILE);
    if !path.exists() {
        warn!("No dashboard rules at {}, skipping recommendation", path.display());
        return Ok(None);
    }
    read_json(&path).map(Some)
}

fn print_report(report: &GradeReport) {
    println!(
        "{} {}/{} ({}%)",
        "Total:".bold(),
        report.total_score,
        report.max_possible_score,
        report.percent
    );

    for stage in &report.scores_by_stage {
        let line = format!(
            "  {}: {}/{} ({}%)",
            stage.stage,
            stage.total,
            stage.max,
            stage.percent()
        );
        if report.flagged_items.iter().any(|f| f.stage == stage.stage) {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }

    if let Some(rule) = &report.matching_rule {
        println!("{} {}", "Recommendation:".bold(), rule.condition_text.cyan());
        println!("  {}", rule.message);
    }
}
