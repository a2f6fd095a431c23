//! Scores a set of answers against the converted assessment
//!
//! Select questions score the points of the chosen option; free-text
//! questions carry no points. Totals are grouped by stage and the overall
//! total picks the first dashboard rule whose range contains it.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::dashboard::DashboardExport;
use super::questions::{Assessment, Question, QuestionType};

/// Stages below this percentage are flagged
pub const FLAG_THRESHOLD_PERCENT: i64 = 40;

const DEFAULT_STAGE: &str = "Other";
const FLAG_MESSAGE: &str = "Stage performance is below threshold.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemScore {
    pub id: i64,
    pub label: String,
    pub score: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageScore {
    pub stage: String,
    pub total: i64,
    pub max: i64,
    /// Items with a negative score
    pub flags: usize,
    pub items: Vec<ItemScore>,
}

impl StageScore {
    fn new(stage: &str) -> Self {
        Self {
            stage: stage.to_string(),
            total: 0,
            max: 0,
            flags: 0,
            items: Vec::new(),
        }
    }

    pub fn percent(&self) -> i64 {
        percent(self.total, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedStage {
    pub stage: String,
    pub score: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedRule {
    pub id: String,
    pub condition_text: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeReport {
    pub total_score: i64,
    pub max_possible_score: i64,
    pub percent: i64,
    pub scores_by_stage: Vec<StageScore>,
    pub flagged_items: Vec<FlaggedStage>,
    pub matching_rule: Option<MatchedRule>,
}

/// Percentage with halves rounded up (toward positive infinity), treating a
/// zero maximum as one
pub fn percent(total: i64, max: i64) -> i64 {
    ((total as f64 / max.max(1) as f64) * 100.0 + 0.5).floor() as i64
}

/// (score, max) for one question; `answer` is the chosen option label
pub fn grade_question(question: &Question, answer: Option<&str>) -> (i64, i64) {
    match question.kind {
        QuestionType::Text => (0, 0),
        QuestionType::Select => {
            let max = question
                .options
                .iter()
                .map(|option| option.score)
                .max()
                .unwrap_or(0)
                .max(0);
            let score = answer
                .and_then(|label| question.options.iter().find(|o| o.label == label))
                .map(|option| option.score)
                .unwrap_or(0);
            (score, max)
        }
    }
}

/// Grade answers keyed by question id
pub fn grade(
    assessment: &Assessment,
    answers: &HashMap<String, String>,
    dashboard: Option<&DashboardExport>,
) -> GradeReport {
    let mut stages: Vec<StageScore> = Vec::new();
    let mut total = 0;
    let mut max = 0;

    for question in &assessment.questions {
        let answer = answers.get(&question.id.to_string()).map(String::as_str);
        let (score, question_max) = grade_question(question, answer);
        debug!("Question {} scored {}/{}", question.id, score, question_max);

        total += score;
        max += question_max;

        let stage_name = if question.stage.is_empty() {
            DEFAULT_STAGE
        } else {
            question.stage.as_str()
        };
        let index = match stages.iter().position(|s| s.stage == stage_name) {
            Some(index) => index,
            None => {
                stages.push(StageScore::new(stage_name));
                stages.len() - 1
            }
        };
        let stage = &mut stages[index];

        stage.total += score;
        stage.max += question_max;
        if score < 0 {
            stage.flags += 1;
        }

        let label = if question.indicator.is_empty() {
            question.text.clone()
        } else {
            question.indicator.clone()
        };
        stage.items.push(ItemScore {
            id: question.id,
            label,
            score,
            max: question_max,
        });
    }

    let flagged_items = stages
        .iter()
        .filter(|stage| stage.percent() < FLAG_THRESHOLD_PERCENT)
        .map(|stage| FlaggedStage {
            stage: stage.stage.clone(),
            score: stage.percent(),
            message: FLAG_MESSAGE.to_string(),
        })
        .collect();

    let matching_rule = dashboard
        .and_then(|d| d.matching_rule(total))
        .map(|rule| MatchedRule {
            id: rule.id.clone(),
            condition_text: rule.condition_text.clone(),
            message: rule.message_text(),
        });

    GradeReport {
        total_score: total,
        max_possible_score: max.max(0),
        percent: percent(total, max.max(0)),
        scores_by_stage: stages,
        flagged_items,
        matching_rule,
    }
}
