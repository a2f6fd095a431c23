//! Dashboard recommendation rules
//!
//! The rule block pairs a condition such as "Greater than 70" (column B) with
//! a recommendation message (column C). Rules are styled best to worst by
//! their order in the sheet.

use calamine::Data;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{COL_CONTENT, COL_QUESTION, EXPORT_VERSION};
use crate::config::Config;
use crate::workbook::{Workbook, cell};

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("digit pattern"));

/// Condition keywords a rule row must contain, case-sensitive
const RULE_KEYWORDS: [&str; 3] = ["Greater than", "Between", "Less than"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Gt,
    Lt,
    Between,
}

/// Numeric range derived from a condition; `min`/`max` are inclusive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleLogic {
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl RuleLogic {
    pub fn greater_than(value: i64) -> Self {
        Self {
            operator: Operator::Gt,
            value: Some(value),
            min: Some(value.saturating_add(1)),
            max: None,
        }
    }

    pub fn less_than(value: i64) -> Self {
        Self {
            operator: Operator::Lt,
            value: Some(value),
            min: None,
            max: Some(value.saturating_sub(1)),
        }
    }

    pub fn between(min: i64, max: i64) -> Self {
        Self {
            operator: Operator::Between,
            value: None,
            min: Some(min),
            max: Some(max),
        }
    }

    /// Whether a total score falls inside this rule
    pub fn matches(&self, score: i64) -> bool {
        match self.operator {
            Operator::Gt => self.value.is_some_and(|v| score > v),
            Operator::Lt => self.value.is_some_and(|v| score < v),
            Operator::Between => match (self.min, self.max) {
                (Some(min), Some(max)) => min <= score && score <= max,
                _ => false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleStyle {
    pub color: String,
    pub variant: String,
    pub icon: String,
}

impl RuleStyle {
    /// Presentation by position: first rule is the best outcome
    pub fn for_position(index: usize) -> Self {
        let (color, variant, icon) = match index {
            0 => ("green", "success", "star"),
            1 => ("light-green", "success-light", "check"),
            2 => ("orange", "warning", "alert"),
            _ => ("red", "danger", "x"),
        };
        Self {
            color: color.to_string(),
            variant: variant.to_string(),
            icon: icon.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardRule {
    pub id: String,
    pub condition_text: String,
    pub logic: RuleLogic,
    pub message: Value,
    pub style: RuleStyle,
}

impl DashboardRule {
    pub fn message_text(&self) -> String {
        match &self.message {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub title: String,
    pub rules: Vec<DashboardRule>,
}

/// Document written to `dashboard.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardExport {
    pub version: String,
    pub dashboard_config: DashboardConfig,
}

impl DashboardExport {
    /// First rule whose range contains the score
    pub fn matching_rule(&self, score: i64) -> Option<&DashboardRule> {
        self.dashboard_config
            .rules
            .iter()
            .find(|rule| rule.logic.matches(score))
    }
}

/// Parse a condition like "Greater than 70", "Less than 40" or "Between 40 and 70"
pub fn parse_range(text: &str) -> Option<RuleLogic> {
    let text = text.trim().to_lowercase();
    // Positional: a number too large for i64 stays in its slot as None
    let numbers: Vec<Option<i64>> = DIGITS
        .find_iter(&text)
        .map(|m| m.as_str().parse().ok())
        .collect();

    if text.contains("greater than") {
        numbers.first().copied().flatten().map(RuleLogic::greater_than)
    } else if text.contains("less than") {
        numbers.first().copied().flatten().map(RuleLogic::less_than)
    } else if text.contains("between") {
        match numbers.as_slice() {
            [Some(min), Some(max), ..] => Some(RuleLogic::between(*min, *max)),
            _ => None,
        }
    } else {
        None
    }
}

/// Messages that are too short to be a recommendation, or that are the
/// condition text repeated
fn is_placeholder_message(message: &Data) -> bool {
    let Some(text) = cell::text(message) else {
        return true;
    };
    let len = text.chars().count();
    len < 10 || (text.contains("Between") && len < 20)
}

/// Scan the rule rows of the sheet
pub fn extract_rules(workbook: &Workbook, config: &Config) -> Vec<DashboardRule> {
    let mut rules: Vec<DashboardRule> = Vec::new();

    for row in config.dashboard_rows() {
        let Some(condition) = cell::text(workbook.value(row, COL_QUESTION)) else {
            continue;
        };
        let condition = condition.trim().to_string();

        if !RULE_KEYWORDS.iter().any(|k| condition.contains(k)) {
            debug!("Row {}: '{}' is not a rule condition", row, condition);
            continue;
        }

        let Some(logic) = parse_range(&condition) else {
            debug!("Row {}: could not parse range from '{}'", row, condition);
            continue;
        };

        let message = workbook.value(row, COL_CONTENT);
        if is_placeholder_message(message) {
            debug!("Row {}: message too short, skipping", row);
            continue;
        }

        rules.push(DashboardRule {
            id: format!("rule_{}", rules.len() + 1),
            condition_text: condition,
            logic,
            message: cell::to_json(message),
            style: RuleStyle::for_position(rules.len()),
        });
    }

    rules
}

pub fn extract_dashboard(workbook: &Workbook, config: &Config) -> DashboardExport {
    DashboardExport {
        version: EXPORT_VERSION.to_string(),
        dashboard_config: DashboardConfig {
            title: config.dashboard.title.clone(),
            rules: extract_rules(workbook, config),
        },
    }
}
