use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory before the user config dir
pub const LOCAL_CONFIG_FILE: &str = "assessment-extract.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_workbook")]
    pub workbook: PathBuf,
    #[serde(default = "default_sheet")]
    pub sheet: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub questions: QuestionRows,
    #[serde(default)]
    pub summary: SummaryRows,
    #[serde(default)]
    pub dashboard: DashboardRows,
    #[serde(default)]
    pub scores: ScoreRows,
}

/// Rows holding one question each
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRows {
    #[serde(default = "default_first_question_row")]
    pub first_row: u32,
    #[serde(default = "default_last_question_row")]
    pub last_row: u32,
}

/// Dashboard block copied verbatim by the quick extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRows {
    #[serde(default = "default_summary_first_row")]
    pub dashboard_first_row: u32,
    #[serde(default = "default_summary_last_row")]
    pub dashboard_last_row: u32,
}

/// Recommendation rule rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardRows {
    #[serde(default = "default_rule_first_row")]
    pub first_row: u32,
    #[serde(default = "default_rule_row_count")]
    pub row_count: u32,
    #[serde(default = "default_dashboard_title")]
    pub title: String,
}

/// Score reference table rows in column I
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRows {
    /// `$I$1..$I$n` read by the converter
    #[serde(default = "default_convert_rows")]
    pub convert_rows: u32,
    /// `$I$1..$I$n` printed by the score check
    #[serde(default = "default_check_rows")]
    pub check_rows: u32,
    #[serde(default = "default_preview_first_row")]
    pub preview_first_row: u32,
    #[serde(default = "default_preview_last_row")]
    pub preview_last_row: u32,
}

fn default_workbook() -> PathBuf {
    PathBuf::from("SMC Businesses Assessment Tool (1).xlsx")
}

fn default_sheet() -> String {
    "Basic Assessment".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_first_question_row() -> u32 {
    7
}

fn default_last_question_row() -> u32 {
    36
}

fn default_summary_first_row() -> u32 {
    43
}

fn default_summary_last_row() -> u32 {
    46
}

fn default_rule_first_row() -> u32 {
    31
}

fn default_rule_row_count() -> u32 {
    10
}

fn default_dashboard_title() -> String {
    "Business Viability Assessment Results".to_string()
}

fn default_convert_rows() -> u32 {
    4
}

fn default_check_rows() -> u32 {
    5
}

fn default_preview_first_row() -> u32 {
    10
}

fn default_preview_last_row() -> u32 {
    14
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workbook: default_workbook(),
            sheet: default_sheet(),
            output_dir: default_output_dir(),
            questions: QuestionRows::default(),
            summary: SummaryRows::default(),
            dashboard: DashboardRows::default(),
            scores: ScoreRows::default(),
        }
    }
}

impl Default for QuestionRows {
    fn default() -> Self {
        Self {
            first_row: default_first_question_row(),
            last_row: default_last_question_row(),
        }
    }
}

impl Default for SummaryRows {
    fn default() -> Self {
        Self {
            dashboard_first_row: default_summary_first_row(),
            dashboard_last_row: default_summary_last_row(),
        }
    }
}

impl Default for DashboardRows {
    fn default() -> Self {
        Self {
            first_row: default_rule_first_row(),
            row_count: default_rule_row_count(),
            title: default_dashboard_title(),
        }
    }
}

impl Default for ScoreRows {
    fn default() -> Self {
        Self {
            convert_rows: default_convert_rows(),
            check_rows: default_check_rows(),
            preview_first_row: default_preview_first_row(),
            preview_last_row: default_preview_last_row(),
        }
    }
}

impl Config {
    /// Per-user config file location
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("assessment-extract").join("config.toml"))
    }

    /// Load from an explicit path, else `./assessment-extract.toml`, else the
    /// user config dir. Defaults when none exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_from(&local);
        }

        if let Some(user) = Self::user_config_path() {
            if user.exists() {
                return Self::load_from(&user);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        info!("Config saved to {:?}", path);
        Ok(())
    }

    /// Rows scanned for recommendation rules
    pub fn dashboard_rows(&self) -> std::ops::Range<u32> {
        let first = self.dashboard.first_row;
        first..first.saturating_add(self.dashboard.row_count)
    }

    pub fn question_rows(&self) -> std::ops::RangeInclusive<u32> {
        self.questions.first_row..=self.questions.last_row
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_workbook_layout() {
        let config = Config::default();
        assert_eq!(config.sheet, "Basic Assessment");
        assert_eq!(config.question_rows(), 7..=36);
        assert_eq!(config.dashboard_rows(), 31..41);
        assert_eq!(config.scores.convert_rows, 4);
        assert_eq!(config.scores.check_rows, 5);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            sheet = "Advanced Assessment"

            [questions]
            last_row = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.sheet, "Advanced Assessment");
        assert_eq!(config.questions.first_row, 7);
        assert_eq!(config.questions.last_row, 50);
        assert_eq!(config.dashboard, DashboardRows::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.output_dir = PathBuf::from("out");
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_dashboard_rows_do_not_overflow() {
        let mut config = Config::default();
        config.dashboard.first_row = u32::MAX - 1;
        config.dashboard.row_count = 10;
        assert_eq!(config.dashboard_rows(), u32::MAX - 1..u32::MAX);
    }
}
