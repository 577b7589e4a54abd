//! Analysis Settings
//! Column names, histogram bins and plot output, loadable from JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fixed-width histogram bins from `start` to `end` inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    pub start: f64,
    pub end: f64,
    pub width: f64,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 100.0,
            width: 10.0,
        }
    }
}

/// Histogram image settings. Nothing is rendered while `output` is unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub output: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output: None,
            width: 800,
            height: 600,
            title: "Age distribution".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub age_column: String,
    pub email_column: String,
    pub histogram: HistogramConfig,
    pub plot: PlotConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            age_column: "age".to_string(),
            email_column: "email".to_string(),
            histogram: HistogramConfig::default(),
            plot: PlotConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load settings from a JSON file; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"email_column": "mail", "histogram": {"width": 5}}"#).unwrap();

        assert_eq!(config.email_column, "mail");
        assert_eq!(config.age_column, "age");
        assert_eq!(config.histogram.width, 5.0);
        assert_eq!(config.histogram.end, 100.0);
        assert!(config.plot.output.is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AnalysisConfig::from_json_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
