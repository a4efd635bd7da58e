//! Configuration management and validation.
//!
//! Provides the analysis configuration (input locations, parser conventions,
//! statistical thresholds) for both experiments. Every field has a default
//! matching the classroom exports, so a configuration file only needs to
//! name what differs:
//!
//! ```toml
//! data_dir = "../data"
//! delimiter = ";"
//!
//! [lipase]
//! anova_factor = "Gruppe"
//! alpha = 0.01
//! ```

use crate::constants::{self, categories, columns};
use crate::error::{LabError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for a processing run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory holding the raw CSV exports
    pub data_dir: PathBuf,

    /// Directory receiving tables, charts and reports
    pub output_dir: PathBuf,

    /// Field delimiter of the raw exports
    pub delimiter: char,

    /// Render PNG charts (tables and reports are always written)
    pub render_charts: bool,

    pub lipase: LipaseConfig,

    pub tactile: TactileConfig,
}

/// Settings for the block-structured lipase pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LipaseConfig {
    pub measurement_file: String,

    /// Optional participant list; a missing file is only reported
    pub participant_file: String,

    /// Header name of the time column; the two columns after it hold the values
    pub time_column: String,

    /// Metadata columns patched by forward-fill during tidy-up
    pub forward_fill_columns: Vec<String>,

    /// Columns identifying one experimental group.
    /// Empty means every column preceding the time column.
    pub group_columns: Vec<String>,

    /// Column whose levels are compared by ANOVA and pairwise tests
    pub anova_factor: String,

    pub alpha: f64,
}

/// Settings for the rectangular tactile pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TactileConfig {
    pub measurement_file: String,

    pub participant_file: String,

    /// Measured body regions: source header name and display label
    pub regions: Vec<RegionMapping>,

    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMapping {
    pub source: String,
    #[serde(default)]
    pub label: String,
}

impl RegionMapping {
    /// Display label; unlabeled regions keep their column name
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.source
        } else {
            &self.label
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(constants::DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            delimiter: ',',
            render_charts: true,
            lipase: LipaseConfig::default(),
            tactile: TactileConfig::default(),
        }
    }
}

impl Default for LipaseConfig {
    fn default() -> Self {
        Self {
            measurement_file: constants::LIPASE_MEASUREMENT_FILE.to_string(),
            participant_file: constants::LIPASE_PARTICIPANT_FILE.to_string(),
            time_column: columns::TIME.to_string(),
            forward_fill_columns: vec![columns::DATE.to_string(), columns::SESSION.to_string()],
            group_columns: Vec::new(),
            anova_factor: columns::SESSION.to_string(),
            alpha: constants::DEFAULT_ALPHA,
        }
    }
}

impl Default for TactileConfig {
    fn default() -> Self {
        Self {
            measurement_file: constants::TACTILE_MEASUREMENT_FILE.to_string(),
            participant_file: constants::TACTILE_PARTICIPANT_FILE.to_string(),
            regions: categories::BODY_REGIONS
                .iter()
                .map(|(source, label)| RegionMapping {
                    source: source.to_string(),
                    label: label.to_string(),
                })
                .collect(),
            alpha: constants::DEFAULT_ALPHA,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LabError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            LabError::configuration(format!("Failed to parse TOML configuration: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the parser and the statistics cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() || self.delimiter == '"' {
            return Err(LabError::configuration(format!(
                "Delimiter must be a single ASCII character other than a quote, got {:?}",
                self.delimiter
            )));
        }

        for (name, alpha) in [("lipase", self.lipase.alpha), ("tactile", self.tactile.alpha)] {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(LabError::configuration(format!(
                    "{} alpha must lie strictly between 0 and 1, got {}",
                    name, alpha
                )));
            }
        }

        if self.lipase.time_column.trim().is_empty() {
            return Err(LabError::configuration("Lipase time column must be named"));
        }

        if self.tactile.regions.is_empty() {
            return Err(LabError::configuration(
                "At least one tactile body region must be configured",
            ));
        }

        Ok(())
    }

    /// Delimiter as the byte the CSV readers expect
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }

    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Disable PNG chart rendering
    pub fn without_charts(mut self) -> Self {
        self.render_charts = false;
        self
    }

    pub fn lipase_measurement_path(&self) -> PathBuf {
        self.data_dir.join(&self.lipase.measurement_file)
    }

    pub fn lipase_participant_path(&self) -> PathBuf {
        self.data_dir.join(&self.lipase.participant_file)
    }

    pub fn tactile_measurement_path(&self) -> PathBuf {
        self.data_dir.join(&self.tactile.measurement_file)
    }

    pub fn tactile_participant_path(&self) -> PathBuf {
        self.data_dir.join(&self.tactile.participant_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_classroom_exports() {
        let config = AnalysisConfig::default();
        assert_eq!(config.delimiter, ',');
        assert!(config.render_charts);
        assert_eq!(config.lipase.time_column, "Zeit");
        assert_eq!(config.lipase.forward_fill_columns, vec!["Datum", "Stdgang"]);
        assert_eq!(config.tactile.regions.len(), 5);
        assert_eq!(config.tactile.regions[0].label, "Hand Back");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml = r#"
            delimiter = ";"
            render_charts = false

            [lipase]
            anova_factor = "Gruppe"
            alpha = 0.01
        "#;

        let config = AnalysisConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.delimiter, ';');
        assert!(!config.render_charts);
        assert_eq!(config.lipase.anova_factor, "Gruppe");
        assert_eq!(config.lipase.alpha, 0.01);
        assert_eq!(config.lipase.time_column, "Zeit");
        assert_eq!(config.tactile.alpha, 0.05);
    }

    #[test]
    fn test_unlabeled_region_keeps_column_name() {
        let toml = r#"
            [[tactile.regions]]
            source = "Stirn"

            [[tactile.regions]]
            source = "Fingerkuppe"
            label = "Fingertip"
        "#;

        let config = AnalysisConfig::from_toml_str(toml).unwrap();
        let labels: Vec<&str> = config.tactile.regions.iter().map(|r| r.display_label()).collect();
        assert_eq!(labels, vec!["Stirn", "Fingertip"]);
    }

    #[test]
    fn test_invalid_alpha_rejected() {
        let toml = r#"
            [tactile]
            alpha = 1.5
        "#;
        let err = AnalysisConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, LabError::Configuration { .. }));
    }

    #[test]
    fn test_quote_delimiter_rejected() {
        let config = AnalysisConfig::default().with_delimiter('"');
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err = AnalysisConfig::from_file(Path::new("/nonexistent/biolab.toml")).unwrap_err();
        assert!(matches!(err, LabError::FileNotFound { .. }));
    }

    #[test]
    fn test_paths_join_data_dir() {
        let config = AnalysisConfig::default().with_data_dir(PathBuf::from("/data"));
        assert_eq!(
            config.lipase_measurement_path(),
            PathBuf::from("/data/UE_Sonstiges_Ergebnisse-Lipase.csv")
        );
        assert_eq!(
            config.tactile_participant_path(),
            PathBuf::from("/data/UE_Sinne_Ergebnisse-TN-Liste.csv")
        );
    }
}
