//! Command-line interface components.

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::Experiment;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

/// CLI arguments for the lab data processor
///
/// Tidies block-structured lab exports and writes result tables, charts and
/// text reports for the lipase and tactile experiments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "biolab",
    version,
    about = "Tidy and analyze classroom biology lab CSV exports",
    long_about = "Reconstructs tidy records from block-structured lab exports, joins participant \
                  lists and runs the statistical analysis of the lipase pH-kinetics and tactile \
                  two-point discrimination experiments."
)]
pub struct Args {
    /// Directory holding the raw CSV exports
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output directory for tables, charts and reports
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// Experiment to process
    #[arg(long, value_enum, default_value = "all")]
    pub experiment: ExperimentSelection,

    /// TOML configuration file; command-line flags take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Field delimiter of the raw exports
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Skip PNG chart rendering
    #[arg(long)]
    pub no_charts: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Which experiments a run processes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExperimentSelection {
    Lipase,
    Tactile,
    All,
}

impl ExperimentSelection {
    pub fn experiments(self) -> Vec<Experiment> {
        match self {
            ExperimentSelection::Lipase => vec![Experiment::Lipase],
            ExperimentSelection::Tactile => vec![Experiment::Tactile],
            ExperimentSelection::All => vec![Experiment::Lipase, Experiment::Tactile],
        }
    }
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Configuration file values first, then command-line overrides
    pub fn build_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config = config.with_data_dir(data_dir.clone());
        }
        if let Some(output) = &self.output {
            config = config.with_output_dir(output.clone());
        }
        if let Some(delimiter) = self.delimiter {
            config = config.with_delimiter(delimiter);
        }
        if self.no_charts {
            config = config.without_charts();
        }

        config.validate()?;
        debug!("Effective configuration: {:?}", config);
        Ok(config)
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("biolab_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["biolab"]);
        assert_eq!(args.experiment, ExperimentSelection::All);
        assert_eq!(args.get_log_level(), "warn");
        assert!(args.show_progress());

        let config = args.build_config().unwrap();
        assert!(config.render_charts);
        assert_eq!(config.delimiter, ',');
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(Args::parse_from(["biolab", "-vv"]).get_log_level(), "debug");
        assert_eq!(Args::parse_from(["biolab", "-q"]).get_log_level(), "error");
        assert!(Args::try_parse_from(["biolab", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_experiment_selection() {
        let args = Args::parse_from(["biolab", "--experiment", "tactile"]);
        assert_eq!(args.experiment.experiments(), vec![Experiment::Tactile]);
        assert_eq!(
            ExperimentSelection::All.experiments(),
            vec![Experiment::Lipase, Experiment::Tactile]
        );
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "output_dir = \"from-file\"\ndelimiter = \";\"\n[lipase]\nalpha = 0.01").unwrap();

        let args = Args::parse_from([
            "biolab",
            "data",
            "--config",
            file.path().to_str().unwrap(),
            "-o",
            "from-flag",
            "--no-charts",
        ]);
        let config = args.build_config().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.output_dir, PathBuf::from("from-flag"));
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.lipase.alpha, 0.01);
        assert!(!config.render_charts);
    }
}
