//! Sequential orchestration of both experiment pipelines.
//!
//! Each experiment runs its stages strictly in order: load, parse, normalize,
//! aggregate and report. Nothing runs concurrently and every stage finishes
//! before the next one starts.

use crate::analysis::{analyze_lipase, analyze_tactile};
use crate::block_parser::{parse_document, tidy_up};
use crate::config::AnalysisConfig;
use crate::error::{LabError, Result};
use crate::loader::{load_raw_lines, load_rectangular};
use crate::models::{Experiment, ProcessingStats};
use crate::normalizer::{
    lipase_readings, normalize_participants, resolve_group_columns, tactile_observations,
};
use crate::report::Reporter;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing::{debug, info, warn};

const LIPASE_STAGES: u64 = 5;
const TACTILE_STAGES: u64 = 5;

/// Runs the configured experiments and prints a summary per run
#[derive(Debug)]
pub struct LabProcessor {
    config: AnalysisConfig,
    show_progress: bool,
}

impl LabProcessor {
    /// Create a processor for a validated configuration
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            show_progress: true,
        })
    }

    /// Toggle the stage progress bar and colored summaries
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the given experiments in order, stopping at the first failure
    pub fn run(&self, experiments: &[Experiment]) -> Result<Vec<(Experiment, ProcessingStats)>> {
        if self.show_progress {
            println!(
                "{}",
                "Starting lab data processing".bright_green().bold()
            );
            println!(
                "  {} {}",
                "Data:".bright_cyan(),
                self.config.data_dir.display()
            );
            println!(
                "  {} {}",
                "Output:".bright_cyan(),
                self.config.output_dir.display()
            );
        }

        let mut results = Vec::with_capacity(experiments.len());
        for &experiment in experiments {
            let stats = match experiment {
                Experiment::Lipase => self.process_lipase()?,
                Experiment::Tactile => self.process_tactile()?,
            };
            if self.show_progress {
                print_summary(experiment, &stats);
            }
            results.push((experiment, stats));
        }
        Ok(results)
    }

    fn stage_bar(&self, stages: u64, experiment: Experiment) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(stages);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .map(|style| style.progress_chars("#>-"))
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message(format!("{}: loading", experiment.name()));
        pb
    }

    /// Block-structured lipase pipeline
    pub fn process_lipase(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        let config = &self.config.lipase;
        let delimiter = self.config.delimiter_byte();
        let pb = self.stage_bar(LIPASE_STAGES, Experiment::Lipase);

        let path = self.config.lipase_measurement_path();
        info!("Processing lipase measurements from {}", path.display());
        let lines = load_raw_lines(&path)?;
        pb.inc(1);

        pb.set_message("lipase: parsing blocks");
        let parsed = parse_document(&lines, &config.time_column, delimiter, &path)?;
        pb.inc(1);

        pb.set_message("lipase: normalizing");
        let (measurements, tidy_stats) =
            tidy_up(&parsed.table, &parsed.layout, &config.forward_fill_columns);
        let group_columns =
            resolve_group_columns(&parsed.table.schema, &parsed.layout, &config.group_columns)?;
        debug!("Lipase group columns: {:?}", group_columns);
        let readings = lipase_readings(&measurements, &group_columns);
        self.load_lipase_participants();
        pb.inc(1);

        pb.set_message("lipase: statistics");
        let analysis = analyze_lipase(&readings, &group_columns, &config.anova_factor, config.alpha)?;
        pb.inc(1);

        pb.set_message("lipase: writing outputs");
        let reporter = Reporter::new(&self.config.output_dir, self.config.render_charts)?;
        let files_written = reporter.write_lipase(
            &readings,
            &analysis,
            &config.time_column,
            &parsed.stats,
            &tidy_stats,
        )?;
        pb.inc(1);
        pb.finish_with_message("lipase: done");

        Ok(ProcessingStats {
            records_parsed: parsed.stats.records_emitted,
            records_retained: tidy_stats.retained,
            records_dropped: tidy_stats.dropped(),
            tests_run: analysis.tests_run(),
            tests_not_enough_data: analysis.tests_not_enough_data(),
            files_written,
            processing_time_ms: start_time.elapsed().as_millis(),
        })
    }

    /// The lipase participant list is informational; problems are only reported
    fn load_lipase_participants(&self) {
        let path = self.config.lipase_participant_path();
        match load_rectangular(&path, self.config.delimiter_byte())
            .and_then(|table| normalize_participants(&table))
        {
            Ok(participants) => info!("Lipase participant list: {} participants", participants.len()),
            Err(LabError::FileNotFound { .. }) => {
                warn!("Lipase participant list {} not found, continuing without it", path.display())
            }
            Err(e) => warn!("Ignoring lipase participant list {}: {}", path.display(), e),
        }
    }

    /// Rectangular tactile pipeline joined with its participant list
    pub fn process_tactile(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        let config = &self.config.tactile;
        let delimiter = self.config.delimiter_byte();
        let pb = self.stage_bar(TACTILE_STAGES, Experiment::Tactile);

        let measurement_path = self.config.tactile_measurement_path();
        info!("Processing tactile measurements from {}", measurement_path.display());
        let measurements = load_rectangular(&measurement_path, delimiter)?;
        pb.inc(1);

        pb.set_message("tactile: participants");
        let participant_table = load_rectangular(&self.config.tactile_participant_path(), delimiter)?;
        let participants = normalize_participants(&participant_table)?;
        pb.inc(1);

        pb.set_message("tactile: joining");
        let (observations, join_stats) =
            tactile_observations(&measurements, &participants, &config.regions)?;
        pb.inc(1);

        pb.set_message("tactile: statistics");
        let analysis = analyze_tactile(&observations, &config.regions, config.alpha)?;
        pb.inc(1);

        pb.set_message("tactile: writing outputs");
        let reporter = Reporter::new(&self.config.output_dir, self.config.render_charts)?;
        let files_written = reporter.write_tactile(&observations, &analysis)?;
        pb.inc(1);
        pb.finish_with_message("tactile: done");

        Ok(ProcessingStats {
            records_parsed: join_stats.input_rows,
            records_retained: join_stats.retained,
            records_dropped: join_stats.input_rows.saturating_sub(join_stats.retained),
            tests_run: analysis.tests_run(),
            tests_not_enough_data: analysis.tests_not_enough_data(),
            files_written,
            processing_time_ms: start_time.elapsed().as_millis(),
        })
    }
}

fn print_summary(experiment: Experiment, stats: &ProcessingStats) {
    println!(
        "\n{} {}",
        "Processing Summary".bright_green().bold(),
        format!("({})", experiment.name()).bright_green()
    );
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Records parsed:".bright_cyan(),
        stats.records_parsed.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Records retained:".bright_cyan(),
        stats.records_retained.to_string().bright_white().bold()
    );
    if stats.records_dropped > 0 {
        println!(
            "  {} {}",
            "Records dropped:".bright_yellow(),
            stats.records_dropped.to_string().bright_yellow()
        );
    }
    println!(
        "  {} {}",
        "Tests run:".bright_cyan(),
        stats.tests_run.to_string().bright_white()
    );
    if stats.tests_not_enough_data > 0 {
        println!(
            "  {} {}",
            "Not enough data:".bright_yellow(),
            stats.tests_not_enough_data.to_string().bright_yellow()
        );
    }
    println!(
        "  {} {}",
        "Files written:".bright_cyan(),
        stats.files_written.len().to_string().bright_white()
    );
}
