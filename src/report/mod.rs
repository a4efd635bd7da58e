//! Output artifacts: CSV tables, PNG charts and narrative reports
//!
//! ## Architecture
//!
//! - [`tables`] - Result tables built as polars DataFrames and written as CSV
//! - [`charts`] - PNG charts rendered with plotters
//! - [`narrative`] - Plain-text reports
//!
//! Tables and reports are mandatory: any failure aborts the run. Charts are
//! best effort and only logged when they fail.

pub mod charts;
pub mod narrative;
pub mod tables;

use crate::analysis::{LipaseAnalysis, TactileAnalysis};
use crate::block_parser::{ParseStats, TidyStats};
use crate::constants::{categories, outputs};
use crate::error::Result;
use crate::models::{LipaseReading, TactileObservation};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Writes the artifacts of one run into the output directory
#[derive(Debug, Clone)]
pub struct Reporter {
    output_dir: PathBuf,
    render_charts: bool,
}

impl Reporter {
    /// Create the reporter, creating the output directory if needed
    pub fn new(output_dir: &Path, render_charts: bool) -> Result<Self> {
        fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            render_charts,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    fn write_table(
        &self,
        name: &str,
        frame: Result<polars::prelude::DataFrame>,
        written: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let path = self.path(name);
        let mut frame = frame?;
        tables::write_csv(&mut frame, &path)?;
        written.push(path);
        Ok(())
    }

    fn write_text(&self, name: &str, text: &str, written: &mut Vec<PathBuf>) -> Result<()> {
        let path = self.path(name);
        fs::write(&path, text)?;
        debug!("Wrote report {}", path.display());
        written.push(path);
        Ok(())
    }

    fn render_chart<F>(&self, name: &str, render: F, written: &mut Vec<PathBuf>)
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        if !self.render_charts {
            return;
        }
        let path = self.path(name);
        match render(&path) {
            Ok(()) => written.push(path),
            Err(e) => warn!("Skipping chart {}: {}", name, e),
        }
    }

    /// Tidy table, drops, tests, pairwise comparisons, pH curves and report
    pub fn write_lipase(
        &self,
        readings: &[LipaseReading],
        analysis: &LipaseAnalysis,
        time_column: &str,
        parse: &ParseStats,
        tidy: &TidyStats,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        self.write_table(
            outputs::LIPASE_TIDY,
            tables::lipase_tidy_frame(readings, &analysis.group_columns, time_column),
            &mut written,
        )?;
        self.write_table(outputs::LIPASE_DROPS, tables::lipase_drops_frame(analysis), &mut written)?;
        self.write_table(outputs::LIPASE_TESTS, tables::lipase_tests_frame(analysis), &mut written)?;
        self.write_table(
            outputs::LIPASE_PAIRWISE,
            tables::lipase_pairwise_frame(analysis),
            &mut written,
        )?;

        self.render_chart(
            outputs::LIPASE_CURVES,
            |path| charts::render_lipase_curves(readings, path),
            &mut written,
        );

        self.write_text(
            outputs::LIPASE_REPORT,
            &narrative::lipase_report(analysis, parse, tidy),
            &mut written,
        )?;

        info!("Wrote {} lipase artifacts to {}", written.len(), self.output_dir.display());
        Ok(written)
    }

    /// Statistics tables, four charts and the narrative report
    pub fn write_tactile(
        &self,
        observations: &[TactileObservation],
        analysis: &TactileAnalysis,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        self.write_table(
            outputs::TACTILE_DESCRIPTIVE,
            tables::descriptive_frame(analysis),
            &mut written,
        )?;
        self.write_table(
            outputs::TACTILE_REGIONS,
            tables::region_comparisons_frame(analysis),
            &mut written,
        )?;
        self.write_table(
            outputs::TACTILE_GENDERS,
            tables::gender_comparisons_frame(analysis),
            &mut written,
        )?;

        if self.render_charts {
            let labels = &analysis.correlation.labels;
            let all = region_samples(observations, labels.len(), |_| true);
            let male = region_samples(observations, labels.len(), |o| o.gender == categories::MALE);
            let female = region_samples(observations, labels.len(), |o| o.gender == categories::FEMALE);

            self.render_chart(
                outputs::TACTILE_BOXPLOT,
                |path| charts::render_region_boxplot(labels, &all, path),
                &mut written,
            );
            self.render_chart(
                outputs::TACTILE_GENDER_CHART,
                |path| charts::render_gender_comparison(labels, &male, &female, path),
                &mut written,
            );
            self.render_chart(
                outputs::TACTILE_HEATMAP,
                |path| charts::render_correlation_heatmap(&analysis.correlation, path),
                &mut written,
            );
            self.render_chart(
                outputs::TACTILE_DISTRIBUTIONS,
                |path| charts::render_distributions(labels, &all, path),
                &mut written,
            );
        }

        self.write_text(
            outputs::TACTILE_REPORT,
            &narrative::tactile_report(analysis),
            &mut written,
        )?;

        info!("Wrote {} tactile artifacts to {}", written.len(), self.output_dir.display());
        Ok(written)
    }
}

/// Non-missing distances per region for the observations passing `keep`
fn region_samples<F>(observations: &[TactileObservation], regions: usize, keep: F) -> Vec<Vec<f64>>
where
    F: Fn(&TactileObservation) -> bool,
{
    let mut samples = vec![Vec::new(); regions];
    for observation in observations.iter().filter(|o| keep(o)) {
        for (sample, distance) in samples.iter_mut().zip(&observation.distances) {
            if let Some(value) = distance {
                sample.push(*value);
            }
        }
    }
    samples
}

#[cfg(test)]
pub mod tests;
