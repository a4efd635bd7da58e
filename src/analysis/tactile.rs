//! Tactile two-point discrimination aggregation

use crate::config::RegionMapping;
use crate::constants::categories::{self, AGE_GROUPS};
use crate::error::Result;
use crate::models::TactileObservation;
use crate::stats::{
    CorrelationMatrix, DescriptiveStats, TestOutcome, cohens_d, describe, independent_t_test,
};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub region: String,
    pub stats: DescriptiveStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionComparison {
    pub region_a: String,
    pub region_b: String,
    pub mean_a: Option<f64>,
    pub mean_b: Option<f64>,
    pub outcome: TestOutcome,
    pub cohens_d: Option<f64>,
    pub significant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderComparison {
    pub region: String,
    pub male_mean: Option<f64>,
    pub female_mean: Option<f64>,
    pub male_n: usize,
    pub female_n: usize,
    pub outcome: TestOutcome,
    pub cohens_d: Option<f64>,
    pub significant: bool,
}

/// Complete result of the tactile aggregation
#[derive(Debug, Clone, Serialize)]
pub struct TactileAnalysis {
    pub participants: usize,
    pub alpha: f64,
    /// Regions with at least one measurement, in configured order
    pub descriptive: Vec<RegionSummary>,
    pub region_comparisons: Vec<RegionComparison>,
    pub gender_comparisons: Vec<GenderComparison>,
    pub correlation: CorrelationMatrix,
    pub gender_counts: Vec<(String, usize)>,
    pub age_group_counts: Vec<(String, usize)>,
}

impl TactileAnalysis {
    /// Region with the smallest mean threshold
    pub fn most_sensitive(&self) -> Option<&RegionSummary> {
        self.descriptive
            .iter()
            .min_by(|a, b| a.stats.mean.total_cmp(&b.stats.mean))
    }

    /// Region with the largest mean threshold
    pub fn least_sensitive(&self) -> Option<&RegionSummary> {
        self.descriptive
            .iter()
            .max_by(|a, b| a.stats.mean.total_cmp(&b.stats.mean))
    }

    pub fn gender_count(&self, gender: &str) -> usize {
        self.gender_counts
            .iter()
            .find(|(label, _)| label == gender)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn tests_run(&self) -> usize {
        self.region_comparisons.len() + self.gender_comparisons.len()
    }

    pub fn tests_not_enough_data(&self) -> usize {
        self.region_comparisons.iter().filter(|c| !c.outcome.is_computed()).count()
            + self.gender_comparisons.iter().filter(|c| !c.outcome.is_computed()).count()
    }
}

fn region_values<'a>(
    observations: impl Iterator<Item = &'a TactileObservation>,
    region: usize,
) -> Vec<f64> {
    observations
        .filter_map(|observation| observation.distances.get(region).copied().flatten())
        .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    describe(values).map(|stats| stats.mean)
}

/// Aggregate joined observations; region order follows the configuration
pub fn analyze_tactile(
    observations: &[TactileObservation],
    regions: &[RegionMapping],
    alpha: f64,
) -> Result<TactileAnalysis> {
    let labels: Vec<String> = regions
        .iter()
        .map(|region| region.display_label().to_string())
        .collect();
    let per_region: Vec<Vec<f64>> = (0..regions.len())
        .map(|index| region_values(observations.iter(), index))
        .collect();

    let descriptive = labels
        .iter()
        .zip(&per_region)
        .filter_map(|(label, values)| {
            describe(values).map(|stats| RegionSummary {
                region: label.clone(),
                stats,
            })
        })
        .collect();

    let mut region_comparisons = Vec::new();
    for i in 0..labels.len() {
        for j in (i + 1)..labels.len() {
            let (a, b) = (&per_region[i], &per_region[j]);
            let outcome = independent_t_test(a, b)?;
            region_comparisons.push(RegionComparison {
                region_a: labels[i].clone(),
                region_b: labels[j].clone(),
                mean_a: mean(a),
                mean_b: mean(b),
                cohens_d: cohens_d(a, b),
                significant: outcome.is_significant(alpha),
                outcome,
            });
        }
    }

    let mut gender_comparisons = Vec::new();
    for (index, label) in labels.iter().enumerate() {
        let male = region_values(
            observations.iter().filter(|o| o.gender == categories::MALE),
            index,
        );
        let female = region_values(
            observations.iter().filter(|o| o.gender == categories::FEMALE),
            index,
        );
        let outcome = independent_t_test(&male, &female)?;
        gender_comparisons.push(GenderComparison {
            region: label.clone(),
            male_mean: mean(&male),
            female_mean: mean(&female),
            male_n: male.len(),
            female_n: female.len(),
            cohens_d: cohens_d(&male, &female),
            significant: outcome.is_significant(alpha),
            outcome,
        });
    }

    let columns: Vec<Vec<Option<f64>>> = (0..regions.len())
        .map(|index| {
            observations
                .iter()
                .map(|observation| observation.distances.get(index).copied().flatten())
                .collect()
        })
        .collect();
    let correlation = CorrelationMatrix::compute(labels, &columns);

    let gender_counts = [categories::MALE, categories::FEMALE]
        .iter()
        .map(|gender| {
            let count = observations.iter().filter(|o| o.gender == *gender).count();
            (gender.to_string(), count)
        })
        .collect();

    let mut age_group_counts: Vec<(String, usize)> = AGE_GROUPS
        .iter()
        .map(|(_, _, label)| {
            let count = observations
                .iter()
                .filter(|o| o.age_group.as_deref() == Some(*label))
                .count();
            (label.to_string(), count)
        })
        .collect();
    let ungrouped = observations.iter().filter(|o| o.age_group.is_none()).count();
    if ungrouped > 0 {
        age_group_counts.push((categories::UNKNOWN.to_string(), ungrouped));
    }

    let analysis = TactileAnalysis {
        participants: observations.len(),
        alpha,
        descriptive,
        region_comparisons,
        gender_comparisons,
        correlation,
        gender_counts,
        age_group_counts,
    };

    info!(
        "Tactile analysis: {} participants, {} tests ({} with not enough data)",
        analysis.participants,
        analysis.tests_run(),
        analysis.tests_not_enough_data()
    );

    Ok(analysis)
}
