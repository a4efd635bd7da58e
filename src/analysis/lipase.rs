//! Lipase pH-drop aggregation
//!
//! A group is one combination of group column values (for the classroom
//! export: date, session and group number). Within a group the readings are
//! ordered by time and the drop of a condition is `first - last` over the
//! non-missing values of that condition.

use crate::constants::columns;
use crate::error::{LabError, Result};
use crate::models::LipaseReading;
use crate::stats::{
    TestOutcome, bonferroni_threshold, describe, independent_t_test, one_way_anova, paired_t_test,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Sample preparation of the two value columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Condition {
    Cooked,
    Uncooked,
}

impl Condition {
    pub const ALL: [Condition; 2] = [Condition::Cooked, Condition::Uncooked];

    pub fn label(&self) -> &'static str {
        match self {
            Condition::Cooked => "cooked",
            Condition::Uncooked => "uncooked",
        }
    }

    /// Column name of the condition in the tidy output
    pub fn column(&self) -> &'static str {
        match self {
            Condition::Cooked => columns::PH_COOKED,
            Condition::Uncooked => columns::PH_UNCOOKED,
        }
    }

    pub fn value(&self, reading: &LipaseReading) -> Option<f64> {
        match self {
            Condition::Cooked => reading.ph_cooked,
            Condition::Uncooked => reading.ph_uncooked,
        }
    }
}

/// pH drop of one experimental group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDrop {
    pub group: Vec<String>,
    pub readings: usize,
    pub cooked_points: usize,
    pub uncooked_points: usize,
    pub cooked_drop: Option<f64>,
    pub uncooked_drop: Option<f64>,
}

impl GroupDrop {
    pub fn drop(&self, condition: Condition) -> Option<f64> {
        match condition {
            Condition::Cooked => self.cooked_drop,
            Condition::Uncooked => self.uncooked_drop,
        }
    }
}

/// One omnibus test of the lipase analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LipaseTest {
    pub test: &'static str,
    /// `None` for tests comparing the conditions themselves
    pub condition: Option<Condition>,
    /// Number of groups entering the test
    pub groups: usize,
    pub outcome: TestOutcome,
}

/// Independent t-test between two factor levels for one condition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseComparison {
    pub condition: Condition,
    pub level_a: String,
    pub level_b: String,
    pub n_a: usize,
    pub n_b: usize,
    pub mean_a: Option<f64>,
    pub mean_b: Option<f64>,
    pub outcome: TestOutcome,
    /// Bonferroni-corrected significance threshold
    pub threshold: f64,
    pub significant: bool,
}

/// Complete result of the lipase aggregation
#[derive(Debug, Clone, Serialize)]
pub struct LipaseAnalysis {
    pub group_columns: Vec<String>,
    pub factor: String,
    pub alpha: f64,
    pub drops: Vec<GroupDrop>,
    pub tests: Vec<LipaseTest>,
    pub pairwise: Vec<PairwiseComparison>,
}

impl LipaseAnalysis {
    pub fn tests_run(&self) -> usize {
        self.tests.len() + self.pairwise.len()
    }

    pub fn tests_not_enough_data(&self) -> usize {
        self.tests.iter().filter(|t| !t.outcome.is_computed()).count()
            + self.pairwise.iter().filter(|p| !p.outcome.is_computed()).count()
    }
}

fn series_drop(values: &[f64]) -> Option<f64> {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) if values.len() >= 2 => Some(first - last),
        _ => None,
    }
}

/// Per-group drops, groups in order of first appearance
pub fn group_drops(readings: &[LipaseReading]) -> Vec<GroupDrop> {
    let mut order: Vec<&Vec<String>> = Vec::new();
    let mut members: HashMap<&Vec<String>, Vec<&LipaseReading>> = HashMap::new();

    for reading in readings {
        members
            .entry(&reading.group)
            .or_insert_with(|| {
                order.push(&reading.group);
                Vec::new()
            })
            .push(reading);
    }

    order
        .into_iter()
        .filter_map(|group| {
            let mut series = members.remove(group)?;
            // Stable: equal times keep file order
            series.sort_by(|a, b| a.time.total_cmp(&b.time));

            let cooked: Vec<f64> = series.iter().filter_map(|r| r.ph_cooked).collect();
            let uncooked: Vec<f64> = series.iter().filter_map(|r| r.ph_uncooked).collect();

            Some(GroupDrop {
                group: group.clone(),
                readings: series.len(),
                cooked_points: cooked.len(),
                uncooked_points: uncooked.len(),
                cooked_drop: series_drop(&cooked),
                uncooked_drop: series_drop(&uncooked),
            })
        })
        .collect()
}

/// Drops of one condition per factor level, levels in order of first appearance
fn drops_by_level(drops: &[GroupDrop], factor_index: usize, condition: Condition) -> Vec<(String, Vec<f64>)> {
    let mut levels: Vec<(String, Vec<f64>)> = Vec::new();
    for drop in drops {
        let Some(level) = drop.group.get(factor_index).filter(|level| !level.is_empty()) else {
            continue;
        };
        let position = match levels.iter().position(|(name, _)| name == level) {
            Some(position) => position,
            None => {
                levels.push((level.clone(), Vec::new()));
                levels.len() - 1
            }
        };
        if let Some(value) = drop.drop(condition) {
            levels[position].1.push(value);
        }
    }
    levels
}

/// Aggregate readings into drops and run every lipase test
///
/// The factor column must be one of the group columns, since its level is
/// read from each group's key.
pub fn analyze_lipase(
    readings: &[LipaseReading],
    group_columns: &[String],
    factor: &str,
    alpha: f64,
) -> Result<LipaseAnalysis> {
    let factor_index = group_columns
        .iter()
        .position(|column| column == factor)
        .ok_or_else(|| LabError::missing_column(factor, "lipase group columns"))?;

    let drops = group_drops(readings);
    debug!("Computed drops for {} lipase groups", drops.len());

    let mut tests = Vec::new();

    let (uncooked, cooked): (Vec<f64>, Vec<f64>) = drops
        .iter()
        .filter_map(|drop| Some((drop.uncooked_drop?, drop.cooked_drop?)))
        .unzip();
    tests.push(LipaseTest {
        test: "paired t-test (uncooked vs cooked)",
        condition: None,
        groups: cooked.len(),
        outcome: paired_t_test(&uncooked, &cooked)?,
    });

    let mut pairwise = Vec::new();
    for condition in Condition::ALL {
        let levels = drops_by_level(&drops, factor_index, condition);
        let samples: Vec<Vec<f64>> = levels.iter().map(|(_, values)| values.clone()).collect();

        tests.push(LipaseTest {
            test: "one-way ANOVA",
            condition: Some(condition),
            groups: samples.iter().map(Vec::len).sum(),
            outcome: one_way_anova(&samples)?,
        });

        let comparisons = levels.len() * levels.len().saturating_sub(1) / 2;
        let threshold = bonferroni_threshold(alpha, comparisons);
        for (i, (level_a, a)) in levels.iter().enumerate() {
            for (level_b, b) in levels.iter().skip(i + 1) {
                let outcome = independent_t_test(a, b)?;
                pairwise.push(PairwiseComparison {
                    condition,
                    level_a: level_a.clone(),
                    level_b: level_b.clone(),
                    n_a: a.len(),
                    n_b: b.len(),
                    mean_a: describe(a).map(|s| s.mean),
                    mean_b: describe(b).map(|s| s.mean),
                    significant: outcome.is_significant(threshold),
                    outcome,
                    threshold,
                });
            }
        }
    }

    let analysis = LipaseAnalysis {
        group_columns: group_columns.to_vec(),
        factor: factor.to_string(),
        alpha,
        drops,
        tests,
        pairwise,
    };

    info!(
        "Lipase analysis: {} groups, {} tests ({} with not enough data)",
        analysis.drops.len(),
        analysis.tests_run(),
        analysis.tests_not_enough_data()
    );

    Ok(analysis)
}
