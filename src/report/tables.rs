//! Result tables as polars DataFrames written to flat CSV files

use crate::analysis::{LipaseAnalysis, TactileAnalysis};
use crate::error::Result;
use crate::models::LipaseReading;
use crate::stats::TestOutcome;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::debug;

fn count(value: usize) -> u64 {
    value as u64
}

fn statistic(outcome: &TestOutcome) -> Option<f64> {
    outcome.statistic()
}

fn p_value(outcome: &TestOutcome) -> Option<f64> {
    outcome.p_value()
}

/// Write a frame as comma-separated CSV with a header row
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    debug!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

/// One row per retained measurement: group columns, time, both pH values
pub fn lipase_tidy_frame(
    readings: &[LipaseReading],
    group_columns: &[String],
    time_column: &str,
) -> Result<DataFrame> {
    let mut columns: Vec<Column> = group_columns
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let values: Vec<&str> = readings
                .iter()
                .map(|reading| reading.group.get(index).map(String::as_str).unwrap_or(""))
                .collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();

    columns.push(Column::new(
        time_column.into(),
        readings.iter().map(|r| r.time).collect::<Vec<f64>>(),
    ));
    columns.push(Column::new(
        crate::constants::columns::PH_COOKED.into(),
        readings.iter().map(|r| r.ph_cooked).collect::<Vec<Option<f64>>>(),
    ));
    columns.push(Column::new(
        crate::constants::columns::PH_UNCOOKED.into(),
        readings.iter().map(|r| r.ph_uncooked).collect::<Vec<Option<f64>>>(),
    ));

    Ok(DataFrame::new(columns)?)
}

/// One row per group with its pH drop per condition
pub fn lipase_drops_frame(analysis: &LipaseAnalysis) -> Result<DataFrame> {
    let drops = &analysis.drops;
    let mut columns: Vec<Column> = analysis
        .group_columns
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let values: Vec<&str> = drops
                .iter()
                .map(|drop| drop.group.get(index).map(String::as_str).unwrap_or(""))
                .collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();

    columns.extend([
        Column::new(
            "readings".into(),
            drops.iter().map(|d| count(d.readings)).collect::<Vec<u64>>(),
        ),
        Column::new(
            "cooked_points".into(),
            drops.iter().map(|d| count(d.cooked_points)).collect::<Vec<u64>>(),
        ),
        Column::new(
            "uncooked_points".into(),
            drops.iter().map(|d| count(d.uncooked_points)).collect::<Vec<u64>>(),
        ),
        Column::new(
            "drop_cooked".into(),
            drops.iter().map(|d| d.cooked_drop).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "drop_uncooked".into(),
            drops.iter().map(|d| d.uncooked_drop).collect::<Vec<Option<f64>>>(),
        ),
    ]);

    Ok(DataFrame::new(columns)?)
}

/// Paired test and per-condition ANOVA results
pub fn lipase_tests_frame(analysis: &LipaseAnalysis) -> Result<DataFrame> {
    let tests = &analysis.tests;
    let df = DataFrame::new(vec![
        Column::new("test".into(), tests.iter().map(|t| t.test).collect::<Vec<&str>>()),
        Column::new(
            "condition".into(),
            tests
                .iter()
                .map(|t| t.condition.map(|c| c.label()).unwrap_or("both"))
                .collect::<Vec<&str>>(),
        ),
        Column::new(
            "factor".into(),
            tests
                .iter()
                .map(|t| if t.condition.is_some() { analysis.factor.as_str() } else { "" })
                .collect::<Vec<&str>>(),
        ),
        Column::new("groups".into(), tests.iter().map(|t| count(t.groups)).collect::<Vec<u64>>()),
        Column::new(
            "statistic".into(),
            tests.iter().map(|t| statistic(&t.outcome)).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "p_value".into(),
            tests.iter().map(|t| p_value(&t.outcome)).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "df".into(),
            tests
                .iter()
                .map(|t| t.outcome.result().map(|r| r.df))
                .collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "df_denominator".into(),
            tests
                .iter()
                .map(|t| t.outcome.result().and_then(|r| r.df_denominator))
                .collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "significant".into(),
            tests
                .iter()
                .map(|t| t.outcome.is_significant(analysis.alpha))
                .collect::<Vec<bool>>(),
        ),
        Column::new("note".into(), tests.iter().map(|t| t.outcome.note()).collect::<Vec<&str>>()),
    ])?;
    Ok(df)
}

/// Bonferroni-corrected pairwise comparisons between factor levels
pub fn lipase_pairwise_frame(analysis: &LipaseAnalysis) -> Result<DataFrame> {
    let rows = &analysis.pairwise;
    let df = DataFrame::new(vec![
        Column::new(
            "condition".into(),
            rows.iter().map(|p| p.condition.label()).collect::<Vec<&str>>(),
        ),
        Column::new(
            "level_a".into(),
            rows.iter().map(|p| p.level_a.as_str()).collect::<Vec<&str>>(),
        ),
        Column::new(
            "level_b".into(),
            rows.iter().map(|p| p.level_b.as_str()).collect::<Vec<&str>>(),
        ),
        Column::new("n_a".into(), rows.iter().map(|p| count(p.n_a)).collect::<Vec<u64>>()),
        Column::new("n_b".into(), rows.iter().map(|p| count(p.n_b)).collect::<Vec<u64>>()),
        Column::new("mean_a".into(), rows.iter().map(|p| p.mean_a).collect::<Vec<Option<f64>>>()),
        Column::new("mean_b".into(), rows.iter().map(|p| p.mean_b).collect::<Vec<Option<f64>>>()),
        Column::new(
            "t_statistic".into(),
            rows.iter().map(|p| statistic(&p.outcome)).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "p_value".into(),
            rows.iter().map(|p| p_value(&p.outcome)).collect::<Vec<Option<f64>>>(),
        ),
        Column::new("threshold".into(), rows.iter().map(|p| p.threshold).collect::<Vec<f64>>()),
        Column::new(
            "significant".into(),
            rows.iter().map(|p| p.significant).collect::<Vec<bool>>(),
        ),
        Column::new("note".into(), rows.iter().map(|p| p.outcome.note()).collect::<Vec<&str>>()),
    ])?;
    Ok(df)
}

/// Per-region descriptive statistics
pub fn descriptive_frame(analysis: &TactileAnalysis) -> Result<DataFrame> {
    let rows = &analysis.descriptive;
    let field = |f: fn(&crate::stats::DescriptiveStats) -> f64| -> Vec<f64> {
        rows.iter().map(|r| f(&r.stats)).collect()
    };

    let df = DataFrame::new(vec![
        Column::new(
            "Body Region".into(),
            rows.iter().map(|r| r.region.as_str()).collect::<Vec<&str>>(),
        ),
        Column::new("n".into(), rows.iter().map(|r| count(r.stats.n)).collect::<Vec<u64>>()),
        Column::new("mean".into(), field(|s| s.mean)),
        Column::new("median".into(), field(|s| s.median)),
        Column::new("std".into(), rows.iter().map(|r| r.stats.std).collect::<Vec<Option<f64>>>()),
        Column::new("min".into(), field(|s| s.min)),
        Column::new("max".into(), field(|s| s.max)),
        Column::new("q25".into(), field(|s| s.q25)),
        Column::new("q75".into(), field(|s| s.q75)),
    ])?;
    Ok(df)
}

/// Pairwise body region comparisons
pub fn region_comparisons_frame(analysis: &TactileAnalysis) -> Result<DataFrame> {
    let rows = &analysis.region_comparisons;
    let df = DataFrame::new(vec![
        Column::new(
            "Region 1".into(),
            rows.iter().map(|r| r.region_a.as_str()).collect::<Vec<&str>>(),
        ),
        Column::new(
            "Region 2".into(),
            rows.iter().map(|r| r.region_b.as_str()).collect::<Vec<&str>>(),
        ),
        Column::new("Mean 1".into(), rows.iter().map(|r| r.mean_a).collect::<Vec<Option<f64>>>()),
        Column::new("Mean 2".into(), rows.iter().map(|r| r.mean_b).collect::<Vec<Option<f64>>>()),
        Column::new(
            "t-statistic".into(),
            rows.iter().map(|r| statistic(&r.outcome)).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "p-value".into(),
            rows.iter().map(|r| p_value(&r.outcome)).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "Cohen's d".into(),
            rows.iter().map(|r| r.cohens_d).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "Significant".into(),
            rows.iter().map(|r| r.significant).collect::<Vec<bool>>(),
        ),
        Column::new("Note".into(), rows.iter().map(|r| r.outcome.note()).collect::<Vec<&str>>()),
    ])?;
    Ok(df)
}

/// Male vs female comparison per body region
pub fn gender_comparisons_frame(analysis: &TactileAnalysis) -> Result<DataFrame> {
    let rows = &analysis.gender_comparisons;
    let df = DataFrame::new(vec![
        Column::new(
            "Body Region".into(),
            rows.iter().map(|r| r.region.as_str()).collect::<Vec<&str>>(),
        ),
        Column::new(
            "Male Mean".into(),
            rows.iter().map(|r| r.male_mean).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "Female Mean".into(),
            rows.iter().map(|r| r.female_mean).collect::<Vec<Option<f64>>>(),
        ),
        Column::new("Male N".into(), rows.iter().map(|r| count(r.male_n)).collect::<Vec<u64>>()),
        Column::new(
            "Female N".into(),
            rows.iter().map(|r| count(r.female_n)).collect::<Vec<u64>>(),
        ),
        Column::new(
            "t-statistic".into(),
            rows.iter().map(|r| statistic(&r.outcome)).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "p-value".into(),
            rows.iter().map(|r| p_value(&r.outcome)).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "Cohen's d".into(),
            rows.iter().map(|r| r.cohens_d).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "Significant".into(),
            rows.iter().map(|r| r.significant).collect::<Vec<bool>>(),
        ),
        Column::new("Note".into(), rows.iter().map(|r| r.outcome.note()).collect::<Vec<&str>>()),
    ])?;
    Ok(df)
}
