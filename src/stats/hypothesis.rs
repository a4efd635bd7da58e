//! Hypothesis tests and effect sizes

use super::{TestOutcome, TestResult, distribution_error};
use crate::constants::MIN_SAMPLES_PER_GROUP;
use crate::error::Result;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};
use statrs::statistics::Statistics;

/// Two-sided p-value of a t statistic
fn two_sided_p(t: f64, df: f64) -> Result<f64> {
    let distribution = StudentsT::new(0.0, 1.0, df).map_err(distribution_error)?;
    Ok((2.0 * distribution.sf(t.abs())).min(1.0))
}

/// Pooled sample variance of two samples, each with at least two values
fn pooled_variance(a: &[f64], b: &[f64]) -> f64 {
    let (na, nb) = (a.len() as f64, b.len() as f64);
    ((na - 1.0) * a.iter().variance() + (nb - 1.0) * b.iter().variance()) / (na + nb - 2.0)
}

/// Student's two-sample t-test assuming equal variances
pub fn independent_t_test(a: &[f64], b: &[f64]) -> Result<TestOutcome> {
    if a.len() < MIN_SAMPLES_PER_GROUP || b.len() < MIN_SAMPLES_PER_GROUP {
        return Ok(TestOutcome::not_enough_data(format!(
            "need at least {} values per sample, got {} and {}",
            MIN_SAMPLES_PER_GROUP,
            a.len(),
            b.len()
        )));
    }

    let pooled = pooled_variance(a, b);
    if !(pooled > 0.0) {
        return Ok(TestOutcome::not_enough_data("zero variance in both samples"));
    }

    let (na, nb) = (a.len() as f64, b.len() as f64);
    let t = (a.iter().mean() - b.iter().mean()) / (pooled * (1.0 / na + 1.0 / nb)).sqrt();
    let df = na + nb - 2.0;

    Ok(TestOutcome::Computed(TestResult {
        statistic: t,
        p_value: two_sided_p(t, df)?,
        df,
        df_denominator: None,
    }))
}

/// Paired t-test of `a - b` over index-aligned pairs
pub fn paired_t_test(a: &[f64], b: &[f64]) -> Result<TestOutcome> {
    if a.len() != b.len() {
        return Ok(TestOutcome::not_enough_data(format!(
            "unpaired samples of length {} and {}",
            a.len(),
            b.len()
        )));
    }
    if a.len() < MIN_SAMPLES_PER_GROUP {
        return Ok(TestOutcome::not_enough_data(format!(
            "need at least {} pairs, got {}",
            MIN_SAMPLES_PER_GROUP,
            a.len()
        )));
    }

    let differences: Vec<f64> = a.iter().zip(b).map(|(x, y)| x - y).collect();
    let sd = differences.iter().std_dev();
    if !(sd > 0.0) {
        return Ok(TestOutcome::not_enough_data("zero variance in paired differences"));
    }

    let n = differences.len() as f64;
    let t = differences.iter().mean() / (sd / n.sqrt());
    let df = n - 1.0;

    Ok(TestOutcome::Computed(TestResult {
        statistic: t,
        p_value: two_sided_p(t, df)?,
        df,
        df_denominator: None,
    }))
}

/// One-way ANOVA across groups; empty groups are ignored
pub fn one_way_anova(groups: &[Vec<f64>]) -> Result<TestOutcome> {
    let groups: Vec<&Vec<f64>> = groups.iter().filter(|group| !group.is_empty()).collect();
    let k = groups.len();
    let total: usize = groups.iter().map(|group| group.len()).sum();

    if k < 2 {
        return Ok(TestOutcome::not_enough_data(format!(
            "need at least 2 non-empty groups, got {}",
            k
        )));
    }
    if total <= k {
        return Ok(TestOutcome::not_enough_data(
            "no within-group degrees of freedom",
        ));
    }

    let grand_mean = groups.iter().flat_map(|group| group.iter()).mean();
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in &groups {
        let mean = group.iter().mean();
        ss_between += group.len() as f64 * (mean - grand_mean).powi(2);
        ss_within += group.iter().map(|value| (value - mean).powi(2)).sum::<f64>();
    }

    if !(ss_within > 0.0) {
        return Ok(TestOutcome::not_enough_data("zero variance within groups"));
    }

    let df_between = (k - 1) as f64;
    let df_within = (total - k) as f64;
    let f = (ss_between / df_between) / (ss_within / df_within);
    let distribution = FisherSnedecor::new(df_between, df_within).map_err(distribution_error)?;

    Ok(TestOutcome::Computed(TestResult {
        statistic: f,
        p_value: distribution.sf(f),
        df: df_between,
        df_denominator: Some(df_within),
    }))
}

/// Cohen's d with pooled standard deviation, `None` for degenerate samples
pub fn cohens_d(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() < MIN_SAMPLES_PER_GROUP || b.len() < MIN_SAMPLES_PER_GROUP {
        return None;
    }
    let pooled_std = pooled_variance(a, b).sqrt();
    (pooled_std > 0.0).then(|| (a.iter().mean() - b.iter().mean()) / pooled_std)
}

/// Per-comparison significance threshold for `comparisons` tests
pub fn bonferroni_threshold(alpha: f64, comparisons: usize) -> f64 {
    alpha / comparisons.max(1) as f64
}
