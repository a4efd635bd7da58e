//! Plain-text narrative reports

use crate::analysis::{Condition, LipaseAnalysis, TactileAnalysis};
use crate::block_parser::{ParseStats, TidyStats};
use crate::constants::categories;
use crate::stats::{TestOutcome, describe};
use std::fmt::Write;

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(title.to_string());
    lines.push("-".repeat(title.chars().count()));
}

fn outcome_line(outcome: &TestOutcome) -> String {
    match outcome {
        TestOutcome::Computed(result) => {
            let mut line = format!("statistic = {:.3}, p = {:.4}, df = {}", result.statistic, result.p_value, result.df);
            if let Some(denominator) = result.df_denominator {
                let _ = write!(line, "/{}", denominator);
            }
            line
        }
        TestOutcome::NotEnoughData { reason } => format!("not enough data ({})", reason),
    }
}

/// Narrative summary of the lipase run
pub fn lipase_report(analysis: &LipaseAnalysis, parse: &ParseStats, tidy: &TidyStats) -> String {
    let mut lines = vec![
        "LIPASE pH-KINETICS ANALYSIS REPORT".to_string(),
        "=".repeat(50),
        String::new(),
    ];

    heading(&mut lines, "1. OVERVIEW");
    lines.push(format!("Lines scanned: {}", parse.lines_scanned));
    lines.push(format!(
        "Records emitted by the block parser: {}",
        parse.records_emitted
    ));
    lines.push(format!(
        "Records retained after tidy-up: {} ({} without time, {} without values)",
        tidy.retained, tidy.missing_time, tidy.missing_values
    ));
    lines.push(format!(
        "Experimental groups: {} (keyed by {})",
        analysis.drops.len(),
        analysis.group_columns.join(", ")
    ));
    lines.push(String::new());

    heading(&mut lines, "2. pH DROPS (first - last reading)");
    for condition in Condition::ALL {
        let drops: Vec<f64> = analysis.drops.iter().filter_map(|d| d.drop(condition)).collect();
        match describe(&drops) {
            Some(stats) => lines.push(format!(
                "  {}: n = {}, mean = {:.3}, sd = {}, range {:.3} - {:.3}",
                condition.label(),
                stats.n,
                stats.mean,
                stats.std.map(|s| format!("{:.3}", s)).unwrap_or_else(|| "n/a".to_string()),
                stats.min,
                stats.max
            )),
            None => lines.push(format!("  {}: no group with two readings", condition.label())),
        }
    }
    lines.push(String::new());

    heading(&mut lines, "3. STATISTICAL TESTS");
    for test in &analysis.tests {
        let scope = match test.condition {
            Some(condition) => format!("{} by {}, {}", test.test, analysis.factor, condition.label()),
            None => test.test.to_string(),
        };
        lines.push(format!("  {}: {}", scope, outcome_line(&test.outcome)));
        if test.outcome.is_significant(analysis.alpha) {
            lines.push(format!("    significant at alpha = {}", analysis.alpha));
        }
    }
    lines.push(String::new());

    heading(&mut lines, "4. PAIRWISE COMPARISONS (Bonferroni)");
    if analysis.pairwise.is_empty() {
        lines.push(format!("  Fewer than two levels of {}; no comparisons.", analysis.factor));
    }
    for comparison in &analysis.pairwise {
        lines.push(format!(
            "  {} {} vs {}: {} (threshold {:.4}){}",
            comparison.condition.label(),
            comparison.level_a,
            comparison.level_b,
            outcome_line(&comparison.outcome),
            comparison.threshold,
            if comparison.significant { " *" } else { "" }
        ));
    }

    lines.join("\n") + "\n"
}

/// Narrative summary of the tactile run
pub fn tactile_report(analysis: &TactileAnalysis) -> String {
    let mut lines = vec![
        "TACTILE SENSITIVITY ANALYSIS REPORT".to_string(),
        "=".repeat(50),
        String::new(),
    ];

    heading(&mut lines, "1. OVERVIEW");
    lines.push(format!("Total participants analyzed: {}", analysis.participants));
    lines.push(format!(
        "Male participants: {}",
        analysis.gender_count(categories::MALE)
    ));
    lines.push(format!(
        "Female participants: {}",
        analysis.gender_count(categories::FEMALE)
    ));
    let age_groups: Vec<String> = analysis
        .age_group_counts
        .iter()
        .map(|(label, count)| format!("{} {}", label, count))
        .collect();
    lines.push(format!("Age groups: {}", age_groups.join(", ")));
    lines.push(String::new());

    heading(&mut lines, "2. DESCRIPTIVE STATISTICS (mm)");
    for summary in &analysis.descriptive {
        let stats = &summary.stats;
        lines.push(String::new());
        lines.push(format!("{}:", summary.region));
        lines.push(format!("  N: {}", stats.n));
        match stats.std {
            Some(std) => lines.push(format!("  Mean: {:.2} ± {:.2} mm", stats.mean, std)),
            None => lines.push(format!("  Mean: {:.2} mm", stats.mean)),
        }
        lines.push(format!("  Median: {:.2} mm", stats.median));
        lines.push(format!("  Range: {:.2} - {:.2} mm", stats.min, stats.max));
    }
    lines.push(String::new());

    heading(&mut lines, "3. BODY REGION COMPARISONS");
    lines.push(format!("Significant differences (p < {}):", analysis.alpha));
    let significant: Vec<_> = analysis.region_comparisons.iter().filter(|c| c.significant).collect();
    if significant.is_empty() {
        lines.push("  No significant differences found.".to_string());
    }
    for comparison in significant {
        if let Some(p) = comparison.outcome.p_value() {
            lines.push(format!(
                "  {} vs {}: p = {:.4}",
                comparison.region_a, comparison.region_b, p
            ));
        }
    }
    lines.push(String::new());

    heading(&mut lines, "4. GENDER COMPARISONS");
    lines.push(format!("Significant gender differences (p < {}):", analysis.alpha));
    let significant: Vec<_> = analysis.gender_comparisons.iter().filter(|c| c.significant).collect();
    if significant.is_empty() {
        lines.push("  No significant gender differences found.".to_string());
    }
    for comparison in significant {
        if let (Some(p), Some(male), Some(female)) = (
            comparison.outcome.p_value(),
            comparison.male_mean,
            comparison.female_mean,
        ) {
            lines.push(format!("  {}: p = {:.4}", comparison.region, p));
            lines.push(format!("    Male mean: {:.2} mm", male));
            lines.push(format!("    Female mean: {:.2} mm", female));
        }
    }
    let skipped: Vec<&str> = analysis
        .gender_comparisons
        .iter()
        .filter(|c| !c.outcome.is_computed())
        .map(|c| c.region.as_str())
        .collect();
    if !skipped.is_empty() {
        lines.push(format!("Not enough data for: {}", skipped.join(", ")));
    }
    lines.push(String::new());

    heading(&mut lines, "5. INTERPRETATION");
    match (analysis.most_sensitive(), analysis.least_sensitive()) {
        (Some(most), Some(least)) => {
            lines.push(format!(
                "Most sensitive region: {} ({:.2} mm)",
                most.region, most.stats.mean
            ));
            lines.push(format!(
                "Least sensitive region: {} ({:.2} mm)",
                least.region, least.stats.mean
            ));
            lines.push(String::new());
            lines.push("DISCUSSION:".to_string());
            lines.push("Two-point discrimination thresholds differ between body regions.".to_string());
            lines.push("Smaller thresholds mark regions with a denser mechanoreceptor supply,".to_string());
            lines.push("typically the fingertips, while back and forearm show larger thresholds.".to_string());
        }
        _ => lines.push("Not enough data to rank body regions.".to_string()),
    }

    lines.join("\n") + "\n"
}
