//! Aggregator tests
//!
//! - **lipase_tests**: group drops, paired test, ANOVA, Bonferroni pairwise
//! - **tactile_tests**: region summaries, comparisons, correlation, counts

pub mod tactile_tests;
