//! Aggregation and inferential statistics per experiment
//!
//! ## Architecture
//!
//! - [`lipase`] - Per-group pH drops, paired test, ANOVA and Bonferroni pairwise tests
//! - [`tactile`] - Region summaries, region and gender comparisons, correlations, counts
//!
//! Both aggregators consume normalized rows only and delegate every test to
//! [`crate::stats`]. Degenerate inputs surface as "not enough data" records
//! in the results, never as errors.

pub mod lipase;
pub mod tactile;

#[cfg(test)]
pub mod tests;

pub use lipase::{
    Condition, GroupDrop, LipaseAnalysis, LipaseTest, PairwiseComparison, analyze_lipase, group_drops,
};
pub use tactile::{GenderComparison, RegionComparison, RegionSummary, TactileAnalysis, analyze_tactile};
