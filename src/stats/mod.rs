//! Statistics collaborator
//!
//! Thin facade over `statrs`: descriptive summaries, t-tests, one-way ANOVA,
//! effect sizes and correlation. Distribution tails are always delegated to
//! `statrs`; this module only assembles the test statistics.
//!
//! Degenerate inputs (too few samples, too few groups, zero variance) never
//! fail. They produce [`TestOutcome::NotEnoughData`] carrying the reason.

pub mod correlation;
pub mod descriptive;
pub mod hypothesis;

pub use correlation::{CorrelationMatrix, pearson};
pub use descriptive::{DescriptiveStats, describe};
pub use hypothesis::{bonferroni_threshold, cohens_d, independent_t_test, one_way_anova, paired_t_test};

use crate::error::LabError;
use serde::Serialize;

/// A computed hypothesis test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestResult {
    pub statistic: f64,
    pub p_value: f64,
    /// Degrees of freedom (numerator for ANOVA)
    pub df: f64,
    /// Denominator degrees of freedom, ANOVA only
    pub df_denominator: Option<f64>,
}

/// Result of a hypothesis test on possibly degenerate data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TestOutcome {
    Computed(TestResult),
    NotEnoughData { reason: String },
}

impl TestOutcome {
    pub fn not_enough_data(reason: impl Into<String>) -> Self {
        Self::NotEnoughData {
            reason: reason.into(),
        }
    }

    pub fn result(&self) -> Option<&TestResult> {
        match self {
            Self::Computed(result) => Some(result),
            Self::NotEnoughData { .. } => None,
        }
    }

    pub fn statistic(&self) -> Option<f64> {
        self.result().map(|r| r.statistic)
    }

    pub fn p_value(&self) -> Option<f64> {
        self.result().map(|r| r.p_value)
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    /// Computed and below the threshold
    pub fn is_significant(&self, threshold: f64) -> bool {
        self.p_value().is_some_and(|p| p < threshold)
    }

    /// Reason text for degenerate outcomes, empty when computed
    pub fn note(&self) -> &str {
        match self {
            Self::Computed(_) => "",
            Self::NotEnoughData { reason } => reason,
        }
    }
}

pub(crate) fn distribution_error(error: impl std::fmt::Display) -> LabError {
    LabError::Statistics {
        reason: error.to_string(),
    }
}
