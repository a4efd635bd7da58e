//! Descriptive summaries of one sample

use serde::Serialize;
use statrs::statistics::{Data, Median, OrderStatistics, Statistics};

/// Summary of a non-empty sample; `std` needs at least two values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub q25: f64,
    pub q75: f64,
}

/// Summarize a sample, `None` when it is empty
pub fn describe(values: &[f64]) -> Option<DescriptiveStats> {
    if values.is_empty() {
        return None;
    }

    let mut data = Data::new(values.to_vec());
    let std = (values.len() > 1).then(|| values.iter().std_dev());

    Some(DescriptiveStats {
        n: values.len(),
        mean: values.iter().mean(),
        median: data.median(),
        std,
        min: Statistics::min(values.iter()),
        max: Statistics::max(values.iter()),
        q25: data.lower_quartile(),
        q75: data.upper_quartile(),
    })
}
