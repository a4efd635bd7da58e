//! Pearson correlation with pairwise-complete observations

use serde::Serialize;
use statrs::statistics::Statistics;

/// Pearson's r over the pairs where both values are present
///
/// `None` with fewer than two complete pairs or a constant variable.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();

    if xs.len() < 2 {
        return None;
    }

    let sx = xs.iter().std_dev();
    let sy = ys.iter().std_dev();
    if !(sx > 0.0 && sy > 0.0) {
        return None;
    }

    let r = xs.iter().covariance(ys.iter()) / (sx * sy);
    Some(r.clamp(-1.0, 1.0))
}

/// Symmetric matrix of pairwise correlations between labelled variables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlate every pair of columns; the diagonal is 1 where a column varies
    pub fn compute(labels: Vec<String>, columns: &[Vec<Option<f64>>]) -> Self {
        let size = columns.len();
        let mut values = vec![vec![None; size]; size];
        for i in 0..size {
            for j in i..size {
                let r = pearson(&columns[i], &columns[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self { labels, values }
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j).copied().flatten())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
