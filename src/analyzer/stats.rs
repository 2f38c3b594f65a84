// Numeric helpers shared by the aggregate views: means, ranges, percentiles, buckets
use crate::model::{NameValue, ValueRange};

/// How a value sitting exactly on a bound is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// `[lower, upper)`; the last bucket is unbounded.
    HalfOpen,
    /// `(lower, upper]`; the last bucket is unbounded.
    UpperClosed,
}

/// A fixed, ordered set of ranges. `bounds` has one entry fewer than `labels`.
#[derive(Debug, Clone, Copy)]
pub struct BucketSet {
    pub labels: &'static [&'static str],
    pub bounds: &'static [f64],
    pub edge: Edge,
}

impl BucketSet {
    pub const fn new(labels: &'static [&'static str], bounds: &'static [f64], edge: Edge) -> Self {
        Self { labels, bounds, edge }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Every value lands in exactly one bucket.
    pub fn index_of(&self, value: f64) -> usize {
        self.bounds
            .iter()
            .position(|&bound| match self.edge {
                Edge::HalfOpen => value < bound,
                Edge::UpperClosed => value <= bound,
            })
            .unwrap_or(self.bounds.len())
    }

    pub fn counts<I>(&self, values: I) -> Vec<usize>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut counts = vec![0; self.len()];
        for value in values {
            counts[self.index_of(value)] += 1;
        }
        counts
    }

    pub fn distribution<I>(&self, values: I) -> Vec<NameValue>
    where
        I: IntoIterator<Item = f64>,
    {
        self.labels
            .iter()
            .zip(self.counts(values))
            .map(|(label, count)| NameValue::new(*label, count))
            .collect()
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean rounded to a whole number, `0.0` for no values.
pub fn rounded_mean(values: &[f64]) -> f64 {
    mean(values).round()
}

/// `{min: 0, max: 0}` for no values.
pub fn value_range(values: &[f64]) -> ValueRange {
    if values.is_empty() {
        return ValueRange::default();
    }
    ValueRange {
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Nearest-rank percentile over an ascending slice: `sorted[floor(n * p)]`.
pub fn nearest_rank(sorted: &[f64], percentile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (sorted.len() as f64 * percentile).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

pub fn sorted_ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Calculates the Pearson correlation coefficient between two slices.
/// Returns None if slices have different lengths, are empty or have no variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.is_empty() {
        return None;
    }
    let mean_x = mean(x);
    let mean_y = mean(y);
    let numerator: f64 = x.iter().zip(y.iter()).map(|(xi, yi)| (xi - mean_x) * (yi - mean_y)).sum();
    let denominator_x: f64 = x.iter().map(|xi| (xi - mean_x).powi(2)).sum();
    let denominator_y: f64 = y.iter().map(|yi| (yi - mean_y).powi(2)).sum();
    let denominator = (denominator_x * denominator_y).sqrt();
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}
