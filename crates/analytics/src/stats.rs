//! Order statistics over samples that may contain missing values.
//!
//! NaN marks a missing value and is skipped. Infinities are ordinary values
//! and take part in ranking.

use std::cmp::Ordering;

fn sorted_finite_or_inf(samples: &[f64]) -> Vec<f64> {
    let mut values: Vec<f64> = samples.iter().copied().filter(|v| !v.is_nan()).collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    values
}

/// Arithmetic mean, NaN when no samples remain.
pub fn mean(samples: &[f64]) -> f64 {
    let (sum, count) = samples
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Percentile with linear interpolation between closest ranks.
///
/// `q` is a fraction in `[0, 1]`. For sorted `x` of length `n` the rank is
/// `q * (n - 1)`; the result interpolates between the two neighbouring values.
pub fn percentile(samples: &[f64], q: f64) -> f64 {
    let values = sorted_finite_or_inf(samples);
    percentile_sorted(&values, q)
}

/// [`percentile`] over samples already sorted ascending with NaN removed.
pub fn percentile_sorted(values: &[f64], q: f64) -> f64 {
    match values.len() {
        0 => f64::NAN,
        1 => values[0],
        n => {
            let rank = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            if lo == hi {
                values[lo]
            } else {
                values[lo] + (values[hi] - values[lo]) * (rank - lo as f64)
            }
        }
    }
}

pub fn median(samples: &[f64]) -> f64 {
    percentile(samples, 0.5)
}

/// Mean, median, and the 20th/80th percentiles of one group of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub p80: f64,
    pub p20: f64,
}

impl Summary {
    pub fn of(samples: &[f64]) -> Self {
        let sorted = sorted_finite_or_inf(samples);
        Self {
            mean: mean(&sorted),
            median: percentile_sorted(&sorted, 0.5),
            p80: percentile_sorted(&sorted, 0.8),
            p20: percentile_sorted(&sorted, 0.2),
        }
    }
}
