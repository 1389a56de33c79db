use ndarray::{Array1, ArrayView1};

use crate::error::{RegressionError, Result};
use crate::normalization::z_score_normalize;

/// Mean and population standard deviation of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl AxisStats {
    pub fn of(values: ArrayView1<f64>) -> Result<AxisStats> {
        mean_and_std_dev(values)
    }

    /// Z-score normalizes `values` with these statistics.
    pub fn normalize(&self, values: ArrayView1<f64>) -> Result<Array1<f64>> {
        z_score_normalize(values, self.mean, self.std_dev)
    }
}

/// Computes the mean and the population standard deviation (divisor `n`).
///
/// A single value has a standard deviation of 0, an empty sequence is rejected.
pub fn mean_and_std_dev(values: ArrayView1<f64>) -> Result<AxisStats> {
    if values.is_empty() {
        return Err(RegressionError::invalid(
            "cannot compute statistics of an empty sequence",
        ));
    }

    if is_constant(values) {
        return Ok(AxisStats {
            mean: values[0],
            std_dev: 0.,
        });
    }

    let n = values.len() as f64;

    let mean = values.iter().sum::<f64>() / n;

    let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n;

    Ok(AxisStats {
        mean,
        std_dev: variance.sqrt(),
    })
}

// deviations from a rounded mean are not exactly 0 for values like 0.1
pub(crate) fn is_constant(values: ArrayView1<f64>) -> bool {
    match values.iter().next() {
        Some(&first) => values.iter().all(|&v| v == first),
        None => false,
    }
}
