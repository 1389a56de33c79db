//! Set-up for a univariate polynomial model
//! `y = w[0] * x^d + w[1] * x^(d-1) + ... + w[d-1] * x + b`.
//!
//! Only the initial state is built: zeroed weights and bias plus normalized samples.
//! There is no training routine for this model.

use ndarray::Array1;

use crate::dataset::SampleSet;
use crate::error::{RegressionError, Result};
use crate::stats::AxisStats;

pub const DEFAULT_DEGREE: usize = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialSetup {
    /// Highest power first.
    pub weights: Array1<f64>,
    pub bias: f64,
    pub x_stats: AxisStats,
    pub y_stats: AxisStats,
    pub x_std: Array1<f64>,
    pub y_std: Array1<f64>,
}

impl PolynomialSetup {
    pub fn new(samples: &SampleSet, degree: usize) -> Result<PolynomialSetup> {
        if degree == 0 {
            return Err(RegressionError::invalid("polynomial degree must be positive"));
        }

        let (x_stats, y_stats) = samples.stats()?;

        Ok(PolynomialSetup {
            weights: Array1::zeros(degree),
            bias: 0.,
            x_std: x_stats.normalize(samples.x())?,
            y_std: y_stats.normalize(samples.y())?,
            x_stats,
            y_stats,
        })
    }

    pub fn degree(&self) -> usize {
        self.weights.len()
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        // Horner
        self.weights.iter().fold(0., |acc, &w| (acc + w) * x) + self.bias
    }
}
