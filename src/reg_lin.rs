use itertools::Itertools;
use log::debug;
use nalgebra::{DMatrix, DVector};
use ndarray::ArrayView1;

use crate::error::{check_pairs, RegressionError, Result};
use crate::stats::is_constant;

/// Residual standard deviations below this magnitude are reported as 0.
pub const RESIDUAL_STD_DEV_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearParams {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearParams {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl std::fmt::Display for LinearParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "y = {}x + {}", self.slope, self.intercept)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    pub slope: f64,
    pub intercept: f64,
    pub ss_residual: f64,
    /// Residual standard deviation with `n - 2` degrees of freedom.
    pub std_dev_residual: f64,
    pub r_squared: f64,
}

impl FitReport {
    pub fn params(&self) -> LinearParams {
        LinearParams {
            slope: self.slope,
            intercept: self.intercept,
        }
    }
}

/// Ordinary least squares for a single predictor.
///
/// The slope is the ratio of the x/y covariance to the x variance and the line
/// passes through the point of means. Fails with [`RegressionError::DivideByZero`]
/// when x or y is constant, or when there are only two samples (the residual
/// standard deviation has no degrees of freedom left).
pub fn fit_linear(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<FitReport> {
    check_pairs(x.len(), y.len(), 2)?;

    if is_constant(x) {
        return Err(RegressionError::zero_div(
            "all x values are identical, slope is undefined",
        ));
    }

    let n = x.len();

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let (s_xy, s_xx) = x
        .iter()
        .zip_eq(y.iter())
        .fold((0., 0.), |(s_xy, s_xx), (&xi, &yi)| {
            (
                s_xy + (xi - mean_x) * (yi - mean_y),
                s_xx + (xi - mean_x).powi(2),
            )
        });

    if s_xx == 0. {
        return Err(RegressionError::zero_div("x has no spread, slope is undefined"));
    }

    let slope = s_xy / s_xx;
    let intercept = mean_y - slope * mean_x;

    debug!("mean x: {mean_x}, mean y: {mean_y}, s_xy: {s_xy}, s_xx: {s_xx}");

    let ss_residual = x
        .iter()
        .zip_eq(y.iter())
        .map(|(&xi, &yi)| (yi - (slope * xi + intercept)).powi(2))
        .sum::<f64>();

    if n == 2 {
        return Err(RegressionError::zero_div(
            "residual standard deviation needs at least 3 samples",
        ));
    }

    let std_dev_residual = match (ss_residual / (n - 2) as f64).sqrt() {
        s if s.abs() < RESIDUAL_STD_DEV_EPSILON => 0.,
        s => s,
    };

    let ss_total = y.iter().map(|&yi| (yi - mean_y).powi(2)).sum::<f64>();

    if is_constant(y) || ss_total == 0. {
        return Err(RegressionError::zero_div(
            "all y values are identical, R^2 is undefined",
        ));
    }

    Ok(FitReport {
        slope,
        intercept,
        ss_residual,
        std_dev_residual,
        r_squared: 1. - ss_residual / ss_total,
    })
}

pub fn r_squared(x: ArrayView1<f64>, y: ArrayView1<f64>, w: f64, b: f64, mean_y: f64) -> Result<f64> {
    check_pairs(x.len(), y.len(), 1)?;

    let (ss_residual, ss_total) = x
        .iter()
        .zip_eq(y.iter())
        .fold((0., 0.), |(ss_residual, ss_total), (&xi, &yi)| {
            (
                ss_residual + (yi - (w * xi + b)).powi(2),
                ss_total + (yi - mean_y).powi(2),
            )
        });

    if is_constant(y) || ss_total == 0. {
        return Err(RegressionError::zero_div(
            "total sum of squares is 0, R^2 is undefined",
        ));
    }

    Ok(1. - ss_residual / ss_total)
}

/// Solves the normal equations `(X^T X) theta = X^T y` for the design matrix `X = [1 | x]`.
pub fn normal_equations(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<LinearParams> {
    check_pairs(x.len(), y.len(), 2)?;

    if is_constant(x) {
        return Err(RegressionError::zero_div(
            "all x values are identical, X^T X is singular",
        ));
    }

    let design = DMatrix::from_fn(x.len(), 2, |i, j| if j == 0 { 1. } else { x[i] });
    let targets = DVector::from_iterator(y.len(), y.iter().cloned());

    let xtx = design.transpose() * &design;
    let xty = design.transpose() * targets;

    let theta = xtx
        .lu()
        .solve(&xty)
        .ok_or_else(|| RegressionError::zero_div("X^T X is singular"))?;

    Ok(LinearParams {
        slope: theta[1],
        intercept: theta[0],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::{aview1, Array1};

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() < eps, "{a} != {b}");
    }

    #[test]
    fn fits_known_sample() {
        let report = fit_linear(aview1(&[1., 2., 3., 4., 5.]), aview1(&[2., 4., 5., 4., 5.])).unwrap();

        assert_close(report.slope, 0.6, 1e-12);
        assert_close(report.intercept, 2.2, 1e-12);
        assert_close(report.ss_residual, 2.4, 1e-12);
        assert_close(report.std_dev_residual, 0.8f64.sqrt(), 1e-12);
        assert_close(report.r_squared, 0.6, 1e-12);
    }

    #[test]
    fn exact_line_is_recovered() {
        let x = Array1::from(vec![-3., 0., 1.5, 4., 10., 22.]);
        let (k, c) = (2.5, -4.);
        let y = x.mapv(|x| k * x + c);

        let report = fit_linear(x.view(), y.view()).unwrap();

        assert_close(report.slope, k, 1e-12);
        assert_close(report.intercept, c, 1e-12);
        assert_close(report.ss_residual, 0., 1e-18);
        assert_eq!(report.std_dev_residual, 0.);
        assert_close(report.r_squared, 1., 1e-12);
    }

    #[test]
    fn constant_x_fails() {
        assert!(matches!(
            fit_linear(aview1(&[1., 1., 1.]), aview1(&[1., 2., 3.])),
            Err(RegressionError::DivideByZero(_))
        ));
    }

    #[test]
    fn constant_y_fails() {
        assert!(matches!(
            fit_linear(aview1(&[1., 2., 3.]), aview1(&[5., 5., 5.])),
            Err(RegressionError::DivideByZero(_))
        ));
    }

    #[test]
    fn inexact_constant_axes_fail() {
        for values in [vec![0.1; 3], vec![1.1; 7]] {
            let ramp: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();

            assert!(matches!(
                fit_linear(aview1(&values), aview1(&ramp)),
                Err(RegressionError::DivideByZero(_))
            ));
            assert!(matches!(
                normal_equations(aview1(&values), aview1(&ramp)),
                Err(RegressionError::DivideByZero(_))
            ));
            assert!(matches!(
                fit_linear(aview1(&ramp), aview1(&values)),
                Err(RegressionError::DivideByZero(_))
            ));

            let mean_y = values.iter().sum::<f64>() / values.len() as f64;
            assert!(matches!(
                r_squared(aview1(&ramp), aview1(&values), 0., mean_y, mean_y),
                Err(RegressionError::DivideByZero(_))
            ));
        }
    }

    #[test]
    fn two_samples_have_no_residual_dof() {
        assert!(matches!(
            fit_linear(aview1(&[1., 2.]), aview1(&[3., 5.])),
            Err(RegressionError::DivideByZero(_))
        ));
    }

    #[test]
    fn undersized_or_mismatched_input_fails() {
        assert!(matches!(
            fit_linear(aview1(&[1.]), aview1(&[1.])),
            Err(RegressionError::InvalidArgument(_))
        ));
        assert!(matches!(
            fit_linear(aview1(&[1., 2., 3.]), aview1(&[1., 2.])),
            Err(RegressionError::InvalidArgument(_))
        ));
        assert!(matches!(
            r_squared(aview1(&[1., 2.]), aview1(&[1.]), 1., 0., 1.),
            Err(RegressionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn r_squared_of_perfect_line() {
        let r2 = r_squared(aview1(&[1., 2., 3.]), aview1(&[2., 4., 6.]), 2., 0., 4.).unwrap();

        assert_eq!(r2, 1.);
    }

    #[test]
    fn r_squared_of_constant_y_fails() {
        assert!(matches!(
            r_squared(aview1(&[1., 2., 3.]), aview1(&[4., 4., 4.]), 0., 4., 4.),
            Err(RegressionError::DivideByZero(_))
        ));
    }

    #[test]
    fn normal_equations_agree_with_closed_form() {
        let x = aview1(&[1., 2., 3., 4., 5.]);
        let y = aview1(&[2., 4., 5., 4., 5.]);

        let params = normal_equations(x, y).unwrap();
        let report = fit_linear(x, y).unwrap();

        assert_close(params.slope, report.slope, 1e-9);
        assert_close(params.intercept, report.intercept, 1e-9);
    }

    #[test]
    fn normal_equations_reject_constant_x() {
        assert!(matches!(
            normal_equations(aview1(&[2., 2., 2.]), aview1(&[1., 2., 3.])),
            Err(RegressionError::DivideByZero(_))
        ));
    }

    #[test]
    fn prediction_and_display() {
        let params = LinearParams {
            slope: 2.,
            intercept: -1.,
        };

        assert_eq!(params.predict(3.), 5.);
        assert_eq!(params.to_string(), "y = 2x + -1");
    }
}
