//! Univariate linear regression: closed-form least squares, batch gradient descent
//! on Z-score normalized samples, and the set-up of a polynomial model.

pub mod dataset;
pub mod error;
pub mod gradient_descent;
pub mod normalization;
pub mod poly_fit;
pub mod reg_lin;
pub mod stats;

pub use dataset::SampleSet;
pub use error::{RegressionError, Result};
pub use gradient_descent::{fit_standardized, train, GradientDescent, TrainConfig, UpdateRule};
pub use reg_lin::{fit_linear, r_squared, FitReport, LinearParams};
pub use stats::{mean_and_std_dev, AxisStats};
