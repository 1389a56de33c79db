//! Batch gradient descent for `y = w * x + b` on Z-score normalized samples.
//!
//! The loss is the halved mean squared error `1/(2n) * sum((w * x_i + b - y_i)^2)`.
//! Training always runs the configured number of epochs: there is no convergence
//! check, no gradient-norm stopping criterion and no gradient clipping, so a too
//! large learning rate diverges.

use std::str::FromStr;

use itertools::Itertools;
use log::info;
use ndarray::ArrayView1;

use crate::dataset::SampleSet;
use crate::error::{check_pairs, RegressionError, Result};
use crate::normalization::unstandardize;
use crate::reg_lin::{self, LinearParams};
use crate::stats::AxisStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateRule {
    /// Average the gradient over every sample, then step once per epoch.
    #[default]
    Batch,
    /// Step after every sample.
    Online,
}

impl FromStr for UpdateRule {
    type Err = RegressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "batch" => Ok(UpdateRule::Batch),
            "online" => Ok(UpdateRule::Online),
            other => Err(RegressionError::invalid(format!(
                "unknown update rule `{other}`, expected `batch` or `online`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    /// The loss is reported every `reporting_interval` epochs and after the last one.
    pub reporting_interval: usize,
    pub update_rule: UpdateRule,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 500_000,
            learning_rate: 1e-4,
            reporting_interval: 100_000,
            update_rule: UpdateRule::Batch,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.reporting_interval == 0 {
            return Err(RegressionError::invalid("reporting interval must be positive"));
        }

        Ok(())
    }

    fn reports(&self, epoch: usize) -> bool {
        epoch % self.reporting_interval == 0 || epoch + 1 == self.epochs
    }
}

pub fn compute_loss(w: f64, b: f64, x_std: ArrayView1<f64>, y_std: ArrayView1<f64>) -> Result<f64> {
    check_pairs(x_std.len(), y_std.len(), 1)?;

    Ok(mse(LinearParams { slope: w, intercept: b }, x_std, y_std))
}

fn mse(params: LinearParams, x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    let LinearParams {
        slope: w,
        intercept: b,
    } = params;

    let loss = x
        .iter()
        .zip_eq(y.iter())
        .map(|(&xi, &yi)| (w * xi + b - yi).powi(2))
        .sum::<f64>();

    loss / (2 * x.len()) as f64
}

fn batch_step(params: LinearParams, x: ArrayView1<f64>, y: ArrayView1<f64>, lr: f64) -> LinearParams {
    let LinearParams {
        slope: w,
        intercept: b,
    } = params;

    // w and b stay fixed while the gradient is accumulated
    let (dw, db) = x
        .iter()
        .zip_eq(y.iter())
        .fold((0., 0.), |(dw, db), (&xi, &yi)| {
            let err = w * xi + b - yi;
            (dw + err * xi, db + err)
        });

    let n = x.len() as f64;
    let dw = dw / n;
    let db = db / n;

    LinearParams {
        slope: w - lr * dw,
        intercept: b - lr * db,
    }
}

fn online_step(params: LinearParams, x: ArrayView1<f64>, y: ArrayView1<f64>, lr: f64) -> LinearParams {
    x.iter()
        .zip_eq(y.iter())
        .fold(params, |LinearParams { slope: w, intercept: b }, (&xi, &yi)| {
            let err = w * xi + b - yi;

            LinearParams {
                slope: w - lr * err * xi,
                intercept: b - lr * err,
            }
        })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStep {
    pub epoch: usize,
    pub params: LinearParams,
    /// Set on reporting epochs only.
    pub loss: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct GradientDescent<'a> {
    x: ArrayView1<'a, f64>,
    y: ArrayView1<'a, f64>,
    config: TrainConfig,
}

impl<'a> GradientDescent<'a> {
    pub fn new(x_std: ArrayView1<'a, f64>, y_std: ArrayView1<'a, f64>, config: TrainConfig) -> Result<Self> {
        config.validate()?;
        check_pairs(x_std.len(), y_std.len(), 1)?;

        Ok(Self {
            x: x_std,
            y: y_std,
            config,
        })
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Lazily runs the epochs, starting from `w = 0, b = 0` on every call.
    ///
    /// Dropping the iterator early stops training; the steps it did yield are the
    /// same as those of a full run.
    pub fn epochs(&self) -> Epochs<'a> {
        Epochs {
            x: self.x,
            y: self.y,
            config: self.config,
            params: LinearParams::default(),
            epoch: 0,
        }
    }

    pub fn train(&self) -> LinearParams {
        self.epochs()
            .last()
            .map(|step| step.params)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct Epochs<'a> {
    x: ArrayView1<'a, f64>,
    y: ArrayView1<'a, f64>,
    config: TrainConfig,
    params: LinearParams,
    epoch: usize,
}

impl Iterator for Epochs<'_> {
    type Item = EpochStep;

    fn next(&mut self) -> Option<EpochStep> {
        if self.epoch >= self.config.epochs {
            return None;
        }

        let lr = self.config.learning_rate;

        self.params = match self.config.update_rule {
            UpdateRule::Batch => batch_step(self.params, self.x, self.y, lr),
            UpdateRule::Online => online_step(self.params, self.x, self.y, lr),
        };

        let epoch = self.epoch;
        self.epoch += 1;

        let loss = self
            .config
            .reports(epoch)
            .then(|| mse(self.params, self.x, self.y));

        if let Some(loss) = loss {
            info!("epoch {epoch}: loss {loss}");
        }

        Some(EpochStep {
            epoch,
            params: self.params,
            loss,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.config.epochs.saturating_sub(self.epoch);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Epochs<'_> {}

pub fn train<'a>(
    x_std: ArrayView1<'a, f64>,
    y_std: ArrayView1<'a, f64>,
    config: TrainConfig,
) -> Result<LinearParams> {
    Ok(GradientDescent::new(x_std, y_std, config)?.train())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientReport {
    pub x_stats: AxisStats,
    pub y_stats: AxisStats,
    pub standardized: LinearParams,
    pub params: LinearParams,
    pub r_squared: f64,
}

/// Normalizes both axes, trains, maps the line back to the original scale and scores it.
pub fn fit_standardized(samples: &SampleSet, config: TrainConfig) -> Result<GradientReport> {
    let x_stats = AxisStats::of(samples.x())?;
    let y_stats = AxisStats::of(samples.y())?;

    info!("mean x: {}, std dev x: {}", x_stats.mean, x_stats.std_dev);
    info!("mean y: {}, std dev y: {}", y_stats.mean, y_stats.std_dev);

    let x_std = x_stats.normalize(samples.x())?;
    let y_std = y_stats.normalize(samples.y())?;

    let standardized = train(x_std.view(), y_std.view(), config)?;

    let params = unstandardize(
        standardized.slope,
        standardized.intercept,
        x_stats.std_dev,
        y_stats.std_dev,
        x_stats.mean,
        y_stats.mean,
    )?;

    let r_squared = reg_lin::r_squared(
        samples.x(),
        samples.y(),
        params.slope,
        params.intercept,
        y_stats.mean,
    )?;

    Ok(GradientReport {
        x_stats,
        y_stats,
        standardized,
        params,
        r_squared,
    })
}
