use ndarray::{Array1, ArrayView1};

use crate::error::{RegressionError, Result};
use crate::reg_lin::LinearParams;

/// Maps every value to `(v - mean) / std_dev`.
pub fn z_score_normalize(values: ArrayView1<f64>, mean: f64, std_dev: f64) -> Result<Array1<f64>> {
    if std_dev == 0. {
        return Err(RegressionError::zero_div(
            "standard deviation is 0, values are constant",
        ));
    }

    Ok(values.mapv(|v| (v - mean) / std_dev))
}

/// Maps a line fitted on Z-score normalized data back to the original scale.
///
/// Substituting `x_std = (x - mean_x) / std_dev_x` and `y_std = (y - mean_y) / std_dev_y`
/// into `y_std = w * x_std + b` and solving for `y` gives:
///
/// * `w' = w * (std_dev_y / std_dev_x)`
/// * `b' = (b - w * mean_x / std_dev_x) * std_dev_y + mean_y`
///
/// Both are evaluated in exactly this order so results are bit-for-bit reproducible.
pub fn unstandardize(
    w: f64,
    b: f64,
    std_dev_x: f64,
    std_dev_y: f64,
    mean_x: f64,
    mean_y: f64,
) -> Result<LinearParams> {
    if std_dev_x == 0. {
        return Err(RegressionError::zero_div(
            "standard deviation of x is 0, cannot unstandardize",
        ));
    }

    let slope = w * (std_dev_y / std_dev_x);
    let intercept = (b - w * mean_x / std_dev_x) * std_dev_y + mean_y;

    Ok(LinearParams { slope, intercept })
}
