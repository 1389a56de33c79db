/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, RegressionError>;

#[derive(Debug, thiserror::Error)]
pub enum RegressionError {
    /// Empty, under-sized or mismatched input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A statistic would divide by zero, e.g. a constant axis.
    #[error("division by zero: {0}")]
    DivideByZero(String),

    #[error("malformed sample file: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegressionError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn zero_div(msg: impl Into<String>) -> Self {
        Self::DivideByZero(msg.into())
    }
}

/// Checks that both axes have the same length and at least `min` samples.
pub(crate) fn check_pairs(x_len: usize, y_len: usize, min: usize) -> Result<()> {
    if x_len != y_len {
        return Err(RegressionError::invalid(format!(
            "x has {x_len} samples but y has {y_len}"
        )));
    }

    if x_len < min {
        return Err(RegressionError::invalid(format!(
            "expected at least {min} samples, got {x_len}"
        )));
    }

    Ok(())
}
