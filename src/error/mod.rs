//! Error types shared by every stage of the controllability pipeline.
//!
//! There is no recovery logic anywhere in the crate: normalization is meant
//! to guarantee numerical stability, so a [`NumericalError`] always signals
//! bad input (non-finite entries, say) or a LAPACK failure.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ControlError>;

/// Top-level error returned by every public operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    /// The input is not a non-empty square matrix.
    #[error("adjacency matrix must be square and non-empty, got {rows}x{cols}")]
    Dimension { rows: usize, cols: usize },

    /// A decomposition failed or its output broke a stability invariant.
    #[error(transparent)]
    Numerical(#[from] NumericalError),

    /// A [`MetricsConfig`](crate::config::MetricsConfig) value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A batch computation failed on one of its inputs.
    #[error("matrix #{index} failed: {source}")]
    Row {
        index: usize,
        #[source]
        source: Box<ControlError>,
    },
}

/// Failures of the numeric core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericalError {
    /// Entry `(row, col)` is NaN or infinite.
    #[error("entry ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },

    /// Singular value decomposition did not converge.
    #[error("singular value decomposition failed: {0}")]
    Svd(String),

    /// DGEES returned a non-zero INFO.
    #[error("real Schur decomposition failed with INFO={info}")]
    Schur { info: i32 },

    /// `1 - v[mode]^2` is not strictly positive for an eigenvalue
    /// approximation taken from the Schur diagonal.
    #[error("denominator 1 - v^2 = {value} for mode {mode} is not positive")]
    NonPositiveDenominator { mode: usize, value: f64 },

    /// `|v[mode]| >= 1`, i.e. the normalized system is not stable.
    #[error("mode {mode} has |eigenvalue| = {value} >= 1 after normalization")]
    UnstableMode { mode: usize, value: f64 },
}

impl ControlError {
    /// Wraps `self` with the index of the batch input that produced it.
    pub fn at_row(self, index: usize) -> Self {
        ControlError::Row {
            index,
            source: Box::new(self),
        }
    }

    /// Returns true for [`ControlError::Dimension`], looking through batch
    /// wrappers.
    pub fn is_dimension(&self) -> bool {
        match self {
            ControlError::Dimension { .. } => true,
            ControlError::Row { source, .. } => source.is_dimension(),
            _ => false,
        }
    }

    /// Returns the numerical cause, looking through batch wrappers.
    pub fn numerical(&self) -> Option<&NumericalError> {
        match self {
            ControlError::Numerical(err) => Some(err),
            ControlError::Row { source, .. } => source.numerical(),
            _ => None,
        }
    }
}
