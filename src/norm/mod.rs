//! Normalization of adjacency matrices.
//!
//! A raw adjacency matrix is usually not a stable operator. Dividing every
//! entry by `1 + s_max`, where `s_max` is the largest singular value, pushes
//! the operator norm (and hence the spectral radius) strictly below one, so
//! the discrete-time system `x(k+1) = A x(k) + B u(k)` converges and the
//! controllability sums in [`crate::ctrb`] stay finite.

use ndarray::{Array1, Array2};
use ndarray_linalg::SVD;
use tracing::debug;

use crate::config::MetricsConfig;
use crate::error::{ControlError, NumericalError, Result};

/// Scales an adjacency matrix into a stable operator.
///
/// Computes `A / (1 + s_max)` where `s_max` is the largest singular value of
/// `A`. The result has the same shape as `A` and a largest singular value
/// strictly below one.
///
/// # Arguments
///
/// * `a` - N×N adjacency matrix, N >= 1. Not required to be symmetric.
///
/// # Errors
///
/// * [`ControlError::Dimension`] if `a` is empty or not square
/// * [`NumericalError::NonFinite`] if an entry is NaN or infinite
/// * [`NumericalError::Svd`] if LAPACK fails to converge
///
/// # Examples
///
/// ```
/// use ndarray::arr2;
/// use netctrl::norm::normalize;
///
/// let a = arr2(&[[0.0, 1.0], [0.0, 0.0]]);
/// let a_norm = normalize(&a).unwrap();
/// assert!((a_norm[(0, 1)] - 0.5).abs() < 1e-12);
/// assert_eq!(a_norm[(1, 0)], 0.0);
/// ```
pub fn normalize(a: &Array2<f64>) -> Result<Array2<f64>> {
    normalize_with(a, &MetricsConfig::default())
}

/// Same as [`normalize`] with an explicit configuration.
pub fn normalize_with(a: &Array2<f64>, config: &MetricsConfig) -> Result<Array2<f64>> {
    ensure_square(a)?;
    if config.require_finite {
        ensure_finite(a)?;
    }

    let s_max = largest_singular_value(a)?;
    let divisor = 1.0 + s_max;
    debug!(order = a.nrows(), s_max, divisor, "normalizing adjacency matrix");

    Ok(a.mapv(|x| x / divisor))
}

/// Singular values of `a` in descending order.
///
/// Uses LAPACK through `ndarray_linalg::SVD` without forming the singular
/// vectors.
pub fn singular_values(a: &Array2<f64>) -> Result<Array1<f64>> {
    if a.is_empty() {
        return Err(ControlError::Dimension {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }

    let (_, s, _) = a
        .svd(false, false)
        .map_err(|e| NumericalError::Svd(e.to_string()))?;
    Ok(s)
}

/// Largest singular value (spectral norm) of `a`.
///
/// # Examples
///
/// ```
/// use ndarray::Array2;
/// use netctrl::norm::largest_singular_value;
///
/// let eye = Array2::<f64>::eye(3);
/// assert!((largest_singular_value(&eye).unwrap() - 1.0).abs() < 1e-12);
/// ```
pub fn largest_singular_value(a: &Array2<f64>) -> Result<f64> {
    let s = singular_values(a)?;
    // LAPACK sorts descending; fold anyway so the result never depends on it
    Ok(s.iter().fold(0.0_f64, |acc, &x| acc.max(x)))
}

/// Fails with [`ControlError::Dimension`] unless `a` is a non-empty square
/// matrix.
pub(crate) fn ensure_square(a: &Array2<f64>) -> Result<()> {
    let (rows, cols) = a.dim();
    if rows == 0 || rows != cols {
        return Err(ControlError::Dimension { rows, cols });
    }
    Ok(())
}

/// Fails with [`NumericalError::NonFinite`] on the first NaN or infinite
/// entry, in row-major order.
pub(crate) fn ensure_finite(a: &Array2<f64>) -> Result<()> {
    if let Some(((row, col), _)) = a.indexed_iter().find(|(_, x)| !x.is_finite()) {
        return Err(NumericalError::NonFinite { row, col }.into());
    }
    Ok(())
}
