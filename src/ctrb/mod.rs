//! Average and modal controllability.
//!
//! Both metrics are spectral sums over the real Schur decomposition
//! `A_norm = U T Uᵗ` of the normalized adjacency matrix, with `v = diag(T)`
//! standing in for the eigenvalues:
//!
//! ```text
//! average[j] = Σ_i  U[j,i]² / (1 - v[i]²)
//! modal[i]   = Σ_k  U[i,k]² · (1 - v[k]²)
//! ```
//!
//! Average controllability measures how cheaply input at node `j` drives the
//! system to nearby states; modal controllability measures how strongly node
//! `i` reaches the fast-decaying, hard-to-reach modes.

use ndarray::{Array1, Array2, Axis};
use tracing::{debug, trace};

use crate::config::MetricsConfig;
use crate::error::{NumericalError, Result};
use crate::norm::normalize_with;
use crate::schur::{schur, SchurDecomposition};

/// Average controllability of every node.
///
/// Normalizes `a`, takes its real Schur decomposition and evaluates
/// `Σ_i U[j,i]² / (1 - v[i]²)` for each node `j`.
///
/// # Arguments
///
/// * `a` - N×N raw adjacency matrix (normalization is applied internally)
///
/// # Returns
///
/// Length-N vector, one value per node.
///
/// # Errors
///
/// * [`ControlError::Dimension`](crate::error::ControlError::Dimension) for
///   empty or non-square input
/// * [`NumericalError`] if a decomposition fails or a denominator
///   `1 - v[i]²` is not positive
///
/// # Examples
///
/// ```
/// use ndarray::Array2;
/// use netctrl::ctrb::average_control;
///
/// // I₃ normalizes to 0.5·I, so every node gets 1 / (1 - 0.25)
/// let values = average_control(&Array2::eye(3)).unwrap();
/// for v in values.iter() {
///     assert!((v - 4.0 / 3.0).abs() < 1e-12);
/// }
/// ```
pub fn average_control(a: &Array2<f64>) -> Result<Array1<f64>> {
    average_control_with(a, &MetricsConfig::default())
}

/// Same as [`average_control`] with an explicit configuration.
pub fn average_control_with(a: &Array2<f64>, config: &MetricsConfig) -> Result<Array1<f64>> {
    config.validate()?;
    let a_norm = normalize_with(a, config)?;
    let decomposition = schur(&a_norm)?;
    average_control_from_schur(&decomposition, config)
}

/// Modal controllability of every node.
///
/// Normalizes `a`, takes its real Schur decomposition and evaluates
/// `Σ_k U[i,k]² · (1 - v[k]²)` for each node `i`. Every entry is
/// non-negative.
///
/// # Examples
///
/// ```
/// use ndarray::Array2;
/// use netctrl::ctrb::modal_control;
///
/// let values = modal_control(&Array2::eye(3)).unwrap();
/// for v in values.iter() {
///     assert!((v - 0.75).abs() < 1e-12);
/// }
/// ```
pub fn modal_control(a: &Array2<f64>) -> Result<Array1<f64>> {
    modal_control_with(a, &MetricsConfig::default())
}

/// Same as [`modal_control`] with an explicit configuration.
pub fn modal_control_with(a: &Array2<f64>, config: &MetricsConfig) -> Result<Array1<f64>> {
    config.validate()?;
    let a_norm = normalize_with(a, config)?;
    let decomposition = schur(&a_norm)?;
    modal_control_from_schur(&decomposition)
}

/// Average controllability from an existing decomposition of an already
/// normalized matrix.
///
/// Mirrors the textbook broadcasting form: `midMat = (Uᵗ)²` element-wise,
/// `P[i,:] = 1 - v[i]²` repeated along each row, result `Σ_i midMat / P`
/// down the columns.
pub fn average_control_from_schur(
    decomposition: &SchurDecomposition,
    config: &MetricsConfig,
) -> Result<Array1<f64>> {
    let v = decomposition.diag();
    let denominators = v.mapv(|x| 1.0 - x * x);

    for (mode, &value) in denominators.iter().enumerate() {
        trace!(mode, eigenvalue = v[mode], denominator = value, "average mode");
        if !(value > config.stability_margin) {
            return Err(NumericalError::NonPositiveDenominator { mode, value }.into());
        }
    }

    let mid_mat: Array2<f64> = decomposition.z().t().mapv(|x| x * x);
    let p = denominators.insert_axis(Axis(1));
    let values = (&mid_mat / &p).sum_axis(Axis(0));

    debug!(order = values.len(), "average controllability computed");
    Ok(values)
}

/// Modal controllability from an existing decomposition of an already
/// normalized matrix.
pub fn modal_control_from_schur(decomposition: &SchurDecomposition) -> Result<Array1<f64>> {
    let eig_vals = decomposition.diag();

    if let Some((mode, &value)) = eig_vals
        .iter()
        .enumerate()
        .find(|(_, v)| !(v.abs() < 1.0))
    {
        return Err(NumericalError::UnstableMode {
            mode,
            value: value.abs(),
        }
        .into());
    }

    let weights = eig_vals.mapv(|x| 1.0 - x * x);
    let u = decomposition.z();
    let phi: Array1<f64> = u
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .zip(weights.iter())
                .map(|(&u_ik, &w_k)| u_ik * u_ik * w_k)
                .sum::<f64>()
        })
        .collect();

    debug!(order = phi.len(), "modal controllability computed");
    Ok(phi)
}
