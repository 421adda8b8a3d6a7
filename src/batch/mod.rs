//! Per-matrix metric records and sequential mapping over many matrices.
//!
//! Each input matrix is processed on its own: there is no state shared
//! between rows, and a failing matrix never affects the others.

use ndarray::{Array1, Array2};
use tracing::{debug, debug_span, warn};

use crate::config::MetricsConfig;
use crate::ctrb::{
    average_control_from_schur, average_control_with, modal_control_from_schur,
    modal_control_with,
};
use crate::error::Result;
use crate::norm::normalize_with;
use crate::schur::schur;

/// All outputs produced for one adjacency matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlMetrics {
    /// `A / (1 + s_max(A))`
    pub normalized: Array2<f64>,
    /// Average controllability, one value per node
    pub average: Array1<f64>,
    /// Modal controllability, one value per node
    pub modal: Array1<f64>,
    /// Diagonal of the normalized matrix (self-decay per node)
    pub time_constant: Array1<f64>,
}

impl ControlMetrics {
    /// Computes every metric for `a` with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndarray::Array2;
    /// use netctrl::batch::ControlMetrics;
    ///
    /// let metrics = ControlMetrics::compute(&Array2::zeros((3, 3))).unwrap();
    /// assert_eq!(metrics.order(), 3);
    /// assert!(metrics.average.iter().all(|&v| (v - 1.0).abs() < 1e-12));
    /// assert!(metrics.modal.iter().all(|&v| (v - 1.0).abs() < 1e-12));
    /// assert!(metrics.time_constant.iter().all(|&v| v == 0.0));
    /// ```
    pub fn compute(a: &Array2<f64>) -> Result<Self> {
        Self::compute_with(a, &MetricsConfig::default())
    }

    /// Computes every metric for `a`.
    ///
    /// With `share_decomposition` set, `a` is normalized and decomposed once
    /// and both metrics read the same Schur form. Otherwise each metric runs
    /// its own normalization and decomposition, as the standalone
    /// [`average_control`](crate::ctrb::average_control) and
    /// [`modal_control`](crate::ctrb::modal_control) do.
    pub fn compute_with(a: &Array2<f64>, config: &MetricsConfig) -> Result<Self> {
        config.validate()?;
        let span = debug_span!("control_metrics", order = a.nrows());
        let _enter = span.enter();

        let normalized = normalize_with(a, config)?;
        let (average, modal) = if config.share_decomposition {
            let decomposition = schur(&normalized)?;
            (
                average_control_from_schur(&decomposition, config)?,
                modal_control_from_schur(&decomposition)?,
            )
        } else {
            (
                average_control_with(a, config)?,
                modal_control_with(a, config)?,
            )
        };
        let time_constant = normalized.diag().to_owned();

        debug!(shared = config.share_decomposition, "control metrics computed");
        Ok(Self {
            normalized,
            average,
            modal,
            time_constant,
        })
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.average.len()
    }
}

/// Computes [`ControlMetrics`] for every matrix, keeping one result per
/// input in input order.
///
/// A matrix that fails yields its error in place; the remaining matrices
/// are still processed. Errors are wrapped with the input index.
///
/// # Examples
///
/// ```
/// use ndarray::{arr2, Array2};
/// use netctrl::batch::compute_batch;
///
/// let inputs = vec![Array2::eye(2), Array2::zeros((2, 3)), arr2(&[[4.0]])];
/// let results = compute_batch(&inputs);
/// assert_eq!(results.len(), 3);
/// assert!(results[0].is_ok());
/// assert!(results[1].as_ref().unwrap_err().is_dimension());
/// assert!(results[2].is_ok());
/// ```
pub fn compute_batch<'a, I>(matrices: I) -> Vec<Result<ControlMetrics>>
where
    I: IntoIterator<Item = &'a Array2<f64>>,
{
    compute_batch_with(matrices, &MetricsConfig::default())
}

/// Same as [`compute_batch`] with an explicit configuration.
pub fn compute_batch_with<'a, I>(matrices: I, config: &MetricsConfig) -> Vec<Result<ControlMetrics>>
where
    I: IntoIterator<Item = &'a Array2<f64>>,
{
    matrices
        .into_iter()
        .enumerate()
        .map(|(index, a)| {
            ControlMetrics::compute_with(a, config).map_err(|err| {
                warn!(index, error = %err, "skipping matrix");
                err.at_row(index)
            })
        })
        .collect()
}

/// Computes [`ControlMetrics`] for every matrix, stopping at the first
/// failure.
///
/// # Errors
///
/// [`ControlError::Row`](crate::error::ControlError::Row) naming the index of
/// the first matrix that failed.
pub fn try_compute_batch<'a, I>(matrices: I) -> Result<Vec<ControlMetrics>>
where
    I: IntoIterator<Item = &'a Array2<f64>>,
{
    try_compute_batch_with(matrices, &MetricsConfig::default())
}

/// Same as [`try_compute_batch`] with an explicit configuration.
pub fn try_compute_batch_with<'a, I>(
    matrices: I,
    config: &MetricsConfig,
) -> Result<Vec<ControlMetrics>>
where
    I: IntoIterator<Item = &'a Array2<f64>>,
{
    matrices
        .into_iter()
        .enumerate()
        .map(|(index, a)| ControlMetrics::compute_with(a, config).map_err(|err| err.at_row(index)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ControlError, NumericalError};
    use approx::assert_abs_diff_eq;
    use ndarray::arr2;

    fn sample() -> Array2<f64> {
        arr2(&[
            [0.0, 0.8, 0.1, 0.0, 0.3],
            [0.2, 0.0, 0.6, 0.0, 0.0],
            [0.0, 0.4, 0.0, 0.9, 0.1],
            [0.5, 0.0, 0.0, 0.0, 0.7],
            [0.0, 0.1, 0.3, 0.2, 0.0],
        ])
    }

    #[test]
    fn test_time_constant_is_normalized_diagonal() {
        let a = arr2(&[[2.0, 1.0], [0.0, -1.0]]);
        let metrics = ControlMetrics::compute(&a).unwrap();
        assert_eq!(metrics.time_constant.len(), 2);
        assert_eq!(metrics.time_constant[0], metrics.normalized[(0, 0)]);
        assert_eq!(metrics.time_constant[1], metrics.normalized[(1, 1)]);
    }

    #[test]
    fn test_identity_record() {
        let metrics = ControlMetrics::compute(&Array2::eye(3)).unwrap();
        assert_eq!(metrics.order(), 3);
        for j in 0..3 {
            assert_abs_diff_eq!(metrics.average[j], 4.0 / 3.0, epsilon = 1e-12);
            assert_abs_diff_eq!(metrics.modal[j], 0.75, epsilon = 1e-12);
            assert_abs_diff_eq!(metrics.time_constant[j], 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_shared_matches_independent() {
        let a = sample();
        let shared = ControlMetrics::compute(&a).unwrap();
        let independent = ControlMetrics::compute_with(
            &a,
            &MetricsConfig {
                share_decomposition: false,
                ..MetricsConfig::default()
            },
        )
        .unwrap();

        assert_eq!(shared.normalized, independent.normalized);
        for j in 0..5 {
            assert_abs_diff_eq!(shared.average[j], independent.average[j], epsilon = 1e-12);
            assert_abs_diff_eq!(shared.modal[j], independent.modal[j], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_batch_varying_sizes_keeps_order() {
        let inputs = vec![Array2::eye(1), sample(), Array2::zeros((3, 3))];
        let results = compute_batch(&inputs);
        let orders: Vec<usize> = results.iter().map(|r| r.as_ref().unwrap().order()).collect();
        assert_eq!(orders, vec![1, 5, 3]);
    }

    #[test]
    fn test_batch_isolates_failures() {
        let bad = arr2(&[[1.0, f64::INFINITY], [0.0, 1.0]]);
        let inputs = vec![Array2::eye(2), bad, Array2::eye(2)];
        let results = compute_batch(&inputs);

        assert!(results[0].is_ok());
        assert!(results[2].is_ok());
        assert_eq!(results[0], results[2]);
        match &results[1] {
            Err(ControlError::Row { index, source }) => {
                assert_eq!(*index, 1);
                assert_eq!(
                    **source,
                    ControlError::Numerical(NumericalError::NonFinite { row: 0, col: 1 })
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_try_batch_fails_fast() {
        let inputs = vec![
            Array2::eye(2),
            Array2::zeros((2, 3)),
            Array2::zeros((1, 4)),
        ];
        let err = try_compute_batch(&inputs).unwrap_err();
        match err {
            ControlError::Row { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_try_batch_success() {
        let inputs = [sample(), sample()];
        let metrics = try_compute_batch(inputs.iter()).unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0], metrics[1]);
    }

    #[test]
    fn test_empty_batch() {
        let inputs: Vec<Array2<f64>> = Vec::new();
        assert!(compute_batch(&inputs).is_empty());
        assert!(try_compute_batch(&inputs).unwrap().is_empty());
    }
}
