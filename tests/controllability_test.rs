//! Integration tests for normalization and the controllability metrics
//! Covers the hand-computable scenarios and the error surface

use approx::assert_abs_diff_eq;
use ndarray::{arr2, Array2};
use netctrl::ctrb::{average_control, modal_control};
use netctrl::norm::{largest_singular_value, normalize};
use netctrl::schur::schur;
use netctrl::{ControlError, ControlMetrics, NumericalError};

// ===== Scenario Tests =====

#[test]
fn test_nilpotent_2x2() {
    let a = arr2(&[[0.0, 1.0], [0.0, 0.0]]);
    let s = netctrl::norm::singular_values(&a).unwrap();
    assert_abs_diff_eq!(s[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(s[1], 0.0, epsilon = 1e-12);

    let a_norm = normalize(&a).unwrap();
    assert_abs_diff_eq!(a_norm[(0, 0)], 0.0, epsilon = 1e-15);
    assert_abs_diff_eq!(a_norm[(0, 1)], 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(a_norm[(1, 0)], 0.0, epsilon = 1e-15);
    assert_abs_diff_eq!(a_norm[(1, 1)], 0.0, epsilon = 1e-15);
    assert!(largest_singular_value(&a_norm).unwrap() < 1.0);

    // Both eigenvalues are 0, so the metrics reduce to row norms of U
    let avg = average_control(&a).unwrap();
    let modal = modal_control(&a).unwrap();
    for j in 0..2 {
        assert_abs_diff_eq!(avg[j], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(modal[j], 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_identity_3x3() {
    let a = Array2::<f64>::eye(3);
    let a_norm = normalize(&a).unwrap();
    let s = schur(&a_norm).unwrap();
    for j in 0..3 {
        assert_abs_diff_eq!(s.t()[(j, j)], 0.5, epsilon = 1e-14);
    }

    let metrics = ControlMetrics::compute(&a).unwrap();
    for j in 0..3 {
        assert_abs_diff_eq!(metrics.average[j], 1.0 / (1.0 - 0.25), epsilon = 1e-12);
        assert_abs_diff_eq!(metrics.modal[j], 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(metrics.time_constant[j], 0.5, epsilon = 1e-12);
    }
}

#[test]
fn test_scalar_hand_computation() {
    let c = -2.5;
    let x = c / (1.0 + 2.5);
    let metrics = ControlMetrics::compute(&arr2(&[[c]])).unwrap();
    assert_abs_diff_eq!(metrics.normalized[(0, 0)], x, epsilon = 1e-14);
    assert_abs_diff_eq!(metrics.average[0], 1.0 / (1.0 - x * x), epsilon = 1e-12);
    assert_abs_diff_eq!(metrics.modal[0], 1.0 - x * x, epsilon = 1e-12);
    assert_abs_diff_eq!(metrics.time_constant[0], x, epsilon = 1e-14);
}

#[test]
fn test_zero_matrix_various_sizes() {
    for n in 1..=6 {
        let a = Array2::<f64>::zeros((n, n));
        let metrics = ControlMetrics::compute(&a).unwrap();
        assert_eq!(metrics.normalized, a);
        for j in 0..n {
            assert_abs_diff_eq!(metrics.average[j], 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(metrics.modal[j], 1.0, epsilon = 1e-12);
        }
    }
}

// ===== Realistic Networks =====

#[test]
fn test_directed_ring() {
    // Cyclic permutation: eigenvalues are the 6th roots of unity, so T holds
    // 2×2 blocks and diag(T) keeps only their real parts
    let n = 6;
    let mut a = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        a[(i, (i + 1) % n)] = 1.0;
    }

    let metrics = ControlMetrics::compute(&a).unwrap();
    assert_eq!(metrics.order(), n);
    for j in 0..n {
        assert!(metrics.average[j].is_finite());
        assert!(metrics.modal[j] >= 0.0);
        assert_abs_diff_eq!(metrics.time_constant[j], 0.0, epsilon = 1e-15);
    }
}

#[test]
fn test_hub_node_star_graph() {
    // Undirected star: hub 0 connected to 4 leaves
    let n = 5;
    let mut a = Array2::<f64>::zeros((n, n));
    for leaf in 1..n {
        a[(0, leaf)] = 1.0;
        a[(leaf, 0)] = 1.0;
    }

    let avg = average_control(&a).unwrap();
    let modal = modal_control(&a).unwrap();

    // Leaves are interchangeable
    for leaf in 2..n {
        assert_abs_diff_eq!(avg[leaf], avg[1], epsilon = 1e-10);
        assert_abs_diff_eq!(modal[leaf], modal[1], epsilon = 1e-10);
    }
    // The hub couples to the extreme modes ±2/3, the leaves mostly to 0
    assert!(avg[0] > avg[1]);
    assert!(modal[0] < modal[1]);
}

#[test]
fn test_input_is_not_mutated() {
    let a = arr2(&[[0.1, 2.0, 0.0], [0.0, 0.3, 1.0], [1.0, 0.0, -0.2]]);
    let copy = a.clone();
    let _ = ControlMetrics::compute(&a).unwrap();
    let _ = average_control(&a).unwrap();
    let _ = modal_control(&a).unwrap();
    assert_eq!(a, copy);
}

// ===== Error Handling =====

#[test]
fn test_non_square_is_dimension_error() {
    let a = Array2::<f64>::zeros((3, 2));
    assert_eq!(
        normalize(&a).unwrap_err(),
        ControlError::Dimension { rows: 3, cols: 2 }
    );
    assert!(average_control(&a).unwrap_err().is_dimension());
    assert!(modal_control(&a).unwrap_err().is_dimension());
    assert!(ControlMetrics::compute(&a).unwrap_err().is_dimension());
}

#[test]
fn test_non_finite_is_numerical_error() {
    let a = arr2(&[[0.0, 1.0], [f64::NEG_INFINITY, 0.0]]);
    let err = average_control(&a).unwrap_err();
    assert_eq!(
        err.numerical(),
        Some(&NumericalError::NonFinite { row: 1, col: 0 })
    );
}
