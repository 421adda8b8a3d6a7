//! netctrl: network control theory metrics for adjacency matrices
//!
//! For a directed weighted network given as an N×N adjacency matrix, this
//! crate computes per-node average and modal controllability of the
//! discrete-time linear system `x(k+1) = A_norm x(k) + B u(k)`. Both metrics
//! come from the real Schur decomposition of the stabilized operator.
//!
//! # Organization
//!
//! - `norm`: Normalization `A / (1 + s_max)` that makes the system stable
//! - `schur`: Real Schur decomposition via LAPACK DGEES
//! - `ctrb`: Average and modal controllability
//! - `batch`: Per-matrix result records and mapping over many matrices
//! - `config`: Tunables shared by all stages
//! - `error`: Error types
//!
//! # Example
//!
//! ```
//! use ndarray::Array2;
//! use netctrl::batch::ControlMetrics;
//!
//! let metrics = ControlMetrics::compute(&Array2::eye(3)).unwrap();
//! assert!((metrics.average[0] - 4.0 / 3.0).abs() < 1e-12);
//! assert!((metrics.modal[0] - 0.75).abs() < 1e-12);
//! ```

pub mod batch;
pub mod config;
pub mod ctrb;
pub mod error;
pub mod norm;
pub mod schur;

pub use batch::{compute_batch, try_compute_batch, ControlMetrics};
pub use config::MetricsConfig;
pub use ctrb::{average_control, modal_control};
pub use error::{ControlError, NumericalError, Result};
pub use norm::normalize;
