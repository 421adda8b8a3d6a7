//! Tunables for the controllability pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, Result};

/// Options shared by normalization, the metric functions and the batch
/// mapper.
///
/// The defaults reproduce the textbook formulas exactly; changing them only
/// tightens the invariant checks or changes how much work is shared.
///
/// # Examples
///
/// ```
/// use netctrl::config::MetricsConfig;
///
/// let config = MetricsConfig {
///     stability_margin: 1e-12,
///     ..MetricsConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// assert!(config.share_decomposition);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsConfig {
    /// Reuse one normalization and one Schur decomposition for both metrics
    /// when building a [`ControlMetrics`](crate::batch::ControlMetrics)
    /// record. When false, each metric normalizes and decomposes on its own.
    pub share_decomposition: bool,

    /// A mode `v` whose average-controllability denominator satisfies
    /// `1 - v^2 <= stability_margin` is reported as an invariant violation.
    pub stability_margin: f64,

    /// Reject NaN and infinite entries before touching LAPACK.
    pub require_finite: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            share_decomposition: true,
            stability_margin: 0.0,
            require_finite: true,
        }
    }
}

impl MetricsConfig {
    /// Checks that every field is in range.
    pub fn validate(&self) -> Result<()> {
        if !self.stability_margin.is_finite()
            || self.stability_margin < 0.0
            || self.stability_margin >= 1.0
        {
            return Err(ControlError::Config(format!(
                "stability_margin must lie in [0, 1), got {}",
                self.stability_margin
            )));
        }
        Ok(())
    }
}
