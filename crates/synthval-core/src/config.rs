use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::tier::{OverallTierRule, TierThresholds};

/// Tunable constants for one validation run.
///
/// Every knob has a default matching the behavior the engine was calibrated
/// against; all of them are plain data so a host application can load them
/// from its own config layer and pass them through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ValidationConfig {
    /// Match-score cut points for the per-item tier classifier.
    pub tier_thresholds: TierThresholds,
    /// Cumulative-proportion rule for the report-level tier.
    pub overall_rule: OverallTierRule,
    /// Maximum histogram bins when frequency tests bin raw numeric samples.
    /// The effective bin count is `min(histogram_bins, distinct values)`,
    /// never below 2.
    pub histogram_bins: usize,
    /// Floor applied to probability masses before Kullback-Leibler, so zero
    /// cells do not send the divergence to infinity.
    pub kl_epsilon: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            tier_thresholds: TierThresholds::default(),
            overall_rule: OverallTierRule::default(),
            histogram_bins: 10,
            kl_epsilon: 1e-10,
        }
    }
}

impl ValidationConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfig`] for unordered tier
    /// thresholds, fewer than 2 histogram bins, or a non-positive KL floor.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tier_thresholds.validate()?;
        if self.histogram_bins < 2 {
            return Err(ValidationError::InvalidConfig {
                field: "histogram_bins",
                value: self.histogram_bins.to_string(),
                reason: "frequency binning needs at least 2 bins",
            });
        }
        if !(self.kl_epsilon > 0.0 && self.kl_epsilon < 1.0) {
            return Err(ValidationError::InvalidConfig {
                field: "kl_epsilon",
                value: self.kl_epsilon.to_string(),
                reason: "probability floor must be in (0, 1)",
            });
        }
        Ok(())
    }
}
