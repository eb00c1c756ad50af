use serde::{Deserialize, Serialize};

use crate::common::analysis_error::AnalysisError;

/// Sizing of buy-side targets relative to the volatility proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// Fraction below the latest price at which to enter, e.g. 0.01 for 1%.
    pub entry_discount: f64,
    pub risk_factor: f64,
    pub reward_factor: f64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            entry_discount: 0.0,
            risk_factor: 0.5,
            reward_factor: 1.0,
        }
    }
}

impl TargetConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(0.0..1.0).contains(&self.entry_discount) {
            return Err(AnalysisError::config(format!(
                "entry_discount={} must lie in [0, 1)",
                self.entry_discount
            )));
        }
        for (name, factor) in [("risk_factor", self.risk_factor), ("reward_factor", self.reward_factor)] {
            if !factor.is_finite() || factor < 0.0 {
                return Err(AnalysisError::config(format!(
                    "{}={} must be a non-negative number",
                    name, factor
                )));
            }
        }
        Ok(())
    }
}
