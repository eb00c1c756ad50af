use serde::{Deserialize, Serialize};

use crate::common::analysis_error::AnalysisError;
use crate::common::enums::MajorityRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalConfig {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub majority: MajorityRule,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            majority: MajorityRule::NonNeutral,
        }
    }
}

impl SignalConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.rsi_oversold) || !in_range(self.rsi_overbought) {
            return Err(AnalysisError::config(format!(
                "rsi thresholds {}/{} must lie in [0, 100]",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(AnalysisError::config(format!(
                "rsi_oversold={} must be below rsi_overbought={}",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        Ok(())
    }
}
