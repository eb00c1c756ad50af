use serde::{Deserialize, Serialize};

use crate::common::analysis_error::AnalysisError;
use crate::math::macd::macd_lookback;

/// Window lengths for every indicator the engine computes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorConfig {
    pub sma_short: usize,
    pub sma_long: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub boll_n: usize,
    pub boll_k: f64,
    /// Window for support (lowest low) and resistance (highest high).
    pub level_window: usize,
    pub periods_per_year: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_short: 20,
            sma_long: 50,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            boll_n: 20,
            boll_k: 2.0,
            level_window: 20,
            periods_per_year: 252.0,
        }
    }
}

impl IndicatorConfig {
    /// Shortest series for which every indicator is defined at the last period.
    pub fn required_lookback(&self) -> usize {
        [
            self.sma_short,
            self.sma_long,
            self.rsi_period + 1,
            macd_lookback(self.macd_slow, self.macd_signal),
            self.boll_n,
            self.level_window,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        let windows = [
            ("sma_short", self.sma_short),
            ("sma_long", self.sma_long),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("boll_n", self.boll_n),
            ("level_window", self.level_window),
        ];
        for (name, window) in windows {
            if window == 0 {
                return Err(AnalysisError::config(format!("{} must be positive", name)));
            }
        }
        if self.sma_short >= self.sma_long {
            return Err(AnalysisError::config(format!(
                "sma_short={} must be shorter than sma_long={}",
                self.sma_short, self.sma_long
            )));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(AnalysisError::config(format!(
                "macd_fast={} must be shorter than macd_slow={}",
                self.macd_fast, self.macd_slow
            )));
        }
        if !self.boll_k.is_finite() || self.boll_k < 0.0 {
            return Err(AnalysisError::config(format!(
                "boll_k={} must be a non-negative number",
                self.boll_k
            )));
        }
        if !self.periods_per_year.is_finite() || self.periods_per_year <= 0.0 {
            return Err(AnalysisError::config(format!(
                "periods_per_year={} must be positive",
                self.periods_per_year
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lookback() {
        assert_eq!(IndicatorConfig::default().required_lookback(), 50);
    }

    #[test]
    fn test_lookback_follows_macd() {
        let conf = IndicatorConfig {
            sma_long: 30,
            ..Default::default()
        };
        assert_eq!(conf.required_lookback(), 34);
    }

    #[test]
    fn test_validate() {
        assert!(IndicatorConfig::default().validate().is_ok());
        let conf = IndicatorConfig {
            sma_short: 50,
            sma_long: 20,
            ..Default::default()
        };
        assert!(matches!(conf.validate(), Err(AnalysisError::Config(_))));
        let conf = IndicatorConfig {
            rsi_period: 0,
            ..Default::default()
        };
        assert!(conf.validate().is_err());
    }
}
