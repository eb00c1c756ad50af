use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::analysis_error::AnalysisError;

/// One trading period of OHLCV data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PricePoint {
    pub fn new(
        timestamp: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Validates prices and, with `autofix`, widens high/low so they bracket
    /// open and close.
    pub(crate) fn check(&mut self, autofix: bool) -> Result<(), AnalysisError> {
        for (name, price) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !price.is_finite() || price <= 0.0 {
                return Err(AnalysisError::invalid(format!(
                    "{} {} price={} must be positive",
                    self.timestamp, name, price
                )));
            }
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(AnalysisError::invalid(format!(
                "{} volume={} must not be negative",
                self.timestamp, self.volume
            )));
        }

        let min_price = self.low.min(self.open).min(self.high).min(self.close);
        let max_price = self.low.max(self.open).max(self.high).max(self.close);

        if self.low > min_price {
            if autofix {
                self.low = min_price;
            } else {
                return Err(AnalysisError::invalid(format!(
                    "{} low price={} is not min of [low={}, open={}, high={}, close={}]",
                    self.timestamp, self.low, self.low, self.open, self.high, self.close
                )));
            }
        }

        if self.high < max_price {
            if autofix {
                self.high = max_price;
            } else {
                return Err(AnalysisError::invalid(format!(
                    "{} high price={} is not max of [low={}, open={}, high={}, close={}]",
                    self.timestamp, self.high, self.low, self.open, self.high, self.close
                )));
            }
        }
        Ok(())
    }
}
