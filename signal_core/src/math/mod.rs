//! Indicator library.
//!
//! Every indicator exists twice: as an incremental model fed one value at a
//! time, and as a pure function that runs a fresh model over a slice and
//! returns one `Option` per input value. `None` marks the leading region where
//! the lookback window is not yet filled.

pub mod boll;
pub mod ema;
pub mod indicator_config;
pub mod indicator_set;
pub mod macd;
pub mod rsi;
pub mod trend;
pub mod volatility;

pub use boll::{bollinger, BollMetric};
pub use ema::ema;
pub use indicator_set::{IndicatorRecord, IndicatorSet, IndicatorSnapshot};
pub use macd::{macd, MacdItem};
pub use rsi::rsi;
pub use trend::{rolling_max, rolling_min, sma};
pub use volatility::annualized_volatility;

use crate::common::analysis_error::AnalysisError;

/// Rejects a zero window and inputs shorter than `required`.
pub(crate) fn check_lookback(
    indicator: &str,
    window: usize,
    required: usize,
    available: usize,
) -> Result<(), AnalysisError> {
    if window == 0 {
        return Err(AnalysisError::invalid(format!(
            "{} window must be positive",
            indicator
        )));
    }
    if available < required {
        return Err(AnalysisError::insufficient(indicator, required, available));
    }
    Ok(())
}
