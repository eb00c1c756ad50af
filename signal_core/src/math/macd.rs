use serde::{Deserialize, Serialize};

use crate::common::analysis_error::AnalysisError;
use crate::math::check_lookback;
use crate::math::ema::EmaModel;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdItem {
    pub macd: f64,
    /// `None` until `signal` MACD values have been seen.
    pub signal: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct MACD {
    fast_ema: EmaModel,
    slow_ema: EmaModel,
    signal_ema: EmaModel,
}

impl MACD {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_ema: EmaModel::new(fast_period),
            slow_ema: EmaModel::new(slow_period),
            signal_ema: EmaModel::new(signal_period),
        }
    }

    pub fn add(&mut self, price: f64) -> Option<MacdItem> {
        let fast = self.fast_ema.add(price);
        let slow = self.slow_ema.add(price);
        let macd = fast? - slow?;
        Some(MacdItem {
            macd,
            signal: self.signal_ema.add(macd),
        })
    }
}

/// Number of values needed before the signal line is defined.
pub fn macd_lookback(slow: usize, signal: usize) -> usize {
    (slow + signal).saturating_sub(1)
}

/// MACD line and signal line aligned with `values`.
///
/// The MACD line is defined from index `slow - 1`, the signal line from
/// index `slow + signal - 2`.
pub fn macd(
    values: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<Vec<Option<MacdItem>>, AnalysisError> {
    let name = format!("MACD({},{},{})", fast, slow, signal);
    if fast == 0 || signal == 0 {
        return Err(AnalysisError::invalid(format!(
            "{} periods must be positive",
            name
        )));
    }
    if fast >= slow {
        return Err(AnalysisError::invalid(format!(
            "{} fast period must be shorter than slow period",
            name
        )));
    }
    check_lookback(&name, slow, macd_lookback(slow, signal), values.len())?;

    let mut model = MACD::new(fast, slow, signal);
    Ok(values.iter().map(|&v| model.add(v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ema::ema;
    use approx::assert_relative_eq;

    fn wave(n: usize) -> Vec<f64> {
        (0..n).map(|i| 50.0 + (i as f64 * 0.4).sin() * 5.0 + i as f64 * 0.1).collect()
    }

    #[test]
    fn test_macd_alignment() {
        let values = wave(60);
        let res = macd(&values, 12, 26, 9).unwrap();
        assert_eq!(res.len(), 60);
        assert!(res[..25].iter().all(|v| v.is_none()));
        assert!(res[25..].iter().all(|v| v.is_some()));
        assert!(res[25..33].iter().all(|v| v.unwrap().signal.is_none()));
        assert!(res[33..].iter().all(|v| v.unwrap().signal.is_some()));
    }

    #[test]
    fn test_macd_matches_ema_difference() {
        let values = wave(40);
        let res = macd(&values, 12, 26, 9).unwrap();
        let fast = ema(&values, 12).unwrap();
        let slow = ema(&values, 26).unwrap();
        for i in 25..40 {
            assert_relative_eq!(
                res[i].unwrap().macd,
                fast[i].unwrap() - slow[i].unwrap(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_macd_lookback() {
        let values = wave(33);
        assert_eq!(
            macd(&values, 12, 26, 9).unwrap_err(),
            AnalysisError::insufficient("MACD(12,26,9)", 34, 33)
        );
        assert!(macd(&wave(34), 12, 26, 9).is_ok());
    }

    #[test]
    fn test_macd_rejects_inverted_periods() {
        assert!(matches!(
            macd(&wave(60), 26, 12, 9),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
}
