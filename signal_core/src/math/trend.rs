use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::common::analysis_error::AnalysisError;
use crate::math::check_lookback;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum TrendType {
    Mean,
    Max,
    Min,
}

/// Rolling mean/max/min over the trailing `window` values.
#[derive(Debug, Clone)]
pub struct TrendModel {
    trend_type: TrendType,
    window: usize,
    values: VecDeque<f64>,
}

impl TrendModel {
    pub fn new(trend_type: TrendType, window: usize) -> Self {
        Self {
            trend_type,
            window,
            values: VecDeque::with_capacity(window),
        }
    }

    pub fn add(&mut self, value: f64) -> Option<f64> {
        self.values.push_back(value);
        if self.values.len() > self.window {
            self.values.pop_front();
        }
        if self.window == 0 || self.values.len() < self.window {
            return None;
        }

        let res = match self.trend_type {
            TrendType::Mean => self.values.iter().sum::<f64>() / self.window as f64,
            TrendType::Max => self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            TrendType::Min => self.values.iter().copied().fold(f64::INFINITY, f64::min),
        };
        Some(res)
    }
}

fn rolling(
    name: &str,
    trend_type: TrendType,
    values: &[f64],
    window: usize,
) -> Result<Vec<Option<f64>>, AnalysisError> {
    check_lookback(&format!("{}({})", name, window), window, window, values.len())?;
    let mut model = TrendModel::new(trend_type, window);
    Ok(values.iter().map(|&v| model.add(v)).collect())
}

/// Simple moving average; `None` for the first `window - 1` periods.
pub fn sma(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, AnalysisError> {
    rolling("SMA", TrendType::Mean, values, window)
}

/// Rolling minimum, used on lows as the support level.
pub fn rolling_min(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, AnalysisError> {
    rolling("MIN", TrendType::Min, values, window)
}

/// Rolling maximum, used on highs as the resistance level.
pub fn rolling_max(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, AnalysisError> {
    rolling("MAX", TrendType::Max, values, window)
}
