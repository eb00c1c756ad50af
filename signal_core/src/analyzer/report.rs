use serde::{Deserialize, Serialize};

use crate::common::analysis_error::AnalysisError;
use crate::common::enums::{AnalysisMode, RiskLevel};
use crate::kline::series::Series;
use crate::math::indicator_set::IndicatorSnapshot;
use crate::math::volatility::annualized_volatility;
use crate::signal::consensus::Consensus;
use crate::target::price_target::PriceTargets;

/// Context around the latest bar: move since the previous one, key levels and
/// how volatile the window has been.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInsights {
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: f64,
    pub support: f64,
    pub resistance: f64,
    pub annual_volatility_percent: f64,
    pub risk_level: RiskLevel,
}

impl MarketInsights {
    pub fn compute(
        series: &Series,
        snap: &IndicatorSnapshot,
        periods_per_year: f64,
    ) -> Result<Self, AnalysisError> {
        let points = series.points();
        let (prev, last) = match points {
            [.., prev, last] => (prev, last),
            _ => return Err(AnalysisError::insufficient("INSIGHTS", 2, points.len())),
        };
        let annual_volatility_percent = annualized_volatility(&series.closes(), periods_per_year)?;
        let change = last.close - prev.close;

        Ok(Self {
            current_price: last.close,
            change,
            change_percent: change * 100.0 / prev.close,
            volume: last.volume,
            support: snap.support,
            resistance: snap.resistance,
            annual_volatility_percent,
            risk_level: RiskLevel::from_volatility(annual_volatility_percent),
        })
    }
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub mode: AnalysisMode,
    pub entry_price: Option<f64>,
    pub periods: usize,
    pub latest: IndicatorSnapshot,
    pub consensus: Consensus,
    pub targets: PriceTargets,
    pub insights: MarketInsights,
}
