use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::analysis_error::AnalysisError;
use crate::kline::series::Series;
use crate::math::{
    boll::bollinger,
    indicator_config::IndicatorConfig,
    macd::macd,
    rsi::rsi,
    trend::{rolling_max, rolling_min, sma},
};

/// Indicator values for one period. Fields are `None` inside the leading
/// region where their lookback is not yet filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub timestamp: NaiveDateTime,
    pub close: f64,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub macd_line: Option<f64>,
    pub macd_signal_line: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub support: Option<f64>,
    pub resistance: Option<f64>,
}

/// Fully defined readings at one period, the input of the signal engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub timestamp: NaiveDateTime,
    pub close: f64,
    pub sma_short: f64,
    pub sma_long: f64,
    pub rsi: f64,
    pub macd_line: f64,
    pub macd_signal_line: f64,
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    pub support: f64,
    pub resistance: f64,
}

impl IndicatorSnapshot {
    pub fn macd_histogram(&self) -> f64 {
        self.macd_line - self.macd_signal_line
    }

    pub fn band_width(&self) -> f64 {
        self.bb_upper - self.bb_lower
    }
}

/// All indicators over one series, one record per price point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    records: Vec<IndicatorRecord>,
}

impl IndicatorSet {
    pub fn compute(series: &Series, conf: &IndicatorConfig) -> Result<Self, AnalysisError> {
        let closes = series.closes();

        let sma_short = sma(&closes, conf.sma_short)?;
        let sma_long = sma(&closes, conf.sma_long)?;
        let rsi = rsi(&closes, conf.rsi_period)?;
        let macd = macd(&closes, conf.macd_fast, conf.macd_slow, conf.macd_signal)?;
        let boll = bollinger(&closes, conf.boll_n, conf.boll_k)?;
        let support = rolling_min(&series.lows(), conf.level_window)?;
        let resistance = rolling_max(&series.highs(), conf.level_window)?;

        let records = series
            .points()
            .iter()
            .enumerate()
            .map(|(i, point)| IndicatorRecord {
                timestamp: point.timestamp,
                close: point.close,
                sma_short: sma_short[i],
                sma_long: sma_long[i],
                rsi: rsi[i],
                macd_line: macd[i].map(|m| m.macd),
                macd_signal_line: macd[i].and_then(|m| m.signal),
                bb_upper: boll[i].map(|b| b.upper),
                bb_middle: boll[i].map(|b| b.middle),
                bb_lower: boll[i].map(|b| b.lower),
                support: support[i],
                resistance: resistance[i],
            })
            .collect();

        Ok(Self { records })
    }

    pub fn records(&self) -> &[IndicatorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&IndicatorRecord> {
        self.records.last()
    }

    /// Readings at the last period; fails rather than emit a partial snapshot.
    pub fn snapshot(&self) -> Result<IndicatorSnapshot, AnalysisError> {
        let available = self.records.len();
        let rec = self
            .latest()
            .ok_or_else(|| AnalysisError::insufficient("INDICATORS", 1, available))?;
        let field = |name: &str, value: Option<f64>| {
            value.ok_or_else(|| AnalysisError::insufficient(name, available + 1, available))
        };

        Ok(IndicatorSnapshot {
            timestamp: rec.timestamp,
            close: rec.close,
            sma_short: field("sma_short", rec.sma_short)?,
            sma_long: field("sma_long", rec.sma_long)?,
            rsi: field("rsi", rec.rsi)?,
            macd_line: field("macd_line", rec.macd_line)?,
            macd_signal_line: field("macd_signal_line", rec.macd_signal_line)?,
            bb_upper: field("bb_upper", rec.bb_upper)?,
            bb_middle: field("bb_middle", rec.bb_middle)?,
            bb_lower: field("bb_lower", rec.bb_lower)?,
            support: field("support", rec.support)?,
            resistance: field("resistance", rec.resistance)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kline::price_point::PricePoint;
    use chrono::{Duration, NaiveDate};

    fn series(n: usize) -> Series {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let points = (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.25).sin() * 4.0 + i as f64 * 0.05;
                PricePoint::new(
                    start + Duration::days(i as i64),
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    10_000.0,
                )
            })
            .collect();
        Series::new("TEST", points, false).unwrap()
    }

    #[test]
    fn test_records_aligned_with_series() {
        let series = series(80);
        let set = IndicatorSet::compute(&series, &IndicatorConfig::default()).unwrap();
        assert_eq!(set.len(), 80);
        for (i, rec) in set.records().iter().enumerate() {
            assert_eq!(rec.timestamp, series.points()[i].timestamp);
            assert_eq!(rec.sma_long.is_some(), i >= 49);
            assert_eq!(rec.sma_short.is_some(), i >= 19);
            assert_eq!(rec.rsi.is_some(), i >= 14);
            assert_eq!(rec.macd_line.is_some(), i >= 25);
            assert_eq!(rec.macd_signal_line.is_some(), i >= 33);
            assert_eq!(rec.bb_lower.is_some(), i >= 19);
            assert_eq!(rec.support.is_some(), i >= 19);
        }
        for rec in &set.records()[49..] {
            for v in [rec.sma_long, rec.rsi, rec.macd_signal_line, rec.bb_upper, rec.resistance] {
                assert!(!v.unwrap().is_nan());
            }
        }
    }

    #[test]
    fn test_snapshot() {
        let set = IndicatorSet::compute(&series(60), &IndicatorConfig::default()).unwrap();
        let snap = set.snapshot().unwrap();
        let latest = set.latest().unwrap();
        assert_eq!(snap.close, latest.close);
        assert_eq!(Some(snap.rsi), latest.rsi);
        assert!(snap.bb_upper >= snap.bb_middle && snap.bb_middle >= snap.bb_lower);
        assert!(snap.support <= snap.resistance);
        assert_eq!(snap.band_width(), snap.bb_upper - snap.bb_lower);
    }

    #[test]
    fn test_short_series() {
        let err = IndicatorSet::compute(&series(40), &IndicatorConfig::default()).unwrap_err();
        assert_eq!(err, AnalysisError::insufficient("SMA(50)", 50, 40));
    }
}
