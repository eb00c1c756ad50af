use serde::Serialize;

use crate::common::analysis_error::AnalysisError;
use crate::kline::price_point::PricePoint;

/// Chronologically ordered price history for one symbol.
///
/// Timestamps strictly increase; every price is finite and positive. A
/// `Series` can only be obtained through [`Series::new`], so downstream code
/// may rely on both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    symbol: String,
    points: Vec<PricePoint>,
}

impl Series {
    pub fn new(
        symbol: impl Into<String>,
        points: Vec<PricePoint>,
        autofix: bool,
    ) -> Result<Self, AnalysisError> {
        let mut points = points;
        for point in points.iter_mut() {
            point.check(autofix)?;
        }
        for pair in points.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(AnalysisError::invalid(format!(
                    "timestamps must strictly increase: {} follows {}",
                    pair[1].timestamp, pair[0].timestamp
                )));
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            points,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// The trailing `n` periods, or the whole series when it is shorter.
    pub fn tail(&self, n: usize) -> Series {
        let start = self.points.len().saturating_sub(n);
        Series {
            symbol: self.symbol.clone(),
            points: self.points[start..].to_vec(),
        }
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.low).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn day(i: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::days(i)
    }

    fn point(i: i64, close: f64) -> PricePoint {
        PricePoint::new(day(i), close, close + 1.0, close - 1.0, close, 1_000.0)
    }

    #[test]
    fn test_new_and_projections() {
        let series = Series::new("AAPL", (0..5).map(|i| point(i, 10.0 + i as f64)).collect(), false)
            .unwrap();
        assert_eq!(series.symbol(), "AAPL");
        assert_eq!(series.len(), 5);
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0, 13.0, 14.0]);
        assert_eq!(series.highs()[0], 11.0);
        assert_eq!(series.lows()[4], 13.0);
        assert_eq!(series.last().unwrap().close, 14.0);
    }

    #[test]
    fn test_rejects_unordered_timestamps() {
        let points = vec![point(0, 10.0), point(2, 11.0), point(1, 12.0)];
        assert!(matches!(
            Series::new("X", points, false),
            Err(AnalysisError::InvalidInput(_))
        ));

        let points = vec![point(0, 10.0), point(0, 11.0)];
        assert!(Series::new("X", points, false).is_err());
    }

    #[test]
    fn test_tail() {
        let series = Series::new("X", (0..10).map(|i| point(i, 10.0 + i as f64)).collect(), false)
            .unwrap();
        let tail = series.tail(3);
        assert_eq!(tail.closes(), vec![17.0, 18.0, 19.0]);
        assert_eq!(series.tail(50).len(), 10);
    }
}
