use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::common::analysis_error::AnalysisError;
use crate::math::check_lookback;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollMetric {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollMetric {
    /// Band width, the volatility proxy used for target sizing.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Bollinger bands using the population standard deviation of the window.
#[derive(Debug)]
pub struct BollModel {
    period: usize,
    k: f64,
    prices: VecDeque<f64>,
}

impl BollModel {
    pub fn new(period: usize, k: f64) -> Self {
        Self {
            period,
            k,
            prices: VecDeque::with_capacity(period),
        }
    }

    pub fn add(&mut self, price: f64) -> Option<BollMetric> {
        self.prices.push_back(price);
        if self.prices.len() > self.period {
            self.prices.pop_front();
        }
        if self.period == 0 || self.prices.len() < self.period {
            return None;
        }

        let n = self.prices.len() as f64;
        let mid = self.prices.iter().sum::<f64>() / n;
        let variance = self.prices.iter().map(|&x| (x - mid).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        Some(BollMetric {
            upper: mid + self.k * std_dev,
            middle: mid,
            lower: mid - self.k * std_dev,
        })
    }
}

pub fn bollinger(
    values: &[f64],
    window: usize,
    k: f64,
) -> Result<Vec<Option<BollMetric>>, AnalysisError> {
    let name = format!("BOLL({})", window);
    if !k.is_finite() || k < 0.0 {
        return Err(AnalysisError::invalid(format!(
            "{} multiplier k={} must be a non-negative number",
            name, k
        )));
    }
    check_lookback(&name, window, window, values.len())?;
    let mut model = BollModel::new(window, k);
    Ok(values.iter().map(|&v| model.add(v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_population_std() {
        // mean 5, population std 2
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let res = bollinger(&values, 8, 2.0).unwrap();
        assert!(res[..7].iter().all(|v| v.is_none()));
        let band = res[7].unwrap();
        assert_relative_eq!(band.middle, 5.0);
        assert_relative_eq!(band.upper, 9.0);
        assert_relative_eq!(band.lower, 1.0);
        assert_relative_eq!(band.width(), 8.0);
    }

    #[test]
    fn test_flat_series_has_zero_width() {
        let res = bollinger(&[3.0; 25], 20, 2.0).unwrap();
        let band = res[24].unwrap();
        assert_eq!(band.width(), 0.0);
        assert_eq!(band.middle, 3.0);
    }

    #[test]
    fn test_bollinger_errors() {
        assert!(matches!(
            bollinger(&[1.0; 5], 20, 2.0),
            Err(AnalysisError::InsufficientData { required: 20, available: 5, .. })
        ));
        assert!(matches!(
            bollinger(&[1.0; 30], 20, -1.0),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
}
