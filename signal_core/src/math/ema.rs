use crate::common::analysis_error::AnalysisError;
use crate::math::check_lookback;

/// Exponential moving average with α = 2 / (N + 1), seeded by the SMA of the
/// first N values.
#[derive(Debug, Clone)]
pub struct EmaModel {
    period: usize,
    seed: Vec<f64>,
    last: Option<f64>,
}

impl EmaModel {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            seed: Vec::with_capacity(period),
            last: None,
        }
    }

    pub fn add(&mut self, value: f64) -> Option<f64> {
        if self.period == 0 {
            return None;
        }
        self.last = match self.last {
            Some(prev) => {
                let alpha = 2.0 / (self.period as f64 + 1.0);
                Some(alpha * value + (1.0 - alpha) * prev)
            }
            None => {
                self.seed.push(value);
                if self.seed.len() == self.period {
                    Some(self.seed.iter().sum::<f64>() / self.period as f64)
                } else {
                    None
                }
            }
        };
        self.last
    }
}

pub fn ema(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, AnalysisError> {
    check_lookback(&format!("EMA({})", window), window, window, values.len())?;
    let mut model = EmaModel::new(window);
    Ok(values.iter().map(|&v| model.add(v)).collect())
}
