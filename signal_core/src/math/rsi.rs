use crate::common::analysis_error::AnalysisError;
use crate::math::check_lookback;

/// Relative Strength Index with Wilder smoothing.
///
/// The first average gain/loss is the plain mean of the first `period` deltas;
/// later ones are `(prev * (period - 1) + current) / period`.
#[derive(Debug)]
pub struct RSI {
    period: usize,
    last_price: Option<f64>,
    gains: Vec<f64>,
    losses: Vec<f64>,
    avg: Option<(f64, f64)>,
}

impl RSI {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            last_price: None,
            gains: Vec::with_capacity(period),
            losses: Vec::with_capacity(period),
            avg: None,
        }
    }

    pub fn add(&mut self, price: f64) -> Option<f64> {
        let last_price = self.last_price.replace(price)?;
        if self.period == 0 {
            return None;
        }
        let change = price - last_price;
        let (gain, loss) = if change >= 0.0 { (change, 0.0) } else { (0.0, -change) };

        self.avg = match self.avg {
            Some((avg_gain, avg_loss)) => {
                let n = self.period as f64;
                Some((
                    (avg_gain * (n - 1.0) + gain) / n,
                    (avg_loss * (n - 1.0) + loss) / n,
                ))
            }
            None => {
                self.gains.push(gain);
                self.losses.push(loss);
                if self.gains.len() < self.period {
                    return None;
                }
                Some((
                    self.gains.iter().sum::<f64>() / self.period as f64,
                    self.losses.iter().sum::<f64>() / self.period as f64,
                ))
            }
        };

        self.avg.map(|(avg_gain, avg_loss)| rsi_from_averages(avg_gain, avg_loss))
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            50.0
        } else {
            100.0
        }
    } else {
        let rs = avg_gain / avg_loss;
        (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
    }
}

/// RSI aligned with `values`; `None` for the first `window` periods.
pub fn rsi(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, AnalysisError> {
    check_lookback(&format!("RSI({})", window), window, window + 1, values.len())?;
    let mut model = RSI::new(window);
    Ok(values.iter().map(|&v| model.add(v)).collect())
}
