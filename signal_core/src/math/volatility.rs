use crate::common::analysis_error::AnalysisError;

/// Annualised close-to-close volatility in percent: the sample standard
/// deviation of period returns scaled by `sqrt(periods_per_year)`.
pub fn annualized_volatility(values: &[f64], periods_per_year: f64) -> Result<f64, AnalysisError> {
    if values.len() < 3 {
        return Err(AnalysisError::insufficient("VOLATILITY", 3, values.len()));
    }
    if !periods_per_year.is_finite() || periods_per_year <= 0.0 {
        return Err(AnalysisError::invalid(format!(
            "periods_per_year={} must be positive",
            periods_per_year
        )));
    }

    let returns: Vec<f64> = values.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Ok(variance.sqrt() * periods_per_year.sqrt() * 100.0)
}
