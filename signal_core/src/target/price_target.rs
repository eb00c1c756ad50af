use serde::{Deserialize, Serialize};

use crate::common::analysis_error::AnalysisError;
use crate::common::enums::Action;
use crate::target::target_config::TargetConfig;

/// Lowest stop-loss as a fraction of the entry price.
pub const MIN_STOP_FRACTION: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuyTargets {
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// `None` when the distance from entry to stop is zero.
    pub risk_reward_ratio: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SellTargets {
    /// `None` unless the recommendation is to exit.
    pub suggested_sell_price: Option<f64>,
    pub profit_loss_amount: f64,
    pub return_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceTargets {
    Buy(BuyTargets),
    Sell(SellTargets),
}

fn check_price(name: &str, price: f64) -> Result<(), AnalysisError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AnalysisError::invalid(format!("{}={} must be positive", name, price)));
    }
    Ok(())
}

/// Potential gain over potential loss. `None` when the risk leg vanishes at the
/// scale of the entry price.
pub fn risk_reward_ratio(entry: f64, stop_loss: f64, take_profit: f64) -> Option<f64> {
    let risk = entry - stop_loss;
    if risk.abs() <= f64::EPSILON * entry.abs() {
        return None;
    }
    Some((take_profit - entry) / risk)
}

/// Entry, stop and take-profit levels spaced by multiples of `volatility`
/// (the Bollinger band width at the latest period).
///
/// The stop never drops below `MIN_STOP_FRACTION` of the entry, and the
/// ratio is computed from the floored stop.
pub fn targets_for_buy(
    latest_price: f64,
    volatility: f64,
    conf: &TargetConfig,
) -> Result<BuyTargets, AnalysisError> {
    check_price("latest_price", latest_price)?;
    if !volatility.is_finite() || volatility < 0.0 {
        return Err(AnalysisError::invalid(format!(
            "volatility={} must be a non-negative number",
            volatility
        )));
    }

    let entry = latest_price * (1.0 - conf.entry_discount);
    let stop_loss = (entry - conf.risk_factor * volatility).max(entry * MIN_STOP_FRACTION);
    let take_profit = entry + conf.reward_factor * volatility;

    Ok(BuyTargets {
        entry,
        stop_loss,
        take_profit,
        risk_reward_ratio: risk_reward_ratio(entry, stop_loss, take_profit),
    })
}

/// Realised result of closing at the latest price a position opened at
/// `entry_price`.
pub fn targets_for_sell(
    latest_price: f64,
    entry_price: f64,
    action: Action,
) -> Result<SellTargets, AnalysisError> {
    check_price("latest_price", latest_price)?;
    check_price("entry_price", entry_price)?;

    let profit_loss_amount = latest_price - entry_price;
    Ok(SellTargets {
        suggested_sell_price: action.is_exit().then_some(latest_price),
        profit_loss_amount,
        return_percent: profit_loss_amount * 100.0 / entry_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_risk_reward_exact() {
        assert_eq!(risk_reward_ratio(100.0, 95.0, 110.0), Some(2.0));
        assert_eq!(risk_reward_ratio(100.0, 100.0, 110.0), None);
    }

    #[test]
    fn test_buy_targets_default_sizing() {
        let targets = targets_for_buy(100.0, 10.0, &TargetConfig::default()).unwrap();
        assert_eq!(targets.entry, 100.0);
        assert_eq!(targets.stop_loss, 95.0);
        assert_eq!(targets.take_profit, 110.0);
        assert_eq!(targets.risk_reward_ratio, Some(2.0));
    }

    #[test]
    fn test_buy_targets_discount() {
        let conf = TargetConfig {
            entry_discount: 0.02,
            ..Default::default()
        };
        let targets = targets_for_buy(100.0, 4.0, &conf).unwrap();
        assert_relative_eq!(targets.entry, 98.0);
        assert_relative_eq!(targets.stop_loss, 96.0);
        assert_relative_eq!(targets.take_profit, 102.0);
    }

    #[test]
    fn test_buy_targets_zero_volatility() {
        let targets = targets_for_buy(50.0, 0.0, &TargetConfig::default()).unwrap();
        assert_eq!(targets.stop_loss, 50.0);
        assert_eq!(targets.take_profit, 50.0);
        assert_eq!(targets.risk_reward_ratio, None);
    }

    #[test]
    fn test_buy_targets_stop_floor() {
        // band width of 3x the entry would put the raw stop at -50
        let targets = targets_for_buy(100.0, 300.0, &TargetConfig::default()).unwrap();
        assert_eq!(targets.stop_loss, 1.0);
        assert_eq!(targets.take_profit, 400.0);
        assert_relative_eq!(targets.risk_reward_ratio.unwrap(), 300.0 / 99.0);
    }

    #[test]
    fn test_risk_reward_tiny_prices() {
        let targets = targets_for_buy(1e-9, 1e-12, &TargetConfig::default()).unwrap();
        assert!(targets.stop_loss > 0.0);
        assert_relative_eq!(targets.risk_reward_ratio.unwrap(), 2.0, epsilon = 1e-6);
        assert_eq!(risk_reward_ratio(1e-9, 1e-9, 2e-9), None);
    }

    #[test]
    fn test_buy_targets_invalid() {
        let conf = TargetConfig::default();
        assert!(matches!(
            targets_for_buy(0.0, 1.0, &conf),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(targets_for_buy(10.0, -1.0, &conf).is_err());
    }

    #[test]
    fn test_sell_profit_and_loss() {
        let gain = targets_for_sell(120.0, 100.0, Action::SellForProfit).unwrap();
        assert_eq!(gain.profit_loss_amount, 20.0);
        assert_eq!(gain.return_percent, 20.0);
        assert_eq!(gain.suggested_sell_price, Some(120.0));

        let loss = targets_for_sell(80.0, 100.0, Action::SellToCutLosses).unwrap();
        assert_eq!(loss.profit_loss_amount, -20.0);
        assert_eq!(loss.return_percent, -20.0);
    }

    #[test]
    fn test_sell_hold_has_no_price() {
        let hold = targets_for_sell(120.0, 100.0, Action::Hold).unwrap();
        assert_eq!(hold.suggested_sell_price, None);
        assert_eq!(hold.profit_loss_amount, 20.0);
    }

    #[test]
    fn test_sell_invalid_prices() {
        assert!(matches!(
            targets_for_sell(120.0, 0.0, Action::Hold),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(targets_for_sell(-1.0, 100.0, Action::Hold).is_err());
    }
}
