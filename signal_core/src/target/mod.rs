pub mod price_target;
pub mod target_config;

pub use price_target::{
    risk_reward_ratio, targets_for_buy, targets_for_sell, BuyTargets, PriceTargets, SellTargets,
};
pub use target_config::TargetConfig;
