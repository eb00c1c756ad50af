use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::analysis_error::AnalysisError;
use crate::config::config_with_check::ConfigWithCheck;
use crate::math::indicator_config::IndicatorConfig;
use crate::signal::signal_config::SignalConfig;
use crate::target::target_config::TargetConfig;

/// Default lookback, roughly six months of daily bars.
pub const DEFAULT_LOOKBACK: usize = 126;

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Number of trailing periods analysed.
    pub lookback: usize,
    pub indicators: IndicatorConfig,
    pub signals: SignalConfig,
    pub targets: TargetConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_LOOKBACK,
            indicators: IndicatorConfig::default(),
            signals: SignalConfig::default(),
            targets: TargetConfig::default(),
        }
    }
}

macro_rules! take {
    ($conf:ident, $target:expr, $key:literal) => {
        if let Some(v) = $conf.get($key)? {
            $target = v;
        }
    };
}

impl AnalysisConfig {
    /// Builds a config from flat overrides such as `{"rsi_period": 10}`.
    /// Unknown keys are rejected.
    pub fn new(conf: Option<HashMap<String, Value>>) -> Result<Self, AnalysisError> {
        let mut conf = ConfigWithCheck::new(conf.unwrap_or_default());
        let mut config = Self::default();

        take!(conf, config.lookback, "lookback");

        let ind = &mut config.indicators;
        take!(conf, ind.sma_short, "sma_short");
        take!(conf, ind.sma_long, "sma_long");
        take!(conf, ind.rsi_period, "rsi_period");
        take!(conf, ind.macd_fast, "macd_fast");
        take!(conf, ind.macd_slow, "macd_slow");
        take!(conf, ind.macd_signal, "macd_signal");
        take!(conf, ind.boll_n, "boll_n");
        take!(conf, ind.boll_k, "boll_k");
        take!(conf, ind.level_window, "level_window");
        take!(conf, ind.periods_per_year, "periods_per_year");

        let sig = &mut config.signals;
        take!(conf, sig.rsi_oversold, "rsi_oversold");
        take!(conf, sig.rsi_overbought, "rsi_overbought");
        take!(conf, sig.majority, "majority");

        let tgt = &mut config.targets;
        take!(conf, tgt.entry_discount, "entry_discount");
        take!(conf, tgt.risk_factor, "risk_factor");
        take!(conf, tgt.reward_factor, "reward_factor");

        conf.check()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the nested JSON form, e.g. `{"lookback": 200, "signals": {...}}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AnalysisError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, AnalysisError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| AnalysisError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.indicators.validate()?;
        self.signals.validate()?;
        self.targets.validate()?;

        let required = self.indicators.required_lookback();
        if self.lookback < required {
            return Err(AnalysisError::config(format!(
                "lookback={} is shorter than the {} periods the indicators need",
                self.lookback, required
            )));
        }
        Ok(())
    }
}
