use tracing::{debug, info, warn};

use crate::analyzer::report::{AnalysisReport, MarketInsights};
use crate::common::{
    analysis_error::AnalysisError,
    enums::{AnalysisMode, AnalysisStage},
};
use crate::config::analysis_config::AnalysisConfig;
use crate::kline::series::Series;
use crate::math::indicator_set::{IndicatorSet, IndicatorSnapshot};
use crate::signal::{
    consensus::{consensus, Consensus, ConsensusQuery},
    signal::evaluate,
};
use crate::target::price_target::{targets_for_buy, targets_for_sell, PriceTargets};

/// Runs indicators, signals and targets over one symbol's series.
///
/// Holds configuration only; every call to [`Analyzer::analyze`] owns its
/// data, so one analyzer can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyses the trailing `lookback` periods of `series`.
    ///
    /// `entry_price` is required for [`AnalysisMode::SellAnalysis`] and
    /// rejected for [`AnalysisMode::BuyAnalysis`].
    pub fn analyze(
        &self,
        series: &Series,
        mode: AnalysisMode,
        entry_price: Option<f64>,
    ) -> Result<AnalysisReport, AnalysisError> {
        let report = Idle::new(&self.config)
            .load(series, mode, entry_price)?
            .compute_indicators()?
            .generate_signals()
            .compute_targets()?
            .finish()?;

        info!(
            symbol = %report.symbol,
            mode = %report.mode,
            action = %report.consensus.action,
            confidence = report.consensus.confidence,
            "analysis done"
        );
        Ok(report)
    }
}

// One type per stage; each transition consumes the previous stage, so the
// order cannot be broken.

struct Idle<'a> {
    config: &'a AnalysisConfig,
}

struct DataLoaded<'a> {
    config: &'a AnalysisConfig,
    series: Series,
    mode: AnalysisMode,
    entry_price: Option<f64>,
}

struct IndicatorsComputed<'a> {
    loaded: DataLoaded<'a>,
    snapshot: IndicatorSnapshot,
}

struct SignalsGenerated<'a> {
    computed: IndicatorsComputed<'a>,
    consensus: Consensus,
}

struct TargetsComputed<'a> {
    generated: SignalsGenerated<'a>,
    targets: PriceTargets,
}

fn enter(stage: AnalysisStage, symbol: &str) {
    debug!(%stage, symbol, "analysis stage");
}

impl<'a> Idle<'a> {
    fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    fn load(
        self,
        series: &Series,
        mode: AnalysisMode,
        entry_price: Option<f64>,
    ) -> Result<DataLoaded<'a>, AnalysisError> {
        enter(AnalysisStage::Idle, series.symbol());
        check_request(mode, entry_price).inspect_err(|e| {
            warn!(symbol = series.symbol(), error = %e, "request rejected");
        })?;

        let series = series.tail(self.config.lookback);
        enter(AnalysisStage::DataLoaded, series.symbol());
        Ok(DataLoaded {
            config: self.config,
            series,
            mode,
            entry_price,
        })
    }
}

fn check_request(mode: AnalysisMode, entry_price: Option<f64>) -> Result<(), AnalysisError> {
    match (mode, entry_price) {
        (AnalysisMode::BuyAnalysis, None) => Ok(()),
        (AnalysisMode::BuyAnalysis, Some(price)) => Err(AnalysisError::invalid(format!(
            "entry price {} is only accepted for {}",
            price,
            AnalysisMode::SellAnalysis
        ))),
        (AnalysisMode::SellAnalysis, None) => Err(AnalysisError::invalid(format!(
            "{} requires an entry price",
            AnalysisMode::SellAnalysis
        ))),
        (AnalysisMode::SellAnalysis, Some(price)) if !price.is_finite() || price <= 0.0 => Err(
            AnalysisError::invalid(format!("entry_price={} must be positive", price)),
        ),
        (AnalysisMode::SellAnalysis, Some(_)) => Ok(()),
    }
}

impl<'a> DataLoaded<'a> {
    fn compute_indicators(self) -> Result<IndicatorsComputed<'a>, AnalysisError> {
        let set = IndicatorSet::compute(&self.series, &self.config.indicators)?;
        let snapshot = set.snapshot()?;
        enter(AnalysisStage::IndicatorsComputed, self.series.symbol());
        Ok(IndicatorsComputed {
            loaded: self,
            snapshot,
        })
    }
}

impl<'a> IndicatorsComputed<'a> {
    fn generate_signals(self) -> SignalsGenerated<'a> {
        let conf = &self.loaded.config.signals;
        let price = self.snapshot.close;
        let signals = evaluate(price, &self.snapshot, conf);

        let query = match self.loaded.entry_price {
            Some(entry_price) if self.loaded.mode == AnalysisMode::SellAnalysis => {
                ConsensusQuery::Sell {
                    latest_price: price,
                    entry_price,
                }
            }
            _ => ConsensusQuery::Buy,
        };
        let consensus = consensus(&signals, query, conf.majority);
        enter(AnalysisStage::SignalsGenerated, self.loaded.series.symbol());

        SignalsGenerated {
            computed: self,
            consensus,
        }
    }
}

impl<'a> SignalsGenerated<'a> {
    fn compute_targets(self) -> Result<TargetsComputed<'a>, AnalysisError> {
        let loaded = &self.computed.loaded;
        let snap = &self.computed.snapshot;

        let targets = match loaded.entry_price {
            Some(entry_price) if loaded.mode == AnalysisMode::SellAnalysis => PriceTargets::Sell(
                targets_for_sell(snap.close, entry_price, self.consensus.action)?,
            ),
            _ => PriceTargets::Buy(targets_for_buy(
                snap.close,
                snap.band_width(),
                &loaded.config.targets,
            )?),
        };
        enter(AnalysisStage::TargetsComputed, loaded.series.symbol());

        Ok(TargetsComputed {
            generated: self,
            targets,
        })
    }
}

impl TargetsComputed<'_> {
    fn finish(self) -> Result<AnalysisReport, AnalysisError> {
        let SignalsGenerated {
            computed,
            consensus,
        } = self.generated;
        let IndicatorsComputed { loaded, snapshot } = computed;

        let insights = MarketInsights::compute(
            &loaded.series,
            &snapshot,
            loaded.config.indicators.periods_per_year,
        )?;
        enter(AnalysisStage::Done, loaded.series.symbol());

        Ok(AnalysisReport {
            symbol: loaded.series.symbol().to_string(),
            mode: loaded.mode,
            entry_price: loaded.entry_price,
            periods: loaded.series.len(),
            latest: snapshot,
            consensus,
            targets: self.targets,
            insights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_request() {
        assert!(check_request(AnalysisMode::BuyAnalysis, None).is_ok());
        assert!(check_request(AnalysisMode::SellAnalysis, Some(10.0)).is_ok());
        for (mode, entry) in [
            (AnalysisMode::BuyAnalysis, Some(10.0)),
            (AnalysisMode::SellAnalysis, None),
            (AnalysisMode::SellAnalysis, Some(0.0)),
            (AnalysisMode::SellAnalysis, Some(-3.0)),
            (AnalysisMode::SellAnalysis, Some(f64::NAN)),
        ] {
            assert!(matches!(
                check_request(mode, entry),
                Err(AnalysisError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_analyzer_rejects_bad_config() {
        let config = AnalysisConfig {
            lookback: 10,
            ..Default::default()
        };
        assert!(matches!(Analyzer::new(config), Err(AnalysisError::Config(_))));
    }
}
