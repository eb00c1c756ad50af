use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// A single indicator's vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Buy,
    Sell,
    Neutral,
}

/// Indicator family that cast a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum SignalSource {
    #[strum(serialize = "Moving Average")]
    MovingAverage,
    #[strum(serialize = "RSI")]
    Rsi,
    #[strum(serialize = "MACD")]
    Macd,
    #[strum(serialize = "Bollinger Bands")]
    Bollinger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisMode {
    #[strum(to_string = "BUY_ANALYSIS", serialize = "buy")]
    BuyAnalysis,
    #[strum(to_string = "SELL_ANALYSIS", serialize = "sell")]
    SellAnalysis,
}

/// Final recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Buy,
    DontBuy,
    SellForProfit,
    SellToCutLosses,
    Hold,
    Neutral,
}

impl Action {
    /// True for the two actions that recommend leaving a position.
    pub fn is_exit(&self) -> bool {
        matches!(self, Action::SellForProfit | Action::SellToCutLosses)
    }
}

/// How many votes a direction needs before it wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MajorityRule {
    /// Strictly more than half of the BUY + SELL votes.
    #[default]
    NonNeutral,
    /// Strictly more than half of all votes, neutral ones included.
    AllVotes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_volatility(annual_volatility_pct: f64) -> Self {
        if annual_volatility_pct > 30.0 {
            RiskLevel::High
        } else if annual_volatility_pct > 20.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AnalysisStage {
    Idle,
    DataLoaded,
    IndicatorsComputed,
    SignalsGenerated,
    TargetsComputed,
    Done,
}
