use serde::{Deserialize, Serialize};

use crate::common::enums::{Direction, SignalSource};
use crate::math::indicator_set::IndicatorSnapshot;
use crate::signal::signal_config::SignalConfig;

/// One indicator's vote at the latest period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub source: SignalSource,
    pub direction: Direction,
    pub reason: String,
}

impl Signal {
    pub fn new(source: SignalSource, direction: Direction, reason: impl Into<String>) -> Self {
        Self {
            source,
            direction,
            reason: reason.into(),
        }
    }
}

/// Bullish stack `price > short > long` buys, bearish stack sells.
pub fn moving_average_signal(price: f64, sma_short: f64, sma_long: f64) -> Signal {
    let source = SignalSource::MovingAverage;
    if price > sma_short && sma_short > sma_long {
        Signal::new(source, Direction::Buy, "Price above both short and long SMA")
    } else if price < sma_short && sma_short < sma_long {
        Signal::new(source, Direction::Sell, "Price below both short and long SMA")
    } else {
        Signal::new(source, Direction::Neutral, "Mixed moving average signals")
    }
}

pub fn rsi_signal(rsi: f64, conf: &SignalConfig) -> Signal {
    let source = SignalSource::Rsi;
    if rsi < conf.rsi_oversold {
        Signal::new(source, Direction::Buy, format!("Oversold condition (RSI: {:.1})", rsi))
    } else if rsi > conf.rsi_overbought {
        Signal::new(source, Direction::Sell, format!("Overbought condition (RSI: {:.1})", rsi))
    } else {
        Signal::new(source, Direction::Neutral, format!("Neutral RSI ({:.1})", rsi))
    }
}

pub fn macd_signal(macd_line: f64, signal_line: f64) -> Signal {
    let source = SignalSource::Macd;
    if macd_line > signal_line {
        Signal::new(source, Direction::Buy, "MACD above signal line")
    } else if macd_line < signal_line {
        Signal::new(source, Direction::Sell, "MACD below signal line")
    } else {
        Signal::new(source, Direction::Neutral, "MACD on signal line")
    }
}

/// Touching a band counts: `price <= lower` buys, `price >= upper` sells.
pub fn bollinger_signal(price: f64, bb_upper: f64, bb_lower: f64) -> Signal {
    let source = SignalSource::Bollinger;
    if price <= bb_lower {
        Signal::new(source, Direction::Buy, "Price at or below lower band")
    } else if price >= bb_upper {
        Signal::new(source, Direction::Sell, "Price at or above upper band")
    } else {
        Signal::new(source, Direction::Neutral, "Price within bands")
    }
}

/// One vote per indicator family, in a fixed order.
pub fn evaluate(price: f64, snap: &IndicatorSnapshot, conf: &SignalConfig) -> Vec<Signal> {
    vec![
        moving_average_signal(price, snap.sma_short, snap.sma_long),
        rsi_signal(snap.rsi, conf),
        macd_signal(snap.macd_line, snap.macd_signal_line),
        bollinger_signal(price, snap.bb_upper, snap.bb_lower),
    ]
}
