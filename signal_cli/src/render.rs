use std::fmt;

use signal_core::common::enums::Direction;
use signal_core::target::PriceTargets;
use signal_core::{Action, AnalysisReport};

fn headline(action: Action, symbol: &str) -> String {
    match action {
        Action::Buy => format!("RECOMMENDATION: BUY {}", symbol),
        Action::DontBuy => format!("RECOMMENDATION: DO NOT BUY {}", symbol),
        Action::Neutral => format!("RECOMMENDATION: NEUTRAL - WAIT {}", symbol),
        Action::SellForProfit => format!("RECOMMENDATION: SELL {} FOR PROFIT", symbol),
        Action::SellToCutLosses => format!("RECOMMENDATION: SELL {} TO CUT LOSSES", symbol),
        Action::Hold => format!("RECOMMENDATION: HOLD {}", symbol),
    }
}

/// Plain-text rendering of a report for the terminal.
pub struct TextReport<'a>(pub &'a AnalysisReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let ins = &report.insights;
        let c = &report.consensus;

        writeln!(
            f,
            "{} ({} periods, last {})",
            report.symbol, report.periods, report.latest.timestamp
        )?;
        writeln!(
            f,
            "Current price ${:.2}  change ${:.2} ({:.2}%)  volume {:.0}",
            ins.current_price, ins.change, ins.change_percent, ins.volume
        )?;
        writeln!(f)?;
        writeln!(f, "{}", headline(c.action, &report.symbol))?;
        writeln!(
            f,
            "Confidence {:.0}%  (buy {}, sell {}, neutral {})",
            c.confidence * 100.0,
            c.tally.buy,
            c.tally.sell,
            c.tally.neutral
        )?;
        writeln!(f)?;

        match &report.targets {
            PriceTargets::Buy(t) => {
                writeln!(
                    f,
                    "Entry ${:.2}  Stop loss ${:.2}  Take profit ${:.2}",
                    t.entry, t.stop_loss, t.take_profit
                )?;
                match t.risk_reward_ratio {
                    Some(ratio) => writeln!(f, "Risk/Reward {:.2}:1", ratio)?,
                    None => writeln!(f, "Risk/Reward n/a (no volatility)")?,
                }
            }
            PriceTargets::Sell(t) => {
                match t.suggested_sell_price {
                    Some(price) => writeln!(f, "Suggested sell price ${:.2}", price)?,
                    None => writeln!(f, "No sell price suggested")?,
                }
                writeln!(
                    f,
                    "Profit/Loss ${:.2}  Return {:.2}%",
                    t.profit_loss_amount, t.return_percent
                )?;
            }
        }
        writeln!(f)?;

        for signal in &c.signals {
            let marker = match signal.direction {
                Direction::Buy => '+',
                Direction::Sell => '-',
                Direction::Neutral => '=',
            };
            writeln!(
                f,
                " {} {}: {} - {}",
                marker, signal.source, signal.direction, signal.reason
            )?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Support ${:.2}  Resistance ${:.2}  RSI {:.1}",
            ins.support, ins.resistance, report.latest.rsi
        )?;
        writeln!(
            f,
            "MACD {:.3}  signal {:.3}  histogram {:+.3}",
            report.latest.macd_line,
            report.latest.macd_signal_line,
            report.latest.macd_histogram()
        )?;
        write!(
            f,
            "Annual volatility {:.1}% ({} risk)",
            ins.annual_volatility_percent, ins.risk_level
        )
    }
}
