use serde::{Deserialize, Serialize};

use crate::common::enums::{Action, Direction, MajorityRule};
use crate::signal::signal::Signal;

/// What the caller wants to decide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsensusQuery {
    /// Should a position be opened?
    Buy,
    /// Should an open position bought at `entry_price` be closed?
    Sell { latest_price: f64, entry_price: f64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub buy: usize,
    pub sell: usize,
    pub neutral: usize,
}

impl VoteTally {
    pub fn from_signals(signals: &[Signal]) -> Self {
        signals.iter().fold(Self::default(), |mut tally, s| {
            match s.direction {
                Direction::Buy => tally.buy += 1,
                Direction::Sell => tally.sell += 1,
                Direction::Neutral => tally.neutral += 1,
            }
            tally
        })
    }

    pub fn total(&self) -> usize {
        self.buy + self.sell + self.neutral
    }

    pub fn count(&self, direction: Direction) -> usize {
        match direction {
            Direction::Buy => self.buy,
            Direction::Sell => self.sell,
            Direction::Neutral => self.neutral,
        }
    }

    /// Share of the most common direction, 0 with no votes at all.
    pub fn confidence(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let max = self.buy.max(self.sell).max(self.neutral);
        max as f64 / total as f64
    }

    /// Whether `direction` holds a strict majority under `rule`.
    pub fn has_majority(&self, direction: Direction, rule: MajorityRule) -> bool {
        if direction == Direction::Neutral {
            return false;
        }
        let base = match rule {
            MajorityRule::NonNeutral => self.buy + self.sell,
            MajorityRule::AllVotes => self.total(),
        };
        base > 0 && 2 * self.count(direction) > base
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consensus {
    pub action: Action,
    pub confidence: f64,
    pub tally: VoteTally,
    pub signals: Vec<Signal>,
}

/// Reduces per-indicator votes to one action.
///
/// Without a majority the result is NEUTRAL (buy query) or HOLD (sell query).
pub fn consensus(signals: &[Signal], query: ConsensusQuery, rule: MajorityRule) -> Consensus {
    let tally = VoteTally::from_signals(signals);

    let action = match query {
        ConsensusQuery::Buy => {
            if tally.has_majority(Direction::Buy, rule) {
                Action::Buy
            } else if tally.has_majority(Direction::Sell, rule) {
                Action::DontBuy
            } else {
                Action::Neutral
            }
        }
        ConsensusQuery::Sell {
            latest_price,
            entry_price,
        } => {
            if !tally.has_majority(Direction::Sell, rule) {
                Action::Hold
            } else if latest_price > entry_price {
                Action::SellForProfit
            } else if latest_price < entry_price {
                Action::SellToCutLosses
            } else {
                Action::Hold
            }
        }
    };

    Consensus {
        action,
        confidence: tally.confidence(),
        tally,
        signals: signals.to_vec(),
    }
}
