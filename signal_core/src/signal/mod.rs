pub mod consensus;
pub mod signal;
pub mod signal_config;

pub use consensus::{consensus, Consensus, ConsensusQuery, VoteTally};
pub use signal::{evaluate, Signal};
pub use signal_config::SignalConfig;
