pub mod analyzer;
pub mod common;
pub mod config;
pub mod kline;
pub mod math;
pub mod signal;
pub mod target;

pub use analyzer::analyzer::Analyzer;
pub use analyzer::report::{AnalysisReport, MarketInsights};
pub use common::analysis_error::{AnalysisError, ErrCode};
pub use common::enums::{Action, AnalysisMode, Direction};
pub use config::analysis_config::AnalysisConfig;
pub use kline::{price_point::PricePoint, series::Series};
