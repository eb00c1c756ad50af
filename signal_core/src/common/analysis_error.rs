use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the analysis engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // Data errors (200-299)
    #[strum(serialize = "_DATA_ERR_BEGIN")]
    DataErrBegin = 200,
    #[strum(serialize = "INSUFFICIENT_DATA")]
    InsufficientData = 201,
    #[strum(serialize = "INVALID_INPUT")]
    InvalidInput = 202,
    #[strum(serialize = "_DATA_ERR_END")]
    DataErrEnd = 299,

    // Configuration errors (300-399)
    #[strum(serialize = "_CONFIG_ERR_BEGIN")]
    ConfigErrBegin = 300,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 301,
    #[strum(serialize = "_CONFIG_ERR_END")]
    ConfigErrEnd = 399,
}

impl ErrCode {
    pub fn is_data_err(&self) -> bool {
        let code = *self as i32;
        code > Self::DataErrBegin as i32 && code < Self::DataErrEnd as i32
    }
}

/// Everything the engine can reject. An undecided vote is not an error, it
/// resolves to NEUTRAL or HOLD.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The series is shorter than the lookback an indicator needs.
    #[error("{indicator} needs at least {required} periods, got {available}")]
    InsufficientData {
        indicator: String,
        required: usize,
        available: usize,
    },

    /// Non-positive prices, unordered timestamps or a bad mode/entry pairing.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config error: {0}")]
    Config(String),
}

impl AnalysisError {
    pub fn insufficient(indicator: impl Into<String>, required: usize, available: usize) -> Self {
        Self::InsufficientData {
            indicator: indicator.into(),
            required,
            available,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn errcode(&self) -> ErrCode {
        match self {
            Self::InsufficientData { .. } => ErrCode::InsufficientData,
            Self::InvalidInput(_) => ErrCode::InvalidInput,
            Self::Config(_) => ErrCode::ConfigError,
        }
    }

    pub fn is_data_err(&self) -> bool {
        self.errcode().is_data_err()
    }
}
