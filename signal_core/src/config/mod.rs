pub mod analysis_config;
pub mod config_with_check;
