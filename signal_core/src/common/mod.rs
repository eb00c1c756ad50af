pub mod analysis_error;
pub mod enums;
