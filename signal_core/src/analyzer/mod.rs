pub mod analyzer;
pub mod report;
