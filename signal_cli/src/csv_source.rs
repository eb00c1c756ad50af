use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::Reader;
use serde::Deserialize;
use tracing::debug;

use signal_core::{PricePoint, Series};

use crate::error::CliError;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Accepts `%Y-%m-%d %H:%M:%S` and plain `%Y-%m-%d`.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

pub fn load_series(path: &Path, symbol: &str) -> Result<Series, CliError> {
    let file = File::open(path)?;
    read_series(file, symbol)
}

/// Reads `timestamp,open,high,low,close,volume` rows, sorted by timestamp
/// before the series is built.
pub fn read_series<R: Read>(reader: R, symbol: &str) -> Result<Series, CliError> {
    let mut rdr = Reader::from_reader(reader);
    let mut points = Vec::new();

    for (idx, result) in rdr.deserialize::<CsvRecord>().enumerate() {
        let record = result?;
        let timestamp = parse_timestamp(&record.timestamp).ok_or_else(|| CliError::Timestamp {
            row: idx + 1,
            value: record.timestamp.clone(),
        })?;
        points.push(PricePoint::new(
            timestamp,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
        ));
    }

    points.sort_by_key(|p| p.timestamp);
    debug!(symbol, rows = points.len(), "loaded csv");
    Ok(Series::new(symbol, points, true)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_core::AnalysisError;

    #[test]
    fn test_parse_timestamp() {
        let dt = parse_timestamp("2024-05-06 15:30:00").unwrap();
        assert_eq!(dt.to_string(), "2024-05-06 15:30:00");
        let d = parse_timestamp(" 2024-05-06 ").unwrap();
        assert_eq!(d.to_string(), "2024-05-06 00:00:00");
        assert!(parse_timestamp("06/05/2024").is_none());
    }

    #[test]
    fn test_read_series_sorts_rows() {
        let data = "timestamp,open,high,low,close,volume\n\
                    2024-01-03,11,12,10,11.5,200\n\
                    2024-01-02,10,11,9,10.5,100\n";
        let series = read_series(data.as_bytes(), "ABC").unwrap();
        assert_eq!(series.symbol(), "ABC");
        assert_eq!(series.closes(), vec![10.5, 11.5]);
    }

    #[test]
    fn test_read_series_errors() {
        let data = "timestamp,open,high,low,close,volume\nyesterday,1,1,1,1,1\n";
        assert!(matches!(
            read_series(data.as_bytes(), "X"),
            Err(CliError::Timestamp { row: 1, .. })
        ));

        let data = "timestamp,open,high,low,close,volume\n2024-01-02,1,1,1,abc,1\n";
        assert!(matches!(read_series(data.as_bytes(), "X"), Err(CliError::Csv(_))));

        let data = "timestamp,open,high,low,close,volume\n\
                    2024-01-02,1,1,1,1,1\n\
                    2024-01-02,1,1,1,1,1\n";
        assert!(matches!(
            read_series(data.as_bytes(), "X"),
            Err(CliError::Analysis(AnalysisError::InvalidInput(_)))
        ));
    }
}
