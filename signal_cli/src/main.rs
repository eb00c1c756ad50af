mod csv_source;
mod error;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use signal_core::{AnalysisConfig, AnalysisMode, Analyzer};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// CSV file with timestamp,open,high,low,close,volume rows
    #[arg(short, long)]
    input: PathBuf,

    /// Symbol shown in the report
    #[arg(short, long)]
    symbol: String,

    /// buy or sell
    #[arg(short, long, default_value = "buy")]
    mode: AnalysisMode,

    /// Price the position was bought at (sell mode only)
    #[arg(short, long)]
    entry: Option<f64>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured lookback window
    #[arg(short, long)]
    lookback: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(lookback) = cli.lookback {
        config.lookback = lookback;
    }
    let analyzer = Analyzer::new(config)?;

    let symbol = cli.symbol.to_uppercase();
    let series = csv_source::load_series(&cli.input, &symbol)?;
    info!(symbol = %symbol, periods = series.len(), mode = %cli.mode, "analyzing");

    debug!(lookback = analyzer.config().lookback, "config loaded");
    let report = analyzer.analyze(&series, cli.mode, cli.entry)?;
    if cli.json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(render::TextReport(&report).to_string())
    }
}
