use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_DATA_PATH: &str = "reit_data.csv";

/// REIT performance and sector analyzer.
///
/// Opens the dashboard window unless `--export` or `--summary` is given, in
/// which case the dashboard is computed once and written out headless.
#[derive(Debug, Clone, Parser)]
#[command(name = "reit-analyzer", version)]
pub struct Cli {
    /// Dataset to analyze (.csv, .json or .parquet).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Ticker to select initially; repeat for several. Defaults to all.
    #[arg(long = "ticker", value_name = "TICKER")]
    pub tickers: Vec<String>,

    /// Write the filtered view as CSV to PATH and exit.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Print a JSON summary of the dashboard and exit.
    #[arg(long)]
    pub summary: bool,
}

impl Cli {
    pub fn is_headless(&self) -> bool {
        self.export.is_some() || self.summary
    }
}
