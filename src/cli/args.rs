use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Apply catalog commands from a CSV file and print the resulting catalog
#[derive(Parser, Debug)]
#[command(name = "product-catalog")]
#[command(about = "Apply catalog commands from a CSV file and print the resulting catalog", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing catalog commands
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy to use for applying commands
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for sequential or 'async' for concurrent batches"
    )]
    pub strategy: StrategyType,

    /// Number of commands per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of commands per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads applying commands (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Output format for the final catalog
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "csv",
        help = "Output format for the final catalog: 'csv' or 'json'"
    )]
    pub format: OutputFormat,

    /// Start from the demo catalog instead of an empty one
    #[arg(long = "seed", help = "Start from the demo catalog (Comb, Toothbrush, Shampoo)")]
    pub seed: bool,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Output formats for the catalog listing
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced by
    /// the defaults with a warning (see [`BatchConfig::new`]).
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }
}
