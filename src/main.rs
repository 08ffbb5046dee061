//! Product Catalog CLI
//!
//! Applies catalog commands from a CSV file and prints the resulting catalog.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- commands.csv > catalog.csv
//! cargo run -- --strategy sync commands.csv > catalog.csv
//! cargo run -- --seed --format json commands.csv > catalog.json
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 commands.csv
//! ```
//!
//! Diagnostics are logged to stderr; set `RUST_LOG=debug` to see every
//! applied command.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, file not readable, output failure)

use product_catalog::cli;
use product_catalog::core::CatalogStore;
use product_catalog::io;
use product_catalog::logging;
use product_catalog::strategy;
use std::process;
use std::sync::Arc;
use tracing::{error, info};

fn main() {
    logging::init();
    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config)
    };

    let catalog = Arc::new(if args.seed {
        CatalogStore::seeded()
    } else {
        CatalogStore::new()
    });

    match strategy.process(catalog.clone(), &args.input_file) {
        Ok(summary) => info!(
            applied = summary.applied,
            rejected = summary.rejected,
            products = catalog.len(),
            "catalog ready"
        ),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }

    let mut output = std::io::stdout();
    if let Err(e) = io::write_products(&catalog.list(), args.format, &mut output) {
        error!("{}", e);
        process::exit(1);
    }
}
