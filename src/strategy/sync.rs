//! Synchronous processing strategy
//!
//! Streams the command file row by row through a [`CommandEngine`] on the
//! calling thread. Commands are applied strictly in file order, so the final
//! catalog order matches the order of the create rows.
//!
//! # Memory Efficiency
//!
//! Rows are read one at a time; memory grows with the catalog and the key
//! table, not with the size of the file.

use crate::core::{CommandEngine, CommandOutcome, ProductRepository};
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use product_catalog::core::CatalogStore;
/// use product_catalog::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let catalog = Arc::new(CatalogStore::new());
/// let summary = SyncProcessingStrategy
///     .process(catalog.clone(), Path::new("commands.csv"))
///     .expect("Processing failed");
/// println!("{} applied, {} products", summary.applied, catalog.len());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        catalog: Arc<dyn ProductRepository>,
        input_path: &Path,
    ) -> Result<ProcessingSummary, String> {
        let reader = SyncReader::new(input_path)?;
        let mut engine = CommandEngine::new(catalog);
        let mut summary = ProcessingSummary::default();

        for result in reader {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!(error = %e, "skipping malformed row");
                    summary.rejected += 1;
                    continue;
                }
            };

            let op = record.op;
            let key = record.key.clone();
            match engine.process(record) {
                Ok(CommandOutcome::Found(product)) => {
                    info!(key = %key, id = %product.id, name = %product.name, price = %product.price, "product found");
                    summary.applied += 1;
                }
                Ok(outcome) => {
                    debug!(op = op.as_str(), key = %key, ?outcome, "command applied");
                    summary.applied += 1;
                }
                Err(e) => {
                    warn!(op = op.as_str(), key = %key, error = %e, "command rejected");
                    summary.rejected += 1;
                }
            }
        }

        Ok(summary)
    }
}
