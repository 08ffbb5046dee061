//! Asynchronous batch processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. Commands are read in batches and each batch is
//! applied concurrently, one task per key.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (key partitioning + tasks)
//!     └── AsyncCommandEngine (shared key table)
//!         └── ProductRepository (the catalog store)
//! ```
//!
//! # Ordering
//!
//! - Batches are applied one after another
//! - Within a batch, each key's commands run in file order on one task
//! - Different keys run in parallel, so the catalog order of products created
//!   in the same batch is not deterministic

use crate::core::r#async::{AsyncCommandEngine, BatchProcessor};
use crate::core::{CommandOutcome, ProductRepository};
use crate::io::async_reader::AsyncReader;
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for batch processing
///
/// Controls how many commands are read per batch and the number of worker
/// threads applying them.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of commands per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values are replaced by the defaults and a warning is logged.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid worker count, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// # Configuration
///
/// - `batch_size`: Number of commands per batch (default: 1000)
/// - `max_concurrent_batches`: Number of worker threads (default: CPU cores)
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Apply the command file batch by batch on a multi-threaded runtime
    ///
    /// The runtime is created per call and shut down before returning.
    /// Opening the file or building the runtime are the only fatal errors.
    fn process(
        &self,
        catalog: Arc<dyn ProductRepository>,
        input_path: &Path,
    ) -> Result<ProcessingSummary, String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let processor = BatchProcessor::new(AsyncCommandEngine::new(catalog));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads futures::io, tokio files need the compat layer
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);
            let mut summary = ProcessingSummary::default();
            let mut batches = 0usize;

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }
                batches += 1;

                // Wait for the whole batch so a key spanning batches stays ordered
                for processed in processor.process_batch(batch).await {
                    let record = &processed.record;
                    match &processed.result {
                        Ok(CommandOutcome::Found(product)) => {
                            info!(key = %record.key, id = %product.id, name = %product.name, price = %product.price, "product found");
                            summary.applied += 1;
                        }
                        Ok(outcome) => {
                            debug!(op = record.op.as_str(), key = %record.key, ?outcome, "command applied");
                            summary.applied += 1;
                        }
                        Err(e) => {
                            warn!(op = record.op.as_str(), key = %record.key, error = %e, "command rejected");
                            summary.rejected += 1;
                        }
                    }
                }
            }

            summary.rejected += reader.skipped();
            info!(
                batches,
                applied = summary.applied,
                rejected = summary.rejected,
                "command file processed"
            );
            Ok(summary)
        })
    }
}
