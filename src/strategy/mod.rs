//! Processing strategy module for command files
//!
//! This module defines the Strategy pattern for applying a command file to a
//! catalog, covering both CSV parsing and command processing. This allows the
//! sequential and the concurrent implementation to be selected at runtime.

use crate::cli::StrategyType;
use crate::core::ProductRepository;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Counts of what happened to the rows of a command file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Commands that succeeded, lookups included
    pub applied: usize,
    /// Rows that failed to parse or were rejected by the engine
    pub rejected: usize,
}

/// Processing strategy trait for command files
///
/// A strategy reads every row of the input file and applies it to the given
/// catalog. Writing the resulting catalog is left to the caller.
pub trait ProcessingStrategy: Send + Sync {
    /// Apply the commands in `input_path` to `catalog`
    ///
    /// # Returns
    ///
    /// * `Ok(ProcessingSummary)` once every row has been handled
    /// * `Err(String)` if a fatal error occurred (file not found, runtime
    ///   could not be started)
    ///
    /// Individual rows that fail are logged and counted in the summary; they
    /// never abort processing.
    fn process(
        &self,
        catalog: Arc<dyn ProductRepository>,
        input_path: &Path,
    ) -> Result<ProcessingSummary, String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
