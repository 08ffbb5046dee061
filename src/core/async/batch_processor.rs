//! Batch processing with key-based partitioning for async command processing
//!
//! This module provides the `BatchProcessor` struct, which applies a batch of
//! commands concurrently while keeping every key's commands in file order.
//!
//! # Design
//!
//! A batch is split into one sub-batch per key. Each sub-batch runs on its own
//! tokio task and applies its commands sequentially; different keys run in
//! parallel against the shared catalog store.
//!
//! A product addressed both by its label and by its literal id lands in two
//! partitions, so those commands are not ordered relative to each other. Each
//! individual store operation is still atomic.

use std::collections::HashMap;

use tracing::error;

use super::AsyncCommandEngine;
use crate::core::CommandOutcome;
use crate::types::{CommandError, CommandRecord};

/// Result of processing a single command
///
/// Contains the original command and the outcome of applying it.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The command that was processed
    pub record: CommandRecord,

    /// The outcome (success or error)
    pub result: Result<CommandOutcome, CommandError>,
}

/// Batch processor with key-based partitioning
#[derive(Clone)]
pub struct BatchProcessor {
    /// Thread-safe command engine, cheap to clone into tasks
    engine: AsyncCommandEngine,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `engine` - The engine every task applies commands through
    pub fn new(engine: AsyncCommandEngine) -> Self {
        Self { engine }
    }

    /// Partition a batch of commands by key
    ///
    /// # Guarantees
    ///
    /// - Each command appears in exactly one sub-batch
    /// - Commands for each key keep their original order
    pub fn partition_by_key(
        &self,
        batch: Vec<CommandRecord>,
    ) -> HashMap<String, Vec<CommandRecord>> {
        let mut key_batches: HashMap<String, Vec<CommandRecord>> = HashMap::new();

        for record in batch {
            key_batches
                .entry(record.key.clone())
                .or_default()
                .push(record);
        }

        key_batches
    }

    /// Apply all commands for a single key in order
    ///
    /// Errors are captured in the results and do not stop the remaining
    /// commands.
    pub async fn process_key_commands(&self, commands: Vec<CommandRecord>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(commands.len());

        for record in commands {
            let result = self.engine.process_command(record.clone());
            results.push(ProcessingResult { record, result });
        }

        results
    }

    /// Apply a batch, running different keys concurrently
    ///
    /// Waits for every task before returning, so the next batch never overlaps
    /// with this one. Results are grouped per key; the order between keys is
    /// unspecified.
    pub async fn process_batch(&self, batch: Vec<CommandRecord>) -> Vec<ProcessingResult> {
        let key_batches = self.partition_by_key(batch);

        let mut tasks = Vec::with_capacity(key_batches.len());
        for (_key, commands) in key_batches {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_key_commands(commands).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(key_results) => results.extend(key_results),
                Err(e) => error!(error = %e, "command task panicked"),
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CatalogStore;
    use crate::types::{CommandType, Money};
    use std::sync::Arc;

    fn command(op: CommandType, key: &str, name: Option<&str>, price: Option<&str>) -> CommandRecord {
        CommandRecord {
            op,
            key: key.to_string(),
            name: name.map(str::to_string),
            price: price.map(|p| Money::parse(p, "USD").unwrap()),
        }
    }

    fn processor() -> (BatchProcessor, AsyncCommandEngine, Arc<CatalogStore>) {
        let store = Arc::new(CatalogStore::new());
        let engine = AsyncCommandEngine::new(store.clone());
        (BatchProcessor::new(engine.clone()), engine, store)
    }

    #[test]
    fn test_partition_by_key_empty_batch() {
        let (processor, _, _) = processor();
        assert!(processor.partition_by_key(vec![]).is_empty());
    }

    #[test]
    fn test_partition_by_key_keeps_order_per_key() {
        let (processor, _, _) = processor();
        let batch = vec![
            command(CommandType::Create, "a", Some("A"), Some("1")),
            command(CommandType::Create, "b", Some("B"), Some("2")),
            command(CommandType::Update, "a", Some("A2"), None),
            command(CommandType::Delete, "b", None, None),
            command(CommandType::Update, "a", None, Some("3")),
        ];

        let partitioned = processor.partition_by_key(batch);

        assert_eq!(partitioned.len(), 2);
        let a_ops: Vec<_> = partitioned["a"].iter().map(|r| r.op).collect();
        let b_ops: Vec<_> = partitioned["b"].iter().map(|r| r.op).collect();
        assert_eq!(
            a_ops,
            vec![CommandType::Create, CommandType::Update, CommandType::Update]
        );
        assert_eq!(b_ops, vec![CommandType::Create, CommandType::Delete]);
    }

    #[tokio::test]
    async fn test_process_key_commands_continues_after_error() {
        let (processor, _, store) = processor();
        let commands = vec![
            command(CommandType::Update, "a", Some("too early"), None),
            command(CommandType::Create, "a", Some("A"), Some("1")),
            command(CommandType::Update, "a", Some("A2"), None),
        ];

        let results = processor.process_key_commands(commands).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].result.is_err());
        assert!(results[1].result.is_ok());
        assert!(results[2].result.is_ok());
        assert_eq!(store.list()[0].name, "A2");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_process_batch_applies_every_key() {
        let (processor, engine, store) = processor();
        let mut batch = Vec::new();
        for i in 0..50 {
            let key = format!("item-{}", i);
            batch.push(command(CommandType::Create, &key, Some(&key), Some("2.00")));
            batch.push(command(CommandType::Update, &key, None, Some("4.00")));
        }

        let results = processor.process_batch(batch).await;

        assert_eq!(results.len(), 100);
        assert!(results.iter().all(|r| r.result.is_ok()));
        assert_eq!(store.len(), 50);
        for i in 0..50 {
            let id = engine.bound_id(&format!("item-{}", i)).unwrap();
            let product = store.get(&id).unwrap();
            assert_eq!(product.price, Money::parse("4.00", "USD").unwrap());
        }
    }

    #[tokio::test]
    async fn test_process_batch_create_and_delete_same_key() {
        let (processor, engine, store) = processor();
        let batch = vec![
            command(CommandType::Create, "temp", Some("Temp"), Some("1")),
            command(CommandType::Delete, "temp", None, None),
            command(CommandType::Create, "keep", Some("Keep"), Some("1")),
        ];

        processor.process_batch(batch).await;

        assert_eq!(engine.bound_id("temp"), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].name, "Keep");
    }
}
