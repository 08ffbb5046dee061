//! Asynchronous implementations of core components
//!
//! This module provides the concurrent command-processing pipeline:
//!
//! - **AsyncCommandEngine**: Thread-safe command engine with a DashMap key table
//! - **BatchProcessor**: Partitions batches by key and runs keys in parallel
//!
//! Both share one catalog store, whose readers-writer lock keeps every
//! individual operation atomic.

pub mod batch_processor;
pub mod engine;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use engine::AsyncCommandEngine;
