//! Core business logic module
//!
//! This module contains the catalog and the components that drive it:
//! - `traits` - The `ProductRepository` abstraction adapters depend on
//! - `catalog_store` - The concurrency-safe in-memory catalog
//! - `clock` - Time source for product timestamps
//! - `engine` - Sequential command processing
//! - `async` - Concurrent command processing

pub mod r#async;
pub mod catalog_store;
pub mod clock;
pub mod engine;
pub mod traits;

pub use catalog_store::CatalogStore;
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{CommandEngine, CommandOutcome};
pub use r#async::{AsyncCommandEngine, BatchProcessor};
pub use traits::ProductRepository;
