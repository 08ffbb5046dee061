//! Command processing orchestration for async batch processing
//!
//! This module provides the `AsyncCommandEngine` struct, the thread-safe
//! counterpart of [`CommandEngine`](crate::core::CommandEngine). The key table
//! lives in a `DashMap` so tasks working on different keys never contend on
//! it; the catalog store provides its own readers-writer locking.
//!
//! # Architecture
//!
//! ```text
//! AsyncCommandEngine
//!     ├── Arc<dyn ProductRepository>   (shared catalog store)
//!     └── Arc<DashMap<String, ProductId>> (key table, sharded locking)
//! ```
//!
//! # Lock Ordering
//!
//! A create holds the key's map entry while it calls into the store. The store
//! never touches the key table, so the order is always entry first, catalog
//! second, and the two locks cannot deadlock.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::core::engine::{resolve_key, CommandOutcome};
use crate::core::ProductRepository;
use crate::types::{
    CommandError, CommandRecord, CommandType, CreateProduct, ProductId, UpdateProduct,
};

/// Command engine for concurrent batch processing
///
/// Cheap to clone: clones share the same catalog and key table.
#[derive(Clone)]
pub struct AsyncCommandEngine {
    /// Shared catalog store
    catalog: Arc<dyn ProductRepository>,

    /// Labels bound by create commands
    keys: Arc<DashMap<String, ProductId>>,
}

impl AsyncCommandEngine {
    /// Create a new AsyncCommandEngine
    ///
    /// # Arguments
    ///
    /// * `catalog` - The catalog store shared by every task
    ///
    /// # Returns
    ///
    /// A new engine with an empty key table
    pub fn new(catalog: Arc<dyn ProductRepository>) -> Self {
        Self {
            catalog,
            keys: Arc::new(DashMap::new()),
        }
    }

    /// Apply a single command
    ///
    /// Safe to call from many tasks at once. Commands on the same key are not
    /// ordered relative to each other unless the caller serializes them, which
    /// is what [`BatchProcessor`](super::BatchProcessor) does.
    pub fn process_command(&self, record: CommandRecord) -> Result<CommandOutcome, CommandError> {
        match record.op {
            CommandType::Create => self.process_create(record),
            CommandType::Update => self.process_update(record),
            CommandType::Delete => self.process_delete(record),
            CommandType::Get => self.process_get(record),
        }
    }

    /// The product id currently bound to `key`, if any
    pub fn bound_id(&self, key: &str) -> Option<ProductId> {
        self.keys.get(key).map(|entry| *entry.value())
    }

    fn process_create(&self, record: CommandRecord) -> Result<CommandOutcome, CommandError> {
        let CommandRecord {
            key, name, price, ..
        } = record;

        match self.keys.entry(key) {
            Entry::Occupied(entry) => Err(CommandError::duplicate_key(entry.key(), *entry.get())),
            Entry::Vacant(entry) => {
                let price = price.ok_or_else(|| CommandError::missing_price(entry.key()))?;
                let product = self.catalog.create(CreateProduct {
                    name: name.unwrap_or_default(),
                    price,
                })?;
                entry.insert(product.id);
                Ok(CommandOutcome::Created(product))
            }
        }
    }

    fn process_update(&self, record: CommandRecord) -> Result<CommandOutcome, CommandError> {
        let id = self.resolve(&record.key)?;
        let product = self.catalog.update(UpdateProduct {
            id,
            name: record.name,
            price: record.price,
        })?;

        Ok(CommandOutcome::Updated(product))
    }

    fn process_delete(&self, record: CommandRecord) -> Result<CommandOutcome, CommandError> {
        let id = self.resolve(&record.key)?;
        self.catalog.delete(&id)?;
        self.keys.retain(|_, bound| *bound != id);

        Ok(CommandOutcome::Deleted(id))
    }

    fn process_get(&self, record: CommandRecord) -> Result<CommandOutcome, CommandError> {
        let id = self.resolve(&record.key)?;
        Ok(CommandOutcome::Found(self.catalog.get(&id)?))
    }

    fn resolve(&self, key: &str) -> Result<ProductId, CommandError> {
        resolve_key(self.bound_id(key), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CatalogStore;
    use crate::types::{CatalogError, Money};
    use std::thread;

    fn usd(value: &str) -> Money {
        Money::parse(value, "USD").unwrap()
    }

    fn create(key: &str, name: &str, price: &str) -> CommandRecord {
        CommandRecord {
            op: CommandType::Create,
            key: key.to_string(),
            name: Some(name.to_string()),
            price: Some(usd(price)),
        }
    }

    fn engine() -> (AsyncCommandEngine, Arc<CatalogStore>) {
        let store = Arc::new(CatalogStore::new());
        (AsyncCommandEngine::new(store.clone()), store)
    }

    #[test]
    fn test_create_update_delete_through_key() {
        let (engine, store) = engine();

        engine.process_command(create("comb", "Comb", "3.00")).unwrap();
        let id = engine.bound_id("comb").unwrap();

        engine
            .process_command(CommandRecord {
                op: CommandType::Update,
                key: "comb".to_string(),
                name: None,
                price: Some(usd("5.00")),
            })
            .unwrap();
        assert_eq!(store.get(&id).unwrap().price, usd("5.00"));

        let found = engine
            .process_command(CommandRecord {
                op: CommandType::Get,
                key: "comb".to_string(),
                name: None,
                price: None,
            })
            .unwrap();
        assert_eq!(found, CommandOutcome::Found(store.get(&id).unwrap()));

        let outcome = engine
            .process_command(CommandRecord {
                op: CommandType::Delete,
                key: "comb".to_string(),
                name: None,
                price: None,
            })
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Deleted(id));
        assert_eq!(engine.bound_id("comb"), None);
        assert_eq!(store.get(&id), Err(CatalogError::not_found(id)));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let (engine, store) = engine();
        engine.process_command(create("comb", "Comb", "3.00")).unwrap();
        let id = engine.bound_id("comb").unwrap();

        let result = engine.process_command(create("comb", "Other", "1.00"));

        assert_eq!(result, Err(CommandError::duplicate_key("comb", id)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failed_create_leaves_key_unbound() {
        let (engine, store) = engine();

        let result = engine.process_command(create("comb", "Comb", "-3.00"));

        assert!(matches!(
            result,
            Err(CommandError::Catalog(CatalogError::InvalidData { .. }))
        ));
        assert_eq!(engine.bound_id("comb"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_creates_on_distinct_keys() {
        let (engine, store) = engine();

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let engine = engine.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let key = format!("w{}-{}", worker, i);
                        engine
                            .process_command(create(&key, &key, "1.50"))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 200);
        for worker in 0..8 {
            for i in 0..25 {
                let key = format!("w{}-{}", worker, i);
                let id = engine.bound_id(&key).unwrap();
                assert_eq!(store.get(&id).unwrap().name, key);
            }
        }
    }

    #[test]
    fn test_concurrent_creates_on_same_key_bind_once() {
        let (engine, store) = engine();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                thread::spawn(move || engine.process_command(create("comb", "Comb", "3.00")))
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(Result::is_ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }
}
