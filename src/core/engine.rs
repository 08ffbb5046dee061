//! Command processing orchestration
//!
//! This module provides the `CommandEngine`, which applies parsed command rows
//! to a catalog through the [`ProductRepository`] trait.
//!
//! The engine keeps a table of caller-chosen keys bound to product ids:
//! - `create` binds the row's key to the id the store generated
//! - `update`, `delete` and `get` resolve the key through that table, falling
//!   back to parsing the key as a literal product id
//! - `delete` releases the key again
//!
//! Validation of names and prices is left to the store; the engine only checks
//! what the store cannot see (a create without a price, unknown keys, keys
//! that are already taken).

use super::traits::ProductRepository;
use crate::types::{
    CommandError, CommandRecord, CommandType, CreateProduct, Product, ProductId, UpdateProduct,
};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

/// Outcome of one successfully applied command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Created(Product),
    Updated(Product),
    Deleted(ProductId),
    Found(Product),
}

/// Single-threaded command engine
///
/// Owns the key table in a plain `HashMap`; the catalog itself is shared and
/// may be read by other threads while the engine runs.
pub struct CommandEngine {
    catalog: Arc<dyn ProductRepository>,
    keys: HashMap<String, ProductId>,
}

impl CommandEngine {
    /// Create an engine operating on `catalog`
    ///
    /// # Arguments
    ///
    /// * `catalog` - The catalog store to apply commands to
    ///
    /// # Returns
    ///
    /// A new engine with no keys bound
    pub fn new(catalog: Arc<dyn ProductRepository>) -> Self {
        CommandEngine {
            catalog,
            keys: HashMap::new(),
        }
    }

    /// Apply a single command
    ///
    /// # Returns
    ///
    /// * `Ok(CommandOutcome)` describing the change
    /// * `Err(CommandError)` if the command was rejected; the catalog and the
    ///   key table are left unchanged
    pub fn process(&mut self, record: CommandRecord) -> Result<CommandOutcome, CommandError> {
        match record.op {
            CommandType::Create => self.process_create(record),
            CommandType::Update => self.process_update(record),
            CommandType::Delete => self.process_delete(record),
            CommandType::Get => self.process_get(record),
        }
    }

    /// The product id currently bound to `key`, if any
    pub fn bound_id(&self, key: &str) -> Option<ProductId> {
        self.keys.get(key).copied()
    }

    fn process_create(&mut self, record: CommandRecord) -> Result<CommandOutcome, CommandError> {
        if let Some(id) = self.keys.get(&record.key) {
            return Err(CommandError::duplicate_key(&record.key, *id));
        }
        let price = record
            .price
            .ok_or_else(|| CommandError::missing_price(&record.key))?;

        let product = self.catalog.create(CreateProduct {
            name: record.name.unwrap_or_default(),
            price,
        })?;
        self.keys.insert(record.key, product.id);

        Ok(CommandOutcome::Created(product))
    }

    fn process_update(&mut self, record: CommandRecord) -> Result<CommandOutcome, CommandError> {
        let id = self.resolve(&record.key)?;
        let product = self.catalog.update(UpdateProduct {
            id,
            name: record.name,
            price: record.price,
        })?;

        Ok(CommandOutcome::Updated(product))
    }

    fn process_delete(&mut self, record: CommandRecord) -> Result<CommandOutcome, CommandError> {
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
        resolve_key(self.keys.get(key).copied(), key)
    }
}

/// Resolve a key to a product id: a bound label wins, otherwise the key must
/// parse as an id
pub(crate) fn resolve_key(bound: Option<ProductId>, key: &str) -> Result<ProductId, CommandError> {
    match bound {
        Some(id) => Ok(id),
        None => ProductId::from_str(key).map_err(|_| CommandError::unknown_key(key)),
    }
}
