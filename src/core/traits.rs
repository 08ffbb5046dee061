//! Core trait for catalog access
//!
//! Adapters (the command engines, and any request layer built on top of this
//! crate) talk to the catalog through [`ProductRepository`] so they can be
//! handed an explicitly constructed store instead of reaching for a global.

use crate::types::{CatalogResult, CreateProduct, Product, ProductId, UpdateProduct};
use std::sync::Arc;

/// Concurrent CRUD access to a product catalog
///
/// Every method takes `&self`: implementations synchronize internally and
/// are shared between callers through `Arc`.
pub trait ProductRepository: Send + Sync {
    /// Snapshot of all products in creation order
    fn list(&self) -> Vec<Product>;

    /// Look up a single product
    fn get(&self, id: &ProductId) -> CatalogResult<Product>;

    /// Validate and store a new product, returning the stored record
    fn create(&self, request: CreateProduct) -> CatalogResult<Product>;

    /// Apply a partial update, returning the updated record
    fn update(&self, request: UpdateProduct) -> CatalogResult<Product>;

    /// Remove a product
    fn delete(&self, id: &ProductId) -> CatalogResult<()>;
}

impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    fn list(&self) -> Vec<Product> {
        (**self).list()
    }

    fn get(&self, id: &ProductId) -> CatalogResult<Product> {
        (**self).get(id)
    }

    fn create(&self, request: CreateProduct) -> CatalogResult<Product> {
        (**self).create(request)
    }

    fn update(&self, request: UpdateProduct) -> CatalogResult<Product> {
        (**self).update(request)
    }

    fn delete(&self, id: &ProductId) -> CatalogResult<()> {
        (**self).delete(id)
    }
}
