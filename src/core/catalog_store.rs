//! Catalog store module
//!
//! This module provides [`CatalogStore`], the authoritative in-memory set of
//! products. It is the only component that owns product state; everything
//! else receives clones.
//!
//! # Concurrency
//!
//! The catalog sits behind a single readers-writer lock:
//! - `list` and `get` take the shared lock and may run in parallel
//! - `create`, `update` and `delete` take the exclusive lock
//!
//! Guards are scoped to each call, so the lock is released on every exit path,
//! including validation and not-found errors. Each write becomes visible to all
//! later readers as a whole; no reader can observe a half-initialised record.
//!
//! # Ordering
//!
//! Products are kept in a vector in creation order. An id → position index
//! gives constant-time lookups; deletes shift the tail of the vector and
//! re-index the shifted entries, so `list` order is never disturbed.

use super::clock::{Clock, SystemClock};
use super::traits::ProductRepository;
use crate::types::{
    CatalogError, CatalogResult, CreateProduct, Currency, Money, Product, ProductId,
    UpdateProduct,
};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Products in creation order plus an index by id
#[derive(Debug, Default)]
struct Catalog {
    products: Vec<Product>,
    positions: HashMap<ProductId, usize>,
}

impl Catalog {
    fn position(&self, id: &ProductId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    fn contains(&self, id: &ProductId) -> bool {
        self.positions.contains_key(id)
    }

    fn push(&mut self, product: Product) {
        self.positions.insert(product.id, self.products.len());
        self.products.push(product);
    }

    fn remove(&mut self, index: usize) -> Product {
        let removed = self.products.remove(index);
        self.positions.remove(&removed.id);
        for (position, product) in self.products.iter().enumerate().skip(index) {
            self.positions.insert(product.id, position);
        }
        removed
    }
}

/// Concurrency-safe, in-memory product catalog
///
/// Construct one explicitly and share it (usually through `Arc`) with every
/// caller that needs it. The clock type parameter defaults to wall-clock time.
///
/// # Examples
///
/// ```
/// use product_catalog::core::CatalogStore;
/// use product_catalog::types::{CreateProduct, Money};
///
/// let store = CatalogStore::new();
/// let price = Money::parse("3.00", "USD").unwrap();
/// let comb = store.create(CreateProduct::new("Comb", price)).unwrap();
///
/// assert_eq!(store.get(&comb.id).unwrap().name, "Comb");
/// assert_eq!(store.list().len(), 1);
/// ```
#[derive(Debug)]
pub struct CatalogStore<C = SystemClock> {
    catalog: RwLock<Catalog>,
    clock: C,
}

impl CatalogStore {
    /// Create an empty store using the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create a store pre-populated with a few sample products
    ///
    /// Seeds Comb (3 USD), Toothbrush (2 USD) and Shampoo (5 USD), each with a
    /// fresh id and all stamped with the same creation time.
    pub fn seeded() -> Self {
        Self::seeded_with_clock(SystemClock)
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample catalog: name and price in whole US dollars
const SEED_PRODUCTS: [(&str, i64); 3] = [("Comb", 3), ("Toothbrush", 2), ("Shampoo", 5)];

impl<C: Clock> CatalogStore<C> {
    /// Create an empty store driven by `clock`
    pub fn with_clock(clock: C) -> Self {
        Self {
            catalog: RwLock::new(Catalog::default()),
            clock,
        }
    }

    /// Like [`CatalogStore::seeded`], with an explicit clock
    pub fn seeded_with_clock(clock: C) -> Self {
        let store = Self::with_clock(clock);
        let now = store.clock.now();
        {
            let mut catalog = store.catalog.write();
            for (name, dollars) in SEED_PRODUCTS {
                let id = fresh_id(&catalog);
                catalog.push(Product {
                    id,
                    name: name.to_string(),
                    price: Money::new(Decimal::new(dollars, 0), Currency::usd()),
                    created_at: now,
                    updated_at: now,
                });
            }
        }
        store
    }

    /// Number of live products
    pub fn len(&self) -> usize {
        self.catalog.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all products in creation order
    ///
    /// The returned vector is a copy; later mutations do not affect it.
    pub fn list(&self) -> Vec<Product> {
        self.catalog.read().products.clone()
    }

    /// Look up a product by id
    ///
    /// # Errors
    ///
    /// `CatalogError::NotFound` when no live product has this id.
    pub fn get(&self, id: &ProductId) -> CatalogResult<Product> {
        let catalog = self.catalog.read();
        catalog
            .position(id)
            .map(|index| catalog.products[index].clone())
            .ok_or_else(|| CatalogError::not_found(*id))
    }

    /// Validate and append a new product
    ///
    /// The id is generated while the exclusive lock is held, so it is checked
    /// against every live id and is not observable before the record is.
    /// `created_at` and `updated_at` are both set to the current time.
    ///
    /// # Errors
    ///
    /// `CatalogError::InvalidData` when the name is empty or the price is zero
    /// or negative. Nothing is stored in that case.
    pub fn create(&self, request: CreateProduct) -> CatalogResult<Product> {
        let CreateProduct { name, price } = request;
        if name.is_empty() {
            return Err(CatalogError::invalid_data("name must not be empty"));
        }
        if !price.is_positive() {
            return Err(CatalogError::invalid_data(format!(
                "price must be positive, got {}",
                price
            )));
        }

        let mut catalog = self.catalog.write();
        let now = self.clock.now();
        let product = Product {
            id: fresh_id(&catalog),
            name,
            price,
            created_at: now,
            updated_at: now,
        };
        catalog.push(product.clone());
        Ok(product)
    }

    /// Apply a partial update to an existing product
    ///
    /// Only a non-empty name and a strictly positive price are applied; other
    /// values mean "no change". `updated_at` is refreshed whichever fields
    /// changed and never moves backwards, even if the clock does.
    ///
    /// # Errors
    ///
    /// - `CatalogError::InvalidData` when neither a name nor a positive price
    ///   is supplied (checked before the lookup)
    /// - `CatalogError::NotFound` when the id is not live
    pub fn update(&self, request: UpdateProduct) -> CatalogResult<Product> {
        let name = request.effective_name().map(str::to_string);
        let price = request.effective_price().cloned();
        if name.is_none() && price.is_none() {
            return Err(CatalogError::invalid_data(
                "update requires a name or a positive price",
            ));
        }

        let mut catalog = self.catalog.write();
        let index = catalog
            .position(&request.id)
            .ok_or_else(|| CatalogError::not_found(request.id))?;
        let now = self.clock.now();

        let product = &mut catalog.products[index];
        if let Some(name) = name {
            product.name = name;
        }
        if let Some(price) = price {
            product.price = price;
        }
        product.updated_at = now.max(product.updated_at);
        Ok(product.clone())
    }

    /// Remove a product, keeping the order of the rest
    ///
    /// # Errors
    ///
    /// `CatalogError::NotFound` when the id is not live.
    pub fn delete(&self, id: &ProductId) -> CatalogResult<()> {
        let mut catalog = self.catalog.write();
        let index = catalog
            .position(id)
            .ok_or_else(|| CatalogError::not_found(*id))?;
        catalog.remove(index);
        Ok(())
    }
}

impl<C: Clock> ProductRepository for CatalogStore<C> {
    fn list(&self) -> Vec<Product> {
        CatalogStore::list(self)
    }

    fn get(&self, id: &ProductId) -> CatalogResult<Product> {
        CatalogStore::get(self, id)
    }

    fn create(&self, request: CreateProduct) -> CatalogResult<Product> {
        CatalogStore::create(self, request)
    }

    fn update(&self, request: UpdateProduct) -> CatalogResult<Product> {
        CatalogStore::update(self, request)
    }

    fn delete(&self, id: &ProductId) -> CatalogResult<()> {
        CatalogStore::delete(self, id)
    }
}

/// Draw random ids until one is not live
fn fresh_id(catalog: &Catalog) -> ProductId {
    loop {
        let id = ProductId::random();
        if !catalog.contains(&id) {
            return id;
        }
    }
}
