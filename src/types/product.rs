//! Product-related types for the catalog
//!
//! This module defines the product record held by the catalog store, its
//! identifier, and the request types accepted by create and update.

use super::money::Money;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Product identifier
///
/// An opaque, randomly generated token. Callers pick the external
/// representation through `Display`/`FromStr` (the hyphenated UUID form).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generate a fresh random identifier
    pub fn random() -> Self {
        ProductId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ProductId {
    fn from(value: Uuid) -> Self {
        ProductId(value)
    }
}

impl FromStr for ProductId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s.trim()).map(ProductId)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A catalog entry
///
/// Records handed out by the store are clones; mutating one never affects
/// the catalog. Serializes with the field names `id`, `name`, `price`,
/// `created_at` and `updated_at` (RFC 3339, UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Unique, immutable identifier assigned at creation
    pub id: ProductId,

    /// Display name, never empty for a stored product
    pub name: String,

    /// Price, always strictly positive for a stored product
    pub price: Money,

    /// Set once when the product is created
    pub created_at: DateTime<Utc>,

    /// Refreshed on every successful update; never earlier than `created_at`
    pub updated_at: DateTime<Utc>,
}

/// Request to add a product to the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProduct {
    /// Must be non-empty
    pub name: String,

    /// Must be strictly positive
    pub price: Money,
}

impl CreateProduct {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        CreateProduct {
            name: name.into(),
            price,
        }
    }
}

/// Request to change an existing product
///
/// A `name` that is `None` or empty leaves the name unchanged. A `price` only
/// counts as provided when it is strictly positive; zero or negative prices
/// are treated the same as `None`. At least one field must be provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProduct {
    pub id: ProductId,
    pub name: Option<String>,
    pub price: Option<Money>,
}

impl UpdateProduct {
    /// An update for `id` that changes nothing yet
    pub fn new(id: ProductId) -> Self {
        UpdateProduct {
            id,
            name: None,
            price: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    /// The new name, if a non-empty one was supplied
    pub fn effective_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// The new price, if a strictly positive one was supplied
    pub fn effective_price(&self) -> Option<&Money> {
        self.price.as_ref().filter(|price| price.is_positive())
    }
}
