//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `money`: Monetary amounts and currency codes
//! - `product`: Product records, identifiers and store requests
//! - `command`: Rows of a catalog command file
//! - `error`: Error types for the store and the command adapter

pub mod command;
pub mod error;
pub mod money;
pub mod product;

pub use command::{CommandRecord, CommandType};
pub use error::{CatalogError, CatalogResult, CommandError, MoneyError};
pub use money::{Currency, Money};
pub use product::{CreateProduct, Product, ProductId, UpdateProduct};
