//! Product Catalog Library
//! # Overview
//!
//! This library provides a concurrency-safe, in-memory product catalog and a
//! CSV command-file driver for it, with both a sync and an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Product, Money, commands, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::catalog_store`] - The shared product catalog
//!   - [`core::engine`] - Command processing orchestration
//!   - `core::async` - Concurrent command processing
//! - [`io`] - Command-file reading and catalog output
//! - [`strategy`] - Pluggable processing strategies
//! - [`logging`] - Tracing subscriber setup
//!
//! # Catalog Operations
//!
//! - **List**: snapshot of all products in creation order
//! - **Get**: one product by id
//! - **Create**: validate, assign a fresh id and timestamps, append
//! - **Update**: apply a non-empty name and/or a positive price
//! - **Delete**: remove, keeping the order of the remaining products
//!
//! Every operation is atomic with respect to every other; readers never see a
//! partially written product.

pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{CatalogStore, CommandEngine, ProductRepository};
pub use io::{write_products_csv, write_products_json};
pub use types::{
    CatalogError, CatalogResult, CommandError, CommandRecord, CommandType, CreateProduct,
    Currency, Money, Product, ProductId, UpdateProduct,
};
