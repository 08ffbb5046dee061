//! I/O module
//!
//! Handles command-file parsing and catalog output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `json_format` - JSON output serialization
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod json_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, write_products_csv, CsvRecord};
pub use json_format::write_products_json;
pub use sync_reader::SyncReader;

use crate::cli::OutputFormat;
use crate::types::Product;
use std::io::Write;

/// Write the catalog in the requested format
pub fn write_products(
    products: &[Product],
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<(), String> {
    match format {
        OutputFormat::Csv => write_products_csv(products, output),
        OutputFormat::Json => write_products_json(products, output),
    }
}
