//! JSON output for the catalog
//!
//! Emits the catalog as a JSON array using the products' serde shape:
//! `id`, `name`, `price` (`number` + `currency`), `created_at`, `updated_at`.

use crate::types::Product;
use std::io::Write;

/// Write the catalog as a pretty-printed JSON array followed by a newline
pub fn write_products_json(products: &[Product], output: &mut dyn Write) -> Result<(), String> {
    serde_json::to_writer_pretty(&mut *output, products)
        .map_err(|e| format!("Failed to write JSON output: {}", e))?;
    writeln!(output).map_err(|e| format!("Failed to write JSON output: {}", e))?;
    output
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))
}
