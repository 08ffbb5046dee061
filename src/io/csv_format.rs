//! CSV format handling for command rows and catalog output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - Catalog output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{CommandError, CommandRecord, CommandType, Money, Product};
use chrono::SecondsFormat;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: op, key, name, price, currency.
/// `op` is one of create, update, delete or get.
/// Every column except `op` and `key` may be empty.
#[derive(Debug, serde::Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    pub key: String,
    pub name: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
}

/// Convert a CsvRecord to a CommandRecord
///
/// This function:
/// - Parses the operation name (case-insensitive)
/// - Requires a non-empty key
/// - Treats empty name/price/currency columns as absent
/// - Parses price and currency into a `Money`. A create needs a currency
///   with its price; an update ignores a price given without a currency,
///   so its name still applies. A currency without a price is ignored.
///
/// Whether a name or price is acceptable for the product is decided later by
/// the catalog store.
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<CommandRecord, CommandError> {
    let op = match csv_record.op.trim().to_lowercase().as_str() {
        "create" => CommandType::Create,
        "update" => CommandType::Update,
        "delete" => CommandType::Delete,
        "get" => CommandType::Get,
        _ => return Err(CommandError::invalid_operation(&csv_record.op)),
    };

    let key = csv_record.key.trim().to_string();
    if key.is_empty() {
        return Err(CommandError::missing_key(op.as_str()));
    }

    let name = non_empty(csv_record.name);
    let price = match (non_empty(csv_record.price), non_empty(csv_record.currency)) {
        (Some(amount), Some(currency)) => Some(
            Money::parse(&amount, &currency)
                .map_err(|e| CommandError::invalid_price(&key, e))?,
        ),
        (Some(_), None) if op == CommandType::Create => {
            return Err(CommandError::missing_currency(&key))
        }
        (Some(_), None) | (None, _) => None,
    };

    Ok(CommandRecord {
        op,
        key,
        name,
        price,
    })
}

fn non_empty(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Write the catalog in CSV format
///
/// Writes products in the order given (the catalog's creation order) with
/// columns: id, name, price, currency, created_at, updated_at. Timestamps are
/// RFC 3339 in UTC.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_products_csv(products: &[Product], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "name", "price", "currency", "created_at", "updated_at"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for product in products {
        writer
            .write_record(&[
                product.id.to_string(),
                product.name.clone(),
                product.price.amount().to_string(),
                product.price.currency().to_string(),
                product
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::AutoSi, true),
                product
                    .updated_at
                    .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ])
            .map_err(|e| format!("Failed to write product record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
