//! Error types for the product catalog
//!
//! # Error Categories
//!
//! - [`CatalogError`]: failures reported by the catalog store itself. The set is
//!   exhaustive: bad input (`InvalidData`) or a missing record (`NotFound`).
//! - [`MoneyError`]: malformed monetary input (amount or currency code).
//! - [`CommandError`]: failures of the command-file adapter (CSV parsing,
//!   unknown operations, unresolved keys) plus any store error it forwards.

use super::product::ProductId;
use thiserror::Error;

/// Result type returned by catalog store operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors reported by the catalog store
///
/// Both variants are caused by the caller and are never retried by the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Create/update fields failed validation
    #[error("invalid product data: {reason}")]
    InvalidData {
        /// What was wrong with the request
        reason: String,
    },

    /// The id does not reference a live product
    #[error("product not found: {id}")]
    NotFound {
        /// The id that was looked up
        id: ProductId,
    },
}

impl CatalogError {
    /// Create an InvalidData error
    pub fn invalid_data(reason: impl Into<String>) -> Self {
        CatalogError::InvalidData {
            reason: reason.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(id: ProductId) -> Self {
        CatalogError::NotFound { id }
    }
}

/// Errors produced while parsing monetary values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("Invalid amount '{value}'")]
    InvalidAmount { value: String },

    #[error("Invalid currency code '{code}'")]
    InvalidCurrency { code: String },
}

impl MoneyError {
    pub fn invalid_amount(value: &str) -> Self {
        MoneyError::InvalidAmount {
            value: value.to_string(),
        }
    }

    pub fn invalid_currency(code: &str) -> Self {
        MoneyError::InvalidCurrency {
            code: code.to_string(),
        }
    }
}

/// Errors raised while applying a command file to the catalog
///
/// Everything except `IoError` is recoverable: the offending row is logged
/// and skipped, and processing continues with the next one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The `op` column holds something other than create/update/delete
    #[error("Invalid operation '{op}'")]
    InvalidOperation { op: String },

    /// The `key` column is empty
    #[error("{op} command requires a key")]
    MissingKey { op: String },

    /// A create command without a price
    #[error("create command for '{key}' requires a price")]
    MissingPrice { key: String },

    /// A price was given without a currency code
    #[error("price for '{key}' requires a currency")]
    MissingCurrency { key: String },

    /// The price or currency columns could not be parsed
    #[error("Invalid price for '{key}': {source}")]
    InvalidPrice {
        key: String,
        #[source]
        source: MoneyError,
    },

    /// The key is neither a bound label nor a product id
    #[error("Unknown product key '{key}'")]
    UnknownKey { key: String },

    /// A create command reused a label that still names a live product
    #[error("Product key '{key}' is already bound to {id}")]
    DuplicateKey { key: String, id: ProductId },

    /// The catalog store rejected the command
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<std::io::Error> for CommandError {
    fn from(error: std::io::Error) -> Self {
        CommandError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for CommandError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        CommandError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl CommandError {
    pub fn invalid_operation(op: &str) -> Self {
        CommandError::InvalidOperation { op: op.to_string() }
    }

    pub fn missing_key(op: &str) -> Self {
        CommandError::MissingKey { op: op.to_string() }
    }

    pub fn missing_price(key: &str) -> Self {
        CommandError::MissingPrice {
            key: key.to_string(),
        }
    }

    pub fn missing_currency(key: &str) -> Self {
        CommandError::MissingCurrency {
            key: key.to_string(),
        }
    }

    pub fn invalid_price(key: &str, source: MoneyError) -> Self {
        CommandError::InvalidPrice {
            key: key.to_string(),
            source,
        }
    }

    pub fn unknown_key(key: &str) -> Self {
        CommandError::UnknownKey {
            key: key.to_string(),
        }
    }

    pub fn duplicate_key(key: &str, id: ProductId) -> Self {
        CommandError::DuplicateKey {
            key: key.to_string(),
            id,
        }
    }
}
