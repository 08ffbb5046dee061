//! Catalog command types
//!
//! A command file drives the catalog store one row at a time. Each row names
//! an operation, a caller-chosen key identifying the product, and whichever
//! product fields the operation needs.

use super::money::Money;
use serde::{Deserialize, Serialize};

/// Operations supported in a command file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    /// Add a product and bind its key to the new id
    ///
    /// Requires a price; the name is validated by the store.
    Create,

    /// Change the name and/or price of the product behind the key
    Update,

    /// Remove the product behind the key and release the key
    Delete,

    /// Look up the product behind the key without changing it
    Get,
}

impl CommandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Create => "create",
            CommandType::Update => "update",
            CommandType::Delete => "delete",
            CommandType::Get => "get",
        }
    }
}

/// A parsed command row
///
/// `key` is either a label bound by an earlier create in the same run or the
/// textual form of a product id.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRecord {
    /// The operation to perform
    pub op: CommandType,

    /// Product key (label or id)
    pub key: String,

    /// New or initial product name, `None` when the column was empty
    pub name: Option<String>,

    /// New or initial price, `None` when the column was empty
    pub price: Option<Money>,
}
