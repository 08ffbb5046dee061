//! Monetary value types for the product catalog
//!
//! A [`Money`] pairs a decimal magnitude with a [`Currency`] code and is
//! treated as an atomic value: it is compared, validated and replaced as a
//! whole. Parsing accepts any well-formed amount, including zero and negative
//! ones; deciding which amounts are acceptable for a product is the store's job.

use super::error::MoneyError;
use iso_currency::Currency as IsoCurrency;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// ISO 4217 currency code
///
/// Only codes listed in ISO 4217 are accepted; stored in upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// United States dollar
    pub fn usd() -> Self {
        Currency("USD".to_string())
    }

    /// The code as an upper-case string slice
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    /// Parse a currency code
    ///
    /// Surrounding whitespace is ignored and lower-case input is normalised,
    /// so `" usd "` parses to `USD`. Three letters that are not an ISO 4217
    /// code (`"ABC"`) are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        if IsoCurrency::from_code(&code).is_none() {
            return Err(MoneyError::invalid_currency(s));
        }
        Ok(Currency(code))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A monetary amount: magnitude plus currency
///
/// Equality compares the magnitude numerically (`3` equals `3.00`) and the
/// currency exactly. The serialized form is `{"number": "3.00", "currency": "USD"}`,
/// keeping the decimal as a string so its scale survives the round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Money {
    #[serde(rename = "number")]
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Money { amount, currency }
    }

    /// Parse an amount and a currency code into a `Money`
    ///
    /// # Arguments
    ///
    /// * `value` - Decimal amount, e.g. `"3.00"` (whitespace is trimmed; digit
    ///   separators such as `1_000` are rejected)
    /// * `currency_code` - Three-letter currency code, e.g. `"USD"`
    ///
    /// # Returns
    ///
    /// * `Ok(Money)` if both parts are well-formed
    /// * `Err(MoneyError)` describing the first malformed part
    pub fn parse(value: &str, currency_code: &str) -> Result<Self, MoneyError> {
        let trimmed = value.trim();
        // Decimal::from_str skips underscores
        if trimmed.contains('_') {
            return Err(MoneyError::invalid_amount(value));
        }
        let amount = Decimal::from_str(trimmed).map_err(|_| MoneyError::invalid_amount(value))?;
        let currency = Currency::from_str(currency_code)?;
        Ok(Money { amount, currency })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
