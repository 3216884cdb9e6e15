//! Currency codes and the exchange rate table
//!
//! Rates are expressed relative to a single reference currency (rate 1.0).
//! The table is built once at startup and passed by reference to anything
//! that needs to convert; there is no global rate state.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::money::Money;

/// An uppercase currency code, e.g. "SGD"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Create a currency code, normalizing to uppercase
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    /// Get the code as a string slice
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exchange rates keyed by currency code, relative to a reference currency
///
/// A code missing from the table resolves to the identity rate 1.0, so an
/// unknown currency passes through conversion unchanged.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    reference: Currency,
    rates: HashMap<Currency, f64>,
}

impl CurrencyTable {
    /// The reference currency of the default seed table
    pub const DEFAULT_REFERENCE: &'static str = "SGD";

    /// Create a table from explicit rates
    ///
    /// The reference currency is always present with rate 1.0, whatever the
    /// supplied map says.
    pub fn new(reference: Currency, mut rates: HashMap<Currency, f64>) -> Self {
        rates.insert(reference.clone(), 1.0);
        Self { reference, rates }
    }

    /// The built-in seed table: SGD (reference), MYR, USD, EUR
    pub fn seeded() -> Self {
        let mut rates = HashMap::new();
        rates.insert(Currency::new("SGD"), 1.0);
        rates.insert(Currency::new("MYR"), 3.03);
        rates.insert(Currency::new("USD"), 0.73);
        rates.insert(Currency::new("EUR"), 0.66);
        Self {
            reference: Currency::new(Self::DEFAULT_REFERENCE),
            rates,
        }
    }

    /// The reference currency (rate 1.0)
    pub fn reference(&self) -> &Currency {
        &self.reference
    }

    /// Whether the given currency has a known rate
    pub fn supports(&self, currency: &Currency) -> bool {
        self.rates.contains_key(currency)
    }

    /// The supported currency codes, sorted
    pub fn supported_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(Currency::code).collect();
        codes.sort_unstable();
        codes
    }

    /// Every (currency, rate) pair in the table
    pub fn rates(&self) -> impl Iterator<Item = (&Currency, f64)> {
        self.rates.iter().map(|(c, r)| (c, *r))
    }

    fn rate_or_identity(&self, currency: &Currency) -> f64 {
        self.rates.get(currency).copied().unwrap_or(1.0)
    }

    /// Convert an amount into the reference currency
    pub fn to_reference(&self, amount: Money, from: &Currency) -> Money {
        round_cents(amount.cents() as f64 / self.rate_or_identity(from))
    }

    /// Convert an amount out of the reference currency
    pub fn from_reference(&self, amount: Money, to: &Currency) -> Money {
        round_cents(amount.cents() as f64 * self.rate_or_identity(to))
    }

    /// Convert an amount between two currencies via the reference currency
    pub fn convert(&self, amount: Money, from: &Currency, to: &Currency) -> Money {
        let in_reference = amount.cents() as f64 / self.rate_or_identity(from);
        round_cents(in_reference * self.rate_or_identity(to))
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::seeded()
    }
}

fn round_cents(cents: f64) -> Money {
    Money::from_cents(cents.round() as i64)
}
