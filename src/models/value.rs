//! Monetary value of a transaction: amount plus currency
//!
//! A `Value` is immutable once constructed and construction is where the
//! invariants live: the amount is positive, below one billion units, and the
//! currency is one the rate table knows.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::currency::{Currency, CurrencyTable};
use super::money::Money;

/// Upper bound on a single transaction value, exclusive (one billion units)
const MAX_CENTS: i64 = 1_000_000_000 * 100;

/// A positive monetary amount in a supported currency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Value {
    amount: Money,
    currency: Currency,
}

impl Value {
    /// Create a value, enforcing the amount and currency invariants
    pub fn new(
        amount: Money,
        currency: Currency,
        table: &CurrencyTable,
    ) -> Result<Self, ValueError> {
        if !amount.is_positive() {
            return Err(ValueError::NotPositive(amount));
        }
        if amount.cents() >= MAX_CENTS {
            return Err(ValueError::TooLarge(amount));
        }
        if !table.supports(&currency) {
            return Err(ValueError::UnsupportedCurrency(currency.code().to_string()));
        }
        Ok(Self { amount, currency })
    }

    /// Create a value in the table's reference currency
    pub fn in_reference_currency(amount: Money, table: &CurrencyTable) -> Result<Self, ValueError> {
        Self::new(amount, table.reference().clone(), table)
    }

    /// The amount in this value's own currency
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// The currency of the amount
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// The amount converted into the table's reference currency
    ///
    /// Used for aggregation, so that balances over mixed-currency
    /// transactions are computed in one denomination.
    pub fn monetary_amount(&self, table: &CurrencyTable) -> Money {
        table.to_reference(self.amount, &self.currency)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount.format_grouped(), self.currency)
    }
}

/// Construction errors for values
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    NotPositive(Money),
    TooLarge(Money),
    UnsupportedCurrency(String),
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::NotPositive(m) => {
                write!(f, "Value must be a positive amount, got: {}", m)
            }
            ValueError::TooLarge(m) => {
                write!(f, "Value must be less than 1 billion, got: {}", m)
            }
            ValueError::UnsupportedCurrency(code) => {
                write!(f, "Unsupported currency: {}", code)
            }
        }
    }
}

impl std::error::Error for ValueError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CurrencyTable {
        CurrencyTable::seeded()
    }

    #[test]
    fn test_new_valid() {
        let v = Value::new(Money::from_cents(450), Currency::new("SGD"), &table()).unwrap();
        assert_eq!(v.amount(), Money::from_cents(450));
        assert_eq!(v.currency().code(), "SGD");
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert_eq!(
            Value::new(Money::zero(), Currency::new("SGD"), &table()),
            Err(ValueError::NotPositive(Money::zero()))
        );
        assert!(matches!(
            Value::new(Money::from_cents(-100), Currency::new("SGD"), &table()),
            Err(ValueError::NotPositive(_))
        ));
    }

    #[test]
    fn test_rejects_one_billion_and_above() {
        let billion = Money::from_units(1_000_000_000);
        assert_eq!(
            Value::new(billion, Currency::new("SGD"), &table()),
            Err(ValueError::TooLarge(billion))
        );
        // just under the limit is fine
        let just_under = Money::from_cents(billion.cents() - 1);
        assert!(Value::new(just_under, Currency::new("SGD"), &table()).is_ok());
    }

    #[test]
    fn test_rejects_unknown_currency() {
        assert_eq!(
            Value::new(Money::from_cents(100), Currency::new("JPY"), &table()),
            Err(ValueError::UnsupportedCurrency("JPY".to_string()))
        );
    }

    #[test]
    fn test_monetary_amount_converts_to_reference() {
        let v = Value::new(Money::from_units(100), Currency::new("USD"), &table()).unwrap();
        assert_eq!(v.monetary_amount(&table()), Money::from_cents(13699));

        let ref_v = Value::in_reference_currency(Money::from_units(5), &table()).unwrap();
        assert_eq!(ref_v.monetary_amount(&table()), Money::from_units(5));
    }

    #[test]
    fn test_display() {
        let v = Value::new(Money::from_cents(303000), Currency::new("MYR"), &table()).unwrap();
        assert_eq!(v.to_string(), "3,030.00 MYR");
    }

    #[test]
    fn test_equality_is_structural() {
        let a = Value::new(Money::from_cents(450), Currency::new("SGD"), &table()).unwrap();
        let b = Value::new(Money::from_cents(450), Currency::new("SGD"), &table()).unwrap();
        let c = Value::new(Money::from_cents(450), Currency::new("USD"), &table()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
