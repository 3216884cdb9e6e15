//! Core data models for tally-cli
//!
//! This module contains the data structures that represent the tracking
//! domain: monetary values, transactions, tags, budgets, and recurrence.

pub mod budget;
pub mod currency;
pub mod money;
pub mod occurrence;
pub mod tag;
pub mod transaction;
pub mod value;

pub use budget::{Budget, MonthYear, MonthYearError};
pub use currency::{Currency, CurrencyTable};
pub use money::{Money, MoneyParseError};
pub use occurrence::{Frequency, Occurrence};
pub use tag::{Tag, TagParseError};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
pub use value::{Value, ValueError};
