//! Filter predicates over the transaction store
//!
//! The displayed list is a pure projection: the active filter is re-applied
//! to the store on every read, never cached across mutations.

use crate::models::{MonthYear, Transaction};

/// The active restriction on the displayed transaction list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransactionFilter {
    /// Show everything
    #[default]
    All,
    /// Show transactions dated in one calendar month
    Month(MonthYear),
    /// Show transactions whose description contains any of the keywords,
    /// matched per word, case-insensitively
    Keywords(Vec<String>),
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Month(period) => period.contains(transaction.date()),
            Self::Keywords(keywords) => transaction
                .description()
                .split_whitespace()
                .any(|word| keywords.iter().any(|k| word.eq_ignore_ascii_case(k))),
        }
    }
}
