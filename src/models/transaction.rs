//! Transaction model
//!
//! An expense or income record. Transactions are immutable once constructed;
//! commands that "edit" one build a replacement and swap it into the store.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::tag::Tag;
use super::value::Value;

/// Whether a transaction takes money out or brings money in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    /// The sign marker used in listings: "[-]" for expenses, "[+]" for income
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Expense => "[-]",
            Self::Income => "[+]",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

/// A single expense or income record
///
/// Equality is structural over every field. The weaker "same transaction"
/// identity used for duplicate detection compares only description and value,
/// so that clones of a transaction on other dates still count as the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    kind: TransactionKind,
    description: String,
    value: Value,
    date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remark: Option<String>,
    #[serde(default)]
    tags: BTreeSet<Tag>,
}

impl Transaction {
    /// Create a transaction, validating the description
    pub fn new(
        kind: TransactionKind,
        description: impl Into<String>,
        value: Value,
        date: NaiveDate,
        remark: Option<String>,
        tags: BTreeSet<Tag>,
    ) -> Result<Self, TransactionValidationError> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }
        let remark = remark
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        Ok(Self {
            kind,
            description,
            value,
            date,
            remark,
            tags,
        })
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// The duplicate-detection identity: same description and value
    pub fn is_same(&self, other: &Transaction) -> bool {
        self.description == other.description && self.value == other.value
    }

    /// A copy of this transaction dated `date`, everything else unchanged
    pub fn cloned_on(&self, date: NaiveDate) -> Transaction {
        Transaction { date, ..self.clone() }
    }

    /// A replacement carrying a new tag set, everything else unchanged
    pub fn replacing_tags(&self, tags: BTreeSet<Tag>) -> Transaction {
        Transaction { tags, ..self.clone() }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) Date: {}",
            self.kind.marker(),
            self.description,
            self.value,
            self.date.format("%d/%m/%Y")
        )?;
        if let Some(remark) = &self.remark {
            write!(f, " Remarks: {}", remark)?;
        }
        write!(f, " Tags: ")?;
        for tag in &self.tags {
            write!(f, "{}", tag)?;
        }
        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
