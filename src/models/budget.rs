//! Monthly budget model
//!
//! A budget assigns a positive value to one calendar month; the budget book
//! keeps at most one entry per month.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::value::Value;

/// A calendar month, the key a budget is stored under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthYear {
    year: i32,
    month: u32,
}

impl MonthYear {
    /// Create a month/year pair, validating the month
    pub fn new(month: u32, year: i32) -> Result<Self, MonthYearError> {
        if !(1..=12).contains(&month) {
            return Err(MonthYearError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current calendar month
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Whether the given date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Error type for month/year construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthYearError {
    InvalidMonth(u32),
}

impl fmt::Display for MonthYearError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthYearError::InvalidMonth(m) => {
                write!(f, "Month must be between 1 and 12, got: {}", m)
            }
        }
    }
}

impl std::error::Error for MonthYearError {}

/// A budget for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    period: MonthYear,
    value: Value,
}

impl Budget {
    pub fn new(period: MonthYear, value: Value) -> Self {
        Self { period, value }
    }

    pub fn period(&self) -> MonthYear {
        self.period
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}", self.value, self.period)
    }
}
