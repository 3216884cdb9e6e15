//! Recurrence specification used when cloning transactions
//!
//! An occurrence pairs a calendar frequency with a repeat count and expands
//! into the date series the clones are stamped with.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// How far apart the generated dates are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// No recurrence; a single clone dated today
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// The date `steps` periods after `anchor`
    ///
    /// Month and year offsets clamp to the end of shorter months, so
    /// Jan 31 + 1 month is Feb 28 (or 29).
    pub fn offset_from(&self, anchor: NaiveDate, steps: u32) -> NaiveDate {
        match self {
            Self::None => anchor,
            Self::Daily => anchor + Duration::days(i64::from(steps)),
            Self::Weekly => anchor + Duration::days(7 * i64::from(steps)),
            Self::Monthly => anchor
                .checked_add_months(Months::new(steps))
                .unwrap_or(anchor),
            Self::Yearly => anchor
                .checked_add_months(Months::new(12 * steps))
                .unwrap_or(anchor),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!(
                "Unknown frequency '{}', expected one of: none, daily, weekly, monthly, yearly",
                other
            )),
        }
    }
}

/// A recurrence specification: frequency plus repeat count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Occurrence {
    pub frequency: Frequency,
    pub count: u32,
}

impl Occurrence {
    pub fn new(frequency: Frequency, count: u32) -> Self {
        Self { frequency, count }
    }

    /// The no-recurrence occurrence: one clone, dated today
    pub fn once() -> Self {
        Self::default()
    }

    /// Whether this occurrence produces a single clone dated today
    pub fn is_single(&self) -> bool {
        self.count == 0 || self.frequency == Frequency::None
    }

    /// The number of clones this occurrence generates
    pub fn clone_count(&self) -> usize {
        if self.is_single() {
            1
        } else {
            self.count as usize
        }
    }

    /// Expand into the date series the clones carry
    ///
    /// A single occurrence yields `[today]`; otherwise the series is
    /// anchor + i*frequency for i in 1..=count, in increasing i order.
    pub fn dates(&self, anchor: NaiveDate, today: NaiveDate) -> Vec<NaiveDate> {
        if self.is_single() {
            return vec![today];
        }
        (1..=self.count)
            .map(|i| self.frequency.offset_from(anchor, i))
            .collect()
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "for today")
        } else {
            write!(f, "{} {} times", self.frequency, self.count)
        }
    }
}
