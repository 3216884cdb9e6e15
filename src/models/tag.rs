//! Tag labels for transactions
//!
//! Tags are case-sensitive alphanumeric labels; a transaction holds a set of
//! them with no duplicates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single tag label
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Create a tag, rejecting empty or non-alphanumeric names
    pub fn new(name: impl AsRef<str>) -> Result<Self, TagParseError> {
        let name = name.as_ref().trim();
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric()) {
            return Err(TagParseError::InvalidName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    /// The tag name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// Error type for tag names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagParseError {
    InvalidName(String),
}

impl fmt::Display for TagParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagParseError::InvalidName(s) => {
                write!(f, "Tag names should be alphanumeric, got: '{}'", s)
            }
        }
    }
}

impl std::error::Error for TagParseError {}
