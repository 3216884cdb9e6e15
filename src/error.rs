//! Custom error types for tally-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for tally-cli operations
#[derive(Error, Debug)]
pub enum TallyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors for data models and command arguments
    #[error("Validation error: {0}")]
    Validation(String),

    /// A user-supplied index does not address a row in the displayed list
    #[error("The transaction index provided is invalid")]
    InvalidIndex,

    /// The transaction being added already exists (same description and value)
    #[error("This transaction already exists in the tracker")]
    DuplicateTransaction,

    /// A transaction expected to be in the store could not be found
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// Every tag supplied to a tag command was already present
    #[error("No new tags were provided, the transaction was not updated")]
    NoNewTags,

    /// No tag supplied to an untag command was present
    #[error("None of the given tags were found, the transaction was not updated")]
    NoTagsRemoved,

    /// Undo requested with an empty undo history
    #[error("There is nothing to undo")]
    NothingToUndo,

    /// Redo requested with an empty redo history
    #[error("There is nothing to redo")]
    NothingToRedo,

    /// Storage errors (loading, parsing, file I/O)
    #[error("Storage error: {0}")]
    Storage(String),

    /// The post-command snapshot save failed; in-memory state is kept
    #[error("Could not save data to file: {0}")]
    Save(String),
}

impl TallyError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error left the store untouched
    ///
    /// Every variant except `Save` is raised before any mutation happens.
    pub fn is_pre_mutation(&self) -> bool {
        !matches!(self, Self::Save(_))
    }
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for tally-cli operations
pub type TallyResult<T> = Result<T, TallyError>;
