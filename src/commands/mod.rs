//! User commands
//!
//! One struct per user intent. A command validates its preconditions against
//! the current ledger, then applies itself in full; nothing is mutated when
//! validation fails. Commands that mutate implement [`Undoable`] and capture
//! exactly the state they need to invert themselves — the history stacks hold
//! command instances, never data snapshots.

pub mod add;
pub mod budget;
pub mod clear;
pub mod clone;
pub mod convert;
pub mod delete;
pub mod find;
pub mod list;
pub mod tag;
pub mod untag;
pub mod update;

pub use add::AddTransaction;
pub use budget::SetBudget;
pub use clear::ClearAll;
pub use clone::CloneTransaction;
pub use convert::ConvertValue;
pub use delete::DeleteTransaction;
pub use find::FindTransactions;
pub use list::ListTransactions;
pub use tag::TagTransaction;
pub use untag::UntagTransaction;
pub use update::{UpdateDescriptor, UpdateTransaction};

use crate::error::TallyResult;
use crate::ledger::Ledger;

/// A command that can invert and reapply itself
///
/// `undo` and `redo` are only ever called in properly paired order by the
/// history manager; a command never has to defend against a double-undo.
pub trait Undoable: std::fmt::Debug {
    fn undo(&mut self, ledger: &mut Ledger) -> TallyResult<String>;
    fn redo(&mut self, ledger: &mut Ledger) -> TallyResult<String>;
}

/// What a successfully executed command hands back to the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Feedback shown to the user
    pub message: String,
    /// Filtered-view row the view should scroll to, for scrolling commands
    pub scroll_to: Option<usize>,
    /// Whether the view should open the help page
    pub show_help: bool,
    /// Whether the application should terminate
    pub exit: bool,
}

impl CommandOutput {
    /// A plain feedback message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// A feedback message plus a scroll request
    pub fn scrolling(message: impl Into<String>, row: Option<usize>) -> Self {
        Self {
            message: message.into(),
            scroll_to: row,
            ..Self::default()
        }
    }

    /// The help response
    pub fn help() -> Self {
        Self {
            message: "Opened help window.".to_string(),
            show_help: true,
            ..Self::default()
        }
    }

    /// The exit response
    pub fn exit_app() -> Self {
        Self {
            message: "Exiting tracker as requested ...".to_string(),
            exit: true,
            ..Self::default()
        }
    }
}

/// Every structured command the parser can hand the pipeline
#[derive(Debug)]
pub enum Command {
    Add(AddTransaction),
    Delete(DeleteTransaction),
    Clone(CloneTransaction),
    Tag(TagTransaction),
    Untag(UntagTransaction),
    Update(UpdateTransaction),
    Budget(SetBudget),
    Clear(ClearAll),
    Convert(ConvertValue),
    Find(FindTransactions),
    List(ListTransactions),
    Undo,
    Redo,
    Help,
    Exit,
}

impl Command {
    /// Short label used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Delete(_) => "delete",
            Self::Clone(_) => "clone",
            Self::Tag(_) => "tag",
            Self::Untag(_) => "untag",
            Self::Update(_) => "update",
            Self::Budget(_) => "budget",
            Self::Clear(_) => "clear",
            Self::Convert(_) => "convert",
            Self::Find(_) => "find",
            Self::List(_) => "list",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    /// Whether a successful run of this command gets tracked for undo
    pub fn is_undoable(&self) -> bool {
        matches!(
            self,
            Self::Add(_)
                | Self::Delete(_)
                | Self::Clone(_)
                | Self::Tag(_)
                | Self::Untag(_)
                | Self::Update(_)
                | Self::Budget(_)
                | Self::Clear(_)
        )
    }

    /// Whether this command mutates the ledger at all
    pub fn is_mutating(&self) -> bool {
        self.is_undoable() || matches!(self, Self::Undo | Self::Redo)
    }
}
