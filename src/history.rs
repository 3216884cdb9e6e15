//! Undo/redo history
//!
//! Two LIFO stacks of executed undoable command instances. A command lives
//! on exactly one stack at a time: `undo` moves it to the redo stack, `redo`
//! moves it back, and tracking a fresh command discards the redo chain.

use crate::commands::Undoable;
use crate::error::{TallyError, TallyResult};
use crate::ledger::Ledger;

/// The undo/redo stacks
#[derive(Debug, Default)]
pub struct CommandHistory {
    undo_stack: Vec<Box<dyn Undoable>>,
    redo_stack: Vec<Box<dyn Undoable>>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Track a freshly executed undoable command
    ///
    /// A new action invalidates the redo chain, so the redo stack is cleared.
    pub fn track(&mut self, command: Box<dyn Undoable>) {
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Invert the most recent tracked command
    pub fn undo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        let mut command = self.undo_stack.pop().ok_or(TallyError::NothingToUndo)?;
        let message = command.undo(ledger)?;
        self.redo_stack.push(command);
        Ok(message)
    }

    /// Reapply the most recently undone command
    pub fn redo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        let mut command = self.redo_stack.pop().ok_or(TallyError::NothingToRedo)?;
        let message = command.redo(ledger)?;
        self.undo_stack.push(command);
        Ok(message)
    }
}
