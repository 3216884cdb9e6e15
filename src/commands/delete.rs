//! Delete the transaction at a displayed index

use crate::error::{TallyError, TallyResult};
use crate::ledger::Ledger;
use crate::models::Transaction;

use super::{CommandOutput, Undoable};

/// Removes the transaction shown at a filtered-view row
///
/// Captures the removed transaction and its absolute store index so undo can
/// reinsert it exactly where it was.
#[derive(Debug)]
pub struct DeleteTransaction {
    index: usize,
    removed: Option<(usize, Transaction)>,
}

impl DeleteTransaction {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            removed: None,
        }
    }

    fn captured(&self) -> TallyResult<(usize, &Transaction)> {
        self.removed
            .as_ref()
            .map(|(i, t)| (*i, t))
            .ok_or_else(|| {
                TallyError::Validation("Delete has not been executed, nothing to invert".into())
            })
    }

    pub fn execute(&mut self, ledger: &mut Ledger) -> TallyResult<CommandOutput> {
        let absolute = ledger.translate_index(self.index)?;
        let removed = ledger.store_mut().remove_at(absolute)?;
        let message = format!("Deleted transaction: {}", removed);
        self.removed = Some((absolute, removed));
        Ok(CommandOutput::message(message))
    }
}

impl Undoable for DeleteTransaction {
    fn undo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        let (absolute, transaction) = self.captured()?;
        let transaction = transaction.clone();
        ledger.store_mut().insert(absolute, transaction.clone())?;
        Ok(format!("Restored transaction: {}", transaction))
    }

    fn redo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        let (absolute, _) = self.captured()?;
        let removed = ledger.store_mut().remove_at(absolute)?;
        Ok(format!("Deleted transaction: {}", removed))
    }
}
