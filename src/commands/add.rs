//! Add an expense or income transaction

use crate::error::{TallyError, TallyResult};
use crate::ledger::Ledger;
use crate::models::{Transaction, TransactionKind};

use super::{CommandOutput, Undoable};

/// Appends a new transaction to the store
///
/// Adding a transaction that is "the same" as an existing one (same
/// description and value) is rejected; cloning is the supported way to
/// repeat a transaction.
#[derive(Debug)]
pub struct AddTransaction {
    transaction: Transaction,
}

impl AddTransaction {
    pub fn new(transaction: Transaction) -> Self {
        Self { transaction }
    }

    fn success_message(&self) -> String {
        match self.transaction.kind() {
            TransactionKind::Expense => format!("New expense added: {}", self.transaction),
            TransactionKind::Income => format!("New income added: {}", self.transaction),
        }
    }

    pub fn execute(&mut self, ledger: &mut Ledger) -> TallyResult<CommandOutput> {
        if ledger.store().contains_same(&self.transaction) {
            return Err(TallyError::DuplicateTransaction);
        }
        ledger.store_mut().add(self.transaction.clone());
        let row = ledger.filtered_position(&self.transaction);
        Ok(CommandOutput::scrolling(self.success_message(), row))
    }
}

impl Undoable for AddTransaction {
    fn undo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        ledger.store_mut().remove_last()?;
        Ok(format!("Removed transaction: {}", self.transaction))
    }

    fn redo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        ledger.store_mut().add(self.transaction.clone());
        Ok(self.success_message())
    }
}
