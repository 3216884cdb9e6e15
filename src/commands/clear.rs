//! Clear every transaction and budget

use crate::error::{TallyError, TallyResult};
use crate::ledger::{Ledger, TransactionFilter};
use crate::models::{Budget, Transaction};

use super::{CommandOutput, Undoable};

/// Empties the tracker
///
/// Undoable: the drained transactions and budgets are captured so undo can
/// put everything back in its original order, keeping the rest of the undo
/// stack meaningful.
#[derive(Debug, Default)]
pub struct ClearAll {
    drained: Option<(Vec<Transaction>, Vec<Budget>)>,
}

impl ClearAll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn execute(&mut self, ledger: &mut Ledger) -> TallyResult<CommandOutput> {
        let transactions = ledger.store_mut().drain_all();
        let budgets = ledger.budgets_mut().drain_all();
        ledger.set_filter(TransactionFilter::All);
        self.drained = Some((transactions, budgets));
        Ok(CommandOutput::message("All transactions have been cleared!"))
    }
}

impl Undoable for ClearAll {
    fn undo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        let (transactions, budgets) = self.drained.clone().ok_or_else(|| {
            TallyError::Validation("Clear has not been executed, nothing to invert".into())
        })?;
        let count = transactions.len();
        ledger.store_mut().restore_all(transactions);
        ledger.budgets_mut().restore_all(budgets);
        Ok(format!("Restored {} transaction(s)", count))
    }

    fn redo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        ledger.store_mut().drain_all();
        ledger.budgets_mut().drain_all();
        ledger.set_filter(TransactionFilter::All);
        Ok("All transactions have been cleared!".to_string())
    }
}
