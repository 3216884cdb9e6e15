//! Filter the displayed list by description keywords

use crate::error::TallyResult;
use crate::ledger::{Ledger, TransactionFilter};

use super::CommandOutput;

/// Narrows the displayed list to transactions whose description contains any
/// of the keywords (whole-word, case-insensitive)
#[derive(Debug)]
pub struct FindTransactions {
    keywords: Vec<String>,
}

impl FindTransactions {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    pub fn execute(&mut self, ledger: &mut Ledger) -> TallyResult<CommandOutput> {
        ledger.set_filter(TransactionFilter::Keywords(self.keywords.clone()));
        Ok(CommandOutput::message(format!(
            "{} transactions listed!",
            ledger.filtered_len()
        )))
    }
}
