//! Reset or month-restrict the displayed list

use crate::error::TallyResult;
use crate::ledger::{Ledger, TransactionFilter};
use crate::models::MonthYear;

use super::CommandOutput;

/// Shows every transaction, or only those of one month
#[derive(Debug)]
pub struct ListTransactions {
    month: Option<MonthYear>,
}

impl ListTransactions {
    pub fn all() -> Self {
        Self { month: None }
    }

    pub fn in_month(month: MonthYear) -> Self {
        Self { month: Some(month) }
    }

    pub fn execute(&mut self, ledger: &mut Ledger) -> TallyResult<CommandOutput> {
        let message = match self.month {
            Some(month) => {
                ledger.set_filter(TransactionFilter::Month(month));
                format!("Listed all transactions for {}", month)
            }
            None => {
                ledger.set_filter(TransactionFilter::All);
                "Listed all transactions".to_string()
            }
        };
        Ok(CommandOutput::message(message))
    }
}
