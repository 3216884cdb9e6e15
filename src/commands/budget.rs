//! Set the budget for a month

use crate::error::{TallyError, TallyResult};
use crate::ledger::Ledger;
use crate::models::Budget;

use super::{CommandOutput, Undoable};

/// Sets (or replaces) the budget for one calendar month
#[derive(Debug)]
pub struct SetBudget {
    budget: Budget,
    /// The entry displaced at execution: None until executed, then
    /// Some(previous budget for the month, if the month had one)
    previous: Option<Option<Budget>>,
}

impl SetBudget {
    pub fn new(budget: Budget) -> Self {
        Self {
            budget,
            previous: None,
        }
    }

    pub fn execute(&mut self, ledger: &mut Ledger) -> TallyResult<CommandOutput> {
        let previous = ledger.budgets_mut().set(self.budget.clone());
        let message = match &previous {
            Some(old) => format!("Budget updated: {} (was {})", self.budget, old.value()),
            None => format!("Budget set: {}", self.budget),
        };
        self.previous = Some(previous);
        Ok(CommandOutput::message(message))
    }
}

impl Undoable for SetBudget {
    fn undo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        let previous = self.previous.clone().ok_or_else(|| {
            TallyError::Validation("Budget has not been executed, nothing to invert".into())
        })?;
        let period = self.budget.period();
        match previous {
            Some(old) => {
                ledger.budgets_mut().set(old.clone());
                Ok(format!("Budget reverted: {}", old))
            }
            None => {
                ledger.budgets_mut().remove(period);
                Ok(format!("Budget for {} removed", period))
            }
        }
    }

    fn redo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        ledger.budgets_mut().set(self.budget.clone());
        Ok(format!("Budget set: {}", self.budget))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, CurrencyTable, Money, MonthYear, Value};

    fn budget(month: u32, year: i32, cents: i64) -> Budget {
        let table = CurrencyTable::seeded();
        Budget::new(
            MonthYear::new(month, year).unwrap(),
            Value::new(Money::from_cents(cents), Currency::new("SGD"), &table).unwrap(),
        )
    }

    fn ledger() -> Ledger {
        Ledger::new(CurrencyTable::seeded())
    }

    #[test]
    fn test_set_budget() {
        let mut ledger = ledger();
        let output = SetBudget::new(budget(3, 2024, 50000))
            .execute(&mut ledger)
            .unwrap();
        assert_eq!(output.message, "Budget set: 500.00 SGD for 03/2024");
        assert_eq!(ledger.budgets().len(), 1);
    }

    #[test]
    fn test_replace_keeps_single_entry() {
        let mut ledger = ledger();
        SetBudget::new(budget(3, 2024, 50000))
            .execute(&mut ledger)
            .unwrap();
        let output = SetBudget::new(budget(3, 2024, 30000))
            .execute(&mut ledger)
            .unwrap();

        assert!(output.message.contains("was 500.00 SGD"));
        assert_eq!(ledger.budgets().len(), 1);
        let current = ledger.budgets().get(MonthYear::new(3, 2024).unwrap()).unwrap();
        assert_eq!(current.value().amount(), Money::from_cents(30000));
    }

    #[test]
    fn test_undo_removes_fresh_entry() {
        let mut ledger = ledger();
        let mut cmd = SetBudget::new(budget(3, 2024, 50000));
        cmd.execute(&mut ledger).unwrap();

        cmd.undo(&mut ledger).unwrap();
        assert!(ledger.budgets().is_empty());

        cmd.redo(&mut ledger).unwrap();
        assert_eq!(ledger.budgets().len(), 1);
    }

    #[test]
    fn test_undo_restores_replaced_entry() {
        let mut ledger = ledger();
        SetBudget::new(budget(3, 2024, 50000))
            .execute(&mut ledger)
            .unwrap();

        let mut cmd = SetBudget::new(budget(3, 2024, 30000));
        cmd.execute(&mut ledger).unwrap();
        cmd.undo(&mut ledger).unwrap();

        let current = ledger.budgets().get(MonthYear::new(3, 2024).unwrap()).unwrap();
        assert_eq!(current.value().amount(), Money::from_cents(50000));
    }
}
