//! Clone a transaction, optionally across a recurrence series

use chrono::NaiveDate;

use crate::error::{TallyError, TallyResult};
use crate::ledger::Ledger;
use crate::models::{Occurrence, Transaction};

use super::{CommandOutput, Undoable};

/// Clones the transaction at a displayed index
///
/// With a recurrence, generates one copy per step dated anchor + i*frequency;
/// without one, a single copy dated today. Copies keep description, value,
/// remark, and tags. Clones are exempt from the duplicate-add policy.
#[derive(Debug)]
pub struct CloneTransaction {
    index: usize,
    occurrence: Occurrence,
    today: NaiveDate,
    clones: Vec<Transaction>,
}

impl CloneTransaction {
    pub fn new(index: usize, occurrence: Occurrence, today: NaiveDate) -> Self {
        Self {
            index,
            occurrence,
            today,
            clones: Vec::new(),
        }
    }

    pub fn execute(&mut self, ledger: &mut Ledger) -> TallyResult<CommandOutput> {
        let source = ledger.filtered_at(self.index)?;
        self.clones = self
            .occurrence
            .dates(source.date(), self.today)
            .into_iter()
            .map(|date| source.cloned_on(date))
            .collect();
        for clone in &self.clones {
            ledger.store_mut().add(clone.clone());
        }
        let row = self
            .clones
            .last()
            .and_then(|t| ledger.filtered_position(t));
        Ok(CommandOutput::scrolling(
            format!("Cloned transaction ({}): {}", self.occurrence, source),
            row,
        ))
    }
}

impl Undoable for CloneTransaction {
    fn undo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        if self.clones.is_empty() {
            return Err(TallyError::Validation(
                "Clone has not been executed, nothing to invert".into(),
            ));
        }
        for _ in 0..self.clones.len() {
            ledger.store_mut().remove_last()?;
        }
        Ok(format!("Removed {} cloned transaction(s)", self.clones.len()))
    }

    fn redo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        for clone in &self.clones {
            ledger.store_mut().add(clone.clone());
        }
        Ok(format!("Re-added {} cloned transaction(s)", self.clones.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Currency, CurrencyTable, Frequency, Money, Tag, TransactionKind, Value,
    };
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_ledger() -> Ledger {
        let table = CurrencyTable::seeded();
        let mut tags = BTreeSet::new();
        tags.insert(Tag::new("Subscription").unwrap());
        let source = Transaction::new(
            TransactionKind::Expense,
            "Netflix",
            Value::new(Money::from_cents(1790), Currency::new("SGD"), &table).unwrap(),
            date(2024, 1, 15),
            Some("family plan".to_string()),
            tags,
        )
        .unwrap();
        let mut ledger = Ledger::new(table);
        ledger.store_mut().add(source);
        ledger
    }

    #[test]
    fn test_clone_with_count_appends_in_order() {
        let mut ledger = seeded_ledger();
        let mut cmd = CloneTransaction::new(
            0,
            Occurrence::new(Frequency::Monthly, 3),
            date(2024, 6, 1),
        );
        cmd.execute(&mut ledger).unwrap();

        assert_eq!(ledger.store().len(), 4);
        let dates: Vec<NaiveDate> = ledger.store().iter().skip(1).map(|t| t.date()).collect();
        assert_eq!(
            dates,
            vec![date(2024, 2, 15), date(2024, 3, 15), date(2024, 4, 15)]
        );
        // every copy keeps the source fields
        for clone in ledger.store().iter().skip(1) {
            assert_eq!(clone.description(), "Netflix");
            assert_eq!(clone.remark(), Some("family plan"));
            assert_eq!(clone.tags().len(), 1);
        }
    }

    #[test]
    fn test_clone_count_zero_is_one_copy_today() {
        let mut ledger = seeded_ledger();
        let today = date(2024, 6, 1);
        let mut cmd = CloneTransaction::new(0, Occurrence::once(), today);
        let output = cmd.execute(&mut ledger).unwrap();

        assert_eq!(ledger.store().len(), 2);
        assert_eq!(ledger.store().get(1).unwrap().date(), today);
        assert!(output.message.contains("for today"));
    }

    #[test]
    fn test_clone_invalid_index() {
        let mut ledger = seeded_ledger();
        let mut cmd = CloneTransaction::new(1, Occurrence::once(), date(2024, 6, 1));
        assert!(matches!(
            cmd.execute(&mut ledger),
            Err(TallyError::InvalidIndex)
        ));
        assert_eq!(ledger.store().len(), 1);
    }

    #[test]
    fn test_undo_removes_exactly_the_clones() {
        let mut ledger = seeded_ledger();
        let mut cmd = CloneTransaction::new(
            0,
            Occurrence::new(Frequency::Weekly, 2),
            date(2024, 6, 1),
        );
        cmd.execute(&mut ledger).unwrap();
        assert_eq!(ledger.store().len(), 3);

        cmd.undo(&mut ledger).unwrap();
        assert_eq!(ledger.store().len(), 1);
        assert_eq!(ledger.store().get(0).unwrap().date(), date(2024, 1, 15));

        cmd.redo(&mut ledger).unwrap();
        assert_eq!(ledger.store().len(), 3);
        assert_eq!(ledger.store().get(1).unwrap().date(), date(2024, 1, 22));
        assert_eq!(ledger.store().get(2).unwrap().date(), date(2024, 1, 29));
    }
}
