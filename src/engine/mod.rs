//! Command execution pipeline
//!
//! One command at a time: dispatch to the command's `execute`, track it for
//! undo if its type is undoable, persist a snapshot, then notify the view.
//! A command that fails validation leaves every piece of state untouched; a
//! snapshot save that fails after a successful mutation keeps the in-memory
//! state and surfaces the save error (the tracker and the file can diverge
//! until the next successful save — deliberate, see DESIGN.md).

use tracing::{debug, info};

use crate::commands::{Command, CommandOutput};
use crate::error::{TallyError, TallyResult};
use crate::history::CommandHistory;
use crate::ledger::Ledger;
use crate::models::{CurrencyTable, MonthYear};
use crate::storage::{LedgerSnapshot, SnapshotStore};
use crate::view::{NoopView, ViewListener};

/// Orchestrates command execution against the ledger
pub struct Engine {
    ledger: Ledger,
    history: CommandHistory,
    storage: Box<dyn SnapshotStore>,
    view: Box<dyn ViewListener>,
}

impl Engine {
    pub fn new(rates: CurrencyTable, storage: Box<dyn SnapshotStore>) -> Self {
        Self {
            ledger: Ledger::new(rates),
            history: CommandHistory::new(),
            storage,
            view: Box::new(NoopView),
        }
    }

    /// Attach the view listener notified after every command
    pub fn with_view(mut self, view: Box<dyn ViewListener>) -> Self {
        self.view = view;
        self
    }

    /// Populate the ledger from the last saved snapshot
    pub fn load(&mut self) -> TallyResult<()> {
        let snapshot = self.storage.load()?;
        debug!(
            transactions = snapshot.transactions.len(),
            budgets = snapshot.budgets.len(),
            "loaded snapshot"
        );
        snapshot.restore_into(&mut self.ledger);
        Ok(())
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Execute one structured command to completion
    ///
    /// Undo and redo are resolved here because the history belongs to the
    /// pipeline; everything else dispatches to the command itself.
    pub fn execute(&mut self, command: Command) -> TallyResult<CommandOutput> {
        info!(command = command.name(), "executing");

        let output = match command {
            Command::Add(mut cmd) => {
                let output = cmd.execute(&mut self.ledger)?;
                self.history.track(Box::new(cmd));
                output
            }
            Command::Delete(mut cmd) => {
                let output = cmd.execute(&mut self.ledger)?;
                self.history.track(Box::new(cmd));
                output
            }
            Command::Clone(mut cmd) => {
                let output = cmd.execute(&mut self.ledger)?;
                self.history.track(Box::new(cmd));
                output
            }
            Command::Tag(mut cmd) => {
                let output = cmd.execute(&mut self.ledger)?;
                self.history.track(Box::new(cmd));
                output
            }
            Command::Untag(mut cmd) => {
                let output = cmd.execute(&mut self.ledger)?;
                self.history.track(Box::new(cmd));
                output
            }
            Command::Update(mut cmd) => {
                let output = cmd.execute(&mut self.ledger)?;
                self.history.track(Box::new(cmd));
                output
            }
            Command::Budget(mut cmd) => {
                let output = cmd.execute(&mut self.ledger)?;
                self.history.track(Box::new(cmd));
                output
            }
            Command::Clear(mut cmd) => {
                let output = cmd.execute(&mut self.ledger)?;
                self.history.track(Box::new(cmd));
                output
            }
            Command::Convert(mut cmd) => cmd.execute(&mut self.ledger)?,
            Command::Find(mut cmd) => cmd.execute(&mut self.ledger)?,
            Command::List(mut cmd) => cmd.execute(&mut self.ledger)?,
            Command::Undo => CommandOutput::message(self.history.undo(&mut self.ledger)?),
            Command::Redo => CommandOutput::message(self.history.redo(&mut self.ledger)?),
            Command::Help => CommandOutput::help(),
            Command::Exit => CommandOutput::exit_app(),
        };

        self.persist()?;
        self.refresh_view(&output);
        Ok(output)
    }

    fn persist(&mut self) -> TallyResult<()> {
        let snapshot = LedgerSnapshot::of(&self.ledger);
        self.storage.save(&snapshot).map_err(|e| match e {
            TallyError::Storage(message) => TallyError::Save(message),
            other => TallyError::Save(other.to_string()),
        })
    }

    fn refresh_view(&mut self, output: &CommandOutput) {
        let summary = self.ledger.summary(MonthYear::current());
        self.view.refresh(&summary);
        if let Some(row) = output.scroll_to {
            self.view.scroll_to(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{
        AddTransaction, ClearAll, ConvertValue, FindTransactions, SetBudget,
    };
    use crate::ledger::LedgerSummary;
    use crate::models::{
        Budget, Currency, Money, Transaction, TransactionKind, Value,
    };
    use crate::storage::InMemorySnapshotStore;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::rc::Rc;

    fn expense(description: &str, cents: i64) -> Transaction {
        let table = CurrencyTable::seeded();
        Transaction::new(
            TransactionKind::Expense,
            description,
            Value::new(Money::from_cents(cents), Currency::new("SGD"), &table).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            None,
            BTreeSet::new(),
        )
        .unwrap()
    }

    fn add(description: &str, cents: i64) -> Command {
        Command::Add(AddTransaction::new(expense(description, cents)))
    }

    fn engine() -> Engine {
        Engine::new(
            CurrencyTable::seeded(),
            Box::new(InMemorySnapshotStore::new()),
        )
    }

    /// Snapshot store that accepts loads but refuses every save
    #[derive(Debug, Default)]
    struct FailingSnapshotStore;

    impl SnapshotStore for FailingSnapshotStore {
        fn save(&mut self, _snapshot: &LedgerSnapshot) -> TallyResult<()> {
            Err(TallyError::Storage("disk full".into()))
        }

        fn load(&self) -> TallyResult<LedgerSnapshot> {
            Ok(LedgerSnapshot::default())
        }
    }

    /// Snapshot store handle that can be inspected after moving into the engine
    #[derive(Debug, Clone, Default)]
    struct SharedSnapshotStore(Rc<RefCell<InMemorySnapshotStore>>);

    impl SnapshotStore for SharedSnapshotStore {
        fn save(&mut self, snapshot: &LedgerSnapshot) -> TallyResult<()> {
            self.0.borrow_mut().save(snapshot)
        }

        fn load(&self) -> TallyResult<LedgerSnapshot> {
            self.0.borrow().load()
        }
    }

    /// Records every refresh and scroll signal
    #[derive(Debug, Default)]
    struct RecordingView {
        refreshes: Rc<RefCell<Vec<LedgerSummary>>>,
        scrolls: Rc<RefCell<Vec<usize>>>,
    }

    impl ViewListener for RecordingView {
        fn refresh(&mut self, summary: &LedgerSummary) {
            self.refreshes.borrow_mut().push(summary.clone());
        }

        fn scroll_to(&mut self, row: usize) {
            self.scrolls.borrow_mut().push(row);
        }
    }

    #[test]
    fn test_execute_tracks_undoable_commands() {
        let mut engine = engine();
        engine.execute(add("Laksa", 450)).unwrap();
        assert_eq!(engine.history().undo_len(), 1);

        // read-only commands are never tracked and keep the redo chain
        engine.execute(Command::Undo).unwrap();
        assert_eq!(engine.history().redo_len(), 1);
        engine
            .execute(Command::Find(FindTransactions::new(vec!["x".into()])))
            .unwrap();
        engine
            .execute(Command::Convert(ConvertValue::new(
                Money::from_units(1),
                vec![Currency::new("SGD"), Currency::new("MYR")],
            )))
            .unwrap();
        assert_eq!(engine.history().redo_len(), 1);

        engine.execute(Command::Redo).unwrap();
        assert_eq!(engine.ledger().store().len(), 1);
    }

    #[test]
    fn test_round_trip_restores_observable_state() {
        let mut engine = engine();
        engine.execute(add("Laksa", 450)).unwrap();
        engine.execute(add("Coffee", 300)).unwrap();
        let before: Vec<Transaction> = engine.ledger().store().iter().cloned().collect();

        engine.execute(Command::Undo).unwrap();
        engine.execute(Command::Redo).unwrap();
        let after: Vec<Transaction> = engine.ledger().store().iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_every_successful_command_saves() {
        let store = SharedSnapshotStore::default();
        let handle = store.clone();
        let mut engine =
            Engine::new(CurrencyTable::seeded(), Box::new(store));

        engine.execute(add("Laksa", 450)).unwrap();
        // read-only commands save too, matching the pipeline contract
        engine
            .execute(Command::List(crate::commands::ListTransactions::all()))
            .unwrap();

        let inner = handle.0.borrow();
        assert_eq!(inner.save_count(), 2);
        assert_eq!(inner.last_saved().transactions.len(), 1);
    }

    #[test]
    fn test_failed_validation_saves_nothing_and_mutates_nothing() {
        let mut engine = engine();
        engine.execute(add("Laksa", 450)).unwrap();

        let err = engine.execute(add("Laksa", 450)).unwrap_err();
        assert!(matches!(err, TallyError::DuplicateTransaction));
        assert_eq!(engine.ledger().store().len(), 1);
        assert_eq!(engine.history().undo_len(), 1);
    }

    // Pins the persistence asymmetry: the mutation is kept in memory even
    // though the save failed, and the user sees the fixed-prefix message.
    #[test]
    fn test_save_failure_keeps_in_memory_mutation() {
        let mut engine = Engine::new(
            CurrencyTable::seeded(),
            Box::new(FailingSnapshotStore),
        );
        let err = engine.execute(add("Laksa", 450)).unwrap_err();

        assert_eq!(err.to_string(), "Could not save data to file: disk full");
        assert_eq!(engine.ledger().store().len(), 1);
        // the command was still tracked, so it remains undoable
        assert_eq!(engine.history().undo_len(), 1);
    }

    #[test]
    fn test_view_receives_refresh_and_scroll() {
        let view = RecordingView::default();
        let refreshes = Rc::clone(&view.refreshes);
        let scrolls = Rc::clone(&view.scrolls);

        let mut engine = Engine::new(
            CurrencyTable::seeded(),
            Box::new(InMemorySnapshotStore::new()),
        )
        .with_view(Box::new(view));

        let period = MonthYear::current();
        let table = CurrencyTable::seeded();
        engine
            .execute(Command::Budget(SetBudget::new(Budget::new(
                period,
                Value::new(Money::from_cents(50000), Currency::new("SGD"), &table).unwrap(),
            ))))
            .unwrap();
        engine.execute(add("Laksa", 450)).unwrap();

        let refreshes = refreshes.borrow();
        assert_eq!(refreshes.len(), 2);
        let last = refreshes.last().unwrap();
        assert_eq!(last.budget, Some(Money::from_cents(50000)));
        assert_eq!(last.expense, Money::from_cents(450));
        assert_eq!(last.balance, Money::from_cents(-450));

        // only the add is a scrolling command
        assert_eq!(*scrolls.borrow(), vec![0]);
    }

    #[test]
    fn test_clear_then_undo_through_pipeline() {
        let mut engine = engine();
        engine.execute(add("Laksa", 450)).unwrap();
        engine.execute(Command::Clear(ClearAll::new())).unwrap();
        assert!(engine.ledger().store().is_empty());

        engine.execute(Command::Undo).unwrap();
        assert_eq!(engine.ledger().store().len(), 1);
    }

    #[test]
    fn test_load_restores_saved_snapshot() {
        let mut store = InMemorySnapshotStore::new();
        let mut seeded = Ledger::new(CurrencyTable::seeded());
        seeded.store_mut().add(expense("Laksa", 450));
        store.save(&LedgerSnapshot::of(&seeded)).unwrap();

        let mut engine = Engine::new(CurrencyTable::seeded(), Box::new(store));
        engine.load().unwrap();
        assert_eq!(engine.ledger().store().len(), 1);
    }
}
