//! Ledger persistence
//!
//! The pipeline saves a whole-ledger snapshot after every successful command.
//! Persistence sits behind the [`SnapshotStore`] trait so the engine never
//! knows whether it is talking to a JSON file or a test double.

pub mod file_io;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TallyResult;
use crate::ledger::Ledger;
use crate::models::{Budget, Transaction};

/// Serializable image of everything the tracker owns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl LedgerSnapshot {
    /// Capture the current ledger contents
    pub fn of(ledger: &Ledger) -> Self {
        Self {
            transactions: ledger.store().iter().cloned().collect(),
            budgets: ledger.budgets().iter_sorted().into_iter().cloned().collect(),
        }
    }

    /// Load this snapshot into a ledger, replacing its contents
    pub fn restore_into(self, ledger: &mut Ledger) {
        ledger.store_mut().restore_all(self.transactions);
        ledger.budgets_mut().restore_all(self.budgets);
    }
}

/// Where snapshots go after each command
pub trait SnapshotStore {
    fn save(&mut self, snapshot: &LedgerSnapshot) -> TallyResult<()>;
    fn load(&self) -> TallyResult<LedgerSnapshot>;
}

/// JSON-file-backed snapshot store
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn save(&mut self, snapshot: &LedgerSnapshot) -> TallyResult<()> {
        debug!(path = %self.path.display(), transactions = snapshot.transactions.len(), "saving snapshot");
        file_io::write_json_atomic(&self.path, snapshot)
    }

    fn load(&self) -> TallyResult<LedgerSnapshot> {
        file_io::read_json(&self.path)
    }
}

/// In-memory snapshot store, for tests and ephemeral sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    snapshot: LedgerSnapshot,
    saves: usize,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `save` has been called
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// The last saved snapshot
    pub fn last_saved(&self) -> &LedgerSnapshot {
        &self.snapshot
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn save(&mut self, snapshot: &LedgerSnapshot) -> TallyResult<()> {
        self.snapshot = snapshot.clone();
        self.saves += 1;
        Ok(())
    }

    fn load(&self) -> TallyResult<LedgerSnapshot> {
        Ok(self.snapshot.clone())
    }
}
