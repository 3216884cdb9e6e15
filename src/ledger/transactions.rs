//! In-memory transaction store
//!
//! An ordered sequence of transactions; insertion order is display order and
//! the order undo captures refer to. All mutation is index- or
//! value-addressed, and lookups match the first structurally-equal element.

use crate::error::{TallyError, TallyResult};
use crate::models::Transaction;

/// Ordered collection of every recorded transaction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionStore {
    items: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(items: Vec<Transaction>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.items.get(index)
    }

    /// Append a transaction
    pub fn add(&mut self, transaction: Transaction) {
        self.items.push(transaction);
    }

    /// Insert a transaction at a specific position
    ///
    /// `index` may equal the current length (append). Anything past that is
    /// an invalid index.
    pub fn insert(&mut self, index: usize, transaction: Transaction) -> TallyResult<()> {
        if index > self.items.len() {
            return Err(TallyError::InvalidIndex);
        }
        self.items.insert(index, transaction);
        Ok(())
    }

    /// Remove the first element structurally equal to `transaction`
    pub fn remove(&mut self, transaction: &Transaction) -> TallyResult<Transaction> {
        match self.index_of(transaction) {
            Some(index) => Ok(self.items.remove(index)),
            None => Err(TallyError::TransactionNotFound(transaction.to_string())),
        }
    }

    /// Remove the element at `index`
    pub fn remove_at(&mut self, index: usize) -> TallyResult<Transaction> {
        if index >= self.items.len() {
            return Err(TallyError::InvalidIndex);
        }
        Ok(self.items.remove(index))
    }

    /// Remove the most recently appended element
    pub fn remove_last(&mut self) -> TallyResult<Transaction> {
        self.items.pop().ok_or(TallyError::InvalidIndex)
    }

    /// Replace the element at `index`, returning the displaced one
    pub fn replace_at(&mut self, index: usize, transaction: Transaction) -> TallyResult<Transaction> {
        match self.items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, transaction)),
            None => Err(TallyError::InvalidIndex),
        }
    }

    /// Replace the first element structurally equal to `target`
    pub fn replace(&mut self, target: &Transaction, replacement: Transaction) -> TallyResult<()> {
        match self.index_of(target) {
            Some(index) => {
                self.items[index] = replacement;
                Ok(())
            }
            None => Err(TallyError::TransactionNotFound(target.to_string())),
        }
    }

    /// Index of the first element structurally equal to `transaction`
    ///
    /// This is how a filtered-view row is translated back to a store
    /// position before mutation.
    pub fn index_of(&self, transaction: &Transaction) -> Option<usize> {
        self.items.iter().position(|t| t == transaction)
    }

    /// Whether any element shares the duplicate-detection identity
    /// (description + value) with `transaction`
    pub fn contains_same(&self, transaction: &Transaction) -> bool {
        self.items.iter().any(|t| t.is_same(transaction))
    }

    /// Drain every transaction, preserving order
    pub fn drain_all(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.items)
    }

    /// Replace the whole contents, preserving the given order
    pub fn restore_all(&mut self, items: Vec<Transaction>) {
        self.items = items;
    }
}
