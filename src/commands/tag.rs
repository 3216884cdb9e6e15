//! Add tags to a transaction

use std::collections::BTreeSet;

use crate::error::{TallyError, TallyResult};
use crate::ledger::{Ledger, TransactionFilter};
use crate::models::{Tag, Transaction};

use super::{CommandOutput, Undoable};

#[derive(Debug)]
struct Replacement {
    absolute: usize,
    original: Transaction,
    updated: Transaction,
}

/// Adds tags to the transaction at a displayed index
///
/// Tags already present are skipped and reported; if every supplied tag is
/// already present the command fails and nothing changes. The store entry is
/// replaced with a new transaction, never mutated in place.
#[derive(Debug)]
pub struct TagTransaction {
    index: usize,
    tags: BTreeSet<Tag>,
    replacement: Option<Replacement>,
}

impl TagTransaction {
    pub fn new(index: usize, tags: BTreeSet<Tag>) -> Self {
        Self {
            index,
            tags,
            replacement: None,
        }
    }

    fn captured(&self) -> TallyResult<&Replacement> {
        self.replacement.as_ref().ok_or_else(|| {
            TallyError::Validation("Tag has not been executed, nothing to invert".into())
        })
    }

    pub fn execute(&mut self, ledger: &mut Ledger) -> TallyResult<CommandOutput> {
        let absolute = ledger.translate_index(self.index)?;
        let original = ledger.filtered_at(self.index)?;

        let mut updated_tags = original.tags().clone();
        let mut existed: Vec<&Tag> = Vec::new();
        for tag in &self.tags {
            if !updated_tags.insert(tag.clone()) {
                existed.push(tag);
            }
        }
        if existed.len() == self.tags.len() {
            return Err(TallyError::NoNewTags);
        }

        let updated = original.replacing_tags(updated_tags);
        ledger.store_mut().replace_at(absolute, updated.clone())?;
        ledger.set_filter(TransactionFilter::All);

        let mut message = format!("Updated Transaction: {}\n\nOriginal: {}", updated, original);
        if !existed.is_empty() {
            let names: Vec<&str> = existed.iter().map(|t| t.name()).collect();
            message.push_str(&format!(
                "\nTags [{}] existed and will be ignored.",
                names.join(", ")
            ));
        }

        let row = ledger.filtered_position(&updated);
        self.replacement = Some(Replacement {
            absolute,
            original,
            updated,
        });
        Ok(CommandOutput::scrolling(message, row))
    }
}

impl Undoable for TagTransaction {
    fn undo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        let replacement = self.captured()?;
        let original = replacement.original.clone();
        ledger
            .store_mut()
            .replace_at(replacement.absolute, original.clone())?;
        Ok(format!("Reverted transaction: {}", original))
    }

    fn redo(&mut self, ledger: &mut Ledger) -> TallyResult<String> {
        let replacement = self.captured()?;
        let updated = replacement.updated.clone();
        ledger
            .store_mut()
            .replace_at(replacement.absolute, updated.clone())?;
        Ok(format!("Updated Transaction: {}", updated))
    }
}
