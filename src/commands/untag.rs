//! Remove tags from a transaction

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

/// Removes tags from the transaction at a displayed index
///
/// Tags that are not present are ignored and reported; if none of the
/// supplied tags were present the command fails and nothing changes.
#[derive(Debug)]
pub struct UntagTransaction {
    index: usize,
    tags: BTreeSet<Tag>,
    replacement: Option<Replacement>,
}

impl UntagTransaction {
    pub fn new(index: usize, tags: BTreeSet<Tag>) -> Self {
        Self {
            index,
            tags,
            replacement: None,
        }
    }

    fn captured(&self) -> TallyResult<&Replacement> {
        self.replacement.as_ref().ok_or_else(|| {
            TallyError::Validation("Untag has not been executed, nothing to invert".into())
        })
    }

    pub fn execute(&mut self, ledger: &mut Ledger) -> TallyResult<CommandOutput> {
        let absolute = ledger.translate_index(self.index)?;
        let original = ledger.filtered_at(self.index)?;

        let mut updated_tags = original.tags().clone();
        let mut absent: Vec<&Tag> = Vec::new();
        for tag in &self.tags {
            if !updated_tags.remove(tag) {
                absent.push(tag);
            }
        }
        if absent.len() == self.tags.len() {
            return Err(TallyError::NoTagsRemoved);
        }

        let updated = original.replacing_tags(updated_tags);
        ledger.store_mut().replace_at(absolute, updated.clone())?;
        ledger.set_filter(TransactionFilter::All);

        let mut message = format!("Updated Transaction: {}\n\nOriginal: {}", updated, original);
        if !absent.is_empty() {
            let names: Vec<&str> = absent.iter().map(|t| t.name()).collect();
            message.push_str(&format!(
                "\nTags [{}] were not found and were ignored.",
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

impl Undoable for UntagTransaction {
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
