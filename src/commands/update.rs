//! Edit fields of an existing transaction

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::{TallyError, TallyResult};
use crate::ledger::{Ledger, TransactionFilter};
use crate::models::{Tag, Transaction, Value};

use super::{CommandOutput, Undoable};

/// The fields an update supplies; anything left `None` is kept as-is
#[derive(Debug, Clone, Default)]
pub struct UpdateDescriptor {
    pub description: Option<String>,
    pub value: Option<Value>,
    pub date: Option<NaiveDate>,
    pub remark: Option<String>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl UpdateDescriptor {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.value.is_none()
            && self.date.is_none()
            && self.remark.is_none()
            && self.tags.is_none()
    }
}

#[derive(Debug)]
struct Replacement {
    absolute: usize,
    original: Transaction,
    updated: Transaction,
}

/// Replaces the transaction at a displayed index with an edited copy
#[derive(Debug)]
pub struct UpdateTransaction {
    index: usize,
    descriptor: UpdateDescriptor,
    replacement: Option<Replacement>,
}

impl UpdateTransaction {
    pub fn new(index: usize, descriptor: UpdateDescriptor) -> Self {
        Self {
            index,
            descriptor,
            replacement: None,
        }
    }

    fn captured(&self) -> TallyResult<&Replacement> {
        self.replacement.as_ref().ok_or_else(|| {
            TallyError::Validation("Update has not been executed, nothing to invert".into())
        })
    }

    pub fn execute(&mut self, ledger: &mut Ledger) -> TallyResult<CommandOutput> {
        if self.descriptor.is_empty() {
            return Err(TallyError::Validation(
                "At least one field to update must be provided".into(),
            ));
        }

        let absolute = ledger.translate_index(self.index)?;
        let original = ledger.filtered_at(self.index)?;

        let updated = Transaction::new(
            original.kind(),
            self.descriptor
                .description
                .clone()
                .unwrap_or_else(|| original.description().to_string()),
            self.descriptor
                .value
                .clone()
                .unwrap_or_else(|| original.value().clone()),
            self.descriptor.date.unwrap_or_else(|| original.date()),
            self.descriptor
                .remark
                .clone()
                .or_else(|| original.remark().map(str::to_string)),
            self.descriptor
                .tags
                .clone()
                .unwrap_or_else(|| original.tags().clone()),
        )
        .map_err(|e| TallyError::Validation(e.to_string()))?;

        ledger.store_mut().replace_at(absolute, updated.clone())?;
        ledger.set_filter(TransactionFilter::All);

        let message = format!("Updated Transaction: {}\n\nOriginal: {}", updated, original);
        let row = ledger.filtered_position(&updated);
        self.replacement = Some(Replacement {
            absolute,
            original,
            updated,
        });
        Ok(CommandOutput::scrolling(message, row))
    }
}

impl Undoable for UpdateTransaction {
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
