//! Convert an amount across currencies

use crate::error::{TallyError, TallyResult};
use crate::ledger::Ledger;
use crate::models::{Currency, Money};

use super::CommandOutput;

/// Converts an amount from the first listed currency into each of the rest
///
/// Pure: reads only the ledger's rate table and touches no state. Unknown
/// currency codes pass through with the identity rate.
#[derive(Debug)]
pub struct ConvertValue {
    amount: Money,
    currencies: Vec<Currency>,
}

impl ConvertValue {
    pub fn new(amount: Money, currencies: Vec<Currency>) -> Self {
        Self { amount, currencies }
    }

    pub fn execute(&mut self, ledger: &mut Ledger) -> TallyResult<CommandOutput> {
        let (base, targets) = self.currencies.split_first().ok_or_else(|| {
            TallyError::Validation("At least one currency must be provided".into())
        })?;

        let mut message = format!("Converting from {} {}\n", self.amount.format_grouped(), base);
        for target in targets {
            let converted = ledger.rates().convert(self.amount, base, target);
            message.push_str(&format!("To {}: {}\n", target, converted.format_grouped()));
        }
        Ok(CommandOutput::message(message.trim_end()))
    }
}
