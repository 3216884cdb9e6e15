//! Transaction display formatting
//!
//! Renders the filtered view as a table and the aggregates as a one-line
//! balance bar. Row numbers are 1-based, matching the indices commands take.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::ledger::LedgerSummary;
use crate::models::{Money, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Remark")]
    remark: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl TransactionRow {
    fn new(index: usize, transaction: &Transaction) -> Self {
        Self {
            index,
            kind: transaction.kind().to_string(),
            description: transaction.description().to_string(),
            value: transaction.value().to_string(),
            date: transaction.date().format("%d/%m/%Y").to_string(),
            remark: transaction.remark().unwrap_or("").to_string(),
            tags: transaction
                .tags()
                .iter()
                .map(|t| t.name())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Format the displayed transaction list as a table
pub fn render_transactions(transactions: &[&Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions to show.".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .enumerate()
        .map(|(i, t)| TransactionRow::new(i + 1, t))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Format the balance bar shown after every command
pub fn render_summary(summary: &LedgerSummary) -> String {
    let budget = match summary.budget {
        Some(amount) => format_amount(amount),
        None => "not set".to_string(),
    };
    format!(
        "[{}] Balance: {} | Income: {} | Expenses: {} | Budget: {}",
        summary.period,
        format_amount(summary.balance),
        format_amount(summary.income),
        format_amount(summary.expense),
        budget
    )
}

fn format_amount(amount: Money) -> String {
    amount.format_grouped()
}
