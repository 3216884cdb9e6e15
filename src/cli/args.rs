//! REPL command definitions and conversion into engine commands
//!
//! clap is the command grammar: each line the user types is tokenized and
//! parsed into a [`ReplCommand`], then converted into the structured command
//! the engine executes. User-facing indices are 1-based and are converted
//! here; the engine only ever sees 0-based rows.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::commands::{
    AddTransaction, ClearAll, CloneTransaction, Command, ConvertValue, DeleteTransaction,
    FindTransactions, ListTransactions, SetBudget, TagTransaction, UntagTransaction,
    UpdateDescriptor, UpdateTransaction,
};
use crate::error::{TallyError, TallyResult};
use crate::models::{
    Budget, Currency, CurrencyTable, Frequency, Money, MonthYear, Occurrence, Tag, Transaction,
    TransactionKind, Value,
};

/// One line of REPL input
#[derive(Parser, Debug)]
#[command(
    multicall = true,
    name = "tally",
    about = "Track expenses and income, with tags, budgets, and undo/redo"
)]
pub struct ReplCli {
    #[command(subcommand)]
    pub command: ReplCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReplCommand {
    /// Add an expense
    AddExpense(AddArgs),

    /// Add an income
    AddIncome(AddArgs),

    /// Delete the transaction at a displayed row
    Delete {
        /// Row number from the displayed list
        index: usize,
    },

    /// Clone the transaction at a displayed row, optionally on a schedule
    Clone {
        /// Row number from the displayed list
        index: usize,
        /// Recurrence frequency: none, daily, weekly, monthly, yearly
        #[arg(short = 'f', long, default_value = "none")]
        frequency: String,
        /// Number of copies to generate (0 = one copy dated today)
        #[arg(short = 'n', long, default_value_t = 0)]
        count: u32,
    },

    /// Add tags to the transaction at a displayed row
    Tag {
        /// Row number from the displayed list
        index: usize,
        /// Tags to add
        #[arg(short = 't', long = "tag", required = true)]
        tags: Vec<String>,
    },

    /// Remove tags from the transaction at a displayed row
    Untag {
        /// Row number from the displayed list
        index: usize,
        /// Tags to remove
        #[arg(short = 't', long = "tag", required = true)]
        tags: Vec<String>,
    },

    /// Edit fields of the transaction at a displayed row
    Update {
        /// Row number from the displayed list
        index: usize,
        /// New description
        #[arg(short = 'd', long)]
        description: Option<String>,
        /// New amount, e.g. "4.50"
        #[arg(short = 'v', long)]
        value: Option<String>,
        /// Currency code for the new amount
        #[arg(short = 'c', long)]
        currency: Option<String>,
        /// New date as dd/mm/yyyy
        #[arg(long)]
        date: Option<String>,
        /// New remark
        #[arg(short = 'r', long)]
        remark: Option<String>,
        /// Replacement tag set
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,
    },

    /// Set the budget for a month
    Budget {
        /// Month as mm/yyyy
        month: String,
        /// Budget amount, e.g. "500"
        #[arg(short = 'v', long)]
        value: String,
        /// Currency code (defaults to the reference currency)
        #[arg(short = 'c', long)]
        currency: Option<String>,
    },

    /// Remove every transaction and budget
    Clear,

    /// Convert an amount from the first currency into the rest
    Convert {
        /// Amount to convert
        #[arg(short = 'v', long, default_value = "1")]
        value: String,
        /// Currencies; the first is the source
        #[arg(short = 'c', long = "currency", required = true)]
        currencies: Vec<String>,
    },

    /// Show only transactions whose description matches any keyword
    Find {
        /// Keywords, matched per word and case-insensitively
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Show all transactions, or only one month's
    List {
        /// Month as mm/yyyy
        #[arg(short = 'm', long)]
        month: Option<String>,
    },

    /// Undo the last tracked command
    Undo,

    /// Reapply the last undone command
    Redo,

    /// Exit the tracker
    Exit,
}

/// Shared arguments of add-expense and add-income
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Description of the transaction
    pub description: String,
    /// Amount, e.g. "4.50"
    #[arg(short = 'v', long)]
    pub value: String,
    /// Currency code (defaults to the reference currency)
    #[arg(short = 'c', long)]
    pub currency: Option<String>,
    /// Date as dd/mm/yyyy (defaults to today)
    #[arg(short = 'd', long)]
    pub date: Option<String>,
    /// Optional remark
    #[arg(short = 'r', long)]
    pub remark: Option<String>,
    /// Tags
    #[arg(short = 't', long = "tag")]
    pub tags: Vec<String>,
}

impl ReplCommand {
    /// Build the structured engine command for this input
    pub fn into_command(self, rates: &CurrencyTable, today: NaiveDate) -> TallyResult<Command> {
        match self {
            Self::AddExpense(args) => build_add(TransactionKind::Expense, args, rates, today),
            Self::AddIncome(args) => build_add(TransactionKind::Income, args, rates, today),
            Self::Delete { index } => {
                Ok(Command::Delete(DeleteTransaction::new(displayed_index(index)?)))
            }
            Self::Clone {
                index,
                frequency,
                count,
            } => {
                let frequency: Frequency = frequency
                    .parse()
                    .map_err(TallyError::Validation)?;
                Ok(Command::Clone(CloneTransaction::new(
                    displayed_index(index)?,
                    Occurrence::new(frequency, count),
                    today,
                )))
            }
            Self::Tag { index, tags } => Ok(Command::Tag(TagTransaction::new(
                displayed_index(index)?,
                parse_tags(&tags)?,
            ))),
            Self::Untag { index, tags } => Ok(Command::Untag(UntagTransaction::new(
                displayed_index(index)?,
                parse_tags(&tags)?,
            ))),
            Self::Update {
                index,
                description,
                value,
                currency,
                date,
                remark,
                tags,
            } => {
                let descriptor = UpdateDescriptor {
                    description,
                    value: value
                        .map(|raw| parse_value(&raw, currency.as_deref(), rates))
                        .transpose()?,
                    date: date.map(|raw| parse_date(&raw)).transpose()?,
                    remark,
                    tags: if tags.is_empty() {
                        None
                    } else {
                        Some(parse_tags(&tags)?)
                    },
                };
                Ok(Command::Update(UpdateTransaction::new(
                    displayed_index(index)?,
                    descriptor,
                )))
            }
            Self::Budget {
                month,
                value,
                currency,
            } => {
                let period = parse_month(&month)?;
                let value = parse_value(&value, currency.as_deref(), rates)?;
                Ok(Command::Budget(SetBudget::new(Budget::new(period, value))))
            }
            Self::Clear => Ok(Command::Clear(ClearAll::new())),
            Self::Convert { value, currencies } => {
                let amount = Money::parse(&value)
                    .map_err(|e| TallyError::Validation(e.to_string()))?;
                let currencies = currencies.iter().map(Currency::new).collect();
                Ok(Command::Convert(ConvertValue::new(amount, currencies)))
            }
            Self::Find { keywords } => Ok(Command::Find(FindTransactions::new(keywords))),
            Self::List { month } => Ok(match month {
                Some(raw) => Command::List(ListTransactions::in_month(parse_month(&raw)?)),
                None => Command::List(ListTransactions::all()),
            }),
            Self::Undo => Ok(Command::Undo),
            Self::Redo => Ok(Command::Redo),
            Self::Exit => Ok(Command::Exit),
        }
    }
}

fn build_add(
    kind: TransactionKind,
    args: AddArgs,
    rates: &CurrencyTable,
    today: NaiveDate,
) -> TallyResult<Command> {
    let value = parse_value(&args.value, args.currency.as_deref(), rates)?;
    let date = args
        .date
        .map(|raw| parse_date(&raw))
        .transpose()?
        .unwrap_or(today);
    let transaction = Transaction::new(
        kind,
        args.description,
        value,
        date,
        args.remark,
        parse_tags(&args.tags)?,
    )
    .map_err(|e| TallyError::Validation(e.to_string()))?;
    Ok(Command::Add(AddTransaction::new(transaction)))
}

/// Convert a 1-based displayed row number to a 0-based index
fn displayed_index(one_based: usize) -> TallyResult<usize> {
    one_based.checked_sub(1).ok_or(TallyError::InvalidIndex)
}

fn parse_value(raw: &str, currency: Option<&str>, rates: &CurrencyTable) -> TallyResult<Value> {
    let amount = Money::parse(raw).map_err(|e| TallyError::Validation(e.to_string()))?;
    let currency = currency
        .map(Currency::new)
        .unwrap_or_else(|| rates.reference().clone());
    Value::new(amount, currency, rates).map_err(|e| TallyError::Validation(e.to_string()))
}

fn parse_date(raw: &str) -> TallyResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y").map_err(|_| {
        TallyError::Validation(format!("Dates should be in dd/mm/yyyy format, got: {}", raw))
    })
}

fn parse_month(raw: &str) -> TallyResult<MonthYear> {
    let invalid = || {
        TallyError::Validation(format!("Months should be in mm/yyyy format, got: {}", raw))
    };
    let (month, year) = raw.trim().split_once('/').ok_or_else(invalid)?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    MonthYear::new(month, year).map_err(|e| TallyError::Validation(e.to_string()))
}

fn parse_tags(raw: &[String]) -> TallyResult<BTreeSet<Tag>> {
    raw.iter()
        .map(|name| Tag::new(name).map_err(|e| TallyError::Validation(e.to_string())))
        .collect()
}
