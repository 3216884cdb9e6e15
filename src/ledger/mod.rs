//! In-memory application state
//!
//! The [`Ledger`] exclusively owns the transaction store, the budget book,
//! the immutable rate table, and the active display filter. Commands mutate
//! it; the filtered projection and the summary are recomputed on demand so
//! they can never go stale across mutations.

pub mod budgets;
pub mod filter;
pub mod transactions;

pub use budgets::BudgetBook;
pub use filter::TransactionFilter;
pub use transactions::TransactionStore;

use crate::error::{TallyError, TallyResult};
use crate::models::{Budget, CurrencyTable, Money, MonthYear, Transaction};

/// The single owner of all tracked state
#[derive(Debug)]
pub struct Ledger {
    store: TransactionStore,
    budgets: BudgetBook,
    rates: CurrencyTable,
    filter: TransactionFilter,
}

impl Ledger {
    pub fn new(rates: CurrencyTable) -> Self {
        Self {
            store: TransactionStore::new(),
            budgets: BudgetBook::new(),
            rates,
            filter: TransactionFilter::All,
        }
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TransactionStore {
        &mut self.store
    }

    pub fn budgets(&self) -> &BudgetBook {
        &self.budgets
    }

    pub fn budgets_mut(&mut self) -> &mut BudgetBook {
        &mut self.budgets
    }

    pub fn rates(&self) -> &CurrencyTable {
        &self.rates
    }

    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: TransactionFilter) {
        self.filter = filter;
    }

    /// The filtered projection, re-evaluated against the current store
    pub fn filtered(&self) -> Vec<&Transaction> {
        self.store
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    /// Number of rows in the filtered projection
    pub fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    /// The transaction displayed at `index` in the filtered projection
    pub fn filtered_at(&self, index: usize) -> TallyResult<Transaction> {
        self.filtered()
            .get(index)
            .copied()
            .cloned()
            .ok_or(TallyError::InvalidIndex)
    }

    /// Translate a filtered-view row into an absolute store index
    ///
    /// The displayed list may be a filtered subsequence, so the row number
    /// cannot address the store directly; the displayed transaction is
    /// located in the store by first structural match.
    pub fn translate_index(&self, index: usize) -> TallyResult<usize> {
        let displayed = self.filtered_at(index)?;
        self.store
            .index_of(&displayed)
            .ok_or(TallyError::InvalidIndex)
    }

    /// The filtered-view row a store element currently appears at, if any
    pub fn filtered_position(&self, transaction: &Transaction) -> Option<usize> {
        self.filtered().iter().position(|t| *t == transaction)
    }

    /// Aggregate the filtered projection for one month's summary
    ///
    /// A full recompute over the current filter's result set; nothing is
    /// maintained incrementally, so the result is independent of mutation
    /// order. All amounts are in the reference currency.
    pub fn summary(&self, period: MonthYear) -> LedgerSummary {
        let mut income = Money::zero();
        let mut expense = Money::zero();
        for transaction in self.filtered() {
            let amount = transaction.value().monetary_amount(&self.rates);
            if transaction.is_income() {
                income += amount;
            } else {
                expense += amount;
            }
        }
        let budget = self
            .budgets
            .get(period)
            .map(|b: &Budget| b.value().monetary_amount(&self.rates));
        LedgerSummary {
            period,
            budget,
            balance: income - expense,
            income,
            expense,
        }
    }
}

/// Aggregates shown in the balance bar after every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    /// The month the budget figure belongs to
    pub period: MonthYear,
    /// Budget set for the month, if any, in the reference currency
    pub budget: Option<Money>,
    /// Income minus expenses over the filtered view
    pub balance: Money,
    /// Total income over the filtered view
    pub income: Money,
    /// Total expenses over the filtered view
    pub expense: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, TransactionKind, Value};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn ledger() -> Ledger {
        Ledger::new(CurrencyTable::seeded())
    }

    fn transaction(kind: TransactionKind, description: &str, cents: i64, currency: &str) -> Transaction {
        let table = CurrencyTable::seeded();
        Transaction::new(
            kind,
            description,
            Value::new(Money::from_cents(cents), Currency::new(currency), &table).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            None,
            BTreeSet::new(),
        )
        .unwrap()
    }

    fn expense(description: &str, cents: i64) -> Transaction {
        transaction(TransactionKind::Expense, description, cents, "SGD")
    }

    fn income(description: &str, cents: i64) -> Transaction {
        transaction(TransactionKind::Income, description, cents, "SGD")
    }

    #[test]
    fn test_filtered_projection_tracks_mutations() {
        let mut ledger = ledger();
        ledger.set_filter(TransactionFilter::Keywords(vec!["coffee".to_string()]));
        assert_eq!(ledger.filtered_len(), 0);

        ledger.store_mut().add(expense("Coffee beans", 1200));
        ledger.store_mut().add(expense("Bus fare", 120));
        // re-read reflects the mutation without touching the filter
        assert_eq!(ledger.filtered_len(), 1);
        assert_eq!(ledger.filtered()[0].description(), "Coffee beans");
    }

    #[test]
    fn test_translate_index_through_filter() {
        let mut ledger = ledger();
        ledger.store_mut().add(expense("Bus fare", 120));
        ledger.store_mut().add(expense("Coffee", 300));
        ledger.store_mut().add(expense("Train fare", 180));
        ledger.store_mut().add(expense("Coffee beans", 1200));
        ledger.set_filter(TransactionFilter::Keywords(vec![
            "coffee".to_string(),
        ]));

        // displayed rows: [Coffee, Coffee beans]
        assert_eq!(ledger.translate_index(0).unwrap(), 1);
        assert_eq!(ledger.translate_index(1).unwrap(), 3);
        assert!(matches!(
            ledger.translate_index(2),
            Err(TallyError::InvalidIndex)
        ));
    }

    #[test]
    fn test_summary_over_filtered_view() {
        let mut ledger = ledger();
        ledger.store_mut().add(income("Salary", 350000));
        ledger.store_mut().add(expense("Rent", 120000));
        ledger.store_mut().add(expense("Coffee", 300));

        let period = MonthYear::new(3, 2024).unwrap();
        let summary = ledger.summary(period);
        assert_eq!(summary.income, Money::from_cents(350000));
        assert_eq!(summary.expense, Money::from_cents(120300));
        assert_eq!(summary.balance, Money::from_cents(229700));
        assert_eq!(summary.budget, None);

        // narrowing the filter narrows the aggregation
        ledger.set_filter(TransactionFilter::Keywords(vec!["coffee".to_string()]));
        let summary = ledger.summary(period);
        assert_eq!(summary.income, Money::zero());
        assert_eq!(summary.expense, Money::from_cents(300));
        assert_eq!(summary.balance, Money::from_cents(-300));
    }

    #[test]
    fn test_summary_converts_to_reference_currency() {
        let mut ledger = ledger();
        ledger
            .store_mut()
            .add(transaction(TransactionKind::Expense, "Hotel", 10000, "USD"));

        let summary = ledger.summary(MonthYear::new(3, 2024).unwrap());
        // 100 USD -> 136.99 SGD
        assert_eq!(summary.expense, Money::from_cents(13699));
    }
}
