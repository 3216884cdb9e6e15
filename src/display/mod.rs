//! Terminal rendering of the filtered transaction list and summary

pub mod transaction;

pub use transaction::{render_summary, render_transactions};
