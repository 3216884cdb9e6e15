//! tally-cli - Terminal-based personal expense and income tracker
//!
//! This library provides the core functionality for the tally-cli
//! application: an in-memory transaction store with tagging, recurrence
//! cloning, per-month budgets, currency conversion, and undo/redo of every
//! mutating command.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, transactions, tags, budgets)
//! - `ledger`: The in-memory store, budget book, and filtered projection
//! - `commands`: One struct per user intent, with undo/redo capture
//! - `history`: The two-stack undo/redo manager
//! - `engine`: The execute → track → persist → refresh pipeline
//! - `storage`: Snapshot persistence behind a trait
//! - `display`: Table and summary rendering
//! - `cli`: The clap-based REPL

pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod history;
pub mod ledger;
pub mod models;
pub mod storage;
pub mod view;

pub use error::{TallyError, TallyResult};
