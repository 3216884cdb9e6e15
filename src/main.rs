use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tally::cli::{self, CliView};
use tally::config::{Settings, TallyPaths};
use tally::engine::Engine;
use tally::storage::JsonSnapshotStore;

#[derive(Parser)]
#[command(
    name = "tally",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based personal expense and income tracker",
    long_about = "tally is a terminal-based tracker for everyday expenses and \
                  income. It supports tagging, recurring clones, per-month \
                  budgets, currency conversion, and undo/redo of every \
                  mutating command."
)]
struct Cli {}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let _cli = Cli::parse();

    let paths = TallyPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = JsonSnapshotStore::new(paths.snapshot_file());
    let mut engine =
        Engine::new(settings.rate_table(), Box::new(storage)).with_view(Box::new(CliView));
    engine.load()?;

    println!("Welcome to tally. Type 'help' to see available commands.");
    cli::run(&mut engine)
}
