//! The interactive read-eval-print loop
//!
//! Reads one line at a time, tokenizes it shell-style, parses it with clap,
//! and drives the engine. The loop itself is also the view listener: it
//! prints the balance bar every time the engine refreshes.

use std::io::{self, BufRead, Write};

use clap::{CommandFactory, Parser};
use tracing::debug;

use crate::commands::Command;
use crate::display::{render_summary, render_transactions};
use crate::engine::Engine;
use crate::ledger::LedgerSummary;
use crate::view::ViewListener;

use super::args::ReplCli;

const PROMPT: &str = "tally> ";

/// Prints the balance bar after every successful command
#[derive(Debug, Clone, Copy, Default)]
pub struct CliView;

impl ViewListener for CliView {
    fn refresh(&mut self, summary: &LedgerSummary) {
        println!("{}", render_summary(summary));
    }

    fn scroll_to(&mut self, row: usize) {
        debug!(row, "scroll requested");
    }
}

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Exit,
}

/// Run the REPL until exit or end of input
pub fn run(engine: &mut Engine) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("{}", PROMPT);
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if handle_line(engine, &line) == LineOutcome::Exit {
            return Ok(());
        }
        print!("{}", PROMPT);
        stdout.flush()?;
    }
    Ok(())
}

/// Process one line of input
pub fn handle_line(engine: &mut Engine, line: &str) -> LineOutcome {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(e) => {
            println!("Invalid input: {}", e);
            return LineOutcome::Continue;
        }
    };
    if tokens.is_empty() {
        return LineOutcome::Continue;
    }

    if tokens[0] == "help" {
        match engine.execute(Command::Help) {
            Ok(output) => println!("{}", output.message),
            Err(e) => println!("{}", e),
        }
        println!("{}", ReplCli::command().render_help());
        return LineOutcome::Continue;
    }

    let parsed = match ReplCli::try_parse_from(&tokens) {
        Ok(cli) => cli.command,
        Err(e) => {
            // clap renders its own errors, usage, and subcommand help
            println!("{}", e.render());
            return LineOutcome::Continue;
        }
    };

    let today = chrono::Local::now().date_naive();
    let command = match parsed.into_command(engine.ledger().rates(), today) {
        Ok(command) => command,
        Err(e) => {
            println!("{}", e);
            return LineOutcome::Continue;
        }
    };

    // anything that touches the store or the filter re-renders the list
    let shows_list =
        command.is_mutating() || matches!(command, Command::Find(_) | Command::List(_));

    match engine.execute(command) {
        Ok(output) => {
            println!("{}", output.message);
            if output.exit {
                return LineOutcome::Exit;
            }
            if shows_list {
                println!("{}", render_transactions(&engine.ledger().filtered()));
            }
        }
        Err(e) => println!("{}", e),
    }
    LineOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurrencyTable;
    use crate::storage::InMemorySnapshotStore;

    fn engine() -> Engine {
        Engine::new(
            CurrencyTable::seeded(),
            Box::new(InMemorySnapshotStore::new()),
        )
    }

    #[test]
    fn test_add_then_exit() {
        let mut engine = engine();
        assert_eq!(
            handle_line(&mut engine, "add-expense Laksa -v 4.50"),
            LineOutcome::Continue
        );
        assert_eq!(engine.ledger().store().len(), 1);
        assert_eq!(handle_line(&mut engine, "exit"), LineOutcome::Exit);
    }

    #[test]
    fn test_quoted_descriptions_survive_tokenizing() {
        let mut engine = engine();
        handle_line(&mut engine, "add-expense \"Chicken rice set\" -v 5.80");
        assert_eq!(
            engine.ledger().store().get(0).unwrap().description(),
            "Chicken rice set"
        );
    }

    #[test]
    fn test_bad_input_keeps_looping() {
        let mut engine = engine();
        assert_eq!(handle_line(&mut engine, ""), LineOutcome::Continue);
        assert_eq!(handle_line(&mut engine, "nonsense"), LineOutcome::Continue);
        assert_eq!(
            handle_line(&mut engine, "add-expense Laksa -v nope"),
            LineOutcome::Continue
        );
        assert!(engine.ledger().store().is_empty());
    }

    #[test]
    fn test_undo_through_repl() {
        let mut engine = engine();
        handle_line(&mut engine, "add-expense Laksa -v 4.50");
        handle_line(&mut engine, "undo");
        assert!(engine.ledger().store().is_empty());
        handle_line(&mut engine, "redo");
        assert_eq!(engine.ledger().store().len(), 1);
    }
}
