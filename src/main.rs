//! Terminal match-three runner (default binary).
//!
//! Reads commands from stdin (`x y`, `hint`, `state`, `quit`) and prints the
//! board after every move. Logs go to stderr; set `RUST_LOG=debug` to follow
//! cluster resolution.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use match3::cli::{self, Command};
use match3::core::{EngineConfig, GameSession, ItemCatalog, SelectionResult};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = cli::parse_args(&args, EngineConfig::from_env())?;

    let catalog = match &options.catalog_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            ItemCatalog::from_json(&json)?
        }
        None => ItemCatalog::standard(),
    };

    let mut session = GameSession::initialize(options.config, catalog)?;
    run(&mut session)
}

fn run(session: &mut GameSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "{}", cli::HELP)?;
    write!(stdout, "{}", cli::render(session))?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match cli::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(stdout, "{}", err)?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(stdout, "{}", cli::HELP)?,
            Command::State => writeln!(stdout, "{}", session.current_state().to_json()?)?,
            Command::Hint => match session.hint() {
                Some((a, b)) => writeln!(stdout, "try {} <-> {}", a, b)?,
                None => writeln!(stdout, "no move available")?,
            },
            Command::Select(x, y) => {
                let result = session.select_cell(x, y)?;
                if let Some(message) = cli::describe_selection(&result) {
                    writeln!(stdout, "{}", message)?;
                }
                let events = match result {
                    SelectionResult::Resolved(events) => events,
                    SelectionResult::Resolving => {
                        let mut events = Vec::new();
                        while let Some(event) = session.advance()? {
                            events.push(event);
                        }
                        events
                    }
                    _ => Vec::new(),
                };
                for event in &events {
                    writeln!(stdout, "  {}", cli::describe_event(event))?;
                }
                if !events.is_empty() {
                    write!(stdout, "{}", cli::render(session))?;
                }
            }
        }
        stdout.flush()?;

        if session.state().is_terminal() {
            writeln!(stdout, "game over: {}", session.state().as_str())?;
            break;
        }
    }

    info!(score = session.score(), "driver exiting");
    Ok(())
}
