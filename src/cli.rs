//! Terminal driver plumbing: argument parsing, stdin commands, text output.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::core::{
    EngineConfig, EventKind, GameSession, ResolutionEvent, ResolveMode, SelectionResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub config: EngineConfig,
    pub catalog_path: Option<PathBuf>,
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, value))
}

/// Parse command-line flags on top of `base` (usually from the environment)
pub fn parse_args(args: &[String], base: EngineConfig) -> Result<CliOptions> {
    let mut config = base;
    let mut catalog_path = None;
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--seed" => {
                i += 1;
                config.seed = parse_number(flag_value(args, i, flag)?, flag)?;
            }
            "--width" => {
                i += 1;
                config.width = parse_number(flag_value(args, i, flag)?, flag)?;
            }
            "--height" => {
                i += 1;
                config.height = parse_number(flag_value(args, i, flag)?, flag)?;
            }
            "--goal" => {
                i += 1;
                config.goal_score = parse_number(flag_value(args, i, flag)?, flag)?;
            }
            "--moves" => {
                i += 1;
                config.move_budget = parse_number(flag_value(args, i, flag)?, flag)?;
            }
            "--catalog" => {
                i += 1;
                catalog_path = Some(PathBuf::from(flag_value(args, i, flag)?));
            }
            "--stepped" => config.resolve_mode = ResolveMode::Stepped,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(CliOptions {
        config,
        catalog_path,
    })
}

/// One line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(usize, usize),
    Hint,
    State,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(None);
    };

    let command = match first {
        "q" | "quit" | "exit" => Command::Quit,
        "h" | "hint" => Command::Hint,
        "s" | "state" => Command::State,
        "?" | "help" => Command::Help,
        x => {
            let y = words
                .next()
                .ok_or_else(|| anyhow!("expected `x y`, got `{}`", line.trim()))?;
            Command::Select(parse_number(x, "x")?, parse_number(y, "y")?)
        }
    };
    if words.next().is_some() {
        return Err(anyhow!("trailing input: `{}`", line.trim()));
    }
    Ok(Some(command))
}

pub const HELP: &str = "commands: `x y` select a cell, `hint`, `state` (json), `help`, `quit`";

/// Board with column and row labels, followed by the status line
pub fn render(session: &GameSession) -> String {
    let grid = session.grid();
    let mut out = String::new();

    out.push_str("   ");
    for x in 0..grid.width() {
        let _ = write!(out, "{:<3}", x);
    }
    out.push('\n');
    for (y, line) in grid.to_string().lines().enumerate() {
        let _ = writeln!(out, "{:<2} {}", y, line);
    }
    let _ = writeln!(
        out,
        "score {}/{}  moves {}  {}",
        session.score(),
        session.goal_score(),
        session.moves_remaining(),
        session.state().as_str()
    );
    out
}

/// One-line summary of a resolution event
pub fn describe_event(event: &ResolutionEvent) -> String {
    let what = match event.kind {
        EventKind::Cluster(shape) if shape.cross => "cross",
        EventKind::Cluster(shape) if shape.line_of_five => "line of five",
        EventKind::Cluster(shape) if shape.line_of_four => "line of four",
        EventKind::Cluster(_) => "match",
        EventKind::ColorClear => "color clear",
        EventKind::BoardClear => "board clear",
        EventKind::Reshuffle => "reshuffle",
    };
    let mut line = format!("{}: {} cells, +{}", what, event.cleared.len(), event.score_delta);
    for spawn in &event.spawned {
        let _ = write!(line, ", {} at {}", spawn.item, spawn.position);
    }
    line
}

pub fn describe_selection(result: &SelectionResult) -> Option<String> {
    match result {
        SelectionResult::None => None,
        SelectionResult::PendingFirst(pos) => Some(format!("picked {}", pos)),
        SelectionResult::Resolved(_) | SelectionResult::Resolving => None,
        SelectionResult::NoMatch => Some("no match, swap undone".to_string()),
        SelectionResult::RejectedBusy => Some("still resolving".to_string()),
        SelectionResult::RejectedNonAdjacent => Some("cells are not adjacent".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ItemCatalog;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_overrides_base() {
        let opts = parse_args(
            &args(&["--seed", "9", "--width", "6", "--moves", "5", "--catalog", "items.json"]),
            EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(opts.config.seed, 9);
        assert_eq!(opts.config.width, 6);
        assert_eq!(opts.config.height, 8);
        assert_eq!(opts.config.move_budget, 5);
        assert_eq!(opts.catalog_path, Some(PathBuf::from("items.json")));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--seed"]), EngineConfig::default()).is_err());
        assert!(parse_args(&args(&["--goal", "lots"]), EngineConfig::default()).is_err());
        assert!(parse_args(&args(&["--bogus"]), EngineConfig::default()).is_err());
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("3 4").unwrap(), Some(Command::Select(3, 4)));
        assert_eq!(parse_command("  hint ").unwrap(), Some(Command::Hint));
        assert_eq!(parse_command("q").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("").unwrap(), None);
        assert!(parse_command("3").is_err());
        assert!(parse_command("3 x").is_err());
        assert!(parse_command("1 2 3").is_err());
    }

    #[test]
    fn test_render_has_labels_and_status() {
        let session =
            GameSession::initialize(EngineConfig::default().with_size(4, 3), ItemCatalog::standard())
                .unwrap();
        let text = render(&session);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 3 + 1);
        assert!(lines[0].starts_with("   0"));
        assert!(lines[1].starts_with("0  "));
        assert!(lines[4].contains("moves 20"));
    }
}
