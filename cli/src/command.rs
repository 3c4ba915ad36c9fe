use std::str::FromStr;

use anyhow::{Context, bail};
use mineclear_core::{Coord, Position};

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Open(Position),
    Tag(Position),
    NewGame,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };
        let args: Vec<&str> = words.collect();

        Ok(match verb {
            "o" | "open" => Command::Open(parse_position(&args)?),
            "t" | "tag" | "f" | "flag" => Command::Tag(parse_position(&args)?),
            "n" | "new" => Command::NewGame,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => bail!("unknown command {other:?}, try \"help\""),
        })
    }
}

/// Accepts either `<row> <column>` or a single `<row>-<column>` key.
fn parse_position(args: &[&str]) -> anyhow::Result<Position> {
    match args {
        [key] => key
            .parse()
            .with_context(|| format!("cannot read position {key:?}")),
        [row, column] => {
            let row: Coord = row.parse().with_context(|| format!("bad row {row:?}"))?;
            let column: Coord = column
                .parse()
                .with_context(|| format!("bad column {column:?}"))?;
            Ok(Position::new(row, column))
        }
        _ => bail!("expected a position as \"<row> <column>\" or \"<row>-<column>\""),
    }
}

pub const HELP: &str = "\
commands:
  o <row> <column>   open a cell (also: open, or a 3-4 style key)
  t <row> <column>   tag or untag a cell (also: tag, f, flag)
  n                  start a new game
  q                  quit";
