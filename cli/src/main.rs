use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use mineclear_core::{CellCount, Controller, Coord, Game, GameConfig};

use crate::command::{Command, HELP};
use crate::render::TerminalRenderer;

mod command;
mod render;

/// Clear the grid without opening a mine.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of columns
    #[arg(long, default_value_t = 15)]
    width: Coord,

    /// Number of rows
    #[arg(long, default_value_t = 15)]
    height: Coord,

    /// Number of mines
    #[arg(long, default_value_t = 5)]
    mines: CellCount,

    /// Seed for mine placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Print every frame as a JSON board snapshot instead of a text grid
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    verbose: Verbosity,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = GameConfig::new(args.width, args.height, args.mines)
        .context("invalid board configuration")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Using seed {seed}");

    let mut controller = Controller::new(Game::new(config, seed), TerminalRenderer::new(args.json));
    controller.play();
    if !args.json {
        println!("{HELP}");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{err:#}");
                continue;
            }
        };

        let result = match command {
            Command::Open(pos) => controller.open(pos),
            Command::Tag(pos) => controller.tag(pos),
            Command::NewGame => {
                controller.play();
                Ok(())
            }
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => break,
        };
        if let Err(err) = result {
            eprintln!("{err}");
        }
    }

    Ok(())
}
