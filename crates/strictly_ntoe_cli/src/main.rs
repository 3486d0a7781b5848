//! Strictly N-toe - command-line driver
//!
//! Feeds moves to the rules engine and prints the board and phase after
//! each one.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use std::io::BufRead;
use strictly_ntoe::{Board, BoardSize, Cell, GameConfig, GamePhase, Player, SharedGame, rules};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let size = resolve_size(&cli)?;

    match cli.command {
        Command::Play { moves, json } => run_play(size, moves, json).await,
        Command::Check { board } => run_check(size, &board),
    }
}

/// Picks the board size from `--size`, then the config file, then the default.
#[instrument(skip(cli))]
fn resolve_size(cli: &Cli) -> Result<BoardSize> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(size) = cli.size {
        config = config.with_size(size);
    }
    let size = config.board_size()?;
    debug!(%size, "Resolved board size");
    Ok(size)
}

/// Play a game from a move list or stdin
async fn run_play(size: BoardSize, moves: Vec<usize>, json: bool) -> Result<()> {
    let game = SharedGame::new(size);
    info!(%size, "Game started");
    render(&game.snapshot(), game.phase(), json)?;

    let moves: Box<dyn Iterator<Item = Result<usize>>> = if moves.is_empty() {
        Box::new(read_moves(std::io::stdin().lock()))
    } else {
        Box::new(moves.into_iter().map(Ok))
    };

    for index in moves {
        let index = index?;
        let handle = match game.attempt_move(index) {
            Ok(handle) => handle,
            Err(rejection) => {
                warn!(index, %rejection, "Move rejected");
                println!("{}", rejection);
                continue;
            }
        };

        let accepted = handle.await.context("Evaluation task failed")??;
        println!("{} plays {}", accepted.player, accepted.index);
        render(&game.snapshot(), accepted.phase, json)?;

        if accepted.phase.is_terminal() {
            break;
        }
    }

    Ok(())
}

/// Parses one cell index per non-empty line.
fn read_moves(input: impl BufRead) -> impl Iterator<Item = Result<usize>> {
    input
        .lines()
        .map(|line| line.context("Failed to read move"))
        .filter(|line| !matches!(line, Ok(text) if text.trim().is_empty()))
        .map(|line| {
            let line = line?;
            line.trim()
                .parse::<usize>()
                .with_context(|| format!("Not a cell index: {:?}", line.trim()))
        })
}

fn render(board: &Board, phase: GamePhase, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(board)?);
    } else {
        println!("{}", board.display());
    }
    if phase.is_terminal() {
        println!("{}", phase);
    }
    Ok(())
}

/// Evaluate a board string and print its phase
#[instrument]
fn run_check(size: BoardSize, text: &str) -> Result<()> {
    let board = parse_board(size, text)?;
    let player1 = board.count(Player::Player1);
    let player2 = board.count(Player::Player2);
    if player1 != player2 && player1 != player2 + 1 {
        warn!(player1, player2, "Board cannot arise from alternating play");
    }

    println!("{}", board.display());
    println!("{}", rules::phase_of(&board));
    Ok(())
}

fn parse_board(size: BoardSize, text: &str) -> Result<Board> {
    let cells = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_ascii_uppercase() {
            'X' => Ok(Cell::Occupied(Player::Player1)),
            'O' => Ok(Cell::Occupied(Player::Player2)),
            '.' | '_' | '-' => Ok(Cell::Empty),
            other => bail!("Unknown cell {:?}", other),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Board::from_cells(size, cells)?)
}
