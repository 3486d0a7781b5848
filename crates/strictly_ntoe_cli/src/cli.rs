//! Command-line interface for strictly_ntoe.

use clap::{Parser, Subcommand};

/// Strictly N-toe - N×N tic-tac-toe rules engine
#[derive(Parser, Debug)]
#[command(name = "ntoe")]
#[command(about = "Play or check N×N tic-tac-toe games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML game config
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Board side length (overrides the config file)
    #[arg(short, long, global = true)]
    pub size: Option<usize>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game, one cell index per move
    Play {
        /// Cell indices to play in order; read from stdin when omitted
        moves: Vec<usize>,

        /// Print each board snapshot as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a board given as a string of X, O and . cells
    Check {
        /// Cells in row-major order; whitespace is ignored
        board: String,
    },
}
