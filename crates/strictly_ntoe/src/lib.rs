//! Strictly N-toe - rules engine for N×N tic-tac-toe
//!
//! Two players alternate placing marks on an N×N board; a player who fills a
//! row, a column or either diagonal wins, and a full board with no winner is
//! a draw.
//!
//! # Architecture
//!
//! - **Rules**: pure win and draw detection over a flat row-major board
//! - **Controller**: sole owner of board, turn counter, phase and busy gate
//! - **Shared game**: async handle that evaluates moves on a spawned task and
//!   publishes phase changes
//! - **Contracts / invariants**: pre- and postconditions checked on every move
//!
//! # Example
//!
//! ```
//! use strictly_ntoe::{BoardSize, GameController, GamePhase, Player};
//!
//! let mut game = GameController::new(BoardSize::CLASSIC);
//! for index in [0, 4, 1, 5, 2] {
//!     game.attempt_move(index).expect("legal move");
//! }
//! assert_eq!(game.phase(), GamePhase::Won(Player::Player1));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod controller;
mod error;
mod shared;
mod types;

pub mod contracts;
pub mod invariants;
pub mod rules;

// Crate-level exports - Domain types
pub use types::{Board, BoardSize, Cell, GamePhase, Player};

// Crate-level exports - Errors
pub use error::InvalidInput;

// Crate-level exports - Moves and controller
pub use action::{MoveAccepted, MoveRejection, PendingMove};
pub use controller::{Evaluation, GameController, PlayState};
pub use shared::SharedGame;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Detector entry points
pub use rules::{all_filled, evaluate, evaluate_joined};
