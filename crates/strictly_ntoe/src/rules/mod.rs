//! Game rules for N×N tic-tac-toe.
//!
//! Pure functions over board cells. Rules are kept apart from board storage
//! and from the controller so they can be re-run independently to check a
//! recorded phase.

pub mod draw;
pub mod win;

pub use draw::{all_filled, is_full};
pub use win::{check_winner, check_winner_joined, evaluate, evaluate_joined, scan_columns, scan_diagonals, scan_rows};

use super::{Board, GamePhase};

/// Derives the phase a board is in from scratch.
pub fn phase_of(board: &Board) -> GamePhase {
    match check_winner(board) {
        Some(player) => GamePhase::Won(player),
        None if is_full(board) => GamePhase::Draw,
        None => GamePhase::InProgress,
    }
}
