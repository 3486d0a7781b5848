//! Draw detection for N×N tic-tac-toe.

use super::super::{Board, Cell};
use tracing::instrument;

/// Checks if every cell is occupied.
///
/// A full board with no winner is a draw.
#[instrument(skip(cells), fields(cells = cells.len()))]
pub fn all_filled(cells: &[Cell]) -> bool {
    cells.iter().all(|cell| !cell.is_empty())
}

/// Checks if the board is full.
pub fn is_full(board: &Board) -> bool {
    all_filled(board.cells())
}
