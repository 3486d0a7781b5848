//! Win detection for N×N tic-tac-toe.
//!
//! A line (row, column, or diagonal) is won when one player holds all N of
//! its cells. The three sub-scans are independent pure functions; when more
//! than one line is complete they are consulted in a fixed order (rows,
//! columns, main diagonal, anti-diagonal) so every caller sees the same
//! winner.

use super::super::{Board, Cell, InvalidInput, Player};
use tracing::{instrument, trace};

/// Per-player occupancy along one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    player1: usize,
    player2: usize,
}

impl Tally {
    fn add(&mut self, cell: Cell) {
        match cell {
            Cell::Empty => {}
            Cell::Occupied(Player::Player1) => self.player1 += 1,
            Cell::Occupied(Player::Player2) => self.player2 += 1,
        }
    }

    /// The player holding all `n` cells of the line, if any.
    fn complete(self, n: usize) -> Option<Player> {
        if self.player1 == n {
            Some(Player::Player1)
        } else if self.player2 == n {
            Some(Player::Player2)
        } else {
            None
        }
    }
}

/// Checks that `cells` is a well-formed `size`×`size` board.
#[track_caller]
fn validate(cells: &[Cell], size: usize) -> Result<(), InvalidInput> {
    if size == 0 {
        return Err(InvalidInput::new("Board size must be at least 1"));
    }
    match size.checked_mul(size) {
        Some(expected) if expected == cells.len() => Ok(()),
        _ => Err(InvalidInput::new(format!(
            "Board of size {} cannot hold {} cells",
            size,
            cells.len()
        ))),
    }
}

/// First completed row, scanning rows in ascending order.
///
/// Assumes `cells.len() == size * size`.
pub fn scan_rows(cells: &[Cell], size: usize) -> Option<Player> {
    let mut tallies = vec![Tally::default(); size];
    for (index, cell) in cells.iter().enumerate() {
        tallies[index / size].add(*cell);
    }
    tallies.into_iter().find_map(|tally| tally.complete(size))
}

/// First completed column, scanning columns in ascending order.
///
/// Assumes `cells.len() == size * size`.
pub fn scan_columns(cells: &[Cell], size: usize) -> Option<Player> {
    let mut tallies = vec![Tally::default(); size];
    for (index, cell) in cells.iter().enumerate() {
        tallies[index % size].add(*cell);
    }
    tallies.into_iter().find_map(|tally| tally.complete(size))
}

/// Completed diagonal, main diagonal before anti-diagonal.
///
/// For odd N both diagonals include the centre cell.
pub fn scan_diagonals(cells: &[Cell], size: usize) -> Option<Player> {
    let mut main = Tally::default();
    let mut anti = Tally::default();
    for (index, cell) in cells.iter().enumerate() {
        let row = index / size;
        let column = index % size;
        if row == column {
            main.add(*cell);
        }
        if row == size - 1 - column {
            anti.add(*cell);
        }
    }
    main.complete(size).or_else(|| anti.complete(size))
}

/// Returns the winning player, if any line is complete.
///
/// # Errors
///
/// Returns [`InvalidInput`] if `size` is zero or `cells.len() != size²`.
#[instrument(skip(cells), fields(cells = cells.len()))]
pub fn evaluate(cells: &[Cell], size: usize) -> Result<Option<Player>, InvalidInput> {
    validate(cells, size)?;

    let winner = scan_rows(cells, size)
        .or_else(|| scan_columns(cells, size))
        .or_else(|| scan_diagonals(cells, size));

    trace!(?winner, "Evaluated board");
    Ok(winner)
}

/// Same result as [`evaluate`], with the three sub-scans run as concurrent
/// futures and joined before the result is combined.
///
/// # Errors
///
/// Returns [`InvalidInput`] if `size` is zero or `cells.len() != size²`.
#[instrument(skip(cells), fields(cells = cells.len()))]
pub async fn evaluate_joined(cells: &[Cell], size: usize) -> Result<Option<Player>, InvalidInput> {
    validate(cells, size)?;
    Ok(join_scans(cells, size).await)
}

async fn join_scans(cells: &[Cell], size: usize) -> Option<Player> {
    let (rows, columns, diagonals) = tokio::join!(
        async { scan_rows(cells, size) },
        async { scan_columns(cells, size) },
        async { scan_diagonals(cells, size) },
    );

    let winner = rows.or(columns).or(diagonals);
    trace!(?winner, "Joined sub-scans");
    winner
}

/// Checks a [`Board`] for a winner.
pub fn check_winner(board: &Board) -> Option<Player> {
    let size = board.size().get();
    let cells = board.cells();
    scan_rows(cells, size)
        .or_else(|| scan_columns(cells, size))
        .or_else(|| scan_diagonals(cells, size))
}

/// Checks a [`Board`] for a winner with the sub-scans joined concurrently.
pub async fn check_winner_joined(board: &Board) -> Option<Player> {
    join_scans(board.cells(), board.size().get()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardSize;

    const X: Cell = Cell::Occupied(Player::Player1);
    const O: Cell = Cell::Occupied(Player::Player2);
    const E: Cell = Cell::Empty;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new(BoardSize::CLASSIC);
        assert_eq!(evaluate(board.cells(), 3), Ok(None));
    }

    #[test]
    fn test_winner_top_row() {
        let cells = [X, X, X, O, O, E, E, E, E];
        assert_eq!(evaluate(&cells, 3), Ok(Some(Player::Player1)));
    }

    #[test]
    fn test_winner_column() {
        let cells = [X, O, X, E, O, X, E, O, E];
        assert_eq!(evaluate(&cells, 3), Ok(Some(Player::Player2)));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let cells = [X, X, O, E, O, X, O, E, E];
        assert_eq!(scan_diagonals(&cells, 3), Some(Player::Player2));
        assert_eq!(evaluate(&cells, 3), Ok(Some(Player::Player2)));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let cells = [X, X, E, E, O, E, E, E, O];
        assert_eq!(evaluate(&cells, 3), Ok(None));
    }

    #[test]
    fn test_single_cell_board() {
        assert_eq!(evaluate(&[E], 1), Ok(None));
        assert_eq!(evaluate(&[O], 1), Ok(Some(Player::Player2)));
    }

    #[test]
    fn test_malformed_input() {
        assert!(evaluate(&[E; 8], 3).is_err());
        assert!(evaluate(&[], 0).is_err());
    }

    #[test]
    fn test_lower_row_index_wins_tie() {
        // Synthetic: O holds row 0 and X holds row 2.
        let cells = [O, O, O, E, E, E, X, X, X];
        assert_eq!(evaluate(&cells, 3), Ok(Some(Player::Player2)));

        let cells = [X, X, X, E, E, E, O, O, O];
        assert_eq!(evaluate(&cells, 3), Ok(Some(Player::Player1)));
    }

    #[test]
    fn test_lower_column_index_wins_tie() {
        let cells = [X, E, O, X, E, O, X, E, O];
        assert_eq!(scan_rows(&cells, 3), None);
        assert_eq!(evaluate(&cells, 3), Ok(Some(Player::Player1)));
    }

    #[test]
    fn test_main_diagonal_before_anti() {
        // 4x4: X on the main diagonal, O on the anti-diagonal.
        let mut cells = vec![E; 16];
        for i in 0..4 {
            cells[i * 4 + i] = X;
            cells[i * 4 + (3 - i)] = O;
        }
        assert_eq!(scan_diagonals(&cells, 4), Some(Player::Player1));
    }
}
