//! Core domain types for N×N tic-tac-toe.

use crate::error::InvalidInput;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Player {
    /// First player (goes first), marked `X`.
    #[display("X")]
    Player1,
    /// Second player, marked `O`.
    #[display("O")]
    Player2,
}

impl Player {
    /// Both players in order of play.
    pub const ALL: [Player; 2] = [Player::Player1, Player::Player2];

    /// Returns the player whose turn it is after `turn` accepted moves.
    pub fn for_turn(turn: usize) -> Self {
        Self::ALL[turn % Self::ALL.len()]
    }

    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

impl Cell {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    /// Checks if the cell is empty.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Side length N of a square board.
///
/// Always at least 1, and N² always fits in `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(try_from = "usize", into = "usize")]
#[display("{}x{}", _0, _0)]
pub struct BoardSize(usize);

impl BoardSize {
    /// The classic 3×3 board.
    pub const CLASSIC: BoardSize = BoardSize(3);

    /// Validates a side length.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if `n` is zero or `n * n` overflows.
    #[track_caller]
    pub fn new(n: usize) -> Result<Self, InvalidInput> {
        if n == 0 {
            return Err(InvalidInput::new("Board size must be at least 1"));
        }
        if n.checked_mul(n).is_none() {
            return Err(InvalidInput::new(format!("Board size {} overflows", n)));
        }
        Ok(Self(n))
    }

    /// Returns N.
    pub fn get(self) -> usize {
        self.0
    }

    /// Returns N², the number of cells.
    pub fn cells(self) -> usize {
        self.0 * self.0
    }

    /// Row of a flat index.
    pub fn row_of(self, index: usize) -> usize {
        index / self.0
    }

    /// Column of a flat index.
    pub fn column_of(self, index: usize) -> usize {
        index % self.0
    }

    /// Flat index of a row and column, or `None` if either is off the board.
    pub fn index_of(self, row: usize, column: usize) -> Option<usize> {
        (row < self.0 && column < self.0).then(|| row * self.0 + column)
    }

    /// Checks whether a flat index lies on the board.
    pub fn contains(self, index: usize) -> bool {
        index < self.cells()
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::CLASSIC
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = InvalidInput;

    #[track_caller]
    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<BoardSize> for usize {
    fn from(size: BoardSize) -> Self {
        size.0
    }
}

/// N×N board stored as one flat row-major sequence.
///
/// Deserializing checks the cell count the same way [`Board::from_cells`]
/// does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: BoardSize,
    /// Cells in row-major order (`row * N + column`).
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a new empty board.
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.cells()],
        }
    }

    /// Builds a board from raw cells.
    ///
    /// No turn-order check is made, so synthetic positions (for example both
    /// players holding a line) can be constructed for testing the detector.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if `cells.len()` is not N².
    #[track_caller]
    pub fn from_cells(size: BoardSize, cells: Vec<Cell>) -> Result<Self, InvalidInput> {
        if cells.len() != size.cells() {
            return Err(InvalidInput::new(format!(
                "Board of size {} needs {} cells, got {}",
                size,
                size.cells(),
                cells.len()
            )));
        }
        Ok(Self { size, cells })
    }

    /// Returns the board size.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Gets the cell at the given index.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Indices of every empty cell, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Number of cells held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Occupied(player))
            .count()
    }

    /// Writes a mark. Callers have already checked bounds and emptiness.
    pub(crate) fn place(&mut self, index: usize, player: Player) {
        self.cells[index] = Cell::Occupied(player);
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their 1-based index.
    pub fn display(&self) -> String {
        let n = self.size.get();
        let width = self.size.cells().to_string().len();
        let separator = vec!["-".repeat(width); n].join("+");

        let mut result = String::new();
        for row in 0..n {
            let line = (0..n)
                .map(|column| {
                    let index = row * n + column;
                    let symbol = match self.cells[index] {
                        Cell::Empty => (index + 1).to_string(),
                        Cell::Occupied(player) => player.to_string(),
                    };
                    format!("{:>width$}", symbol, width = width)
                })
                .collect::<Vec<_>>()
                .join("|");
            result.push_str(&line);
            if row + 1 < n {
                result.push('\n');
                result.push_str(&separator);
                result.push('\n');
            }
        }
        result
    }
}

/// Unchecked wire form of a [`Board`].
#[derive(Deserialize)]
struct RawBoard {
    size: BoardSize,
    cells: Vec<Cell>,
}

impl TryFrom<RawBoard> for Board {
    type Error = InvalidInput;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        Self::from_cells(raw.size, raw.cells)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardSize::CLASSIC)
    }
}

/// Current phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum GamePhase {
    /// Game is ongoing.
    #[display("In progress")]
    InProgress,
    /// Game ended in a win.
    #[display("Player {} wins", _0)]
    Won(Player),
    /// Game ended in a draw.
    #[display("Draw")]
    Draw,
}

impl GamePhase {
    /// Returns true for `Won` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GamePhase::Won(player) => Some(player),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_board_size_rejects_zero() {
        assert!(BoardSize::new(0).is_err());
        assert!(BoardSize::new(usize::MAX).is_err());
        assert_eq!(BoardSize::new(4).map(BoardSize::cells), Ok(16));
    }

    #[test]
    fn test_index_helpers() {
        let size = BoardSize::new(4).unwrap();
        assert_eq!(size.row_of(6), 1);
        assert_eq!(size.column_of(6), 2);
        assert_eq!(size.index_of(1, 2), Some(6));
        assert_eq!(size.index_of(4, 0), None);
        assert!(size.contains(15));
        assert!(!size.contains(16));
    }

    #[test]
    fn test_players_alternate() {
        assert_eq!(Player::for_turn(0), Player::Player1);
        assert_eq!(Player::for_turn(1), Player::Player2);
        assert_eq!(Player::for_turn(2), Player::Player1);
        for player in Player::iter() {
            assert_ne!(player, player.opponent());
        }
    }

    #[test]
    fn test_from_cells_checks_length() {
        let size = BoardSize::CLASSIC;
        assert!(Board::from_cells(size, vec![Cell::Empty; 8]).is_err());
        assert!(Board::from_cells(size, vec![Cell::Empty; 9]).is_ok());
    }

    #[test]
    fn test_display_classic() {
        let mut board = Board::default();
        board.place(0, Player::Player1);
        board.place(4, Player::Player2);
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(GamePhase::Won(Player::Player1).to_string(), "Player X wins");
        assert_eq!(GamePhase::Draw.to_string(), "Draw");
        assert!(!GamePhase::InProgress.is_terminal());
    }
}
