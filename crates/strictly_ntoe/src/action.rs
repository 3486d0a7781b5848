//! Move outcomes for N×N tic-tac-toe.
//!
//! A move request either comes back as a [`MoveAccepted`] or as a
//! [`MoveRejection`]. Rejections are ordinary outcomes, not failures of the
//! game: the controller is unchanged and stays usable.

use super::{Board, GamePhase, Player};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An accepted move and the phase it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveAccepted {
    /// The player who moved.
    pub player: Player,
    /// The cell that was marked.
    pub index: usize,
    /// Phase after the move was committed.
    pub phase: GamePhase,
}

impl std::fmt::Display for MoveAccepted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.player, self.index, self.phase)
    }
}

/// Reason a move request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::Error)]
pub enum MoveRejection {
    /// The game has been won or drawn.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// The index does not name a cell.
    #[display("Cell {} is outside the board (0..{})", index, cells)]
    OutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of cells on the board.
        cells: usize,
    },

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] usize),

    /// A previous move is still being evaluated.
    #[display("A move is already being processed")]
    Busy,

    /// A pending move was committed to a controller that did not stage it.
    #[display("Pending move does not belong to this game")]
    StalePendingMove,
}

/// A move that passed validation and is waiting for its evaluation.
///
/// Holds the marked board without touching the controller's own board, so
/// observers keep seeing the last committed state until
/// [`GameController::commit`](crate::GameController::commit).
///
/// The controller stays busy only while this value is alive. Dropping it
/// without a commit abandons the move and reopens the gate.
#[derive(Debug)]
#[must_use = "a pending move keeps the game busy until committed or dropped"]
pub struct PendingMove {
    pub(crate) ticket: u64,
    pub(crate) player: Player,
    pub(crate) index: usize,
    pub(crate) board: Board,
    pub(crate) _hold: Arc<()>,
}

impl PendingMove {
    /// The player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// The cell being marked.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The board as it will be once committed.
    pub fn board(&self) -> &Board {
        &self.board
    }
}
