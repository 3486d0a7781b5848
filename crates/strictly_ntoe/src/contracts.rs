//! Move legality and the checks a commit must pass.
//!
//! The precondition structs are the rejection reasons of a move, checked in
//! the order callers see them. [`MoveContract::post`] compares the controller
//! before and after a commit.

use super::action::MoveRejection;
use super::controller::GameController;
use super::invariants::{InvariantSet, InvariantViolation, NtoeInvariants};
use super::Cell;
use tracing::instrument;

/// Checks around one kind of state change `A` on a state `S`.
pub trait Contract<S, A> {
    /// Decides whether `action` may be applied, and if not, why.
    fn pre(state: &S, action: &A) -> Result<(), MoveRejection>;

    /// Compares the states on either side of an applied action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// Precondition: no other move is in flight.
pub struct NotBusy;

impl NotBusy {
    /// Checks the busy gate.
    pub fn check(game: &GameController) -> Result<(), MoveRejection> {
        if game.is_busy() {
            Err(MoveRejection::Busy)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the game has not been won or drawn.
pub struct GameNotOver;

impl GameNotOver {
    /// Checks the phase.
    pub fn check(game: &GameController) -> Result<(), MoveRejection> {
        if game.phase().is_terminal() {
            Err(MoveRejection::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the index names a cell.
pub struct InBounds;

impl InBounds {
    /// Checks the index against the board size.
    pub fn check(index: usize, game: &GameController) -> Result<(), MoveRejection> {
        let size = game.size();
        if size.contains(index) {
            Ok(())
        } else {
            Err(MoveRejection::OutOfBounds {
                index,
                cells: size.cells(),
            })
        }
    }
}

/// Precondition: the cell at the index is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Checks the target cell.
    pub fn check(index: usize, game: &GameController) -> Result<(), MoveRejection> {
        if game.board().is_empty(index) {
            Ok(())
        } else {
            Err(MoveRejection::CellOccupied(index))
        }
    }
}

/// Composite precondition, checked in rejection order.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(index: usize, game: &GameController) -> Result<(), MoveRejection> {
        NotBusy::check(game)?;
        GameNotOver::check(game)?;
        InBounds::check(index, game)?;
        CellIsEmpty::check(index, game)?;
        Ok(())
    }
}

/// Placing the current player's mark at a cell index.
///
/// `pre` is [`LegalMove`]. `post` requires that occupied cells kept their
/// marks, that exactly one cell changed and it is the last history entry,
/// that the turn counter went up by one, and that [`NtoeInvariants`] hold.
pub struct MoveContract;

impl Contract<GameController, usize> for MoveContract {
    fn pre(game: &GameController, index: &usize) -> Result<(), MoveRejection> {
        LegalMove::check(*index, game)
    }

    fn post(before: &GameController, after: &GameController) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        let changed: Vec<usize> = before
            .board()
            .cells()
            .iter()
            .zip(after.board().cells())
            .enumerate()
            .filter(|(_, (old, new))| old != new)
            .map(|(index, _)| index)
            .collect();

        let overwrote = changed
            .iter()
            .any(|&index| before.board().get(index) != Some(Cell::Empty));
        if overwrote {
            violations.push(InvariantViolation::new("Occupied cells never change"));
        }

        if changed.len() != 1 || after.history().last() != changed.first() {
            violations.push(InvariantViolation::new(
                "Exactly one new mark, at the recorded index",
            ));
        }

        if after.turn() != before.turn() + 1 {
            violations.push(InvariantViolation::new("Turn counter advances by one"));
        }

        if let Err(mut broken) = NtoeInvariants::check_all(after) {
            violations.append(&mut broken);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
