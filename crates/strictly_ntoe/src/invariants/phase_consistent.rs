//! Phase consistency invariant: the recorded phase matches the board.

use super::super::{rules, GameController};
use super::Invariant;

/// Invariant: re-evaluating the committed board gives the recorded phase.
pub struct PhaseConsistentInvariant;

impl Invariant<GameController> for PhaseConsistentInvariant {
    fn holds(game: &GameController) -> bool {
        rules::phase_of(game.board()) == game.phase()
    }

    fn description() -> &'static str {
        "Recorded phase matches a fresh evaluation of the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GamePhase, Player};

    #[test]
    fn test_holds_through_a_win() {
        let mut game = GameController::default();
        for index in [0, 4, 1, 5, 2] {
            game.attempt_move(index).unwrap();
            assert!(PhaseConsistentInvariant::holds(&game));
        }
        assert_eq!(game.phase(), GamePhase::Won(Player::Player1));
    }

    #[test]
    fn test_stale_phase_violates() {
        let mut game = GameController::default();
        for index in [0, 4, 1, 5, 2] {
            game.attempt_move(index).unwrap();
        }
        game.phase = GamePhase::InProgress;
        assert!(!PhaseConsistentInvariant::holds(&game));
    }
}
