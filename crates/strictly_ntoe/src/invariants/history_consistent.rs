//! History consistency invariant: the move history replays to the board.

use super::super::{Board, GameController, Player};
use super::Invariant;

/// Invariant: replaying the history onto an empty board yields the board.
///
/// This also pins the turn counter to the history length, so the counter
/// equals the number of occupied cells and every cell holds the mark of the
/// player whose turn it was.
pub struct HistoryConsistentInvariant;

impl Invariant<GameController> for HistoryConsistentInvariant {
    fn holds(game: &GameController) -> bool {
        let history = game.history();
        if history.len() != game.turn() {
            return false;
        }

        let mut replayed = Board::new(game.size());
        for (turn, &index) in history.iter().enumerate() {
            if !replayed.is_empty(index) {
                return false;
            }
            replayed.place(index, Player::for_turn(turn));
        }

        &replayed == game.board()
    }

    fn description() -> &'static str {
        "Move history replays to the current board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_game_holds() {
        assert!(HistoryConsistentInvariant::holds(&GameController::default()));
    }

    #[test]
    fn test_after_moves_holds() {
        let mut game = GameController::default();
        for index in [0, 4, 1] {
            game.attempt_move(index).unwrap();
        }
        assert!(HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_board_without_history_violates() {
        let mut game = GameController::default();
        game.board.place(4, Player::Player1);
        assert!(!HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_duplicate_history_violates() {
        let mut game = GameController::default();
        game.attempt_move(4).unwrap();
        game.history.push(4);
        game.turn += 1;
        assert!(!HistoryConsistentInvariant::holds(&game));
    }
}
