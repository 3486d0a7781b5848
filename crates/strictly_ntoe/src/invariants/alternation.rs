//! Alternation invariant: Player1 is never behind and never two ahead.

use super::super::{GameController, Player};
use super::Invariant;

/// Invariant: `#Player1 − #Player2` is 0 or 1.
///
/// Player1 moves first and turns strictly alternate.
pub struct AlternationInvariant;

impl Invariant<GameController> for AlternationInvariant {
    fn holds(game: &GameController) -> bool {
        let board = game.board();
        let player1 = board.count(Player::Player1);
        let player2 = board.count(Player::Player2);
        player1 == player2 || player1 == player2 + 1
    }

    fn description() -> &'static str {
        "Player1 marks minus Player2 marks is 0 or 1"
    }
}
