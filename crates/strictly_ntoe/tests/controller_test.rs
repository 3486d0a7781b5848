//! Tests for the game controller state machine.

use strictly_ntoe::{
    BoardSize, Cell, GameController, GamePhase, MoveAccepted, MoveRejection, Player, rules,
};

fn play(size: usize, moves: &[usize]) -> GameController {
    let mut game = GameController::new(BoardSize::new(size).expect("valid size"));
    for &index in moves {
        game.attempt_move(index).expect("legal move");
    }
    game
}

#[test]
fn test_fresh_game_for_every_size() {
    for n in 1..=6 {
        let game = GameController::new(BoardSize::new(n).unwrap());
        assert_eq!(game.phase(), GamePhase::InProgress);
        assert_eq!(game.current_player(), Player::Player1);
        assert_eq!(game.turn(), 0);
        assert_eq!(game.snapshot().cells().len(), n * n);
        assert!(game.snapshot().cells().iter().all(|cell| *cell == Cell::Empty));
    }
}

#[test]
fn test_top_row_win() {
    let game = play(3, &[0, 4, 1, 5, 2]);
    assert_eq!(game.phase(), GamePhase::Won(Player::Player1));
    assert_eq!(game.history(), &[0, 4, 1, 5, 2]);
}

#[test]
fn test_winning_move_reports_phase() {
    let mut game = play(3, &[0, 4, 1, 5]);
    let accepted = game.attempt_move(2).unwrap();
    assert_eq!(
        accepted,
        MoveAccepted {
            player: Player::Player1,
            index: 2,
            phase: GamePhase::Won(Player::Player1),
        }
    );
}

#[test]
fn test_player2_wins_column() {
    // X: 0, 3, 8   O: 1, 4, 7
    let game = play(3, &[0, 1, 3, 4, 8, 7]);
    assert_eq!(game.phase(), GamePhase::Won(Player::Player2));
}

#[test]
fn test_draw_after_ninth_move() {
    let mut game = play(3, &[0, 1, 2, 4, 3, 5, 7, 6]);
    assert_eq!(game.phase(), GamePhase::InProgress);

    let accepted = game.attempt_move(8).unwrap();
    assert_eq!(accepted.phase, GamePhase::Draw);
    assert_eq!(game.phase(), GamePhase::Draw);
    assert_eq!(game.turn(), 9);
}

#[test]
fn test_out_of_bounds_leaves_state_unchanged() {
    let mut game = play(3, &[4]);
    let before = game.clone();

    assert_eq!(
        game.attempt_move(9),
        Err(MoveRejection::OutOfBounds { index: 9, cells: 9 })
    );
    assert_eq!(game, before);
}

#[test]
fn test_occupied_cell_rejection_is_idempotent() {
    let mut game = play(3, &[4, 0]);
    let before = game.clone();

    for _ in 0..3 {
        assert_eq!(game.attempt_move(4), Err(MoveRejection::CellOccupied(4)));
        assert_eq!(game.attempt_move(0), Err(MoveRejection::CellOccupied(0)));
    }
    assert_eq!(game, before);
    assert_eq!(game.current_player(), Player::Player1);
}

#[test]
fn test_no_moves_after_win() {
    let mut game = play(3, &[0, 4, 1, 5, 2]);
    let before = game.clone();

    assert!(game.board().is_empty(8));
    assert_eq!(game.attempt_move(8), Err(MoveRejection::GameAlreadyOver));
    assert_eq!(game.attempt_move(99), Err(MoveRejection::GameAlreadyOver));
    assert_eq!(game, before);
}

#[test]
fn test_no_moves_after_draw() {
    let mut game = play(3, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(game.attempt_move(0), Err(MoveRejection::GameAlreadyOver));
}

#[test]
fn test_controller_usable_after_rejection() {
    let mut game = play(3, &[4]);
    assert!(game.attempt_move(4).is_err());
    assert!(game.attempt_move(42).is_err());

    let accepted = game.attempt_move(0).unwrap();
    assert_eq!(accepted.player, Player::Player2);
}

#[test]
fn test_current_player_is_next_mover() {
    let mut game = play(3, &[0, 4, 1, 5]);
    assert_eq!(game.current_player(), Player::Player1);
    game.attempt_move(2).unwrap();

    // After the win the counter keeps alternating; the winner lives in the phase.
    assert_eq!(game.current_player(), Player::Player2);
    assert_eq!(game.phase().winner(), Some(Player::Player1));
}

#[test]
fn test_single_cell_board_first_move_wins() {
    let game = play(1, &[0]);
    assert_eq!(game.phase(), GamePhase::Won(Player::Player1));
}

#[test]
fn test_two_by_two_diagonal() {
    // X: 0, 3 (main diagonal)   O: 1
    let game = play(2, &[0, 1, 3]);
    assert_eq!(game.phase(), GamePhase::Won(Player::Player1));
}

#[test]
fn test_four_by_four_anti_diagonal() {
    // X on 3, 6, 9, 12; O on 0, 1, 2.
    let game = play(4, &[3, 0, 6, 1, 9, 2, 12]);
    assert_eq!(game.phase(), GamePhase::Won(Player::Player1));
    assert_eq!(rules::phase_of(game.board()), game.phase());
}

#[test]
fn test_snapshot_is_independent_copy() {
    let mut game = play(3, &[0]);
    let snapshot = game.snapshot();
    game.attempt_move(1).unwrap();

    assert!(snapshot.is_empty(1));
    assert!(!game.board().is_empty(1));
}

#[test]
fn test_snapshot_serializes_for_renderer() {
    let game = play(3, &[4]);
    let json = serde_json::to_string(&game.snapshot()).unwrap();
    let board: strictly_ntoe::Board = serde_json::from_str(&json).unwrap();
    assert_eq!(board, game.snapshot());

    let json = serde_json::to_string(&GamePhase::Won(Player::Player2)).unwrap();
    assert_eq!(json, r#"{"Won":"Player2"}"#);
}

#[test]
fn test_board_json_with_wrong_cell_count_rejected() {
    let short = r#"{"size":3,"cells":["Empty"]}"#;
    assert!(serde_json::from_str::<strictly_ntoe::Board>(short).is_err());

    let cells = vec!["Empty"; 9];
    let long = serde_json::json!({ "size": 2, "cells": cells }).to_string();
    assert!(serde_json::from_str::<strictly_ntoe::Board>(&long).is_err());

    let zero = r#"{"size":0,"cells":[]}"#;
    assert!(serde_json::from_str::<strictly_ntoe::Board>(zero).is_err());

    let board: strictly_ntoe::Board =
        serde_json::from_str(r#"{"size":1,"cells":[{"Occupied":"Player2"}]}"#).unwrap();
    assert_eq!(board.get(0), Some(Cell::Occupied(Player::Player2)));
    assert_eq!(rules::check_winner(&board), Some(Player::Player2));
    assert_eq!(board.display(), "O");
}

#[test]
fn test_reset_restores_fresh_game() {
    let mut game = play(4, &[0, 5, 10]);
    game.reset().unwrap();
    assert_eq!(game, GameController::new(BoardSize::new(4).unwrap()));
}
