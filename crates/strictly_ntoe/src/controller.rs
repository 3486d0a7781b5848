//! Authoritative game controller for one N×N game.
//!
//! The controller is the only owner of the board, turn counter, phase and
//! busy gate. A move is handled in two steps: [`GameController::begin_move`]
//! validates and stages it, closing the gate, and
//! [`GameController::commit`] applies the staged board together with the
//! phase that its [`Evaluation`] produced. Until the commit, observers keep
//! seeing the previous board and phase, so a winning or full board is never
//! visible while the phase still reads `InProgress`.

use super::action::{MoveAccepted, MoveRejection, PendingMove};
use super::contracts::{Contract, MoveContract};
use super::invariants::{InvariantSet, NtoeInvariants};
use super::rules;
use super::{Board, BoardSize, GamePhase, Player};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, info, instrument, warn};

/// Source of pending-move tickets, unique across controllers.
static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Whether the controller can take a new move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayState {
    /// No move is in flight.
    Ready,
    /// A staged move is waiting for its commit.
    Busy {
        /// Ticket of the staged move.
        ticket: u64,
    },
}

/// Result of running the detector on a staged board.
///
/// Only a [`PendingMove`] can produce one, so a commit always carries the
/// verdict for the board it is committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    ticket: u64,
    winner: Option<Player>,
    filled: bool,
}

impl Evaluation {
    /// Winning player found on the staged board.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Whether the staged board has no empty cell.
    pub fn filled(&self) -> bool {
        self.filled
    }

    /// The phase this evaluation leads to.
    pub fn phase(&self) -> GamePhase {
        match self.winner {
            Some(player) => GamePhase::Won(player),
            None if self.filled => GamePhase::Draw,
            None => GamePhase::InProgress,
        }
    }
}

impl PendingMove {
    /// Runs the detector on the staged board.
    #[instrument(skip(self), fields(index = self.index, player = %self.player))]
    pub fn evaluate(&self) -> Evaluation {
        Evaluation {
            ticket: self.ticket,
            winner: rules::check_winner(&self.board),
            filled: rules::is_full(&self.board),
        }
    }

    /// Runs the detector with its sub-scans joined concurrently.
    #[instrument(skip(self), fields(index = self.index, player = %self.player))]
    pub async fn evaluate_joined(&self) -> Evaluation {
        let winner = rules::check_winner_joined(&self.board).await;
        Evaluation {
            ticket: self.ticket,
            winner,
            filled: rules::is_full(&self.board),
        }
    }
}

/// The move the gate is closed for, alive as long as its [`PendingMove`].
#[derive(Debug, Clone)]
struct Staged {
    ticket: u64,
    hold: Weak<()>,
}

/// Owner of the state of one game instance.
#[derive(Debug, Clone)]
pub struct GameController {
    pub(crate) board: Board,
    pub(crate) turn: usize,
    pub(crate) phase: GamePhase,
    pub(crate) history: Vec<usize>,
    staged: Option<Staged>,
}

impl PartialEq for GameController {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.turn == other.turn
            && self.phase == other.phase
            && self.history == other.history
            && self.play_state() == other.play_state()
    }
}

impl Eq for GameController {}

impl GameController {
    /// Creates a new game: empty board, turn 0, `Player1` to move.
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        info!(%size, "Starting new game");
        Self {
            board: Board::new(size),
            turn: 0,
            phase: GamePhase::InProgress,
            history: Vec::new(),
            staged: None,
        }
    }

    /// Places the current player's mark at `index` and evaluates the result.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveRejection`] when a move is in flight, the game is
    /// over, the index is off the board, or the cell is occupied. The game is
    /// unchanged in every case.
    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn attempt_move(&mut self, index: usize) -> Result<MoveAccepted, MoveRejection> {
        let pending = self.begin_move(index)?;
        let evaluation = pending.evaluate();
        self.commit(pending, evaluation)
    }

    /// Validates a move and stages it, closing the busy gate.
    ///
    /// The board seen by observers does not change until
    /// [`commit`](Self::commit). Every other move is rejected with
    /// [`MoveRejection::Busy`] until the returned move is committed or
    /// dropped; dropping it leaves the game as it was.
    ///
    /// # Errors
    ///
    /// Same rejections as [`attempt_move`](Self::attempt_move).
    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn begin_move(&mut self, index: usize) -> Result<PendingMove, MoveRejection> {
        if let Err(rejection) = MoveContract::pre(self, &index) {
            debug!(%rejection, "Move rejected");
            return Err(rejection);
        }

        let player = self.current_player();
        let mut board = self.board.clone();
        board.place(index, player);

        let ticket = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        let hold = Arc::new(());
        self.staged = Some(Staged {
            ticket,
            hold: Arc::downgrade(&hold),
        });
        debug!(ticket, %player, index, "Move staged");

        Ok(PendingMove {
            ticket,
            player,
            index,
            board,
            _hold: hold,
        })
    }

    /// Applies a staged move and its evaluation, reopening the busy gate.
    ///
    /// Board, turn counter, history and phase change together.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejection::StalePendingMove`] if `pending` is not the
    /// move this controller is waiting for, or `evaluation` belongs to a
    /// different move. A rejected move of this controller is abandoned, so
    /// the gate reopens with the game unchanged.
    #[instrument(skip(self, pending, evaluation), fields(index = pending.index, player = %pending.player))]
    pub fn commit(
        &mut self,
        pending: PendingMove,
        evaluation: Evaluation,
    ) -> Result<MoveAccepted, MoveRejection> {
        let state = self.play_state();
        if state != (PlayState::Busy { ticket: pending.ticket })
            || evaluation.ticket != pending.ticket
        {
            warn!(?state, ticket = pending.ticket, "Commit does not match staged move");
            return Err(MoveRejection::StalePendingMove);
        }

        let before = cfg!(debug_assertions).then(|| self.clone());

        let PendingMove {
            player,
            index,
            board,
            ..
        } = pending;

        let phase = evaluation.phase();

        self.board = board;
        self.turn += 1;
        self.history.push(index);
        self.phase = phase;
        self.staged = None;

        if let Some(winner) = evaluation.winner
            && (winner != player || winner != self.current_player().opponent())
        {
            warn!(%winner, mover = %player, "Winner is not the player who just moved");
        }

        if let Some(before) = before {
            assert_contract(&before, self);
        }

        info!(%player, index, %phase, turn = self.turn, "Move accepted");
        Ok(MoveAccepted {
            player,
            index,
            phase,
        })
    }

    /// Starts the game over on the same board size.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejection::Busy`] while a move is in flight.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<(), MoveRejection> {
        if self.is_busy() {
            return Err(MoveRejection::Busy);
        }
        *self = Self::new(self.board.size());
        Ok(())
    }

    /// The player who would move next.
    ///
    /// Keeps alternating after the game ends; the winner of a finished game
    /// is reported only by [`GamePhase::Won`].
    pub fn current_player(&self) -> Player {
        Player::for_turn(self.turn)
    }

    /// Returns the current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns a copy of the committed board.
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    /// Returns a reference to the committed board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of accepted moves.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Board size this game was created with.
    pub fn size(&self) -> BoardSize {
        self.board.size()
    }

    /// Indices of accepted moves, in order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Returns the busy gate.
    pub fn play_state(&self) -> PlayState {
        match &self.staged {
            Some(staged) if staged.hold.strong_count() > 0 => PlayState::Busy {
                ticket: staged.ticket,
            },
            _ => PlayState::Ready,
        }
    }

    /// Whether a staged move is waiting for its commit.
    pub fn is_busy(&self) -> bool {
        matches!(self.play_state(), PlayState::Busy { .. })
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(BoardSize::CLASSIC)
    }
}

/// Panics in debug builds if a commit broke the move contract.
fn assert_contract(before: &GameController, after: &GameController) {
    let result = MoveContract::post(before, after);
    if let Err(violations) = &result {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Postcondition failed");
    }
    debug_assert!(result.is_ok(), "Postcondition failed after commit");
    debug_assert!(NtoeInvariants::check_all(after).is_ok());
}
