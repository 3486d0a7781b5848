//! Asynchronous handle to a game for callers that evaluate moves off the
//! request path.
//!
//! [`SharedGame::attempt_move`] stages the move and returns at once; the
//! evaluation runs on a spawned task that commits the move and publishes the
//! new phase. While that task is in flight the controller's busy gate turns
//! every other move away with [`MoveRejection::Busy`].

use super::action::{MoveAccepted, MoveRejection};
use super::controller::GameController;
use super::{Board, BoardSize, GamePhase, Player};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

/// Cloneable handle to one game, shared between a mover and its observers.
#[derive(Debug, Clone)]
pub struct SharedGame {
    controller: Arc<Mutex<GameController>>,
    phase_tx: Arc<watch::Sender<GamePhase>>,
}

impl SharedGame {
    /// Creates a new game.
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        Self::from_controller(GameController::new(size))
    }

    /// Wraps an existing controller.
    pub fn from_controller(controller: GameController) -> Self {
        let (phase_tx, _) = watch::channel(controller.phase());
        Self {
            controller: Arc::new(Mutex::new(controller)),
            phase_tx: Arc::new(phase_tx),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GameController> {
        // Commits never panic between field writes.
        self.controller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Stages a move and evaluates it on a spawned task.
    ///
    /// Returns as soon as the move is validated. The handle resolves to the
    /// committed move once its evaluation finishes; the phase is also sent to
    /// every [`subscribe`](Self::subscribe)r. Must be called from within a
    /// tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejection::Busy`] while an earlier move is still being
    /// evaluated, and the other rejections of
    /// [`GameController::attempt_move`].
    ///
    /// Aborting the returned handle before it commits abandons the move and
    /// reopens the gate.
    #[instrument(skip(self))]
    pub fn attempt_move(
        &self,
        index: usize,
    ) -> Result<JoinHandle<Result<MoveAccepted, MoveRejection>>, MoveRejection> {
        let pending = self.lock().begin_move(index)?;

        let game = self.clone();
        Ok(tokio::spawn(async move {
            let evaluation = pending.evaluate_joined().await;
            let mut controller = game.lock();
            let accepted = controller.commit(pending, evaluation);
            match &accepted {
                Ok(accepted) => {
                    debug!(phase = %accepted.phase, "Publishing phase");
                    game.phase_tx.send_replace(accepted.phase);
                }
                Err(rejection) => warn!(%rejection, "Staged move could not be committed"),
            }
            drop(controller);
            accepted
        }))
    }

    /// Subscribes to phase changes, starting from the current phase.
    pub fn subscribe(&self) -> watch::Receiver<GamePhase> {
        self.phase_tx.subscribe()
    }

    /// Starts the game over and publishes `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejection::Busy`] while a move is being evaluated.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<(), MoveRejection> {
        let mut controller = self.lock();
        controller.reset()?;
        self.phase_tx.send_replace(controller.phase());
        Ok(())
    }

    /// Returns the current phase.
    pub fn phase(&self) -> GamePhase {
        self.lock().phase()
    }

    /// Returns a copy of the committed board.
    pub fn snapshot(&self) -> Board {
        self.lock().snapshot()
    }

    /// The player who would move next.
    pub fn current_player(&self) -> Player {
        self.lock().current_player()
    }

    /// Number of accepted moves.
    pub fn turn(&self) -> usize {
        self.lock().turn()
    }

    /// Whether a move is being evaluated.
    pub fn is_busy(&self) -> bool {
        self.lock().is_busy()
    }
}
