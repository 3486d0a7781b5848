//! Error types for malformed boards and sizes.

use derive_more::{Display, Error};
use tracing::instrument;

/// A board or size that violates the engine's structural preconditions.
///
/// This is a programmer error: the controller validates every index before
/// it reaches the detector, so callers going through
/// [`GameController`](crate::GameController) never see it.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid input: {} at {}:{}", message, file, line)]
pub struct InvalidInput {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl InvalidInput {
    /// Creates a new invalid-input error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
