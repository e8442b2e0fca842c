//! Error types for activity handling.

use philo_core::{CoreError, ModuleKind, UnitId};
use thiserror::Error;

/// Result type for activity operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors raised while driving an activity.
#[derive(Debug, Error)]
pub enum GameError {
    /// No activity is running.
    #[error("no active activity")]
    NoActivity,

    /// The activity already completed.
    #[error("activity already finished")]
    Finished,

    /// The unit has nothing to offer for this module.
    #[error("unit {unit} has no content for {module}")]
    NoContent {
        /// Requested module.
        module: ModuleKind,
        /// Selected unit.
        unit: UnitId,
    },

    /// The event does not apply in the current state.
    #[error("{module}: {reason}")]
    Unexpected {
        /// Module that rejected the event.
        module: ModuleKind,
        /// Why it was rejected.
        reason: String,
    },

    /// Option index out of range.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// A story cursor points at a missing node.
    #[error("story node not found: {0}")]
    MissingNode(String),

    /// Core error.
    #[error("{0}")]
    Core(#[from] CoreError),
}

impl GameError {
    pub(crate) fn unexpected(module: ModuleKind, reason: impl Into<String>) -> Self {
        GameError::Unexpected {
            module,
            reason: reason.into(),
        }
    }
}
