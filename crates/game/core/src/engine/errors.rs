//! Error types for the action execution pipeline.

use crate::action::{MoveError, PickupError, SwingError, UseItemError};
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::LevelOutcome;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
        }
    }
}

/// Associates a transition phase and context with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
    pub context: ErrorContext,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E, context: ErrorContext) -> Self {
        Self {
            phase,
            error,
            context,
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<MoveError>),

    #[error("pickup action failed: {0}")]
    Pickup(TransitionPhaseError<PickupError>),

    #[error("use item action failed: {0}")]
    UseItem(TransitionPhaseError<UseItemError>),

    #[error("swing action failed: {0}")]
    Swing(TransitionPhaseError<SwingError>),

    #[error("level already finished ({outcome:?})")]
    LevelFinished { outcome: LevelOutcome },
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Move(e) => e.error.severity(),
            Self::Pickup(e) => e.error.severity(),
            Self::UseItem(e) => e.error.severity(),
            Self::Swing(e) => e.error.severity(),
            Self::LevelFinished { .. } => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Move(e) => Some(&e.context),
            Self::Pickup(e) => Some(&e.context),
            Self::UseItem(e) => Some(&e.context),
            Self::Swing(e) => Some(&e.context),
            Self::LevelFinished { .. } => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Move(e) => e.error.error_code(),
            Self::Pickup(e) => e.error.error_code(),
            Self::UseItem(e) => e.error.error_code(),
            Self::Swing(e) => e.error.error_code(),
            Self::LevelFinished { .. } => "LEVEL_FINISHED",
        }
    }
}
