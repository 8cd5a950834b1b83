//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g. `MoveError`, `SwingError`) are defined next to
//! the actions they validate. This module holds the classification shared by
//! all of them so the runtime can decide whether a failure is a harmless no-op
//! (a blocked step, an empty slot) or a bug worth surfacing.

use crate::state::Position;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the action had no effect; the queue simply moves on
/// - **Validation**: the input itself was malformed (unknown token, bad slot)
/// - **Internal**: state inconsistency that indicates a bug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The action was a no-op in the current situation.
    ///
    /// Examples: destination is a wall, no sword equipped, empty slot
    Recoverable,

    /// Invalid input, should be fixed by the author of the action queue.
    ///
    /// Examples: unknown action token, level already finished
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: entity listed at a cell but missing from the entity table
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Player cell when the error occurred (if applicable).
    pub position: Option<Position>,

    /// Index of the action in the executed sequence.
    pub nonce: u64,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(nonce: u64) -> Self {
        Self {
            position: None,
            nonce,
        }
    }

    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all game-core errors.
///
/// All error enums implement this trait so callers can classify failures
/// uniformly without matching on every variant.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Used as a stable key in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }

    #[test]
    fn context_builder_attaches_position() {
        let ctx = ErrorContext::new(7).with_position(Position::new(2, 3));
        assert_eq!(ctx.nonce, 7);
        assert_eq!(ctx.position, Some(Position::new(2, 3)));
    }
}
