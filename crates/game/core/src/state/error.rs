//! Level construction errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Errors raised while assembling a [`LevelState`](crate::state::LevelState).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Position is outside the grid.
    #[error("position {position} is out of bounds (grid size: {width}x{height})")]
    PositionOutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },

    /// Entity placed on a wall cell.
    #[error("position {position} is a wall")]
    PlacedOnWall { position: Position },

    /// No player start was provided.
    #[error("level has no player start")]
    MissingPlayer,

    /// More than one player start was provided.
    #[error("level has a second player start at {position}")]
    DuplicatePlayer { position: Position },

    /// Grid with zero width or height.
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    EmptyGrid { width: u32, height: u32 },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PositionOutOfBounds { .. } => "STATE_OUT_OF_BOUNDS",
            Self::PlacedOnWall { .. } => "STATE_PLACED_ON_WALL",
            Self::MissingPlayer => "STATE_MISSING_PLAYER",
            Self::DuplicatePlayer { .. } => "STATE_DUPLICATE_PLAYER",
            Self::EmptyGrid { .. } => "STATE_EMPTY_GRID",
        }
    }
}
