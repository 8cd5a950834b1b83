use crate::action::ActionTransition;
use crate::error::{ErrorSeverity, GameError};
use crate::feedback::{Feedback, SoundCue};
use crate::state::{LevelState, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("destination {destination} is blocked by a wall")]
    Blocked { destination: Position },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Blocked { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Blocked { .. } => "MOVE_BLOCKED",
        }
    }
}

/// One-cell step in a cardinal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub direction: CardinalDirection,
}

impl MoveAction {
    pub fn new(direction: CardinalDirection) -> Self {
        Self { direction }
    }

    fn destination_from(&self, origin: Position) -> Position {
        origin.offset(self.direction.delta())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::East,
        CardinalDirection::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, 1),
            CardinalDirection::South => (0, -1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;

    fn pre_validate(&self, state: &LevelState) -> Result<(), Self::Error> {
        let destination = self.destination_from(state.player.position);
        if state.is_blocked(destination) {
            return Err(MoveError::Blocked { destination });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut LevelState,
        feedback: &mut Vec<Feedback>,
    ) -> Result<(), Self::Error> {
        let origin = state.player.position;
        let destination = self.destination_from(origin);

        state.player.position = destination;
        state.player.motion.begin(destination);

        feedback.push(Feedback::MoveStarted {
            from: origin,
            to: destination,
        });
        feedback.push(Feedback::Sound(SoundCue::Footsteps));
        Ok(())
    }
}
