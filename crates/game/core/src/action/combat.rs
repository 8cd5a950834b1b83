use crate::action::{ActionTransition, CardinalDirection};
use crate::error::{ErrorSeverity, GameError};
use crate::feedback::{Feedback, SoundCue, SwingEffect};
use crate::state::{EntityId, LevelState, Position, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwingError {
    #[error("no sword equipped")]
    NoWeapon,
}

impl GameError for SwingError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoWeapon => "SWING_NO_WEAPON",
        }
    }
}

/// Sword swing toward the adjacent cell in `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwingAction {
    pub direction: CardinalDirection,
}

impl SwingAction {
    pub fn new(direction: CardinalDirection) -> Self {
        Self { direction }
    }

    /// Offset of the swing visual from the player centre. Not symmetric: the
    /// sprite art sits higher than the player's feet.
    pub fn visual_offset(&self) -> Vec2 {
        match self.direction {
            CardinalDirection::West => Vec2::new(-0.4, 0.0),
            CardinalDirection::East => Vec2::new(0.4, 0.0),
            CardinalDirection::North => Vec2::new(0.0, 0.5),
            CardinalDirection::South => Vec2::new(0.0, -0.3),
        }
    }

    pub fn visual_angle(&self) -> i16 {
        match self.direction {
            CardinalDirection::West => 180,
            CardinalDirection::East => 0,
            CardinalDirection::North => 90,
            CardinalDirection::South => -90,
        }
    }

    /// Cell covered by the blade.
    pub fn hit_zone(&self, origin: Position) -> Position {
        origin.offset(self.direction.delta())
    }
}

impl ActionTransition for SwingAction {
    type Error = SwingError;

    fn pre_validate(&self, state: &LevelState) -> Result<(), Self::Error> {
        if !state.player.has_sword {
            return Err(SwingError::NoWeapon);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut LevelState,
        feedback: &mut Vec<Feedback>,
    ) -> Result<(), Self::Error> {
        let origin = state.player.position;
        feedback.push(Feedback::SwingSpawned(SwingEffect {
            direction: self.direction,
            origin: origin.center() + self.visual_offset(),
            angle: self.visual_angle(),
        }));

        let zone = self.hit_zone(origin);
        let victims: Vec<EntityId> = state
            .entities
            .monsters_at(zone)
            .map(|monster| monster.id)
            .collect();

        if victims.is_empty() {
            feedback.push(Feedback::Sound(SoundCue::SwordMiss));
            return Ok(());
        }

        for id in victims {
            if state.entities.remove_monster(id).is_some() {
                state.player.monsters_killed += 1;
                feedback.push(Feedback::MonsterRemoved(id));
                feedback.push(Feedback::Sound(SoundCue::SwordHit));
            }
        }

        Ok(())
    }
}
