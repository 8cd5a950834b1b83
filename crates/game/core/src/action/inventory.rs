use crate::action::ActionTransition;
use crate::engine::triggers;
use crate::error::{ErrorSeverity, GameError};
use crate::feedback::Feedback;
use crate::state::{EntityId, ItemKind, LevelState, Position, SlotIndex};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseItemError {
    #[error("inventory slot {} is empty", .0.get())]
    SlotEmpty(SlotIndex),

    #[error("{kind} cannot be used here")]
    NotUsable { kind: ItemKind },

    #[error("no door at {position}")]
    NoTarget { position: Position },

    #[error("door {0} vanished while a key was used on it")]
    DoorMissing(EntityId),
}

impl GameError for UseItemError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SlotEmpty(_) | Self::NotUsable { .. } | Self::NoTarget { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::DoorMissing(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SlotEmpty(_) => "USE_ITEM_SLOT_EMPTY",
            Self::NotUsable { .. } => "USE_ITEM_NOT_USABLE",
            Self::NoTarget { .. } => "USE_ITEM_NO_TARGET",
            Self::DoorMissing(_) => "USE_ITEM_DOOR_MISSING",
        }
    }
}

/// Uses the item in an inventory slot on whatever shares the player's cell.
///
/// Keys are the only usable items: a key used on a door is consumed and
/// lowers the door's key requirement. The door reaching zero wins the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseItemAction {
    pub slot: SlotIndex,
}

impl UseItemAction {
    pub fn new(slot: SlotIndex) -> Self {
        Self { slot }
    }

    fn target_door(&self, state: &LevelState) -> Option<EntityId> {
        state
            .entities
            .doors_at(state.player.position)
            .next()
            .map(|door| door.id)
    }
}

impl ActionTransition for UseItemAction {
    type Error = UseItemError;

    fn pre_validate(&self, state: &LevelState) -> Result<(), Self::Error> {
        let item = state
            .player
            .inventory
            .get(self.slot)
            .ok_or(UseItemError::SlotEmpty(self.slot))?;

        if !item.is_key() {
            return Err(UseItemError::NotUsable { kind: item.kind });
        }

        if self.target_door(state).is_none() {
            return Err(UseItemError::NoTarget {
                position: state.player.position,
            });
        }

        Ok(())
    }

    fn apply(
        &self,
        state: &mut LevelState,
        feedback: &mut Vec<Feedback>,
    ) -> Result<(), Self::Error> {
        let position = state.player.position;
        let door_id = self
            .target_door(state)
            .ok_or(UseItemError::NoTarget { position })?;

        state
            .player
            .inventory
            .take(self.slot)
            .ok_or(UseItemError::SlotEmpty(self.slot))?;
        feedback.push(Feedback::InventorySlotChanged {
            slot: self.slot,
            item: None,
        });

        let remaining = state
            .entities
            .door_mut(door_id)
            .ok_or(UseItemError::DoorMissing(door_id))?
            .use_key();
        feedback.push(Feedback::DoorKeysChanged {
            door: door_id,
            remaining,
        });

        if remaining == 0 {
            triggers::declare_win(state, door_id, feedback);
        }

        Ok(())
    }
}
