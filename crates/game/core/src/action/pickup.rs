use crate::action::ActionTransition;
use crate::error::{ErrorSeverity, GameError};
use crate::feedback::{Feedback, SoundCue};
use crate::state::{EntityId, ItemDefinition, LevelState, PlayerSprite, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickupError {
    #[error("no item at {position}")]
    NothingHere { position: Position },

    #[error("inventory is full and nothing at {position} can be equipped")]
    InventoryFull { position: Position },

    #[error("item {0} vanished during pickup")]
    ItemMissing(EntityId),
}

impl GameError for PickupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NothingHere { .. } | Self::InventoryFull { .. } => ErrorSeverity::Recoverable,
            Self::ItemMissing(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NothingHere { .. } => "PICKUP_NOTHING_HERE",
            Self::InventoryFull { .. } => "PICKUP_INVENTORY_FULL",
            Self::ItemMissing(_) => "PICKUP_ITEM_MISSING",
        }
    }
}

/// Picks up the items lying in the player's cell.
///
/// Items are visited in placement order. A sword is equipped and ends the
/// pickup immediately; any other item goes into the first free inventory slot
/// and stays on the floor when the inventory is full. A pickup that could
/// take nothing at all is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupAction;

impl ActionTransition for PickupAction {
    type Error = PickupError;

    fn pre_validate(&self, state: &LevelState) -> Result<(), Self::Error> {
        let position = state.player.position;
        let mut items = state.entities.items_at(position).peekable();
        if items.peek().is_none() {
            return Err(PickupError::NothingHere { position });
        }
        if state.player.inventory.is_full() && !items.any(|entity| entity.item.is_sword()) {
            return Err(PickupError::InventoryFull { position });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut LevelState,
        feedback: &mut Vec<Feedback>,
    ) -> Result<(), Self::Error> {
        let candidates: Vec<(EntityId, ItemDefinition)> = state
            .entities
            .items_at(state.player.position)
            .map(|entity| (entity.id, entity.item.clone()))
            .collect();

        for (id, item) in candidates {
            if item.is_sword() {
                state
                    .entities
                    .remove_item(id)
                    .ok_or(PickupError::ItemMissing(id))?;
                state.player.has_sword = true;
                state.player.sprite = PlayerSprite::WithSword;
                feedback.push(Feedback::SwordVisibility(true));
                feedback.push(Feedback::Sound(SoundCue::SwordPickup));
                feedback.push(Feedback::ItemRemoved(id));
                feedback.push(Feedback::SpriteChanged(PlayerSprite::WithSword));
                return Ok(());
            }

            let kind = item.kind;
            let is_treasure = item.is_treasure();

            // The item leaves the floor only once a slot has taken it.
            let Ok(slot) = state.player.inventory.insert(item) else {
                continue;
            };
            state
                .entities
                .remove_item(id)
                .ok_or(PickupError::ItemMissing(id))?;

            feedback.push(Feedback::InventorySlotChanged {
                slot,
                item: Some(kind),
            });
            feedback.push(Feedback::ItemRemoved(id));
            feedback.push(Feedback::Sound(SoundCue::KeyClink));

            if is_treasure {
                state.player.treasures_collected += 1;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ItemKind, SlotIndex};

    fn level_with(items: &[ItemKind]) -> LevelState {
        let here = Position::new(0, 0);
        items
            .iter()
            .fold(
                LevelState::builder(2, 1).player(here),
                |builder, kind| builder.item(here, *kind),
            )
            .build()
            .unwrap()
    }

    fn pickup(state: &mut LevelState) -> Vec<Feedback> {
        let mut feedback = Vec::new();
        PickupAction.pre_validate(state).unwrap();
        PickupAction.apply(state, &mut feedback).unwrap();
        feedback
    }

    #[test]
    fn gem_fills_first_slot_and_counts_as_treasure() {
        let mut state = level_with(&[ItemKind::Gem]);
        let feedback = pickup(&mut state);

        assert_eq!(state.player.treasures_collected(), 1);
        assert!(state.entities.items.is_empty());
        assert_eq!(
            feedback[0],
            Feedback::InventorySlotChanged {
                slot: SlotIndex::new(0).unwrap(),
                item: Some(ItemKind::Gem),
            }
        );
        assert!(feedback.contains(&Feedback::Sound(SoundCue::KeyClink)));
    }

    #[test]
    fn sword_equips_and_stops_processing_remaining_items() {
        let mut state = level_with(&[ItemKind::Sword, ItemKind::Key]);
        let feedback = pickup(&mut state);

        assert!(state.player.has_sword);
        assert_eq!(state.player.sprite, PlayerSprite::WithSword);
        assert_eq!(state.entities.items.len(), 1);
        assert!(state.entities.items[0].item.is_key());
        assert!(state.player.inventory.iter().all(|slot| slot.is_none()));
        assert!(feedback.contains(&Feedback::SwordVisibility(true)));
        assert!(feedback.contains(&Feedback::Sound(SoundCue::SwordPickup)));
    }

    #[test]
    fn items_before_sword_are_collected_first() {
        let mut state = level_with(&[ItemKind::Key, ItemKind::Sword, ItemKind::Gem]);
        pickup(&mut state);

        assert!(state.player.has_sword);
        let slot0 = state.player.inventory.get(SlotIndex::new(0).unwrap());
        assert!(slot0.is_some_and(|item| item.is_key()));
        assert_eq!(state.entities.items.len(), 1);
        assert_eq!(state.player.treasures_collected(), 0);
    }

    #[test]
    fn full_inventory_leaves_items_on_the_floor() {
        let mut state = level_with(&[
            ItemKind::Key,
            ItemKind::Key,
            ItemKind::Trinket,
            ItemKind::Gem,
        ]);
        let feedback = pickup(&mut state);

        assert!(state.player.inventory.is_full());
        assert_eq!(state.entities.items.len(), 1);
        assert!(state.entities.items[0].item.is_treasure());
        assert_eq!(state.player.treasures_collected(), 0);
        let clinks = feedback
            .iter()
            .filter(|fb| **fb == Feedback::Sound(SoundCue::KeyClink))
            .count();
        assert_eq!(clinks, 3);
    }

    #[test]
    fn full_inventory_without_a_sword_is_rejected() {
        let mut state = level_with(&[ItemKind::Key]);
        for kind in [ItemKind::Gem, ItemKind::Trinket, ItemKind::Key] {
            state.player.inventory.insert(kind.into()).unwrap();
        }

        let err = PickupAction.pre_validate(&state).unwrap_err();
        assert_eq!(
            err,
            PickupError::InventoryFull {
                position: Position::new(0, 0)
            }
        );
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "PICKUP_INVENTORY_FULL");
    }

    #[test]
    fn full_inventory_still_equips_a_sword() {
        let mut state = level_with(&[ItemKind::Key, ItemKind::Sword]);
        for kind in [ItemKind::Gem, ItemKind::Trinket, ItemKind::Key] {
            state.player.inventory.insert(kind.into()).unwrap();
        }

        let feedback = pickup(&mut state);
        assert!(state.player.has_sword);
        assert_eq!(state.entities.items.len(), 1);
        assert!(state.entities.items[0].item.is_key());
        assert!(!feedback.contains(&Feedback::Sound(SoundCue::KeyClink)));
    }

    #[test]
    fn item_that_finds_no_slot_keeps_its_entity() {
        let mut state = level_with(&[ItemKind::Gem, ItemKind::Key]);
        state.player.inventory.insert(ItemKind::Trinket.into()).unwrap();
        state.player.inventory.insert(ItemKind::Trinket.into()).unwrap();
        let key_id = state.entities.items[1].id;

        let feedback = pickup(&mut state);

        assert_eq!(state.entities.items.len(), 1);
        assert_eq!(state.entities.items[0].id, key_id);
        assert!(!feedback.contains(&Feedback::ItemRemoved(key_id)));
        assert_eq!(state.player.treasures_collected(), 1);
    }

    #[test]
    fn empty_cell_is_recoverable() {
        let state = level_with(&[]);
        let err = PickupAction.pre_validate(&state).unwrap_err();
        assert!(err.severity().is_recoverable());
    }
}
