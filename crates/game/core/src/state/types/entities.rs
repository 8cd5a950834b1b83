//! Entities placed in a level: items on the floor, monsters and doors.

use crate::state::{EntityId, ItemDefinition, Position};

/// Item lying on the floor, waiting to be picked up.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemEntity {
    pub id: EntityId,
    pub position: Position,
    pub item: ItemDefinition,
}

/// Monster occupying a cell. Touching it loses the level; a sword swing removes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterEntity {
    pub id: EntityId,
    pub position: Position,
}

/// Exit door that opens once enough keys have been used on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorEntity {
    pub id: EntityId,
    pub position: Position,
    pub keys_needed: u32,
}

impl DoorEntity {
    pub fn is_open(&self) -> bool {
        self.keys_needed == 0
    }

    /// Consumes one key and returns how many are still required.
    pub fn use_key(&mut self) -> u32 {
        self.keys_needed = self.keys_needed.saturating_sub(1);
        self.keys_needed
    }
}

/// All entities tracked in the level, kept in placement order.
///
/// Placement order matters: pickup walks items in this order and stops at the
/// first sword.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub items: Vec<ItemEntity>,
    pub monsters: Vec<MonsterEntity>,
    pub doors: Vec<DoorEntity>,
}

impl EntitiesState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn items_at(&self, position: Position) -> impl Iterator<Item = &ItemEntity> + '_ {
        self.items
            .iter()
            .filter(move |item| item.position == position)
    }

    pub fn monsters_at(&self, position: Position) -> impl Iterator<Item = &MonsterEntity> + '_ {
        self.monsters
            .iter()
            .filter(move |monster| monster.position == position)
    }

    pub fn doors_at(&self, position: Position) -> impl Iterator<Item = &DoorEntity> + '_ {
        self.doors
            .iter()
            .filter(move |door| door.position == position)
    }

    pub fn door_mut(&mut self, id: EntityId) -> Option<&mut DoorEntity> {
        self.doors.iter_mut().find(|door| door.id == id)
    }

    /// Removes an item from the floor, returning it if present.
    pub fn remove_item(&mut self, id: EntityId) -> Option<ItemEntity> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Removes a monster from the level, returning it if present.
    pub fn remove_monster(&mut self, id: EntityId) -> Option<MonsterEntity> {
        let index = self.monsters.iter().position(|monster| monster.id == id)?;
        Some(self.monsters.remove(index))
    }
}
