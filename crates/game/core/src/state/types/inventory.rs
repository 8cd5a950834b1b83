//! Fixed-size player inventory.

use crate::config::GameConfig;
use crate::state::ItemDefinition;

/// Slot index into the inventory (`0..GameConfig::INVENTORY_SLOTS`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotIndex(u8);

impl SlotIndex {
    pub const ALL: [SlotIndex; GameConfig::INVENTORY_SLOTS] =
        [SlotIndex(0), SlotIndex(1), SlotIndex(2)];

    /// Returns `None` when `index` is outside the inventory.
    pub fn new(index: usize) -> Option<Self> {
        (index < GameConfig::INVENTORY_SLOTS).then_some(Self(index as u8))
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

/// Inventory with a fixed number of slots; empty slots are `None`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    slots: [Option<ItemDefinition>; GameConfig::INVENTORY_SLOTS],
}

impl InventoryState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: SlotIndex) -> Option<&ItemDefinition> {
        self.slots[slot.get()].as_ref()
    }

    /// Lowest-numbered free slot.
    pub fn first_empty(&self) -> Option<SlotIndex> {
        self.slots
            .iter()
            .position(Option::is_none)
            .and_then(SlotIndex::new)
    }

    /// Places the item in the first free slot. Gives the item back when full.
    pub fn insert(&mut self, item: ItemDefinition) -> Result<SlotIndex, ItemDefinition> {
        match self.first_empty() {
            Some(slot) => {
                self.slots[slot.get()] = Some(item);
                Ok(slot)
            }
            None => Err(item),
        }
    }

    pub fn take(&mut self, slot: SlotIndex) -> Option<ItemDefinition> {
        self.slots[slot.get()].take()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&ItemDefinition>> + '_ {
        self.slots.iter().map(Option::as_ref)
    }
}
