//! Item definitions that can lie in a level or sit in the inventory.

use strum::{Display, EnumString};

/// Behavioural category of an item.
///
/// Only swords, keys and gems carry special rules; everything else is a
/// trinket that simply occupies a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ItemKind {
    Sword,
    Key,
    Gem,
    Trinket,
}

/// Concrete item with a display name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub kind: ItemKind,
    pub name: String,
}

impl ItemDefinition {
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Item named after its kind (`"key"`, `"gem"`, ...).
    pub fn of_kind(kind: ItemKind) -> Self {
        Self::new(kind, kind.to_string())
    }

    pub fn is_sword(&self) -> bool {
        self.kind == ItemKind::Sword
    }

    pub fn is_key(&self) -> bool {
        self.kind == ItemKind::Key
    }

    pub fn is_treasure(&self) -> bool {
        self.kind == ItemKind::Gem
    }
}

impl From<ItemKind> for ItemDefinition {
    fn from(kind: ItemKind) -> Self {
        Self::of_kind(kind)
    }
}
