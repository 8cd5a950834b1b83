mod common;
mod entities;
mod grid;
mod inventory;
mod item;
mod player;

pub use common::{EntityId, Position, Vec2};
pub use entities::{DoorEntity, EntitiesState, ItemEntity, MonsterEntity};
pub use grid::TileGrid;
pub use inventory::{InventoryState, SlotIndex};
pub use item::{ItemDefinition, ItemKind};
pub use player::{Motion, PlayerSprite, PlayerState};
