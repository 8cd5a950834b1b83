//! Authoritative level state.
//!
//! This module owns the data structures that describe the wall grid, the
//! entities placed in the level and the player. Runtime layers clone or query
//! this state but mutate it exclusively through the engine.
mod builder;
mod error;
pub mod types;

pub use builder::LevelBuilder;
pub use error::StateError;
pub use types::{
    DoorEntity, EntitiesState, EntityId, InventoryState, ItemDefinition, ItemEntity, ItemKind,
    MonsterEntity, Motion, PlayerSprite, PlayerState, Position, SlotIndex, TileGrid, Vec2,
};

/// Whether the level is still being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl LevelOutcome {
    pub fn is_finished(self) -> bool {
        !matches!(self, LevelOutcome::InProgress)
    }
}

/// Canonical snapshot of a level being played.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelState {
    pub grid: TileGrid,
    pub entities: EntitiesState,
    pub player: PlayerState,
    pub outcome: LevelOutcome,
    /// Number of actions executed so far (successful or not).
    pub nonce: u64,
}

impl LevelState {
    /// Starts building a level of the given size.
    pub fn builder(width: u32, height: u32) -> LevelBuilder {
        LevelBuilder::new(width, height)
    }

    /// True when the player cannot step into `position`.
    pub fn is_blocked(&self, position: Position) -> bool {
        self.grid.is_wall(position)
    }
}
