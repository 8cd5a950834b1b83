//! Player character state driven by the action queue.

use crate::state::{InventoryState, Position, Vec2};

/// Visual state of the player sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerSprite {
    #[default]
    Plain,
    WithSword,
    /// Cleared after touching a monster.
    Hidden,
}

/// In-progress movement toward a target cell.
///
/// The logical grid position jumps to the target as soon as a move starts;
/// `Motion` only tracks the interpolated world position used for display.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Motion {
    pub current: Vec2,
    pub target: Vec2,
    pub is_moving: bool,
}

impl Motion {
    pub fn at_rest(position: Position) -> Self {
        let center = position.center();
        Self {
            current: center,
            target: center,
            is_moving: false,
        }
    }

    /// Starts moving toward `target` from wherever the display position is now.
    pub fn begin(&mut self, target: Position) {
        self.target = target.center();
        self.is_moving = true;
    }

    /// Advances the display position by `speed * dt`. No-op when not moving.
    pub fn advance(&mut self, dt: f32, speed: f32) -> Vec2 {
        if self.is_moving {
            self.current = self.current.move_towards(self.target, speed * dt);
        }
        self.current
    }

    /// Clears the movement flag, leaving the display position where it is.
    pub fn stop(&mut self) {
        self.is_moving = false;
    }

    pub fn has_arrived(&self) -> bool {
        self.current == self.target
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub position: Position,
    pub motion: Motion,
    pub inventory: InventoryState,
    pub has_sword: bool,
    pub sprite: PlayerSprite,
    pub(crate) treasures_collected: u32,
    pub(crate) monsters_killed: u32,
}

impl PlayerState {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            motion: Motion::at_rest(position),
            inventory: InventoryState::empty(),
            has_sword: false,
            sprite: PlayerSprite::Plain,
            treasures_collected: 0,
            monsters_killed: 0,
        }
    }

    pub fn treasures_collected(&self) -> u32 {
        self.treasures_collected
    }

    pub fn monsters_killed(&self) -> u32 {
        self.monsters_killed
    }
}
