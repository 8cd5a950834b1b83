//! Presentation side effects produced by executing an action.
//!
//! The engine never plays sounds or touches sprites itself; it reports what
//! should happen as an ordered list of [`Feedback`] entries which the runtime
//! forwards to whatever presentation layer is attached.

use strum::{AsRefStr, Display};

use crate::action::CardinalDirection;
use crate::state::{EntityId, ItemKind, PlayerSprite, Position, SlotIndex, Vec2};

/// Sound cues the controller can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundCue {
    DoorOpen,
    KeyClink,
    /// Played with a randomised pitch.
    Footsteps,
    SwordPickup,
    SwordMiss,
    SwordHit,
}

/// Transient swing visual spawned in front of the player.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwingEffect {
    pub direction: CardinalDirection,
    /// World position of the effect (player position plus direction offset).
    pub origin: Vec2,
    /// Rotation in degrees around the z axis.
    pub angle: i16,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Feedback {
    MoveStarted {
        from: Position,
        to: Position,
    },
    Sound(SoundCue),
    /// HUD sword indicator.
    SwordVisibility(bool),
    /// HUD inventory slot icon. `None` clears the slot.
    InventorySlotChanged {
        slot: SlotIndex,
        item: Option<ItemKind>,
    },
    ItemRemoved(EntityId),
    MonsterRemoved(EntityId),
    SwingSpawned(SwingEffect),
    SpriteChanged(PlayerSprite),
    DoorKeysChanged {
        door: EntityId,
        remaining: u32,
    },
    /// The host should stop feeding further actions.
    QueueStopped,
    /// The exit door opened; the win sequence should start.
    WinTriggered {
        door: EntityId,
    },
}
