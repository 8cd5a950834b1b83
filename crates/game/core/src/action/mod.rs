//! Action domain.
//!
//! Each queued [`ActionToken`] resolves into one concrete [`Action`]. Every
//! action variant implements [`ActionTransition`], a two-phase pipeline:
//! `pre_validate` rejects actions that would have no effect, `apply` mutates
//! the level and records the presentation [`Feedback`] it caused.
//!
//! # Module Structure
//!
//! - `token`: textual tokens and their mapping onto actions
//! - `movement`: single-cell steps
//! - `pickup`: floor items into the inventory
//! - `inventory`: using an inventory slot on a door
//! - `combat`: sword swings
//! - `wait`: idle slot

mod combat;
mod inventory;
mod movement;
mod pickup;
mod token;
mod wait;

pub use combat::{SwingAction, SwingError};
pub use inventory::{UseItemAction, UseItemError};
pub use movement::{CardinalDirection, MoveAction, MoveError};
pub use pickup::{PickupAction, PickupError};
pub use token::{ActionToken, TokenError};
pub use wait::WaitAction;

use crate::feedback::Feedback;
use crate::state::LevelState;

/// Defines how a concrete action variant mutates level state.
pub trait ActionTransition {
    type Error;

    /// Validates pre-conditions using the state **before** mutation.
    ///
    /// Returning an error leaves the state untouched.
    fn pre_validate(&self, _state: &LevelState) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action, appending feedback in the order it happened.
    fn apply(
        &self,
        state: &mut LevelState,
        feedback: &mut Vec<Feedback>,
    ) -> Result<(), Self::Error>;
}

/// Concrete action resolved from a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    Pickup(PickupAction),
    UseItem(UseItemAction),
    Wait(WaitAction),
    Swing(SwingAction),
}

impl Action {
    /// Returns the snake_case name of the action, used as a logging key.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::Move(_) => "move",
            Action::Pickup(_) => "pickup",
            Action::UseItem(_) => "use_item",
            Action::Wait(_) => "wait",
            Action::Swing(_) => "swing",
        }
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Self::Move(action)
    }
}

impl From<PickupAction> for Action {
    fn from(action: PickupAction) -> Self {
        Self::Pickup(action)
    }
}

impl From<UseItemAction> for Action {
    fn from(action: UseItemAction) -> Self {
        Self::UseItem(action)
    }
}

impl From<WaitAction> for Action {
    fn from(action: WaitAction) -> Self {
        Self::Wait(action)
    }
}

impl From<SwingAction> for Action {
    fn from(action: SwingAction) -> Self {
        Self::Swing(action)
    }
}
