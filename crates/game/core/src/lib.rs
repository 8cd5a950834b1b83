//! Deterministic rules for the queued-action player controller.
//!
//! `game-core` turns abstract action tokens (`moveleft`, `pickup`,
//! `swingup`, ...) into grid movement, inventory changes, sword combat and
//! win/loss detection. It performs no I/O and knows nothing about time: the
//! runtime crate paces actions and plays out the feedback reported here.
//! All state mutation flows through [`engine::GameEngine`].
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod rng;
pub mod state;

pub use action::{
    Action, ActionToken, ActionTransition, CardinalDirection, MoveAction, MoveError,
    PickupAction, PickupError, SwingAction, SwingError, TokenError, UseItemAction, UseItemError,
    WaitAction,
};
pub use config::GameConfig;
pub use engine::{
    ExecuteError, ExecutionOutcome, GameEngine, Termination, TransitionPhase,
    TransitionPhaseError,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use feedback::{Feedback, SoundCue, SwingEffect};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use state::{
    DoorEntity, EntitiesState, EntityId, InventoryState, ItemDefinition, ItemEntity, ItemKind,
    LevelBuilder, LevelOutcome, LevelState, MonsterEntity, Motion, PlayerSprite, PlayerState,
    Position, SlotIndex, StateError, TileGrid, Vec2,
};
