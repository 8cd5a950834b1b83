//! Runtime orchestration for the queued-action player controller.
//!
//! This crate wires the deterministic rules from `game-core` into a tokio
//! runtime that plays a queue of action tokens with real pacing. Consumers
//! embed [`Runtime`] to run a level, subscribe to events, and receive win/loss
//! notifications through a [`LevelController`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    ChannelLevelController, LevelController, LevelSignal, LevelSummary, NoopLevelController,
    Result, RuntimeError, RuntimeHandle,
};
pub use events::{AudioEvent, ControllerEvent, Event, EventBus, LevelEvent, Topic};
pub use runtime::{RunReport, Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::StepOutcome;
