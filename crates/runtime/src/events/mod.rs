//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics and consumers subscribe only to
//! the topics they need: a HUD listens to [`Topic::Controller`], a sound
//! player to [`Topic::Audio`], a level flow to [`Topic::Level`].

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{AudioEvent, ControllerEvent, LevelEvent};
