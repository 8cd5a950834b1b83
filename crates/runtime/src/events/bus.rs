//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;

use super::types::{AudioEvent, ControllerEvent, LevelEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Executed and rejected actions, motion and swing lifecycle
    Controller,
    /// Sound cues to play
    Audio,
    /// Win/loss progression
    Level,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Controller, Topic::Audio, Topic::Level];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Controller(ControllerEvent),
    Audio(AudioEvent),
    Level(LevelEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Controller(_) => Topic::Controller,
            Event::Audio(_) => Topic::Audio,
            Event::Level(_) => Topic::Level,
        }
    }
}

impl From<ControllerEvent> for Event {
    fn from(event: ControllerEvent) -> Self {
        Event::Controller(event)
    }
}

impl From<AudioEvent> for Event {
    fn from(event: AudioEvent) -> Self {
        Event::Audio(event)
    }
}

impl From<LevelEvent> for Event {
    fn from(event: LevelEvent) -> Self {
        Event::Level(event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels are created up front, so the map is
/// never mutated after construction.
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();

        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        self.channels
            .get(&topic)
            .expect("Topic channel not initialized")
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
