//! Event types for different topics.

use game_core::{ActionToken, ErrorSeverity, Feedback, SoundCue, Vec2};
use serde::{Deserialize, Serialize};

use crate::api::LevelSummary;

/// Events describing what the controller did with each queued action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ControllerEvent {
    /// An action ran and produced the given feedback (possibly none).
    ActionExecuted {
        nonce: u64,
        token: ActionToken,
        feedback: Vec<Feedback>,
    },

    /// An action was valid but had no effect (or failed internally).
    ActionRejected {
        nonce: u64,
        token: ActionToken,
        severity: ErrorSeverity,
        error: String,
    },

    /// The queue contained a token that is not an action.
    UnknownToken { index: usize, token: String },

    /// The swing visual spawned by action `nonce` expired.
    SwingExpired { nonce: u64 },

    /// The movement flag was cleared at the end of an action slot.
    MotionSettled { position: Vec2 },
}

/// A sound cue to play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioEvent {
    pub cue: SoundCue,
    /// Playback pitch multiplier; 1.0 is unmodified.
    pub pitch: f32,
}

impl AudioEvent {
    pub fn new(cue: SoundCue, pitch: f32) -> Self {
        Self { cue, pitch }
    }
}

/// Level progression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LevelEvent {
    /// The player touched a monster.
    Lost(LevelSummary),

    /// The exit door opened; the level is reported as won after the win delay.
    WinSequenceStarted,

    /// The win delay elapsed and the level controller was notified.
    Won(LevelSummary),

    /// Action processing stopped before the queue was exhausted.
    QueueStopped { remaining: usize },
}
