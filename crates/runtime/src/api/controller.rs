//! Level-controller abstraction notified when a level ends.
//!
//! The host game (menus, level progression, scoring screens) plugs in a
//! [`LevelController`] so the runtime can report wins and losses without
//! knowing what happens next.
use async_trait::async_trait;
use game_core::{LevelOutcome, LevelState};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Score snapshot handed to the level controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub outcome: LevelOutcome,
    pub treasures_collected: u32,
    pub monsters_killed: u32,
    /// Actions executed so far, including ones that had no effect.
    pub actions_executed: u64,
}

impl LevelSummary {
    pub fn from_state(state: &LevelState) -> Self {
        Self {
            outcome: state.outcome,
            treasures_collected: state.player.treasures_collected(),
            monsters_killed: state.player.monsters_killed(),
            actions_executed: state.nonce,
        }
    }
}

/// Receives level termination signals.
///
/// Implementations may be:
/// - A game shell advancing to the next level
/// - A scoring service
/// - A test fixture recording the calls
#[async_trait]
pub trait LevelController: Send + Sync {
    /// Called once the win delay after the door opened has elapsed.
    async fn win_level(&self, summary: LevelSummary);

    /// Called as soon as the player touches a monster.
    async fn lose_level(&self, summary: LevelSummary);
}

/// Controller that ignores every signal.
pub struct NoopLevelController;

#[async_trait]
impl LevelController for NoopLevelController {
    async fn win_level(&self, _summary: LevelSummary) {}

    async fn lose_level(&self, _summary: LevelSummary) {}
}

/// Signal forwarded by [`ChannelLevelController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSignal {
    Won(LevelSummary),
    Lost(LevelSummary),
}

/// Controller that forwards signals over an unbounded channel.
pub struct ChannelLevelController {
    tx: mpsc::UnboundedSender<LevelSignal>,
}

impl ChannelLevelController {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<LevelSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, signal: LevelSignal) {
        if self.tx.send(signal).is_err() {
            tracing::debug!("level signal receiver dropped; {:?} discarded", signal);
        }
    }
}

#[async_trait]
impl LevelController for ChannelLevelController {
    async fn win_level(&self, summary: LevelSummary) {
        self.forward(LevelSignal::Won(summary));
    }

    async fn lose_level(&self, summary: LevelSummary) {
        self.forward(LevelSignal::Lost(summary));
    }
}
