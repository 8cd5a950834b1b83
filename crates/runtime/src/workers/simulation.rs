//! Simulation worker that owns the authoritative [`game_core::LevelState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), executes
//! actions via [`game_core::GameEngine`], and publishes controller and audio
//! events for the feedback each action produced.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, trace};

use game_core::{
    ActionToken, ExecuteError, ExecutionOutcome, Feedback, GameConfig, GameEngine, GameError,
    LevelState, PcgRng, RngOracle, SoundCue, Vec2, compute_seed,
};

use crate::api::{LevelSummary, Result, RuntimeError};
use crate::events::{AudioEvent, ControllerEvent, EventBus};

/// Result of executing one token.
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// The action ran; its feedback has already been published.
    Executed(ExecutionOutcome),
    /// The action had no effect.
    Rejected(ExecuteError),
}

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Execute one action token.
    Execute {
        token: ActionToken,
        reply: oneshot::Sender<Result<StepOutcome>>,
    },
    /// Advance the interpolated player position by `dt` seconds.
    AdvanceMotion { dt: f32 },
    /// Clear the movement flag at the end of an action slot.
    SettleMotion { reply: oneshot::Sender<Vec2> },
    /// Current score snapshot.
    Summary {
        reply: oneshot::Sender<LevelSummary>,
    },
    /// Query the current level state (read-only clone).
    QueryState { reply: oneshot::Sender<LevelState> },
}

/// Background task that processes controller commands.
pub struct SimulationWorker {
    state: LevelState,
    config: GameConfig,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        state: LevelState,
        config: GameConfig,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            state,
            config,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!("simulation worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Execute { token, reply } => {
                let result = self.execute(token);
                let _ = reply.send(result);
            }
            Command::AdvanceMotion { dt } => {
                let position = self.state.player.motion.advance(dt, self.config.speed);
                trace!(x = position.x, y = position.y, "motion frame");
            }
            Command::SettleMotion { reply } => {
                self.state.player.motion.stop();
                let position = self.state.player.motion.current;
                self.event_bus
                    .publish(ControllerEvent::MotionSettled { position });
                let _ = reply.send(position);
            }
            Command::Summary { reply } => {
                let _ = reply.send(LevelSummary::from_state(&self.state));
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
        }
    }

    fn execute(&mut self, token: ActionToken) -> Result<StepOutcome> {
        let nonce = self.state.nonce;

        // Execute against a staged copy so an internal failure midway through
        // `apply` cannot leave a half-applied action behind.
        let mut working_state = self.state.clone();
        let result = GameEngine::new(&mut working_state).execute_token(token);

        match result {
            Ok(outcome) => {
                self.state = working_state;
                debug!(
                    nonce,
                    token = token.as_str(),
                    action = token.action().as_snake_case(),
                    feedback = outcome.feedback.len(),
                    "action executed"
                );
                self.publish_feedback(nonce, token, &outcome.feedback);
                Ok(StepOutcome::Executed(outcome))
            }
            Err(error) if error.severity().is_internal() => {
                error!(
                    nonce,
                    token = token.as_str(),
                    action = token.action().as_snake_case(),
                    code = error.error_code(),
                    "action failed: {}",
                    error
                );
                Err(RuntimeError::Internal(error))
            }
            Err(error) => {
                // Rejected actions only bump the nonce.
                self.state.nonce = working_state.nonce;
                debug!(
                    nonce,
                    token = token.as_str(),
                    action = token.action().as_snake_case(),
                    code = error.error_code(),
                    "action had no effect: {}",
                    error
                );
                self.event_bus.publish(ControllerEvent::ActionRejected {
                    nonce,
                    token,
                    severity: error.severity(),
                    error: error.to_string(),
                });
                Ok(StepOutcome::Rejected(error))
            }
        }
    }

    fn publish_feedback(&self, nonce: u64, token: ActionToken, feedback: &[Feedback]) {
        for (index, entry) in feedback.iter().enumerate() {
            match entry {
                Feedback::Sound(cue) => {
                    let pitch = self.pitch_for(*cue, nonce, index as u32);
                    self.event_bus.publish(AudioEvent::new(*cue, pitch));
                }
                Feedback::SwingSpawned(_) => self.schedule_swing_expiry(nonce),
                _ => {}
            }
        }

        self.event_bus.publish(ControllerEvent::ActionExecuted {
            nonce,
            token,
            feedback: feedback.to_vec(),
        });
    }

    fn pitch_for(&self, cue: SoundCue, nonce: u64, context: u32) -> f32 {
        match cue {
            SoundCue::Footsteps => PcgRng.range_f32(
                compute_seed(self.config.rng_seed, nonce, context),
                self.config.footstep_pitch_min,
                self.config.footstep_pitch_max,
            ),
            _ => 1.0,
        }
    }

    fn schedule_swing_expiry(&self, nonce: u64) {
        let bus = self.event_bus.clone();
        let lifetime = Duration::from_secs_f32(self.config.swing_time);
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            bus.publish(ControllerEvent::SwingExpired { nonce });
        });
    }
}
