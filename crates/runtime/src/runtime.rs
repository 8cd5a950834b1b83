//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and paces a queue of action tokens the way the level plays them back: one
//! action per slot with motion frames in between. Reporting a finished level
//! to the [`LevelController`] is left to [`RuntimeHandle`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use game_core::{ActionToken, GameConfig, LevelState, Termination};

use crate::api::{
    LevelController, LevelSummary, NoopLevelController, Result, RuntimeError, RuntimeHandle,
};
use crate::events::{ControllerEvent, Event, EventBus, LevelEvent, Topic};
use crate::workers::{Command, SimulationWorker, StepOutcome};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Interval between motion frames while waiting between actions.
    pub frame_interval: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            frame_interval: Duration::from_millis(16),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    fn validate(&self) -> Result<()> {
        self.game_config
            .validate()
            .map_err(RuntimeError::InvalidConfig)?;
        if self.frame_interval.is_zero() {
            return Err(RuntimeError::InvalidConfig(
                "frame_interval must be greater than zero".into(),
            ));
        }
        if self.event_buffer_size == 0 || self.command_buffer_size == 0 {
            return Err(RuntimeError::InvalidConfig(
                "channel buffers must hold at least one message".into(),
            ));
        }
        Ok(())
    }
}

/// What happened to a queue of actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Actions that ran and changed the level.
    pub executed: usize,
    /// Actions that were valid tokens but had no effect.
    pub rejected: usize,
    /// Tokens that did not name an action.
    pub skipped: usize,
    /// Processing ended with tokens left in the queue.
    pub stopped_early: bool,
    pub summary: LevelSummary,
}

/// Main runtime that plays queued actions against a level.
///
/// Design: Runtime owns the worker and coordinates pacing.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    config: RuntimeConfig,
    stop_rx: watch::Receiver<bool>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks, e.g. to call
    /// [`RuntimeHandle::stop_queue`] while [`execute_actions`](Self::execute_actions)
    /// is running.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Play a queue of action tokens.
    ///
    /// Each token occupies one slot of `time_between_actions`. Unknown tokens
    /// are logged and skipped but still use their slot. Processing ends after
    /// the action that finishes the level, or once a stop was requested via
    /// [`RuntimeHandle::stop_queue`]. Any earlier stop request is cleared when
    /// the call starts.
    ///
    /// The win sequence runs alongside the last slot; this method returns only
    /// after the level controller has been notified.
    pub async fn execute_actions<I, S>(&mut self, tokens: I) -> Result<RunReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<S> = tokens.into_iter().collect();
        let mut report = RunReport {
            executed: 0,
            rejected: 0,
            skipped: 0,
            stopped_early: false,
            summary: self.handle.summary().await?,
        };

        if report.summary.outcome.is_finished() {
            debug!(outcome = ?report.summary.outcome, "level already finished; queue ignored");
            report.stopped_early = !tokens.is_empty();
            self.handle.finish_win_sequence().await?;
            return Ok(report);
        }

        self.handle.resume_queue();
        self.stop_rx.mark_unchanged();

        info!(actions = tokens.len(), "executing action queue");

        let mut processed = 0;

        for (index, raw) in tokens.iter().enumerate() {
            if *self.stop_rx.borrow() {
                debug!(index, "queue stop requested");
                break;
            }
            processed = index + 1;

            let raw = raw.as_ref();
            let token = match ActionToken::parse(raw) {
                Ok(token) => Some(token),
                Err(error) => {
                    warn!(index, "{}", error);
                    self.handle.event_bus().publish(ControllerEvent::UnknownToken {
                        index,
                        token: raw.to_owned(),
                    });
                    report.skipped += 1;
                    None
                }
            };

            let mut termination = None;
            if let Some(token) = token {
                match self.handle.execute_token(token).await? {
                    StepOutcome::Executed(outcome) => {
                        report.executed += 1;
                        termination = outcome.termination;
                    }
                    StepOutcome::Rejected(_) => report.rejected += 1,
                }
            }

            match termination {
                Some(Termination::Lost) => break,
                Some(Termination::Won) => {
                    self.pace().await?;
                    break;
                }
                None => self.pace().await?,
            }
        }

        let remaining = tokens.len() - processed;
        if remaining > 0 {
            report.stopped_early = true;
            self.handle
                .event_bus()
                .publish(LevelEvent::QueueStopped { remaining });
        }

        self.handle.finish_win_sequence().await?;

        report.summary = self.handle.summary().await?;
        info!(
            executed = report.executed,
            rejected = report.rejected,
            skipped = report.skipped,
            outcome = ?report.summary.outcome,
            "action queue finished"
        );
        Ok(report)
    }

    /// Wait out one action slot while advancing the player's motion.
    ///
    /// A stop request cuts the wait short. The movement flag is cleared either way.
    async fn pace(&mut self) -> Result<()> {
        let slot = Duration::from_secs_f32(self.config.game_config.time_between_actions);
        let deadline = Instant::now() + slot;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            let frame = remaining.min(self.config.frame_interval);

            tokio::select! {
                _ = tokio::time::sleep(frame) => {
                    self.handle.advance_motion(frame.as_secs_f32()).await?;
                }
                changed = self.stop_rx.changed() => {
                    if changed.is_err() || *self.stop_rx.borrow_and_update() {
                        break;
                    }
                }
            }
        }

        self.handle.settle_motion().await?;
        Ok(())
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    level: Option<LevelState>,
    controller: Option<Arc<dyn LevelController>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            level: None,
            controller: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the game timings, keeping the other runtime settings.
    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    /// Provide the level to play (required)
    pub fn level(mut self, level: LevelState) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the level controller notified on win/loss (optional)
    ///
    /// Defaults to [`NoopLevelController`].
    pub fn level_controller(mut self, controller: impl LevelController + 'static) -> Self {
        self.controller = Some(Arc::new(controller));
        self
    }

    /// Build the runtime and spawn the simulation worker
    pub async fn build(self) -> Result<Runtime> {
        let level = self.level.ok_or(RuntimeError::MissingLevel)?;
        self.config.validate()?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let (stop_tx, stop_rx) = watch::channel(false);

        let controller: Arc<dyn LevelController> = match self.controller {
            Some(controller) => controller,
            None => Arc::new(NoopLevelController),
        };
        let handle = RuntimeHandle::new(
            command_tx,
            event_bus.clone(),
            Arc::new(stop_tx),
            controller,
            Duration::from_secs_f32(self.config.game_config.win_delay),
        );

        let sim_worker = SimulationWorker::new(
            level,
            self.config.game_config.clone(),
            command_rx,
            event_bus,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            config: self.config,
            stop_rx,
            sim_worker_handle,
        })
    }
}
