//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! executing single actions, inspecting the level, stopping the action queue
//! or streaming events from specific topics.
//!
//! Every executed action passes through [`RuntimeHandle::execute_token`], so
//! that is where a finished level is reported: a loss reaches the
//! [`LevelController`] at once, a win after the delayed win sequence.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::info;

use game_core::{ActionToken, LevelState, SoundCue, Termination, Vec2};

use super::controller::{LevelController, LevelSummary};
use super::errors::{Result, RuntimeError};
use crate::events::{AudioEvent, Event, EventBus, LevelEvent, Topic};
use crate::workers::{Command, StepOutcome};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    stop_tx: Arc<watch::Sender<bool>>,
    controller: Arc<dyn LevelController>,
    win_delay: Duration,
    win_task: Arc<Mutex<Option<JoinHandle<Result<()>>>>>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        stop_tx: Arc<watch::Sender<bool>>,
        controller: Arc<dyn LevelController>,
        win_delay: Duration,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            stop_tx,
            controller,
            win_delay,
            win_task: Arc::new(Mutex::new(None)),
        }
    }

    /// Execute a single action immediately, without pacing.
    ///
    /// An action that loses the level notifies the level controller before
    /// this returns. An action that wins it starts the win sequence in the
    /// background; see [`finish_win_sequence`](Self::finish_win_sequence).
    pub async fn execute_token(&self, token: ActionToken) -> Result<StepOutcome> {
        let step = self
            .request(|reply| Command::Execute { token, reply })
            .await??;

        if let StepOutcome::Executed(outcome) = &step {
            match outcome.termination {
                Some(Termination::Lost) => self.report_loss().await?,
                Some(Termination::Won) => self.start_win_sequence().await,
                None => {}
            }
        }

        Ok(step)
    }

    /// Wait for a started win sequence to notify the level controller.
    ///
    /// Returns at once when no win sequence is pending.
    pub async fn finish_win_sequence(&self) -> Result<()> {
        let task = self.win_task.lock().await.take();
        match task {
            Some(task) => task.await.map_err(RuntimeError::WorkerJoin)?,
            None => Ok(()),
        }
    }

    async fn report_loss(&self) -> Result<()> {
        let summary = self.summary().await?;
        info!(?summary, "level lost");
        self.controller.lose_level(summary).await;
        self.event_bus.publish(LevelEvent::Lost(summary));
        Ok(())
    }

    async fn start_win_sequence(&self) {
        info!("exit door opened; starting win sequence");
        let handle = self.clone();

        let task = tokio::spawn(async move {
            handle.event_bus.publish(LevelEvent::WinSequenceStarted);
            handle
                .event_bus
                .publish(AudioEvent::new(SoundCue::DoorOpen, 1.0));

            tokio::time::sleep(handle.win_delay).await;

            let summary = handle.summary().await?;
            info!(?summary, "level won");
            handle.controller.win_level(summary).await;
            handle.event_bus.publish(LevelEvent::Won(summary));
            Ok(())
        });

        *self.win_task.lock().await = Some(task);
    }

    /// Current score snapshot.
    pub async fn summary(&self) -> Result<LevelSummary> {
        self.request(|reply| Command::Summary { reply }).await
    }

    /// Clone of the current level state.
    pub async fn query_state(&self) -> Result<LevelState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    pub(crate) async fn advance_motion(&self, dt: f32) -> Result<()> {
        self.command_tx
            .send(Command::AdvanceMotion { dt })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    pub(crate) async fn settle_motion(&self) -> Result<Vec2> {
        self.request(|reply| Command::SettleMotion { reply }).await
    }

    /// Ask the running action queue to stop before its next action.
    ///
    /// The request stays in effect until [`resume_queue`](Self::resume_queue).
    pub fn stop_queue(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Clear a previous stop request.
    pub fn resume_queue(&self) {
        self.stop_tx.send_replace(false);
    }

    pub fn is_queue_stopped(&self) -> bool {
        *self.stop_tx.borrow()
    }

    pub(crate) fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Controller` - Executed/rejected actions, motion, swing expiry
    /// - `Topic::Audio` - Sound cues with pitch
    /// - `Topic::Level` - Win/loss progression
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
