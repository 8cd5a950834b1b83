//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`LevelState`]. It
//! routes each action through its transition, fires the enter triggers after
//! movement and reports the resulting feedback and termination.

mod errors;
mod transition;
pub(crate) mod triggers;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Action, ActionToken};
use crate::feedback::Feedback;
use crate::state::{LevelOutcome, LevelState};

/// How an action ended the level, if it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The player touched a monster.
    Lost,
    /// The exit door opened. The win still has to be played out by the host.
    Won,
}

/// Complete outcome of executing one action.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Presentation side effects, in the order they happened.
    pub feedback: Vec<Feedback>,

    /// Set on the one action that finished the level.
    pub termination: Option<Termination>,
}

/// Game engine that applies actions to a level.
///
/// All state mutations flow through the two-phase action pipeline:
/// pre_validate → apply. Once the level is finished every further action is
/// rejected with [`ExecuteError::LevelFinished`].
pub struct GameEngine<'a> {
    state: &'a mut LevelState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut LevelState) -> Self {
        Self { state }
    }

    /// Resolves a token and executes the action it stands for.
    pub fn execute_token(&mut self, token: ActionToken) -> Result<ExecutionOutcome, ExecuteError> {
        self.execute(&token.action())
    }

    /// Executes an action and returns its feedback.
    ///
    /// Errors leave the state unchanged apart from the action nonce.
    pub fn execute(&mut self, action: &Action) -> Result<ExecutionOutcome, ExecuteError> {
        let before = self.state.outcome;
        if before.is_finished() {
            return Err(ExecuteError::LevelFinished { outcome: before });
        }

        let mut feedback = Vec::new();
        let result = transition::execute_transition(action, self.state, &mut feedback);
        self.state.nonce += 1;
        result?;

        if matches!(action, Action::Move(_)) {
            triggers::on_enter(self.state, &mut feedback);
        }

        let termination = match (before, self.state.outcome) {
            (LevelOutcome::InProgress, LevelOutcome::Lost) => Some(Termination::Lost),
            (LevelOutcome::InProgress, LevelOutcome::Won) => Some(Termination::Won),
            _ => None,
        };

        Ok(ExecutionOutcome {
            feedback,
            termination,
        })
    }

    pub fn state(&self) -> &LevelState {
        self.state
    }
}
