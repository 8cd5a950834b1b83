//! Action transition dispatch.

use crate::action::{Action, ActionTransition};
use crate::error::ErrorContext;
use crate::feedback::Feedback;
use crate::state::LevelState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the two-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the level state and record feedback
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut LevelState,
    feedback: &mut Vec<Feedback>,
) -> Result<(), TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    let context = ErrorContext::new(state.nonce).with_position(state.player.position);

    transition.pre_validate(state).map_err(|error| {
        TransitionPhaseError::new(TransitionPhase::PreValidate, error, context.clone())
    })?;

    transition
        .apply(state, feedback)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error, context))
}

/// Routes each action variant to its transition.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut LevelState,
    feedback: &mut Vec<Feedback>,
) -> Result<(), ExecuteError> {
    match action {
        Action::Move(transition) => {
            drive_transition(transition, state, feedback).map_err(ExecuteError::Move)
        }
        Action::Pickup(transition) => {
            drive_transition(transition, state, feedback).map_err(ExecuteError::Pickup)
        }
        Action::UseItem(transition) => {
            drive_transition(transition, state, feedback).map_err(ExecuteError::UseItem)
        }
        Action::Swing(transition) => {
            drive_transition(transition, state, feedback).map_err(ExecuteError::Swing)
        }
        Action::Wait(transition) => drive_transition(transition, state, feedback)
            .map_err(|infallible| match infallible.error {}),
    }
}
