//! Enter triggers and level termination.
//!
//! Stepping into a cell fires the triggers of whatever lies there: a monster
//! ends the level in a loss, an open door ends it in a win. Termination is
//! recorded at most once; later triggers are ignored.

use crate::feedback::Feedback;
use crate::state::{EntityId, LevelOutcome, LevelState, PlayerSprite};

/// Runs the enter triggers for the player's current cell.
///
/// The monster check runs first, so a cell holding both a monster and an open
/// door is a loss.
pub(crate) fn on_enter(state: &mut LevelState, feedback: &mut Vec<Feedback>) {
    let position = state.player.position;

    if state.entities.monsters_at(position).next().is_some() {
        declare_loss(state, feedback);
        return;
    }

    let open_door = state
        .entities
        .doors_at(position)
        .find(|door| door.is_open())
        .map(|door| door.id);
    if let Some(door) = open_door {
        declare_win(state, door, feedback);
    }
}

pub(crate) fn declare_loss(state: &mut LevelState, feedback: &mut Vec<Feedback>) {
    if state.outcome.is_finished() {
        return;
    }
    state.outcome = LevelOutcome::Lost;
    state.player.sprite = PlayerSprite::Hidden;
    feedback.push(Feedback::QueueStopped);
    feedback.push(Feedback::SpriteChanged(PlayerSprite::Hidden));
}

pub(crate) fn declare_win(state: &mut LevelState, door: EntityId, feedback: &mut Vec<Feedback>) {
    if state.outcome.is_finished() {
        return;
    }
    state.outcome = LevelOutcome::Won;
    feedback.push(Feedback::WinTriggered { door });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Position;

    #[test]
    fn monster_takes_precedence_over_open_door() {
        let here = Position::new(0, 0);
        let mut state = LevelState::builder(1, 1)
            .player(here)
            .monster(here)
            .door(here, 0)
            .build()
            .unwrap();
        let mut feedback = Vec::new();

        on_enter(&mut state, &mut feedback);

        assert_eq!(state.outcome, LevelOutcome::Lost);
        assert_eq!(state.player.sprite, PlayerSprite::Hidden);
        assert!(
            !feedback
                .iter()
                .any(|fb| matches!(fb, Feedback::WinTriggered { .. }))
        );
    }

    #[test]
    fn closed_door_does_nothing_and_termination_is_sticky() {
        let here = Position::new(0, 0);
        let mut state = LevelState::builder(1, 1)
            .player(here)
            .door(here, 1)
            .build()
            .unwrap();
        let mut feedback = Vec::new();

        on_enter(&mut state, &mut feedback);
        assert_eq!(state.outcome, LevelOutcome::InProgress);
        assert!(feedback.is_empty());

        let door = state.entities.doors[0].id;
        declare_win(&mut state, door, &mut feedback);
        declare_loss(&mut state, &mut feedback);
        declare_win(&mut state, door, &mut feedback);

        assert_eq!(state.outcome, LevelOutcome::Won);
        assert_eq!(feedback, vec![Feedback::WinTriggered { door }]);
    }
}
