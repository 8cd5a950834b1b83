use core::convert::Infallible;

use crate::action::ActionTransition;
use crate::feedback::Feedback;
use crate::state::LevelState;

/// Wait action - the player idles for one action slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitAction;

impl ActionTransition for WaitAction {
    type Error = Infallible;

    fn apply(
        &self,
        _state: &mut LevelState,
        _feedback: &mut Vec<Feedback>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}
