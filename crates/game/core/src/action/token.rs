//! Textual action tokens as they appear in an action queue.

use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::action::{
    Action, CardinalDirection, MoveAction, PickupAction, SwingAction, UseItemAction, WaitAction,
};
use crate::error::{ErrorSeverity, GameError};
use crate::state::SlotIndex;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenError {
    #[error("such action does not exist: `{token}`")]
    Unknown { token: String },
}

impl GameError for TokenError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "TOKEN_UNKNOWN"
    }
}

/// Every action the queue understands, spelled exactly as queued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "&'static str"))]
pub enum ActionToken {
    #[strum(serialize = "moveleft")]
    MoveLeft,
    #[strum(serialize = "moveright")]
    MoveRight,
    #[strum(serialize = "moveup")]
    MoveUp,
    #[strum(serialize = "movedown")]
    MoveDown,
    #[strum(serialize = "pickup")]
    Pickup,
    #[strum(serialize = "useitem0")]
    UseItem0,
    #[strum(serialize = "useitem1")]
    UseItem1,
    #[strum(serialize = "useitem2")]
    UseItem2,
    #[strum(serialize = "wait")]
    Wait,
    #[strum(serialize = "swingleft")]
    SwingLeft,
    #[strum(serialize = "swingright")]
    SwingRight,
    #[strum(serialize = "swingup")]
    SwingUp,
    #[strum(serialize = "swingdown")]
    SwingDown,
}

impl ActionToken {
    /// Parses a queued token. Matching is exact: no trimming, no case folding.
    pub fn parse(token: &str) -> Result<Self, TokenError> {
        token.parse().map_err(|_| TokenError::Unknown {
            token: token.to_owned(),
        })
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Resolves the token into the concrete action it triggers.
    pub fn action(self) -> Action {
        use CardinalDirection::*;

        match self {
            Self::MoveLeft => MoveAction::new(West).into(),
            Self::MoveRight => MoveAction::new(East).into(),
            Self::MoveUp => MoveAction::new(North).into(),
            Self::MoveDown => MoveAction::new(South).into(),
            Self::Pickup => PickupAction.into(),
            Self::UseItem0 => UseItemAction::new(SlotIndex::ALL[0]).into(),
            Self::UseItem1 => UseItemAction::new(SlotIndex::ALL[1]).into(),
            Self::UseItem2 => UseItemAction::new(SlotIndex::ALL[2]).into(),
            Self::Wait => WaitAction.into(),
            Self::SwingLeft => SwingAction::new(West).into(),
            Self::SwingRight => SwingAction::new(East).into(),
            Self::SwingUp => SwingAction::new(North).into(),
            Self::SwingDown => SwingAction::new(South).into(),
        }
    }
}

impl TryFrom<String> for ActionToken {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl core::fmt::Display for ActionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_token_round_trips_through_its_spelling() {
        for token in ActionToken::iter() {
            assert_eq!(ActionToken::parse(token.as_str()), Ok(token));
        }
        assert_eq!(ActionToken::iter().count(), 13);
    }

    #[test]
    fn parsing_is_exact() {
        for bad in ["MoveLeft", " moveleft", "useitem3", "jump", ""] {
            assert_eq!(
                ActionToken::parse(bad),
                Err(TokenError::Unknown {
                    token: bad.to_owned()
                })
            );
        }
    }

    #[test]
    fn tokens_resolve_to_actions() {
        assert_eq!(
            ActionToken::SwingUp.action(),
            Action::Swing(SwingAction::new(CardinalDirection::North))
        );
        assert_eq!(
            ActionToken::UseItem2.action(),
            Action::UseItem(UseItemAction::new(SlotIndex::new(2).unwrap()))
        );
        assert_eq!(ActionToken::Wait.action(), Action::Wait(WaitAction));
    }
}
