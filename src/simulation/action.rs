//! The closed action set and the ways an action can fail.

use std::fmt;

use thiserror::Error;

/// Everything the explorer can do in one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    TurnLeft,
    TurnRight,
    Shoot,
    Grab,
    Climb,
}

impl Action {
    #[must_use]
    pub const fn all() -> [Action; 6] {
        [
            Action::Forward,
            Action::TurnLeft,
            Action::TurnRight,
            Action::Shoot,
            Action::Grab,
            Action::Climb,
        ]
    }

    /// Maps a manual-play key to an action (`w a d s g c`).
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Self::Forward),
            'a' => Some(Self::TurnLeft),
            'd' => Some(Self::TurnRight),
            's' => Some(Self::Shoot),
            'g' => Some(Self::Grab),
            'c' => Some(Self::Climb),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Forward => "FORWARD",
            Self::TurnLeft => "TURN_LEFT",
            Self::TurnRight => "TURN_RIGHT",
            Self::Shoot => "SHOOT",
            Self::Grab => "GRAB",
            Self::Climb => "CLIMB",
        };
        f.write_str(name)
    }
}

/// Recoverable reasons an action did not take effect.
///
/// These are recorded in the message log; none of them stops the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ActionFailure {
    #[error("bumped into the cave wall")]
    Bump,
    #[error("no arrow left")]
    NoArrow,
    #[error("already holding the gold")]
    AlreadyHoldingGold,
    #[error("can only climb out at the entrance (1,1)")]
    NotAtExit,
    #[error("need the gold before climbing out")]
    NoGoldToClimb,
    #[error("there is no gold here")]
    NoGoldHere,
    #[error("no route left to retreat along")]
    ExhaustedRetreat,
}
