//! Per-session game state.

use std::collections::BTreeMap;
use std::fmt;

use quest::{Ending, JumpId, LocationId, ParamSlot};
use serde::{Deserialize, Serialize};

use crate::{Alea, GameLog};

/// Session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    NotStarted,
    AtLocation,
    Won,
    Lost,
    /// The session reached a location with no way forward.
    Error,
}

impl Status {
    /// Returns `true` for `Won`, `Lost` and `Error`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotStarted => "not started",
            Self::AtLocation => "at location",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Error => "error",
        };
        f.write_str(text)
    }
}

/// What ended a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cause", rename_all = "snake_case")]
pub enum Termination {
    /// A critical param crossed onto its boundary.
    Critical { param: ParamSlot, ending: Ending },
    /// The taken jump is terminal.
    Jump { jump: JumpId, ending: Ending },
    /// The reached location is terminal.
    Location { location: LocationId, ending: Ending },
    /// No jump is available at a non-terminal location.
    DeadEnd { location: LocationId },
}

impl Termination {
    /// The quest ending, if the session ended normally.
    #[must_use]
    pub const fn ending(self) -> Option<Ending> {
        match self {
            Self::Critical { ending, .. }
            | Self::Jump { ending, .. }
            | Self::Location { ending, .. } => Some(ending),
            Self::DeadEnd { .. } => None,
        }
    }

    /// The terminal status this termination leads to.
    #[must_use]
    pub const fn status(self) -> Status {
        match self.ending() {
            Some(ending) if ending.is_win() => Status::Won,
            Some(_) => Status::Lost,
            None => Status::Error,
        }
    }
}

/// Mutable state of one play-through. Created by
/// [`Player::start`](crate::Player::start) and changed only by
/// [`Player::choose`](crate::Player::choose).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameState {
    pub(crate) status: Status,
    pub(crate) location: Option<LocationId>,
    pub(crate) values: Vec<i32>,
    pub(crate) rng: Alea,
    pub(crate) passes: BTreeMap<JumpId, u32>,
    pub(crate) termination: Option<Termination>,
    pub(crate) log: GameLog,
}

impl GameState {
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Current location; `None` before start.
    #[must_use]
    pub const fn location(&self) -> Option<LocationId> {
        self.location
    }

    /// Current param values by slot index.
    #[must_use]
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    #[must_use]
    pub fn value(&self, slot: ParamSlot) -> Option<i32> {
        self.values.get(slot.index()).copied()
    }

    #[must_use]
    pub fn seed(&self) -> &str {
        &self.log.seed
    }

    /// Random draws consumed since start.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.rng.draws()
    }

    /// Times a jump has been taken.
    #[must_use]
    pub fn passes(&self, jump: JumpId) -> u32 {
        self.passes.get(&jump).copied().unwrap_or(0)
    }

    #[must_use]
    pub const fn termination(&self) -> Option<Termination> {
        self.termination
    }

    #[must_use]
    pub fn ending(&self) -> Option<Ending> {
        self.termination.and_then(Termination::ending)
    }

    #[must_use]
    pub const fn log(&self) -> &GameLog {
        &self.log
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_started() {
        let state = GameState::default();
        assert_eq!(state.status(), Status::NotStarted);
        assert_eq!(state.location(), None);
        assert!(!state.is_terminal());
    }

    #[test]
    fn termination_status() {
        let won = Termination::Location {
            location: LocationId::new(2),
            ending: Ending::Success,
        };
        assert_eq!(won.status(), Status::Won);
        let died = Termination::Critical {
            param: ParamSlot::new(1).unwrap(),
            ending: Ending::Death,
        };
        assert_eq!(died.status(), Status::Lost);
        let stuck = Termination::DeadEnd {
            location: LocationId::new(3),
        };
        assert_eq!(stuck.status(), Status::Error);
        assert_eq!(stuck.ending(), None);
    }

    #[test]
    fn termination_json_is_tagged() {
        let json = serde_json::to_value(Termination::Jump {
            jump: JumpId::new(7),
            ending: Ending::Failure,
        })
        .unwrap();
        assert_eq!(json["cause"], "jump");
        assert_eq!(json["jump"], 7);
        assert_eq!(json["ending"], "failure");
    }
}
