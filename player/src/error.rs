//! Error types for quest play.

use std::fmt;

use quest::{JumpId, LocationId};

use crate::Status;

/// Result type for player operations.
pub type PlayerResult<T> = Result<T, PlayerError>;

/// Errors raised by the player. Every error is returned before the game
/// state is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// The jump is not offered at the current location.
    InvalidChoice { jump: JumpId, location: LocationId },

    /// The operation needs a session at a location.
    InvalidState { status: Status },

    /// A snapshot does not describe a reachable state of this quest.
    InvalidSnapshot { reason: SnapshotIssue },

    /// A replayed log diverged from the recorded entries.
    ReplayMismatch { step: usize, divergence: Divergence },
}

/// Why a snapshot was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotIssue {
    /// Unsupported snapshot format version.
    Version { found: u32 },
    /// The snapshot was taken against a different quest.
    Fingerprint,
    /// The location is unknown to the quest or missing.
    Location,
    /// Value count differs from the param count.
    ValueCount { found: usize, expected: usize },
    /// A value lies outside its param bounds.
    ValueOutOfBounds { index: usize, value: i32 },
    /// A pass counter names an unknown jump.
    UnknownJump { jump: JumpId },
    /// The recorded draw count disagrees with the log.
    Draws { found: u64, expected: u64 },
    /// Status and termination disagree.
    Termination,
    /// The location is not where the log ends.
    LocationMismatch,
    /// The values differ from those after the last logged step.
    ValuesMismatch,
    /// Pass counters differ from the jumps taken in the log.
    PassesMismatch,
    /// The snapshot text is not valid JSON for this format.
    Json(String),
}

/// Where a replay left the recorded path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divergence {
    /// The log was recorded against a different quest.
    Fingerprint,
    /// The session was elsewhere than the entry's source location.
    Location,
    /// The logged jump could not be chosen.
    Choice,
    /// The jump led somewhere else.
    Destination,
    /// Param values after the step differ.
    Params,
    /// A different number of draws was consumed.
    Draws,
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChoice { jump, location } => {
                write!(f, "jump {jump} is not available at {location}")
            }
            Self::InvalidState { status } => {
                write!(f, "operation not allowed in state {status}")
            }
            Self::InvalidSnapshot { reason } => write!(f, "invalid snapshot: {reason}"),
            Self::ReplayMismatch { step, divergence } => {
                write!(f, "replay diverged at step {step}: {divergence}")
            }
        }
    }
}

impl fmt::Display for SnapshotIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version { found } => write!(f, "unsupported version {found}"),
            Self::Fingerprint => f.write_str("quest fingerprint mismatch"),
            Self::Location => f.write_str("unknown location"),
            Self::ValueCount { found, expected } => {
                write!(f, "{found} param values, expected {expected}")
            }
            Self::ValueOutOfBounds { index, value } => {
                write!(f, "value {value} of param {} out of bounds", index + 1)
            }
            Self::UnknownJump { jump } => write!(f, "pass counter for unknown jump {jump}"),
            Self::Draws { found, expected } => {
                write!(f, "{found} draws recorded, log accounts for {expected}")
            }
            Self::Termination => f.write_str("status does not match termination"),
            Self::LocationMismatch => f.write_str("location does not match the log"),
            Self::ValuesMismatch => f.write_str("param values do not match the log"),
            Self::PassesMismatch => f.write_str("pass counters do not match the log"),
            Self::Json(message) => write!(f, "json: {message}"),
        }
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Fingerprint => "quest fingerprint mismatch",
            Self::Location => "source location mismatch",
            Self::Choice => "jump not available",
            Self::Destination => "destination mismatch",
            Self::Params => "param values mismatch",
            Self::Draws => "random draw count mismatch",
        };
        f.write_str(text)
    }
}

impl std::error::Error for PlayerError {}

impl From<SnapshotIssue> for PlayerError {
    fn from(reason: SnapshotIssue) -> Self {
        Self::InvalidSnapshot { reason }
    }
}
