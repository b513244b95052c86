//! Resumable state snapshots.

use quest::{JumpId, LocationId};
use serde::{Deserialize, Serialize};

use crate::error::{PlayerResult, SnapshotIssue};
use crate::{GameLog, GameState, Status, Termination};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The minimal resumable form of a [`GameState`].
///
/// The generator is stored as its seed (inside the log) and the number of
/// draws consumed, so the format does not depend on generator internals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub version: u32,
    pub status: Status,
    pub location: Option<LocationId>,
    pub values: Vec<i32>,
    pub draws: u64,
    /// Jump traversal counts, sorted by jump id.
    pub passes: Vec<(JumpId, u32)>,
    pub termination: Option<Termination>,
    pub log: GameLog,
}

impl StateSnapshot {
    /// Serializes the snapshot as JSON.
    pub fn to_json(&self) -> PlayerResult<String> {
        serde_json::to_string(self).map_err(|err| SnapshotIssue::Json(err.to_string()).into())
    }

    /// Parses a snapshot from JSON. The result still has to go through
    /// [`Player::import_state`](crate::Player::import_state).
    pub fn from_json(json: &str) -> PlayerResult<Self> {
        serde_json::from_str(json).map_err(|err| SnapshotIssue::Json(err.to_string()).into())
    }
}

/// Captures a game state.
#[must_use]
pub fn export_state(state: &GameState) -> StateSnapshot {
    StateSnapshot {
        version: SNAPSHOT_VERSION,
        status: state.status,
        location: state.location,
        values: state.values.clone(),
        draws: state.rng.draws(),
        passes: state
            .passes
            .iter()
            .map(|(&jump, &count)| (jump, count))
            .collect(),
        termination: state.termination,
        log: state.log.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerError;

    #[test]
    fn default_state_exports_as_not_started() {
        let snapshot = export_state(&GameState::default());
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.status, Status::NotStarted);
        assert_eq!(snapshot.draws, 0);
        assert!(snapshot.passes.is_empty());
    }

    #[test]
    fn json_roundtrip() {
        let snapshot = export_state(&GameState::default());
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"status\":\"not_started\""));
        assert_eq!(StateSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn bad_json_is_invalid_snapshot() {
        let err = StateSnapshot::from_json("{\"version\":1").unwrap_err();
        assert!(matches!(
            err,
            PlayerError::InvalidSnapshot {
                reason: SnapshotIssue::Json(_)
            }
        ));
    }
}
