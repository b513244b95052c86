//! Replayable game log.

use quest::{Fingerprint, JumpId, LocationId};
use serde::{Deserialize, Serialize};

/// Seed plus the ordered choices of one play-through.
///
/// Together with the quest this is enough to replay the session exactly;
/// see [`Player::replay`](crate::Player::replay).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameLog {
    /// Gameplay fingerprint of the quest the log was recorded against.
    pub fingerprint: Fingerprint,
    pub seed: String,
    pub entries: Vec<LogEntry>,
}

/// One `choose` step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub from: LocationId,
    pub jump: JumpId,
    pub to: LocationId,
    /// Param values after the step.
    pub params: Vec<i32>,
    /// Random draws consumed by the step.
    pub draws: u32,
}

impl GameLog {
    /// Draws consumed by all logged steps.
    #[must_use]
    pub fn total_draws(&self) -> u64 {
        self.entries.iter().map(|entry| u64::from(entry.draws)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_json_shape() {
        let log = GameLog {
            fingerprint: Fingerprint::from_bytes([0xAB; 32]),
            seed: "abc".into(),
            entries: vec![LogEntry {
                from: LocationId::new(1),
                jump: JumpId::new(1),
                to: LocationId::new(2),
                params: vec![5, -3],
                draws: 1,
            }],
        };
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["seed"], "abc");
        assert_eq!(json["fingerprint"], "ab".repeat(32));
        assert_eq!(json["entries"][0]["from"], 1);
        assert_eq!(json["entries"][0]["params"][1], -3);

        let back: GameLog = serde_json::from_value(json).unwrap();
        assert_eq!(back, log);
        assert_eq!(back.total_draws(), 1);
    }
}
