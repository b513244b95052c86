//! The quest state machine.

use std::collections::BTreeMap;

use quest::{fingerprint, Fingerprint, Jump, JumpId, Location, LocationId, Quest};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{debug, info};

use crate::error::{Divergence, PlayerError, PlayerResult, SnapshotIssue};
use crate::eval::{apply_changes, evaluate_criteria};
use crate::snapshot::{StateSnapshot, SNAPSHOT_VERSION};
use crate::{text, Alea, GameLog, GameState, LogEntry, Status, Termination};

/// Length of generated seeds.
pub const SEED_LEN: usize = 16;

/// Plays a quest. Holds no session data; any number of [`GameState`]s can
/// be driven by one player.
#[derive(Debug, Clone, Copy)]
pub struct Player<'q> {
    quest: &'q Quest,
    fingerprint: Fingerprint,
}

impl<'q> Player<'q> {
    #[must_use]
    pub fn new(quest: &'q Quest) -> Self {
        Self {
            quest,
            fingerprint: fingerprint(quest),
        }
    }

    #[must_use]
    pub const fn quest(&self) -> &'q Quest {
        self.quest
    }

    /// Gameplay fingerprint stamped into every log.
    #[must_use]
    pub const fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Starts a session.
    ///
    /// Without a seed a random alphanumeric one is generated; this is the
    /// only entropy a session ever uses. The start location's arrival
    /// changes are applied and the session may end immediately.
    ///
    /// Critical params fire only when a change moves them onto their
    /// boundary. A param whose start value already sits on the boundary
    /// does not end the session until it leaves and comes back.
    pub fn start(&self, seed: Option<&str>) -> PlayerResult<GameState> {
        let seed = seed.map_or_else(generate_seed, str::to_owned);
        let location = self
            .quest
            .location(self.quest.start())
            .ok_or(PlayerError::InvalidState {
                status: Status::NotStarted,
            })?;

        let mut state = GameState {
            status: Status::AtLocation,
            location: Some(location.id),
            values: self.quest.start_values(),
            rng: Alea::new(&seed),
            passes: BTreeMap::new(),
            termination: None,
            log: GameLog {
                fingerprint: self.fingerprint,
                seed,
                entries: Vec::new(),
            },
        };
        let before = state.values.clone();
        apply_changes(
            &location.changes,
            self.quest.params(),
            &mut state.values,
            &mut state.rng,
        );
        debug!(seed = %state.log.seed, start = %location.id, "session started");
        let critical = self.critical_crossing(&[before.as_slice(), state.values.as_slice()]);
        self.settle(&mut state, critical, None, location);
        Ok(state)
    }

    /// Jumps currently offered, in display order.
    pub fn available_jumps(&self, state: &GameState) -> PlayerResult<Vec<&'q Jump>> {
        let location = current_location(state)?;
        Ok(self.visible(location, &state.values, &state.passes))
    }

    /// Takes a jump.
    ///
    /// Jump changes are applied slot by slot, then the destination's
    /// arrival changes, then terminal conditions are checked. A critical
    /// param reaching its boundary after either phase ends the session,
    /// even if the arrival changes pull it back. On error the state is left
    /// untouched.
    pub fn choose<'s>(&self, state: &'s mut GameState, jump: JumpId) -> PlayerResult<&'s LogEntry> {
        let from = current_location(state)?;
        let invalid = PlayerError::InvalidChoice {
            jump,
            location: from,
        };
        let chosen = self
            .visible(from, &state.values, &state.passes)
            .into_iter()
            .find(|candidate| candidate.id == jump)
            .ok_or_else(|| invalid.clone())?;
        let destination = self.quest.location(chosen.to).ok_or(invalid)?;

        let params = self.quest.params();
        let mut values = state.values.clone();
        let mut rng = state.rng.clone();
        apply_changes(&chosen.changes, params, &mut values, &mut rng);
        let after_jump = values.clone();
        apply_changes(&destination.changes, params, &mut values, &mut rng);
        let draws = (rng.draws() - state.rng.draws()) as u32;
        let critical = self.critical_crossing(&[
            state.values.as_slice(),
            after_jump.as_slice(),
            values.as_slice(),
        ]);

        state.values = values;
        state.rng = rng;
        state.location = Some(destination.id);
        *state.passes.entry(jump).or_insert(0) += 1;
        let index = state.log.entries.len();
        state.log.entries.push(LogEntry {
            from,
            jump,
            to: destination.id,
            params: state.values.clone(),
            draws,
        });
        debug!(%from, %jump, to = %destination.id, draws, "jump taken");

        self.settle(state, critical, Some(chosen), destination);
        Ok(&state.log.entries[index])
    }

    /// Restores a session from a snapshot taken against this quest.
    ///
    /// The generator is re-seeded and advanced past the recorded draws,
    /// which must match what the start and the logged steps consumed. The
    /// location, values and pass counters must match where the log ends.
    pub fn import_state(&self, snapshot: StateSnapshot) -> PlayerResult<GameState> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotIssue::Version {
                found: snapshot.version,
            }
            .into());
        }
        if snapshot.log.fingerprint != self.fingerprint {
            return Err(SnapshotIssue::Fingerprint.into());
        }
        if snapshot.status == Status::NotStarted {
            return Ok(GameState::default());
        }

        let location = snapshot
            .location
            .filter(|&id| self.quest.location(id).is_some())
            .ok_or(SnapshotIssue::Location)?;
        self.check_values(&snapshot.values)?;
        for &(jump, _) in &snapshot.passes {
            if self.quest.jump(jump).is_none() {
                return Err(SnapshotIssue::UnknownJump { jump }.into());
            }
        }
        let consistent = match snapshot.termination {
            Some(termination) => termination.status() == snapshot.status,
            None => snapshot.status == Status::AtLocation,
        };
        if !consistent {
            return Err(SnapshotIssue::Termination.into());
        }

        let origin = self.origin(&snapshot.log)?;
        let expected = origin.draws() + snapshot.log.total_draws();
        if snapshot.draws != expected {
            return Err(SnapshotIssue::Draws {
                found: snapshot.draws,
                expected,
            }
            .into());
        }

        let (logged_location, logged_values) = match snapshot.log.entries.last() {
            Some(entry) => (entry.to, &entry.params),
            None => (self.quest.start(), &origin.values),
        };
        if location != logged_location {
            return Err(SnapshotIssue::LocationMismatch.into());
        }
        if snapshot.values != *logged_values {
            return Err(SnapshotIssue::ValuesMismatch.into());
        }
        let mut passes = BTreeMap::new();
        for entry in &snapshot.log.entries {
            *passes.entry(entry.jump).or_insert(0) += 1;
        }
        if !snapshot
            .passes
            .iter()
            .copied()
            .eq(passes.iter().map(|(&jump, &count)| (jump, count)))
        {
            return Err(SnapshotIssue::PassesMismatch.into());
        }

        debug!(%location, draws = snapshot.draws, "session imported");
        Ok(GameState {
            status: snapshot.status,
            location: Some(location),
            values: snapshot.values,
            rng: Alea::resume(&snapshot.log.seed, snapshot.draws),
            passes,
            termination: snapshot.termination,
            log: snapshot.log,
        })
    }

    /// Replays a log from its seed and checks every recorded step.
    ///
    /// Returns the final state; a verifier checks its status for a win.
    pub fn replay(&self, log: &GameLog) -> PlayerResult<GameState> {
        if log.fingerprint != self.fingerprint {
            return Err(PlayerError::ReplayMismatch {
                step: 0,
                divergence: Divergence::Fingerprint,
            });
        }
        let mut state = self.start(Some(&log.seed))?;
        for (step, recorded) in log.entries.iter().enumerate() {
            let mismatch = |divergence| PlayerError::ReplayMismatch { step, divergence };
            if state.location != Some(recorded.from) {
                return Err(mismatch(Divergence::Location));
            }
            let entry = self
                .choose(&mut state, recorded.jump)
                .map_err(|_| mismatch(Divergence::Choice))?;
            if entry.to != recorded.to {
                return Err(mismatch(Divergence::Destination));
            }
            if entry.params != recorded.params {
                return Err(mismatch(Divergence::Params));
            }
            if entry.draws != recorded.draws {
                return Err(mismatch(Divergence::Draws));
            }
        }
        Ok(state)
    }

    /// Display lines for the current param values.
    #[must_use]
    pub fn param_lines(&self, state: &GameState) -> Vec<String> {
        text::param_lines(self.quest.params(), &state.values)
    }

    fn visible(
        &self,
        location: LocationId,
        values: &[i32],
        passes: &BTreeMap<JumpId, u32>,
    ) -> Vec<&'q Jump> {
        let quest = self.quest;
        quest
            .outgoing(location)
            .iter()
            .filter_map(|&id| quest.jump(id))
            .filter(|jump| {
                jump.pass_limit.map_or(true, |limit| {
                    passes.get(&jump.id).copied().unwrap_or(0) < u32::from(limit)
                })
            })
            .filter(|jump| evaluate_criteria(&jump.criteria, quest.params(), values))
            .collect()
    }

    /// Decides whether the session ends after arriving at `location`.
    fn settle(
        &self,
        state: &mut GameState,
        critical: Option<Termination>,
        jump: Option<&Jump>,
        location: &Location,
    ) {
        let termination = critical
            .or_else(|| {
                jump.and_then(|jump| {
                    jump.ending.map(|ending| Termination::Jump {
                        jump: jump.id,
                        ending,
                    })
                })
            })
            .or_else(|| {
                location.ending.map(|ending| Termination::Location {
                    location: location.id,
                    ending,
                })
            })
            .or_else(|| {
                self.visible(location.id, &state.values, &state.passes)
                    .is_empty()
                    .then_some(Termination::DeadEnd {
                        location: location.id,
                    })
            });

        match termination {
            Some(termination) => {
                state.status = termination.status();
                state.termination = Some(termination);
                info!(
                    status = %state.status,
                    ?termination,
                    steps = state.log.entries.len(),
                    "session ended"
                );
            }
            None => state.status = Status::AtLocation,
        }
    }

    /// The lowest-slot critical param that moved onto its boundary between
    /// any two consecutive checkpoints of a step.
    fn critical_crossing(&self, checkpoints: &[&[i32]]) -> Option<Termination> {
        self.quest
            .params()
            .iter()
            .enumerate()
            .find_map(|(index, param)| {
                let spec = param.critical_spec()?;
                let crossed = checkpoints.windows(2).any(|pair| {
                    match (pair[0].get(index), pair[1].get(index)) {
                        (Some(&was), Some(&now)) => {
                            !param.is_critical_at(was) && param.is_critical_at(now)
                        }
                        _ => false,
                    }
                });
                crossed.then_some(Termination::Critical {
                    param: param.slot,
                    ending: spec.ending,
                })
            })
    }

    fn check_values(&self, values: &[i32]) -> PlayerResult<()> {
        let params = self.quest.params();
        if values.len() != params.len() {
            return Err(SnapshotIssue::ValueCount {
                found: values.len(),
                expected: params.len(),
            }
            .into());
        }
        for (index, (param, &value)) in params.iter().zip(values).enumerate() {
            if !(param.min..=param.max).contains(&value) {
                return Err(SnapshotIssue::ValueOutOfBounds { index, value }.into());
            }
        }
        Ok(())
    }

    /// The session the log starts from. Rejects entries that claim more
    /// draws than a step can consume.
    fn origin(&self, log: &GameLog) -> PlayerResult<GameState> {
        // One jump and one location change per slot at most.
        let step_limit = 2 * self.quest.params().len() as u64;
        if let Some(entry) = log
            .entries
            .iter()
            .find(|entry| u64::from(entry.draws) > step_limit)
        {
            return Err(SnapshotIssue::Draws {
                found: u64::from(entry.draws),
                expected: step_limit,
            }
            .into());
        }
        self.start(Some(&log.seed))
    }
}

fn current_location(state: &GameState) -> PlayerResult<LocationId> {
    match (state.status, state.location) {
        (Status::AtLocation, Some(location)) => Ok(location),
        (status, _) => Err(PlayerError::InvalidState { status }),
    }
}

fn generate_seed() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SEED_LEN)
        .map(char::from)
        .collect()
}
