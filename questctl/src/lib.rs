//! Tooling around quest files and game logs.
//!
//! - Summarize a quest file
//! - Re-encode a quest, embedding media from a directory or copying it from a donor quest
//! - Play a quest deterministically and write the game log
//! - Verify a game log by replaying it
//!
//! # Design Principles
//!
//! - **Thin** - All behavior lives in the library crates; this crate only does file I/O.
//! - **Machine-readable** - Reports serialize to JSON.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use codec::{decode, enrich, referenced_media, AssetResolver, Limits, MediaPatch};
use player::{GameLog, GameState, Player, Status};
use quest::{fingerprint, Dialect, Ending, Fingerprint, LocationId, Quest};
use serde::Serialize;
use tracing::debug;

/// Reads and decodes a quest file.
pub fn load_quest(path: &Path, dialect: Dialect) -> Result<Quest> {
    let bytes = fs::read(path).with_context(|| format!("read quest {}", path.display()))?;
    decode(&bytes, dialect, &Limits::default())
        .with_context(|| format!("decode quest {}", path.display()))
}

/// Reads a JSON game log.
pub fn load_log(path: &Path) -> Result<GameLog> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read log {}", path.display()))?;
    serde_json::from_str(&contents).context("parse log json")
}

/// Overview of a decoded quest.
#[derive(Debug, Serialize)]
pub struct QuestSummary {
    pub fingerprint: Fingerprint,
    pub dialect: String,
    pub difficulty: u8,
    pub params: usize,
    pub locations: usize,
    pub jumps: usize,
    pub start: LocationId,
    pub media: Vec<String>,
    pub embedded: Vec<String>,
}

#[must_use]
pub fn summarize(quest: &Quest) -> QuestSummary {
    QuestSummary {
        fingerprint: fingerprint(quest),
        dialect: format!("{:?}", quest.dialect()).to_lowercase(),
        difficulty: quest.difficulty(),
        params: quest.params().len(),
        locations: quest.locations().len(),
        jumps: quest.jumps().len(),
        start: quest.start(),
        media: referenced_media(quest)
            .into_iter()
            .map(str::to_owned)
            .collect(),
        embedded: quest.embedded().keys().cloned().collect(),
    }
}

/// Copies media references from a donor quest with matching ids.
pub fn enrich_from_donor(quest: &Quest, donor: &Quest) -> Result<(Quest, usize)> {
    let (enriched, report) =
        enrich(quest, &MediaPatch::from_donor(donor)).context("apply donor media")?;
    Ok((enriched, report.warnings.len()))
}

/// Resolves media names to files in a directory.
#[derive(Debug, Clone)]
pub struct DirResolver {
    root: PathBuf,
}

impl DirResolver {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetResolver for DirResolver {
    fn resolve(&self, name: &str) -> Option<Vec<u8>> {
        let relative = Path::new(name);
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            debug!(name, "media name escapes asset directory");
            return None;
        }
        let path = self.root.join(relative);
        match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                debug!(path = %path.display(), %err, "media not found");
                None
            }
        }
    }
}

/// Plays a quest from `seed`, or from a fresh random seed.
///
/// Each step takes the next entry of `picks` as an index into the offered
/// jumps (wrapping), or the first offered jump once `picks` runs out. Play
/// stops at a terminal state or after `max_steps` choices.
pub fn simulate(
    quest: &Quest,
    seed: Option<&str>,
    picks: &[usize],
    max_steps: usize,
) -> Result<GameState> {
    let player = Player::new(quest);
    let mut state = player.start(seed).context("start session")?;
    let mut picks = picks.iter().copied();
    for _ in 0..max_steps {
        if state.is_terminal() {
            break;
        }
        let offered = player.available_jumps(&state).context("list jumps")?;
        let index = picks.next().unwrap_or(0) % offered.len().max(1);
        let Some(jump) = offered.get(index).map(|jump| jump.id) else {
            break;
        };
        player.choose(&mut state, jump).context("choose jump")?;
    }
    Ok(state)
}

/// Outcome of replaying a game log.
#[derive(Debug, Serialize)]
pub struct Verdict {
    pub fingerprint: Fingerprint,
    pub seed: String,
    pub steps: usize,
    pub status: Status,
    pub ending: Option<Ending>,
    /// `true` when the replay ends in a win.
    pub verified: bool,
}

/// Replays `log` against `quest`.
pub fn verify(quest: &Quest, log: &GameLog) -> Result<Verdict> {
    let state = Player::new(quest).replay(log).context("replay log")?;
    Ok(Verdict {
        fingerprint: log.fingerprint,
        seed: log.seed.clone(),
        steps: log.entries.len(),
        status: state.status(),
        ending: state.ending(),
        verified: state.status() == Status::Won,
    })
}
