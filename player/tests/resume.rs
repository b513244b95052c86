use player::{
    export_state, Divergence, GameState, Player, PlayerError, SnapshotIssue, StateSnapshot, Status,
    SNAPSHOT_VERSION,
};
use quest::{
    Boundary, Condition, Ending, Jump, JumpId, Location, LocationId, Param, ParamChange, ParamSlot,
    Quest, QuestBuilder,
};

fn slot(n: u16) -> ParamSlot {
    ParamSlot::new(n).unwrap()
}

fn loc(n: u32) -> LocationId {
    LocationId::new(n)
}

fn jid(n: u32) -> JumpId {
    JumpId::new(n)
}

/// A dungeon crawl: fight in a loop, rest once, leave when rich.
fn dungeon() -> Quest {
    QuestBuilder::new()
        .param(Param::new(slot(1), "Health", 0, 20, 15).critical(Boundary::Min, Ending::Death))
        .param(Param::new(slot(2), "Gold", 0, 500, 0))
        .location(Location::new(loc(1)).start().text("Hall"))
        .location(
            Location::new(loc(2))
                .text("Arena")
                .change(slot(2), ParamChange::Random { lo: 5, hi: 25 }),
        )
        .location(Location::new(loc(3)).ending(Ending::Success))
        .jump(
            Jump::new(jid(1), loc(1), loc(2))
                .label("Fight")
                .change(slot(1), ParamChange::Random { lo: -4, hi: 0 }),
        )
        .jump(Jump::new(jid(2), loc(2), loc(1)).label("Back"))
        .jump(
            Jump::new(jid(3), loc(1), loc(1))
                .label("Rest")
                .order(1)
                .change(slot(1), ParamChange::Set(20))
                .pass_limit(1),
        )
        .jump(
            Jump::new(jid(4), loc(1), loc(3))
                .label("Leave")
                .order(2)
                .when(Condition::InRange {
                    param: slot(2),
                    lo: 60,
                    hi: 500,
                }),
        )
        .build()
        .unwrap()
}

/// Plays `steps` choices: fights, resting once when hurt.
fn play(player: &Player<'_>, state: &mut GameState, steps: usize) {
    for _ in 0..steps {
        if state.is_terminal() {
            return;
        }
        let available: Vec<JumpId> = player
            .available_jumps(state)
            .unwrap()
            .iter()
            .map(|jump| jump.id)
            .collect();
        let hurt = state.value(slot(1)).unwrap() < 8;
        let pick = if available.contains(&jid(4)) {
            jid(4)
        } else if hurt && available.contains(&jid(3)) {
            jid(3)
        } else {
            available[0]
        };
        player.choose(state, pick).unwrap();
    }
}

#[test]
fn snapshot_resume_continues_identically() {
    let quest = dungeon();
    let player = Player::new(&quest);
    let mut live = player.start(Some("resume")).unwrap();
    play(&player, &mut live, 5);

    let json = export_state(&live).to_json().unwrap();
    let mut restored = player
        .import_state(StateSnapshot::from_json(&json).unwrap())
        .unwrap();
    assert_eq!(restored, live);

    play(&player, &mut live, 30);
    play(&player, &mut restored, 30);
    assert_eq!(restored.log(), live.log());
    assert_eq!(restored.values(), live.values());
    assert_eq!(restored.status(), live.status());
}

#[test]
fn terminal_snapshot_imports_as_terminal() {
    let quest = dungeon();
    let player = Player::new(&quest);
    let mut state = player.start(Some("finish")).unwrap();
    play(&player, &mut state, 200);
    assert!(state.is_terminal());

    let restored = player.import_state(export_state(&state)).unwrap();
    assert_eq!(restored, state);
}

#[test]
fn not_started_snapshot_imports_as_default() {
    let quest = dungeon();
    let player = Player::new(&quest);
    let mut snapshot = export_state(&GameState::default());
    snapshot.log.fingerprint = player.fingerprint();
    assert_eq!(player.import_state(snapshot).unwrap(), GameState::default());
}

fn midgame(player: &Player<'_>) -> StateSnapshot {
    let mut state = player.start(Some("tamper")).unwrap();
    play(player, &mut state, 3);
    assert_eq!(state.status(), Status::AtLocation);
    export_state(&state)
}

fn issue(err: PlayerError) -> SnapshotIssue {
    match err {
        PlayerError::InvalidSnapshot { reason } => reason,
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn tampered_snapshots_are_rejected() {
    let quest = dungeon();
    let player = Player::new(&quest);

    let mut snapshot = midgame(&player);
    snapshot.version = SNAPSHOT_VERSION + 1;
    assert_eq!(
        issue(player.import_state(snapshot).unwrap_err()),
        SnapshotIssue::Version {
            found: SNAPSHOT_VERSION + 1
        }
    );

    let mut snapshot = midgame(&player);
    snapshot.values[1] = 9000;
    assert_eq!(
        issue(player.import_state(snapshot).unwrap_err()),
        SnapshotIssue::ValueOutOfBounds {
            index: 1,
            value: 9000
        }
    );

    let mut snapshot = midgame(&player);
    snapshot.values.pop();
    assert!(matches!(
        issue(player.import_state(snapshot).unwrap_err()),
        SnapshotIssue::ValueCount { found: 1, expected: 2 }
    ));

    let mut snapshot = midgame(&player);
    snapshot.location = Some(loc(77));
    assert_eq!(
        issue(player.import_state(snapshot).unwrap_err()),
        SnapshotIssue::Location
    );

    let mut snapshot = midgame(&player);
    snapshot.passes.push((jid(50), 1));
    assert_eq!(
        issue(player.import_state(snapshot).unwrap_err()),
        SnapshotIssue::UnknownJump { jump: jid(50) }
    );

    let mut snapshot = midgame(&player);
    snapshot.draws += 1;
    assert!(matches!(
        issue(player.import_state(snapshot).unwrap_err()),
        SnapshotIssue::Draws { .. }
    ));

    let mut snapshot = midgame(&player);
    let elsewhere = if snapshot.location == Some(loc(1)) { loc(2) } else { loc(1) };
    snapshot.location = Some(elsewhere);
    assert_eq!(
        issue(player.import_state(snapshot).unwrap_err()),
        SnapshotIssue::LocationMismatch
    );

    // Within bounds, but not what the last step produced.
    let mut snapshot = midgame(&player);
    snapshot.values[1] = 400;
    assert_eq!(
        issue(player.import_state(snapshot).unwrap_err()),
        SnapshotIssue::ValuesMismatch
    );

    let mut snapshot = midgame(&player);
    assert!(!snapshot.passes.is_empty());
    snapshot.passes.clear();
    assert_eq!(
        issue(player.import_state(snapshot).unwrap_err()),
        SnapshotIssue::PassesMismatch
    );

    let mut snapshot = midgame(&player);
    snapshot.status = Status::Won;
    assert_eq!(
        issue(player.import_state(snapshot).unwrap_err()),
        SnapshotIssue::Termination
    );
}

#[test]
fn snapshot_from_other_quest_is_rejected() {
    let quest = dungeon();
    let player = Player::new(&quest);
    let snapshot = midgame(&player);

    let mut parts = quest.into_parts();
    parts.jumps[0].changes[0] = ParamChange::Random { lo: -5, hi: 0 };
    let other = Quest::new(parts).unwrap();
    assert_eq!(
        issue(Player::new(&other).import_state(snapshot).unwrap_err()),
        SnapshotIssue::Fingerprint
    );
}

#[test]
fn honest_log_replays() {
    let quest = dungeon();
    let player = Player::new(&quest);
    let mut state = player.start(Some("verify")).unwrap();
    play(&player, &mut state, 200);

    let replayed = player.replay(state.log()).unwrap();
    assert_eq!(replayed, state);
    assert_eq!(replayed.status(), state.status());
}

#[test]
fn forged_logs_are_caught() {
    let quest = dungeon();
    let player = Player::new(&quest);
    let mut state = player.start(Some("forge")).unwrap();
    play(&player, &mut state, 6);
    let honest = state.log().clone();
    assert!(honest.entries.len() >= 3);

    let mut forged = honest.clone();
    forged.entries[1].params[1] += 1;
    assert_eq!(
        player.replay(&forged).unwrap_err(),
        PlayerError::ReplayMismatch {
            step: 1,
            divergence: Divergence::Params
        }
    );

    let mut forged = honest.clone();
    forged.entries[2].jump = jid(4);
    assert!(matches!(
        player.replay(&forged).unwrap_err(),
        PlayerError::ReplayMismatch { step: 2, .. }
    ));

    let mut forged = honest.clone();
    forged.entries[0].to = loc(3);
    assert_eq!(
        player.replay(&forged).unwrap_err(),
        PlayerError::ReplayMismatch {
            step: 0,
            divergence: Divergence::Destination
        }
    );

    let mut forged = honest.clone();
    forged.entries[0].draws += 1;
    assert_eq!(
        player.replay(&forged).unwrap_err(),
        PlayerError::ReplayMismatch {
            step: 0,
            divergence: Divergence::Draws
        }
    );

    let mut forged = honest;
    forged.fingerprint = quest::Fingerprint::from_bytes([0; 32]);
    assert_eq!(
        player.replay(&forged).unwrap_err(),
        PlayerError::ReplayMismatch {
            step: 0,
            divergence: Divergence::Fingerprint
        }
    );
}

#[test]
fn resumed_session_keeps_pass_limits() {
    let quest = dungeon();
    let player = Player::new(&quest);
    let mut state = player.start(Some("rest")).unwrap();
    player.choose(&mut state, jid(3)).unwrap();
    assert_eq!(state.passes(jid(3)), 1);

    let restored = player.import_state(export_state(&state)).unwrap();
    assert_eq!(restored, state);
    assert!(!player
        .available_jumps(&restored)
        .unwrap()
        .iter()
        .any(|jump| jump.id == jid(3)));

    let mut forged = export_state(&state);
    forged.passes.clear();
    forged.values[1] = 400;
    assert!(player.import_state(forged).is_err());
}
