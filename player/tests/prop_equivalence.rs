use codec::{decode, encode, Limits, MediaResolution};
use player::{GameState, Player, Status};
use proptest::prelude::*;
use quest::{
    Boundary, Condition, Dialect, Ending, Jump, JumpId, Location, LocationId, Param, ParamChange,
    ParamSlot, Quest, QuestParts,
};

fn ending(raw: u8) -> Ending {
    match raw {
        0 => Ending::Success,
        1 => Ending::Failure,
        _ => Ending::Death,
    }
}

fn change() -> impl Strategy<Value = ParamChange> {
    prop_oneof![
        (-20i32..20).prop_map(ParamChange::Delta),
        (-60i32..60).prop_map(ParamChange::Percent),
        (-10i32..10, 0i32..15).prop_map(|(lo, span)| ParamChange::Random { lo, hi: lo + span }),
        (0i32..50).prop_map(ParamChange::Set),
    ]
}

type ParamSeed = (i32, i32, Option<(bool, u8)>, bool);
type JumpSeed = (usize, usize, u32, u16, Option<u8>, Option<(usize, i32, i32)>, Vec<ParamChange>);

fn quest_strategy() -> impl Strategy<Value = Quest> {
    (
        prop::collection::vec(
            (0i32..20, 10i32..60, prop::option::of((any::<bool>(), 0u8..3)), any::<bool>()),
            1..4,
        ),
        2usize..7,
        prop::collection::vec(prop::option::weighted(0.3, 0u8..3), 7),
        prop::collection::vec(
            (
                any::<usize>(),
                any::<usize>(),
                0u32..3,
                0u16..3,
                prop::option::weighted(0.15, 0u8..3),
                prop::option::of((any::<usize>(), 0i32..40, 0i32..40)),
                prop::collection::vec(change(), 0..4),
            ),
            1..14,
        ),
        prop::collection::vec(change(), 0..4),
    )
        .prop_map(|(params, count, endings, jumps, arrival)| {
            build(&params, count, &endings, &jumps, &arrival)
        })
}

fn build(
    params: &[ParamSeed],
    count: usize,
    endings: &[Option<u8>],
    jumps: &[JumpSeed],
    arrival: &[ParamChange],
) -> Quest {
    let params: Vec<Param> = params
        .iter()
        .enumerate()
        .map(|(index, &(min, span, critical, active))| {
            let mut param = Param::new(
                ParamSlot::from_index(index),
                format!("p{index}"),
                min,
                min + span,
                min + span / 2,
            )
            .with_active(active);
            if let Some((max, raw)) = critical {
                let boundary = if max { Boundary::Max } else { Boundary::Min };
                param = param.critical(boundary, ending(raw));
            }
            param
        })
        .collect();
    let slots = params.len();

    let locations: Vec<Location> = (0..count)
        .map(|index| {
            let mut location = Location::new(LocationId::new(index as u32 + 1));
            location.is_start = index == 0;
            location.ending = endings[index].map(ending);
            if index % 2 == 1 {
                location.changes = arrival.iter().copied().take(slots).collect();
            }
            location
        })
        .collect();

    let jumps = jumps
        .iter()
        .enumerate()
        .map(
            |(index, (from, to, order, limit, end, condition, changes))| {
                let mut jump = Jump::new(
                    JumpId::new(index as u32 + 1),
                    locations[from % count].id,
                    locations[to % count].id,
                )
                .order(*order)
                .pass_limit(*limit);
                jump.ending = end.map(ending);
                if let Some((slot, lo, span)) = condition {
                    jump = jump.when(Condition::InRange {
                        param: ParamSlot::from_index(slot % slots),
                        lo: *lo,
                        hi: lo + span,
                    });
                }
                jump.changes = changes.iter().copied().take(slots).collect();
                jump
            },
        )
        .collect();

    Quest::new(QuestParts {
        dialect: Dialect::Modern,
        task_text: "Task".into(),
        params,
        locations,
        jumps,
        ..QuestParts::default()
    })
    .unwrap()
}

/// Plays with choice indices; returns the offered jump ids at every step
/// and the final state.
fn play(quest: &Quest, seed: &str, picks: &[usize]) -> (Vec<Vec<JumpId>>, GameState) {
    let player = Player::new(quest);
    let mut state = player.start(Some(seed)).unwrap();
    let mut offered = Vec::new();
    for &pick in picks {
        if state.status() != Status::AtLocation {
            break;
        }
        let ids: Vec<JumpId> = player
            .available_jumps(&state)
            .unwrap()
            .iter()
            .map(|jump| jump.id)
            .collect();
        let choice = ids[pick % ids.len()];
        offered.push(ids);
        player.choose(&mut state, choice).unwrap();
    }
    (offered, state)
}

proptest! {
    #[test]
    fn prop_codec_roundtrip_preserves_gameplay(
        quest in quest_strategy(),
        seed in "[a-zA-Z0-9]{1,16}",
        picks in prop::collection::vec(any::<usize>(), 0..30),
    ) {
        let bytes = encode(&quest, &MediaResolution::References, &Limits::default()).unwrap();
        let decoded = decode(&bytes, Dialect::Modern, &Limits::default()).unwrap();

        let (offered, original) = play(&quest, &seed, &picks);
        let (offered_again, roundtripped) = play(&decoded, &seed, &picks);

        prop_assert_eq!(offered, offered_again);
        prop_assert_eq!(original.log(), roundtripped.log());
        prop_assert_eq!(original.values(), roundtripped.values());
        prop_assert_eq!(original.status(), roundtripped.status());
        prop_assert_eq!(original.termination(), roundtripped.termination());
    }

    #[test]
    fn prop_values_stay_in_bounds(
        quest in quest_strategy(),
        seed in "[a-z]{1,8}",
        picks in prop::collection::vec(any::<usize>(), 0..40),
    ) {
        let (_, state) = play(&quest, &seed, &picks);
        for (param, &value) in quest.params().iter().zip(state.values()) {
            prop_assert!((param.min..=param.max).contains(&value));
        }
    }

    #[test]
    fn prop_replay_accepts_honest_logs(
        quest in quest_strategy(),
        seed in "[a-z]{1,8}",
        picks in prop::collection::vec(any::<usize>(), 0..30),
    ) {
        let (_, state) = play(&quest, &seed, &picks);
        let replayed = Player::new(&quest).replay(state.log()).unwrap();
        prop_assert_eq!(replayed, state);
    }
}
