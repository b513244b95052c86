#![no_main]

use codec::{decode, encode, Limits, MediaResolution};
use libfuzzer_sys::fuzz_target;
use player::Player;
use quest::{fingerprint, Dialect};

fuzz_target!(|data: &[u8]| {
    let limits = Limits::for_testing();
    for dialect in [Dialect::Legacy, Dialect::Modern] {
        let Ok(quest) = decode(data, dialect, &limits) else {
            continue;
        };

        // Anything that decodes must re-encode and keep its gameplay.
        let bytes = encode(&quest, &MediaResolution::References, &Limits::default())
            .expect("decoded quest re-encodes");
        let again = decode(&bytes, Dialect::Modern, &Limits::default())
            .expect("re-encoded quest decodes");
        assert_eq!(fingerprint(&quest), fingerprint(&again));

        // Play a short session steered by the input bytes.
        let player = Player::new(&quest);
        let Ok(mut state) = player.start(Some("fuzz")) else {
            continue;
        };
        for &pick in data.iter().take(64) {
            let Ok(offered) = player.available_jumps(&state) else {
                break;
            };
            let Some(jump) = offered.get(usize::from(pick) % offered.len().max(1)) else {
                break;
            };
            let id = jump.id;
            player.choose(&mut state, id).expect("offered jump is accepted");
        }
    }
});
