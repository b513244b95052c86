//! Binary decoder and encoder for quest files.
//!
//! This crate turns quest files into validated [`quest::Quest`] values and
//! back. Two on-disk variants share one record schema: a text-only variant
//! and a rich variant that adds media references and an optional trailing
//! table of embedded blobs. Dialect differences are looked up in
//! [`layout::FieldLayout`] tables.
//!
//! # Design Principles
//!
//! - **Pure** - No filesystem, clock or global state; identical input gives an identical quest.
//! - **Bounded** - Every count is checked against [`Limits`] and the remaining bytes before iteration.
//! - **Gameplay round-trip** - `decode(encode(q))` has the same [`quest::fingerprint`] as `q`.
//!
//! # Example
//!
//! ```
//! use codec::{decode, encode, Limits, MediaResolution};
//! use quest::{fingerprint, Dialect, Ending, Jump, JumpId, Location, LocationId, QuestBuilder};
//!
//! let quest = QuestBuilder::new()
//!     .location(Location::new(LocationId::new(1)).start().text("Dock"))
//!     .location(Location::new(LocationId::new(2)).ending(Ending::Success))
//!     .jump(Jump::new(JumpId::new(1), LocationId::new(1), LocationId::new(2)))
//!     .build()
//!     .unwrap();
//!
//! let bytes = encode(&quest, &MediaResolution::References, &Limits::default()).unwrap();
//! let decoded = decode(&bytes, Dialect::Modern, &Limits::default()).unwrap();
//! assert_eq!(fingerprint(&quest), fingerprint(&decoded));
//! ```

mod decode;
mod encode;
mod enrich;
mod error;
mod media;
mod tags;

pub use decode::decode;
pub use encode::encode;
pub use enrich::{enrich, EnrichReport, EnrichWarning, MediaPatch};
pub use error::{CodecError, CodecResult, FormatError};
pub use layout::Limits;
pub use media::{referenced_media, AssetResolver, MediaResolution};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        // Verify all expected items are exported
        let _ = decode;
        let _ = encode;
        let _ = enrich;
        let _ = MediaPatch::new();
        let _ = MediaResolution::References;
        let _ = Limits::for_testing();

        // Error types
        let _: CodecResult<()> = Ok(());
    }
}

#[cfg(test)]
mod dialect_tests {
    use std::collections::BTreeMap;

    use layout::{Dialect, Variant};
    use quest::{
        fingerprint, Boundary, Condition, Ending, Jump, JumpId, Location, LocationId, Param,
        ParamChange, ParamSlot, QuestBuilder,
    };

    use crate::encode::write_quest;
    use crate::{decode, CodecError, FormatError, Limits};

    fn slot(n: u16) -> ParamSlot {
        ParamSlot::new(n).unwrap()
    }

    fn legacy_quest() -> quest::Quest {
        QuestBuilder::new()
            .dialect(Dialect::Legacy)
            .task("Старый квест")
            .param(Param::new(slot(1), "Деньги", 0, 1000, 100))
            .param(
                Param::new(slot(2), "Hull", 0, 10, 10).critical(Boundary::Min, Ending::Failure),
            )
            .location(Location::new(LocationId::new(1)).start().text("Порт"))
            .location(Location::new(LocationId::new(2)).ending(Ending::Success))
            .jump(
                Jump::new(JumpId::new(1), LocationId::new(1), LocationId::new(2))
                    .order(3)
                    .when(Condition::InRange {
                        param: slot(1),
                        lo: 50,
                        hi: 500,
                    })
                    .change(slot(1), ParamChange::Random { lo: -5, hi: 5 }),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn legacy_text_only_roundtrip() {
        let quest = legacy_quest();
        let bytes = write_quest(
            &quest,
            Dialect::Legacy,
            Variant::TextOnly,
            &BTreeMap::new(),
            &Limits::default(),
        )
        .unwrap();
        let decoded = decode(&bytes, Dialect::Legacy, &Limits::default()).unwrap();
        assert_eq!(decoded, quest);
        assert_eq!(decoded.task_text(), "Старый квест");
    }

    #[test]
    fn legacy_critical_always_fails() {
        let mut parts = legacy_quest().into_parts();
        parts.params[1] = Param::new(slot(2), "Hull", 0, 10, 10).critical(Boundary::Max, Ending::Death);
        let quest = quest::Quest::new(parts).unwrap();
        let bytes = write_quest(
            &quest,
            Dialect::Legacy,
            Variant::Rich,
            &BTreeMap::new(),
            &Limits::default(),
        )
        .unwrap();
        let decoded = decode(&bytes, Dialect::Legacy, &Limits::default()).unwrap();
        let spec = decoded.params()[1].critical_spec().unwrap();
        assert_eq!(spec.boundary, Boundary::Max);
        assert_eq!(spec.ending, Ending::Failure);
    }

    #[test]
    fn wrong_dialect_is_rejected() {
        let bytes = write_quest(
            &legacy_quest(),
            Dialect::Legacy,
            Variant::Rich,
            &BTreeMap::new(),
            &Limits::default(),
        )
        .unwrap();
        assert!(decode(&bytes, Dialect::Modern, &Limits::default()).is_err());
    }

    #[test]
    fn legacy_reencoded_as_modern_keeps_gameplay() {
        let quest = legacy_quest();
        let legacy_bytes = write_quest(
            &quest,
            Dialect::Legacy,
            Variant::TextOnly,
            &BTreeMap::new(),
            &Limits::default(),
        )
        .unwrap();
        let decoded = decode(&legacy_bytes, Dialect::Legacy, &Limits::default()).unwrap();
        let modern = crate::encode(
            &decoded,
            &crate::MediaResolution::References,
            &Limits::default(),
        )
        .unwrap();
        let redecoded = decode(&modern, Dialect::Modern, &Limits::default()).unwrap();
        assert_eq!(fingerprint(&quest), fingerprint(&redecoded));
        assert_eq!(redecoded.dialect(), Dialect::Modern);
    }

    #[test]
    fn legacy_order_is_sixteen_bits() {
        let mut parts = legacy_quest().into_parts();
        parts.jumps[0].order = 70_000;
        let quest = quest::Quest::new(parts).unwrap();
        let err = write_quest(
            &quest,
            Dialect::Legacy,
            Variant::TextOnly,
            &BTreeMap::new(),
            &Limits::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::Format(FormatError::Byte(_))));
    }
}
