//! Gameplay fingerprint.
//!
//! The digest covers only what affects play: ids, display order, criteria,
//! changes, bounds, param kinds, endings, pass limits and the start id.
//! Text, media, difficulty and dialect are left out, so the fingerprint
//! survives media enrichment and a trip through the codec.

use std::fmt;

use blake3::Hasher;

use crate::{
    Boundary, Condition, Criteria, Ending, Jump, Location, Param, ParamChange, ParamKind, Quest,
};

/// A 32-byte blake3 digest of a quest's gameplay. The default is all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parses a 64-character lowercase or uppercase hex string.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.as_bytes();
        if hex.len() != 64 {
            return None;
        }
        let mut bytes = [0u8; 32];
        for (byte, pair) in bytes.iter_mut().zip(hex.chunks_exact(2)) {
            *byte = (hex_digit(pair[0])? << 4) | hex_digit(pair[1])?;
        }
        Some(Self(bytes))
    }
}

const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fingerprint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fingerprint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).ok_or_else(|| serde::de::Error::custom("invalid fingerprint hex"))
    }
}

/// Computes the gameplay fingerprint of a quest.
#[must_use]
pub fn fingerprint(quest: &Quest) -> Fingerprint {
    let mut hasher = Hasher::new();
    write_u32(&mut hasher, quest.start().raw());

    write_u32(&mut hasher, quest.params().len() as u32);
    for param in quest.params() {
        write_param(&mut hasher, param);
    }

    write_u32(&mut hasher, quest.locations().len() as u32);
    for location in quest.locations() {
        write_location(&mut hasher, location);
    }

    write_u32(&mut hasher, quest.jumps().len() as u32);
    for jump in quest.jumps() {
        write_jump(&mut hasher, jump);
    }

    Fingerprint(*hasher.finalize().as_bytes())
}

fn write_param(hasher: &mut Hasher, param: &Param) {
    write_u16(hasher, param.slot.get());
    match param.kind {
        ParamKind::Normal => write_u8(hasher, 0),
        ParamKind::Critical(spec) => {
            write_u8(hasher, 1);
            write_u8(hasher, u8::from(spec.boundary == Boundary::Min));
            write_ending(hasher, Some(spec.ending));
        }
    }
    write_u8(hasher, u8::from(param.active));
    write_i32(hasher, param.min);
    write_i32(hasher, param.max);
    write_i32(hasher, param.start);
}

fn write_location(hasher: &mut Hasher, location: &Location) {
    write_u32(hasher, location.id.raw());
    write_u8(hasher, u8::from(location.is_start));
    write_ending(hasher, location.ending);
    write_changes(hasher, &location.changes);
}

fn write_jump(hasher: &mut Hasher, jump: &Jump) {
    write_u32(hasher, jump.id.raw());
    write_u32(hasher, jump.from.raw());
    write_u32(hasher, jump.to.raw());
    write_u32(hasher, jump.order);
    write_u16(hasher, jump.pass_limit.unwrap_or(0));
    write_ending(hasher, jump.ending);
    write_criteria(hasher, &jump.criteria);
    write_changes(hasher, &jump.changes);
}

fn write_criteria(hasher: &mut Hasher, criteria: &Criteria) {
    write_u32(hasher, criteria.conditions.len() as u32);
    for condition in &criteria.conditions {
        match *condition {
            Condition::InRange { param, lo, hi } => {
                write_u8(hasher, 0);
                write_u16(hasher, param.get());
                write_i32(hasher, lo);
                write_i32(hasher, hi);
            }
            Condition::Critical { param } => {
                write_u8(hasher, 1);
                write_u16(hasher, param.get());
            }
        }
    }
}

fn write_changes(hasher: &mut Hasher, changes: &[ParamChange]) {
    for change in changes {
        match *change {
            ParamChange::Delta(n) => {
                write_u8(hasher, 0);
                write_i32(hasher, n);
            }
            ParamChange::Percent(p) => {
                write_u8(hasher, 1);
                write_i32(hasher, p);
            }
            ParamChange::Random { lo, hi } => {
                write_u8(hasher, 2);
                write_i32(hasher, lo);
                write_i32(hasher, hi);
            }
            ParamChange::Set(n) => {
                write_u8(hasher, 3);
                write_i32(hasher, n);
            }
        }
    }
}

fn write_ending(hasher: &mut Hasher, ending: Option<Ending>) {
    let tag = match ending {
        None => 0,
        Some(Ending::Success) => 1,
        Some(Ending::Failure) => 2,
        Some(Ending::Death) => 3,
    };
    write_u8(hasher, tag);
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u16(hasher: &mut Hasher, value: u16) {
    hasher.update(&value.to_le_bytes());
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}

fn write_i32(hasher: &mut Hasher, value: i32) {
    hasher.update(&value.to_le_bytes());
}
