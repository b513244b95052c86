//! Identifier types.

use std::fmt;

/// A location identifier, unique within a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LocationId(u32);

impl LocationId {
    /// Creates a new location ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for LocationId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// A jump identifier, unique within a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct JumpId(u32);

impl JumpId {
    /// Creates a new jump ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for JumpId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for JumpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "J{}", self.0)
    }
}

/// A 1-based param slot, fixed for the lifetime of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub struct ParamSlot(u16);

impl ParamSlot {
    /// Creates a slot; returns `None` for zero.
    #[must_use]
    pub const fn new(slot: u16) -> Option<Self> {
        if slot == 0 {
            None
        } else {
            Some(Self(slot))
        }
    }

    /// Creates the slot for a 0-based vector index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index as u16 + 1)
    }

    /// Returns the 1-based slot number.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index into a value vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl TryFrom<u16> for ParamSlot {
    type Error = &'static str;

    fn try_from(slot: u16) -> Result<Self, Self::Error> {
        Self::new(slot).ok_or("param slots are 1-based")
    }
}

impl From<ParamSlot> for u16 {
    fn from(slot: ParamSlot) -> Self {
        slot.0
    }
}

impl fmt::Display for ParamSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_id_display() {
        assert_eq!(LocationId::new(12).to_string(), "L12");
        assert_eq!(JumpId::new(3).to_string(), "J3");
    }

    #[test]
    fn param_slot_is_one_based() {
        assert!(ParamSlot::new(0).is_none());
        let slot = ParamSlot::new(1).unwrap();
        assert_eq!(slot.index(), 0);
        assert_eq!(ParamSlot::from_index(4).get(), 5);
        assert_eq!(slot.to_string(), "p1");
    }

    #[test]
    fn param_slot_try_from() {
        assert!(ParamSlot::try_from(0u16).is_err());
        assert_eq!(u16::from(ParamSlot::try_from(7u16).unwrap()), 7);
    }

    #[test]
    fn ids_order() {
        assert!(LocationId::new(1) < LocationId::new(2));
        assert!(ParamSlot::new(1) < ParamSlot::new(2));
    }
}
