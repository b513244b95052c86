//! Quest integrity errors.

use std::fmt;

use crate::{JumpId, LocationId, ParamSlot};

/// Result type for quest construction.
pub type QuestResult<T> = Result<T, IntegrityError>;

/// Errors raised when a quest violates its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    /// Two locations share an id.
    DuplicateLocation { id: LocationId },

    /// Two jumps share an id.
    DuplicateJump { id: JumpId },

    /// A jump leaves a location that does not exist.
    DanglingSource { jump: JumpId, from: LocationId },

    /// A jump leads to a location that does not exist.
    DanglingDestination { jump: JumpId, to: LocationId },

    /// A condition reads a param slot the quest does not declare.
    UnknownParamSlot { jump: JumpId, slot: u16 },

    /// A change list is longer than the param count.
    ChangeCountMismatch { owner: ChangeOwner, found: usize, params: usize },

    /// No location is flagged as the start.
    MissingStart,

    /// More than one location is flagged as the start.
    MultipleStarts { first: LocationId, second: LocationId },

    /// Param slots must be 1, 2, 3... in declaration order.
    SlotOutOfOrder { index: usize, slot: ParamSlot },

    /// A param's `min` is greater than its `max`.
    InvalidBounds { slot: ParamSlot, min: i32, max: i32 },

    /// A param's starting value lies outside its bounds.
    StartOutOfBounds { slot: ParamSlot, start: i32 },
}

/// The record that owns a change list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOwner {
    Location(LocationId),
    Jump(JumpId),
}

impl IntegrityError {
    /// Returns `true` for dangling or duplicate references, as opposed to
    /// malformed record contents.
    #[must_use]
    pub const fn is_referential(&self) -> bool {
        matches!(
            self,
            Self::DuplicateLocation { .. }
                | Self::DuplicateJump { .. }
                | Self::DanglingSource { .. }
                | Self::DanglingDestination { .. }
                | Self::UnknownParamSlot { .. }
        )
    }
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateLocation { id } => write!(f, "duplicate location id {id}"),
            Self::DuplicateJump { id } => write!(f, "duplicate jump id {id}"),
            Self::DanglingSource { jump, from } => {
                write!(f, "jump {jump} leaves unknown location {from}")
            }
            Self::DanglingDestination { jump, to } => {
                write!(f, "jump {jump} leads to unknown location {to}")
            }
            Self::UnknownParamSlot { jump, slot } => {
                write!(f, "jump {jump} reads unknown param slot {slot}")
            }
            Self::ChangeCountMismatch {
                owner,
                found,
                params,
            } => write!(f, "{owner} has {found} changes for {params} params"),
            Self::MissingStart => write!(f, "no start location"),
            Self::MultipleStarts { first, second } => {
                write!(f, "multiple start locations: {first} and {second}")
            }
            Self::SlotOutOfOrder { index, slot } => {
                write!(f, "param #{index} declares slot {slot}")
            }
            Self::InvalidBounds { slot, min, max } => {
                write!(f, "param {slot} has min {min} above max {max}")
            }
            Self::StartOutOfBounds { slot, start } => {
                write!(f, "param {slot} starts at {start}, outside its bounds")
            }
        }
    }
}

impl fmt::Display for ChangeOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location(id) => write!(f, "location {id}"),
            Self::Jump(id) => write!(f, "jump {id}"),
        }
    }
}

impl std::error::Error for IntegrityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referential_split() {
        assert!(IntegrityError::DanglingDestination {
            jump: JumpId::new(1),
            to: LocationId::new(9),
        }
        .is_referential());
        assert!(!IntegrityError::MissingStart.is_referential());
    }

    #[test]
    fn display_names_ids() {
        let err = IntegrityError::DanglingSource {
            jump: JumpId::new(4),
            from: LocationId::new(7),
        };
        let msg = err.to_string();
        assert!(msg.contains("J4"));
        assert!(msg.contains("L7"));

        let err = IntegrityError::ChangeCountMismatch {
            owner: ChangeOwner::Location(LocationId::new(2)),
            found: 5,
            params: 3,
        };
        assert_eq!(err.to_string(), "location L2 has 5 changes for 3 params");
    }
}
