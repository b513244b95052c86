//! Immutable quest model for branching stat-driven narratives.
//!
//! A [`Quest`] is a graph of [`Location`]s joined by criteria-gated
//! [`Jump`]s, plus a fixed list of numeric [`Param`]s. It is validated once
//! at construction and never mutated afterwards; share it behind an `Arc`
//! across any number of play sessions.
//!
//! # Design Principles
//!
//! - **Validated once** - Dangling references and bad slots are rejected by [`Quest::new`].
//! - **Dense slots** - Params are addressed by 1-based [`ParamSlot`]s and every change list has one entry per slot.
//! - **Gameplay identity** - [`fingerprint`] hashes only what affects play.

mod builder;
mod error;
mod fingerprint;
mod ids;
mod model;
mod quest;

pub use builder::QuestBuilder;
pub use error::{ChangeOwner, IntegrityError, QuestResult};
pub use fingerprint::{fingerprint, Fingerprint};
pub use ids::{JumpId, LocationId, ParamSlot};
pub use layout::Dialect;
pub use model::{
    Boundary, Condition, CriticalSpec, Criteria, DisplayRange, Ending, Jump, Location, Media,
    Paragraph, Param, ParamChange, ParamKind,
};
pub use quest::{Quest, QuestParts};
