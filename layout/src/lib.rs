//! File header, dialect field layouts and limits for the quest format.
//!
//! This crate describes the shape of a quest file: the fixed header, the
//! one-byte record tags, and the per-dialect field widths. It does not know
//! about quest semantics, only how records are laid out.
//!
//! # Design Principles
//!
//! - **Layout tables, not branches** - Dialect differences are rows in a [`FieldLayout`].
//! - **Bounded decoding** - Counts are validated against [`Limits`] before iteration.
//! - **No domain knowledge** - Tags are raw shapes; the codec maps them to the quest model.

mod dialect;
mod error;
mod header;
mod limits;
mod tags;

pub use dialect::{Dialect, FieldLayout, LEGACY_LAYOUT, MODERN_LAYOUT};
pub use error::{LayoutError, LayoutResult, LimitKind, TagField};
pub use header::{
    decode_header, encode_header, FileFlags, FileHeader, Variant, HEADER_SIZE, MAGIC_RICH,
    MAGIC_TEXT_ONLY, VERSION,
};
pub use limits::Limits;
pub use tags::{
    BoundaryTag, ConditionTag, CriticalEndingTag, EndingTag, FormulaTag, ParamKindTag,
};
