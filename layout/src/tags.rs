//! One-byte record tags.

use crate::error::{LayoutError, LayoutResult, TagField};

macro_rules! record_tag {
    (
        $(#[$meta:meta])*
        $name:ident, $field:expr, { $($variant:ident = $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant = $value),+
        }

        impl $name {
            /// Parses the tag from a raw byte.
            pub const fn parse(raw: u8) -> LayoutResult<Self> {
                match raw {
                    $($value => Ok(Self::$variant),)+
                    value => Err(LayoutError::UnknownTag { field: $field, value }),
                }
            }

            /// Returns the raw byte.
            #[must_use]
            pub const fn raw(self) -> u8 {
                self as u8
            }
        }
    };
}

record_tag! {
    /// Param kind.
    ParamKindTag, TagField::ParamKind, { Normal = 0, Critical = 1 }
}

record_tag! {
    /// Which bound of a critical param triggers its ending.
    BoundaryTag, TagField::Boundary, { Max = 0, Min = 1 }
}

record_tag! {
    /// Ending of a critical param.
    CriticalEndingTag, TagField::CriticalEnding, { Success = 0, Failure = 1, Death = 2 }
}

record_tag! {
    /// Terminal flag of a location or jump.
    EndingTag, TagField::Ending, { None = 0, Success = 1, Failure = 2, Death = 3 }
}

record_tag! {
    /// Show-criteria condition shape.
    ConditionTag, TagField::Condition, { Range = 0, Critical = 1 }
}

record_tag! {
    /// Param change formula shape.
    FormulaTag, TagField::Formula, { Delta = 0, Percent = 1, Random = 2, Set = 3 }
}
