//! Dialect selection and per-dialect field layouts.
//!
//! Every difference between the legacy and modern layouts is a row in a
//! [`FieldLayout`] table. Decoders and encoders ask the table for a width
//! instead of branching on the dialect.

use bytestream::Width;

/// Legacy binary layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Narrow fields; critical params carry no ending byte and always end
    /// the game in failure.
    Legacy,
    /// Wide fields and explicit critical endings.
    #[default]
    Modern,
}

/// Field widths and record shapes for one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Width of the param count in the header.
    pub param_count: Width,
    /// Width of the location and jump counts in the header.
    pub record_count: Width,
    /// Width of location and jump ids.
    pub id: Width,
    /// Width of param values, bounds and formula operands.
    pub value: Width,
    /// Width of string length prefixes.
    pub string_len: Width,
    /// Width of the jump display order.
    pub order: Width,
    /// Whether a critical param record stores its ending.
    pub critical_ending: bool,
}

/// Field layout of the legacy dialect.
pub const LEGACY_LAYOUT: FieldLayout = FieldLayout {
    param_count: Width::One,
    record_count: Width::Two,
    id: Width::Two,
    value: Width::Two,
    string_len: Width::Two,
    order: Width::Two,
    critical_ending: false,
};

/// Field layout of the modern dialect.
pub const MODERN_LAYOUT: FieldLayout = FieldLayout {
    param_count: Width::Two,
    record_count: Width::Four,
    id: Width::Four,
    value: Width::Four,
    string_len: Width::Four,
    order: Width::Four,
    critical_ending: true,
};

impl Dialect {
    /// Returns the field layout table for this dialect.
    #[must_use]
    pub const fn layout(self) -> &'static FieldLayout {
        match self {
            Self::Legacy => &LEGACY_LAYOUT,
            Self::Modern => &MODERN_LAYOUT,
        }
    }
}

impl FieldLayout {
    /// Smallest possible encoded string (empty, prefix only).
    #[must_use]
    pub const fn min_string(&self) -> usize {
        self.string_len.bytes()
    }

    /// Smallest possible encoded param change record (tag + one operand).
    #[must_use]
    pub const fn min_change(&self) -> usize {
        1 + self.value.bytes()
    }

    /// Smallest possible media record (three empty strings).
    #[must_use]
    pub const fn min_media(&self) -> usize {
        3 * self.min_string()
    }

    /// Smallest possible param record.
    #[must_use]
    pub const fn min_param(&self, media: bool) -> usize {
        let base = 1 + 1 + 3 * self.value.bytes() + 2 * self.min_string() + 1;
        if media {
            base + self.min_media()
        } else {
            base
        }
    }

    /// Smallest possible location record for `params` slots.
    #[must_use]
    pub const fn min_location(&self, params: usize) -> usize {
        self.id.bytes() + 1 + 1 + 1 + params * self.min_change()
    }

    /// Smallest possible jump record for `params` slots.
    #[must_use]
    pub const fn min_jump(&self, params: usize, media: bool) -> usize {
        let base = 3 * self.id.bytes()
            + self.order.bytes()
            + 2
            + 1
            + 2 * self.min_string()
            + 1
            + params * self.min_change();
        if media {
            base + self.min_media()
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dialect_is_modern() {
        assert_eq!(Dialect::default(), Dialect::Modern);
    }

    #[test]
    fn legacy_fields_are_narrower() {
        let legacy = Dialect::Legacy.layout();
        let modern = Dialect::Modern.layout();
        assert!(legacy.value.bytes() < modern.value.bytes());
        assert!(legacy.id.bytes() < modern.id.bytes());
        assert!(legacy.string_len.bytes() < modern.string_len.bytes());
        assert!(!legacy.critical_ending);
        assert!(modern.critical_ending);
    }

    #[test]
    fn minimum_record_sizes() {
        let modern = Dialect::Modern.layout();
        assert_eq!(modern.min_string(), 4);
        assert_eq!(modern.min_change(), 5);
        // id + start + ending + paragraph count + 2 changes
        assert_eq!(modern.min_location(2), 4 + 1 + 1 + 1 + 10);
        assert!(modern.min_jump(0, true) > modern.min_jump(0, false));
    }
}
