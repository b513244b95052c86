//! Quest building blocks: params, changes, criteria, locations and jumps.

use crate::{JumpId, LocationId, ParamSlot};

/// How a play-through ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Ending {
    /// The quest is won.
    Success,
    /// The quest is lost.
    Failure,
    /// The quest is lost because the player died.
    Death,
}

impl Ending {
    /// Returns `true` for the winning ending.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Which bound of a critical param triggers its ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    Max,
    Min,
}

/// Critical-param semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CriticalSpec {
    pub boundary: Boundary,
    pub ending: Ending,
}

/// Param kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamKind {
    #[default]
    Normal,
    /// Reaching the boundary ends the quest.
    Critical(CriticalSpec),
}

/// Name-only media references. The core never resolves these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Media {
    pub image: Option<String>,
    pub sound: Option<String>,
    pub track: Option<String>,
}

impl Media {
    /// Media with only an image.
    #[must_use]
    pub fn image(name: impl Into<String>) -> Self {
        Self {
            image: Some(name.into()),
            ..Self::default()
        }
    }

    /// Returns `true` if no reference is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.image.is_none() && self.sound.is_none() && self.track.is_none()
    }

    /// Iterates over the referenced names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [&self.image, &self.sound, &self.track]
            .into_iter()
            .filter_map(|name| name.as_deref())
    }
}

/// A value range with a display template; `<>` is replaced by the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayRange {
    pub from: i32,
    pub to: i32,
    pub template: String,
}

/// A numeric stat tracked through play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub slot: ParamSlot,
    pub name: String,
    pub kind: ParamKind,
    /// Changes to inactive params are skipped.
    pub active: bool,
    pub min: i32,
    pub max: i32,
    pub start: i32,
    /// Shown when the critical ending fires.
    pub critical_text: String,
    pub display: Vec<DisplayRange>,
    pub media: Media,
}

impl Param {
    /// Creates an active normal param.
    #[must_use]
    pub fn new(slot: ParamSlot, name: impl Into<String>, min: i32, max: i32, start: i32) -> Self {
        Self {
            slot,
            name: name.into(),
            kind: ParamKind::Normal,
            active: true,
            min,
            max,
            start,
            critical_text: String::new(),
            display: Vec::new(),
            media: Media::default(),
        }
    }

    /// Makes the param critical.
    #[must_use]
    pub fn critical(mut self, boundary: Boundary, ending: Ending) -> Self {
        self.kind = ParamKind::Critical(CriticalSpec { boundary, ending });
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Adds a display range.
    #[must_use]
    pub fn show(mut self, from: i32, to: i32, template: impl Into<String>) -> Self {
        self.display.push(DisplayRange {
            from,
            to,
            template: template.into(),
        });
        self
    }

    /// Returns the critical spec, if any.
    #[must_use]
    pub const fn critical_spec(&self) -> Option<CriticalSpec> {
        match self.kind {
            ParamKind::Normal => None,
            ParamKind::Critical(spec) => Some(spec),
        }
    }

    /// Clamps a computed value into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, value: i64) -> i32 {
        value.clamp(i64::from(self.min), i64::from(self.max)) as i32
    }

    /// Returns `true` if `value` sits on this param's critical boundary.
    #[must_use]
    pub fn is_critical_at(&self, value: i32) -> bool {
        match self.critical_spec() {
            None => false,
            Some(CriticalSpec {
                boundary: Boundary::Max,
                ..
            }) => value >= self.max,
            Some(CriticalSpec {
                boundary: Boundary::Min,
                ..
            }) => value <= self.min,
        }
    }

    /// Renders the first display range containing `value`.
    #[must_use]
    pub fn display_for(&self, value: i32) -> Option<String> {
        self.display
            .iter()
            .find(|range| (range.from..=range.to).contains(&value))
            .map(|range| range.template.replace("<>", &value.to_string()))
    }
}

/// A param update formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamChange {
    /// Adds a constant.
    Delta(i32),
    /// Adds a percentage of the current value.
    Percent(i32),
    /// Adds a uniform random integer from the inclusive range.
    Random { lo: i32, hi: i32 },
    /// Replaces the value.
    Set(i32),
}

impl ParamChange {
    /// The identity change.
    pub const NONE: Self = Self::Delta(0);

    /// Returns `true` if the change never alters a value.
    #[must_use]
    pub const fn is_noop(self) -> bool {
        matches!(self, Self::Delta(0) | Self::Percent(0))
    }

    /// Returns `true` if applying the change consumes a random draw.
    #[must_use]
    pub const fn draws(self) -> bool {
        matches!(self, Self::Random { .. })
    }
}

impl Default for ParamChange {
    fn default() -> Self {
        Self::NONE
    }
}

/// A single show-criteria condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// The param value lies in `[lo, hi]`, both ends included.
    InRange { param: ParamSlot, lo: i32, hi: i32 },
    /// The param sits on its critical boundary.
    Critical { param: ParamSlot },
}

impl Condition {
    /// The param the condition reads.
    #[must_use]
    pub const fn param(self) -> ParamSlot {
        match self {
            Self::InRange { param, .. } | Self::Critical { param } => param,
        }
    }
}

/// Jump show-criteria: a conjunction of conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Criteria {
    pub conditions: Vec<Condition>,
}

impl Criteria {
    /// Criteria that always hold.
    #[must_use]
    pub const fn always() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Returns `true` if there are no conditions.
    #[must_use]
    pub fn is_always(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Adds a condition.
    #[must_use]
    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }
}

/// A paragraph of location text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    pub text: String,
    pub media: Media,
}

/// A node in the quest graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,
    pub is_start: bool,
    pub ending: Option<Ending>,
    pub paragraphs: Vec<Paragraph>,
    /// One change per param slot, applied on arrival.
    pub changes: Vec<ParamChange>,
}

impl Location {
    /// Creates an ordinary location with no text.
    #[must_use]
    pub const fn new(id: LocationId) -> Self {
        Self {
            id,
            is_start: false,
            ending: None,
            paragraphs: Vec::new(),
            changes: Vec::new(),
        }
    }

    /// Marks the location as the starting location.
    #[must_use]
    pub const fn start(mut self) -> Self {
        self.is_start = true;
        self
    }

    /// Makes the location terminal.
    #[must_use]
    pub const fn ending(mut self, ending: Ending) -> Self {
        self.ending = Some(ending);
        self
    }

    /// Appends a paragraph without media.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.paragraphs.push(Paragraph {
            text: text.into(),
            media: Media::default(),
        });
        self
    }

    /// Sets the arrival change for a slot.
    #[must_use]
    pub fn change(mut self, slot: ParamSlot, change: ParamChange) -> Self {
        set_change(&mut self.changes, slot, change);
        self
    }
}

/// A directed, criteria-gated edge between locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jump {
    pub id: JumpId,
    pub from: LocationId,
    pub to: LocationId,
    /// Declared display order; ties keep declaration order.
    pub order: u32,
    pub label: String,
    /// Shown after the jump is taken.
    pub description: String,
    pub media: Media,
    pub criteria: Criteria,
    /// One change per param slot, applied on traversal.
    pub changes: Vec<ParamChange>,
    pub ending: Option<Ending>,
    /// Hidden after this many traversals; `None` is unlimited.
    pub pass_limit: Option<u16>,
}

impl Jump {
    /// Creates an always-shown jump with no effects.
    #[must_use]
    pub fn new(id: JumpId, from: LocationId, to: LocationId) -> Self {
        Self {
            id,
            from,
            to,
            order: 0,
            label: String::new(),
            description: String::new(),
            media: Media::default(),
            criteria: Criteria::always(),
            changes: Vec::new(),
            ending: None,
            pass_limit: None,
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub const fn order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.criteria.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn change(mut self, slot: ParamSlot, change: ParamChange) -> Self {
        set_change(&mut self.changes, slot, change);
        self
    }

    #[must_use]
    pub const fn ending(mut self, ending: Ending) -> Self {
        self.ending = Some(ending);
        self
    }

    #[must_use]
    pub const fn pass_limit(mut self, limit: u16) -> Self {
        self.pass_limit = Some(limit);
        self
    }
}

fn set_change(changes: &mut Vec<ParamChange>, slot: ParamSlot, change: ParamChange) {
    if changes.len() <= slot.index() {
        changes.resize(slot.index() + 1, ParamChange::NONE);
    }
    changes[slot.index()] = change;
}
