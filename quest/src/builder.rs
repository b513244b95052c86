//! Fluent quest construction.

use layout::Dialect;

use crate::error::QuestResult;
use crate::{Jump, Location, Param, Quest, QuestParts};

/// Builder for [`Quest`].
///
/// ```
/// use quest::{Ending, Jump, JumpId, Location, LocationId, Param, ParamSlot, QuestBuilder};
///
/// let money = ParamSlot::new(1).unwrap();
/// let quest = QuestBuilder::new()
///     .task("Deliver the cargo")
///     .param(Param::new(money, "Money", 0, 100, 10))
///     .location(Location::new(LocationId::new(1)).start().text("Dock"))
///     .location(Location::new(LocationId::new(2)).ending(Ending::Success))
///     .jump(Jump::new(JumpId::new(1), LocationId::new(1), LocationId::new(2)).label("Sail"))
///     .build()
///     .unwrap();
/// assert_eq!(quest.outgoing(LocationId::new(1)).len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct QuestBuilder {
    parts: QuestParts,
}

impl QuestBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn dialect(mut self, dialect: Dialect) -> Self {
        self.parts.dialect = dialect;
        self
    }

    #[must_use]
    pub const fn difficulty(mut self, difficulty: u8) -> Self {
        self.parts.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn task(mut self, text: impl Into<String>) -> Self {
        self.parts.task_text = text.into();
        self
    }

    #[must_use]
    pub fn success_text(mut self, text: impl Into<String>) -> Self {
        self.parts.success_text = text.into();
        self
    }

    /// Adds a param; slots must be added in order.
    #[must_use]
    pub fn param(mut self, param: Param) -> Self {
        self.parts.params.push(param);
        self
    }

    #[must_use]
    pub fn location(mut self, location: Location) -> Self {
        self.parts.locations.push(location);
        self
    }

    #[must_use]
    pub fn jump(mut self, jump: Jump) -> Self {
        self.parts.jumps.push(jump);
        self
    }

    /// Adds an embedded media blob.
    #[must_use]
    pub fn embed(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.parts.embedded.insert(name.into(), bytes);
        self
    }

    /// Builds the quest after validation.
    pub fn build(self) -> QuestResult<Quest> {
        Quest::new(self.parts)
    }
}
