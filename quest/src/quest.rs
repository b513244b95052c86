//! The validated, immutable quest.

use std::collections::{BTreeMap, HashMap};

use layout::Dialect;

use crate::error::{ChangeOwner, IntegrityError, QuestResult};
use crate::{Jump, JumpId, Location, LocationId, Param, ParamChange, ParamSlot};

/// The raw, unvalidated contents of a quest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestParts {
    pub dialect: Dialect,
    /// 0 to 100.
    pub difficulty: u8,
    pub task_text: String,
    pub success_text: String,
    pub params: Vec<Param>,
    pub locations: Vec<Location>,
    pub jumps: Vec<Jump>,
    /// Embedded media blobs by name.
    pub embedded: BTreeMap<String, Vec<u8>>,
}

/// An immutable quest.
///
/// A `Quest` can only be obtained through [`Quest::new`] (or the builder),
/// which checks every structural invariant. Change lists are normalized to
/// one entry per param slot and outgoing jumps are indexed per location in
/// display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    parts: QuestParts,
    start: LocationId,
    location_index: HashMap<LocationId, usize>,
    jump_index: HashMap<JumpId, usize>,
    outgoing: Vec<Vec<JumpId>>,
}

impl Quest {
    /// Validates the parts and builds the quest.
    pub fn new(mut parts: QuestParts) -> QuestResult<Self> {
        validate_params(&parts.params)?;
        let param_count = parts.params.len();

        let mut location_index = HashMap::with_capacity(parts.locations.len());
        let mut start = None;
        for (index, location) in parts.locations.iter_mut().enumerate() {
            if location_index.insert(location.id, index).is_some() {
                return Err(IntegrityError::DuplicateLocation { id: location.id });
            }
            if location.is_start {
                if let Some(first) = start {
                    return Err(IntegrityError::MultipleStarts {
                        first,
                        second: location.id,
                    });
                }
                start = Some(location.id);
            }
            normalize_changes(
                &mut location.changes,
                param_count,
                ChangeOwner::Location(location.id),
            )?;
        }
        let start = start.ok_or(IntegrityError::MissingStart)?;

        let mut jump_index = HashMap::with_capacity(parts.jumps.len());
        let mut outgoing = vec![Vec::new(); parts.locations.len()];
        for (index, jump) in parts.jumps.iter_mut().enumerate() {
            if jump_index.insert(jump.id, index).is_some() {
                return Err(IntegrityError::DuplicateJump { id: jump.id });
            }
            let Some(&from) = location_index.get(&jump.from) else {
                return Err(IntegrityError::DanglingSource {
                    jump: jump.id,
                    from: jump.from,
                });
            };
            if !location_index.contains_key(&jump.to) {
                return Err(IntegrityError::DanglingDestination {
                    jump: jump.id,
                    to: jump.to,
                });
            }
            for condition in &jump.criteria.conditions {
                let slot = condition.param();
                if slot.index() >= param_count {
                    return Err(IntegrityError::UnknownParamSlot {
                        jump: jump.id,
                        slot: slot.get(),
                    });
                }
            }
            normalize_changes(&mut jump.changes, param_count, ChangeOwner::Jump(jump.id))?;
            if jump.pass_limit == Some(0) {
                jump.pass_limit = None;
            }
            outgoing[from].push(index);
        }

        // Stable sort keeps declaration order among equal display orders.
        let outgoing: Vec<Vec<JumpId>> = outgoing
            .into_iter()
            .map(|mut indices| {
                indices.sort_by_key(|&index| parts.jumps[index].order);
                indices
                    .into_iter()
                    .map(|index| parts.jumps[index].id)
                    .collect()
            })
            .collect();

        Ok(Self {
            parts,
            start,
            location_index,
            jump_index,
            outgoing,
        })
    }

    /// Returns the layout dialect the quest was read from.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.parts.dialect
    }

    #[must_use]
    pub const fn difficulty(&self) -> u8 {
        self.parts.difficulty
    }

    #[must_use]
    pub fn task_text(&self) -> &str {
        &self.parts.task_text
    }

    #[must_use]
    pub fn success_text(&self) -> &str {
        &self.parts.success_text
    }

    /// Params in slot order.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.parts.params
    }

    /// Returns the param in `slot`.
    #[must_use]
    pub fn param(&self, slot: ParamSlot) -> Option<&Param> {
        self.parts.params.get(slot.index())
    }

    /// Locations in declaration order.
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.parts.locations
    }

    /// Jumps in declaration order.
    #[must_use]
    pub fn jumps(&self) -> &[Jump] {
        &self.parts.jumps
    }

    #[must_use]
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.location_index
            .get(&id)
            .map(|&index| &self.parts.locations[index])
    }

    #[must_use]
    pub fn jump(&self, id: JumpId) -> Option<&Jump> {
        self.jump_index.get(&id).map(|&index| &self.parts.jumps[index])
    }

    /// Returns the start location id.
    #[must_use]
    pub const fn start(&self) -> LocationId {
        self.start
    }

    /// Outgoing jumps of a location in display order.
    #[must_use]
    pub fn outgoing(&self, id: LocationId) -> &[JumpId] {
        self.location_index
            .get(&id)
            .map(|&index| self.outgoing[index].as_slice())
            .unwrap_or_default()
    }

    /// Embedded media blobs by name.
    #[must_use]
    pub const fn embedded(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.parts.embedded
    }

    /// Starting values for every param slot.
    #[must_use]
    pub fn start_values(&self) -> Vec<i32> {
        self.parts.params.iter().map(|param| param.start).collect()
    }

    /// Borrows the validated parts.
    #[must_use]
    pub const fn parts(&self) -> &QuestParts {
        &self.parts
    }

    /// Consumes the quest, returning its parts for rebuilding.
    #[must_use]
    pub fn into_parts(self) -> QuestParts {
        self.parts
    }
}

fn validate_params(params: &[Param]) -> QuestResult<()> {
    for (index, param) in params.iter().enumerate() {
        if param.slot.index() != index {
            return Err(IntegrityError::SlotOutOfOrder {
                index,
                slot: param.slot,
            });
        }
        if param.min > param.max {
            return Err(IntegrityError::InvalidBounds {
                slot: param.slot,
                min: param.min,
                max: param.max,
            });
        }
        if !(param.min..=param.max).contains(&param.start) {
            return Err(IntegrityError::StartOutOfBounds {
                slot: param.slot,
                start: param.start,
            });
        }
    }
    Ok(())
}

fn normalize_changes(
    changes: &mut Vec<ParamChange>,
    params: usize,
    owner: ChangeOwner,
) -> QuestResult<()> {
    if changes.len() > params {
        if changes[params..].iter().all(|change| change.is_noop()) {
            changes.truncate(params);
        } else {
            return Err(IntegrityError::ChangeCountMismatch {
                owner,
                found: changes.len(),
                params,
            });
        }
    }
    changes.resize(params, ParamChange::NONE);
    Ok(())
}
