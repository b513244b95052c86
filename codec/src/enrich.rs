//! One-time media enrichment.
//!
//! Quests shipped without illustrations can have image references patched
//! in after decode, either from explicit assignments or from a donor quest
//! that shares ids with the target. Enrichment builds a new [`Quest`]; the
//! input is left untouched and gameplay is never altered.

use std::collections::BTreeMap;
use std::fmt;

use quest::{JumpId, LocationId, Media, ParamSlot, Quest};
use tracing::{debug, warn};

use crate::error::CodecResult;

/// Media assignments to apply to a quest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaPatch {
    locations: BTreeMap<LocationId, LocationMedia>,
    jumps: BTreeMap<JumpId, Media>,
    params: BTreeMap<ParamSlot, Media>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LocationMedia {
    /// One image for every paragraph.
    Image(String),
    /// Media per paragraph index.
    Paragraphs(Vec<Media>),
}

/// Problems found while applying a patch. None of them abort enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichWarning {
    /// The patch names a location the quest lacks.
    UnknownLocation(LocationId),
    /// The location has no paragraphs to carry media.
    EmptyLocation(LocationId),
    /// The patch names a jump the quest lacks.
    UnknownJump(JumpId),
    /// The patch names a param slot the quest lacks.
    UnknownParam(ParamSlot),
    /// Images are only shown for critical params.
    NonCriticalParamImage(ParamSlot),
    /// The donor has no media for this paragraph.
    MissingParagraph { location: LocationId, index: usize },
}

/// Outcome of [`enrich`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    pub warnings: Vec<EnrichWarning>,
    /// Number of media slots that changed.
    pub patched: usize,
}

impl MediaPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `image` with every paragraph of a location.
    #[must_use]
    pub fn location_image(mut self, id: LocationId, image: impl Into<String>) -> Self {
        self.locations
            .insert(id, LocationMedia::Image(image.into()));
        self
    }

    #[must_use]
    pub fn jump_image(mut self, id: JumpId, image: impl Into<String>) -> Self {
        self.jumps.insert(id, Media::image(image));
        self
    }

    /// Shows `image` when a critical param ends the quest.
    #[must_use]
    pub fn param_image(mut self, slot: ParamSlot, image: impl Into<String>) -> Self {
        self.params.insert(slot, Media::image(image));
        self
    }

    /// Copies every media reference of a donor quest, keyed by location and
    /// jump id, paragraph index and param slot.
    #[must_use]
    pub fn from_donor(donor: &Quest) -> Self {
        let locations = donor
            .locations()
            .iter()
            .filter(|location| {
                location
                    .paragraphs
                    .iter()
                    .any(|paragraph| !paragraph.media.is_empty())
            })
            .map(|location| {
                let media = location
                    .paragraphs
                    .iter()
                    .map(|paragraph| paragraph.media.clone())
                    .collect();
                (location.id, LocationMedia::Paragraphs(media))
            })
            .collect();
        let jumps = donor
            .jumps()
            .iter()
            .filter(|jump| !jump.media.is_empty())
            .map(|jump| (jump.id, jump.media.clone()))
            .collect();
        let params = donor
            .params()
            .iter()
            .filter(|param| !param.media.is_empty())
            .map(|param| (param.slot, param.media.clone()))
            .collect();
        Self {
            locations,
            jumps,
            params,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.jumps.is_empty() && self.params.is_empty()
    }
}

/// Applies a media patch, returning the enriched quest and a report.
///
/// The fingerprint of the result equals the fingerprint of the input.
pub fn enrich(quest: &Quest, patch: &MediaPatch) -> CodecResult<(Quest, EnrichReport)> {
    let mut parts = quest.clone().into_parts();
    let mut report = EnrichReport::default();

    for (&id, media) in &patch.locations {
        let Some(location) = parts.locations.iter_mut().find(|l| l.id == id) else {
            report.warn(EnrichWarning::UnknownLocation(id));
            continue;
        };
        if location.paragraphs.is_empty() {
            report.warn(EnrichWarning::EmptyLocation(id));
            continue;
        }
        for (index, paragraph) in location.paragraphs.iter_mut().enumerate() {
            let update = match media {
                LocationMedia::Image(image) => Media::image(image.clone()),
                LocationMedia::Paragraphs(list) => {
                    let Some(media) = list.get(index) else {
                        if !paragraph.text.is_empty() {
                            report.warn(EnrichWarning::MissingParagraph {
                                location: id,
                                index,
                            });
                        }
                        continue;
                    };
                    media.clone()
                }
            };
            report.patched += usize::from(merge(&mut paragraph.media, update));
        }
    }

    for (&id, media) in &patch.jumps {
        match parts.jumps.iter_mut().find(|jump| jump.id == id) {
            Some(jump) => report.patched += usize::from(merge(&mut jump.media, media.clone())),
            None => report.warn(EnrichWarning::UnknownJump(id)),
        }
    }

    for (&slot, media) in &patch.params {
        let Some(param) = parts.params.get_mut(slot.index()) else {
            report.warn(EnrichWarning::UnknownParam(slot));
            continue;
        };
        let mut media = media.clone();
        if media.image.is_some() && param.critical_spec().is_none() {
            report.warn(EnrichWarning::NonCriticalParamImage(slot));
            media.image = None;
        }
        report.patched += usize::from(merge(&mut param.media, media));
    }

    let enriched = Quest::new(parts)?;
    debug!(
        patched = report.patched,
        warnings = report.warnings.len(),
        "enriched quest media"
    );
    Ok((enriched, report))
}

/// Overwrites the fields `patch` sets. Returns `true` if anything changed.
fn merge(target: &mut Media, patch: Media) -> bool {
    let before = target.clone();
    if patch.image.is_some() {
        target.image = patch.image;
    }
    if patch.sound.is_some() {
        target.sound = patch.sound;
    }
    if patch.track.is_some() {
        target.track = patch.track;
    }
    *target != before
}

impl EnrichReport {
    fn warn(&mut self, warning: EnrichWarning) {
        warn!(%warning, "media patch skipped");
        self.warnings.push(warning);
    }
}

impl fmt::Display for EnrichWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLocation(id) => write!(f, "location {id} not found"),
            Self::EmptyLocation(id) => write!(f, "location {id} has no paragraphs"),
            Self::UnknownJump(id) => write!(f, "jump {id} not found"),
            Self::UnknownParam(slot) => write!(f, "param {slot} not found"),
            Self::NonCriticalParamImage(slot) => {
                write!(f, "image for param {slot} but param is not critical")
            }
            Self::MissingParagraph { location, index } => {
                write!(f, "{location}-M{index} is not found in donor quest")
            }
        }
    }
}
