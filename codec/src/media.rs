//! Media references and the asset resolver seam.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use quest::Quest;
use tracing::trace;

/// Supplies media bytes by reference name.
///
/// The codec never touches the filesystem; callers that want blobs embedded
/// pass a resolver to [`encode`](crate::encode).
pub trait AssetResolver {
    /// Returns the bytes for `name`, or `None` if the asset is absent.
    fn resolve(&self, name: &str) -> Option<Vec<u8>>;
}

impl AssetResolver for BTreeMap<String, Vec<u8>> {
    fn resolve(&self, name: &str) -> Option<Vec<u8>> {
        self.get(name).cloned()
    }
}

impl AssetResolver for HashMap<String, Vec<u8>> {
    fn resolve(&self, name: &str) -> Option<Vec<u8>> {
        self.get(name).cloned()
    }
}

/// How the encoder treats media references.
#[derive(Clone, Copy, Default)]
pub enum MediaResolution<'a> {
    /// Write name-only references.
    #[default]
    References,
    /// Offer every referenced name to the resolver and embed what it returns.
    Embed(&'a dyn AssetResolver),
}

impl fmt::Debug for MediaResolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::References => write!(f, "References"),
            Self::Embed(_) => write!(f, "Embed(..)"),
        }
    }
}

/// Returns every distinct media name the quest references, sorted.
#[must_use]
pub fn referenced_media(quest: &Quest) -> BTreeSet<&str> {
    let params = quest.params().iter().map(|param| &param.media);
    let paragraphs = quest
        .locations()
        .iter()
        .flat_map(|location| location.paragraphs.iter().map(|paragraph| &paragraph.media));
    let jumps = quest.jumps().iter().map(|jump| &jump.media);
    params
        .chain(paragraphs)
        .chain(jumps)
        .flat_map(quest::Media::names)
        .collect()
}

/// Collects the blob table for an encode: blobs already carried by the
/// quest, plus whatever the resolver supplies for the remaining names.
pub(crate) fn resolve_blobs(
    quest: &Quest,
    resolution: &MediaResolution<'_>,
) -> BTreeMap<String, Vec<u8>> {
    let mut blobs = quest.embedded().clone();
    if let MediaResolution::Embed(resolver) = resolution {
        for name in referenced_media(quest) {
            if blobs.contains_key(name) {
                continue;
            }
            match resolver.resolve(name) {
                Some(bytes) => {
                    trace!(name, len = bytes.len(), "resolved media");
                    blobs.insert(name.to_owned(), bytes);
                }
                None => trace!(name, "media not supplied"),
            }
        }
    }
    blobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest::{
        Ending, Jump, JumpId, Location, LocationId, Media, Paragraph, Param, ParamSlot,
        QuestBuilder,
    };

    fn illustrated() -> Quest {
        let mut dock = Location::new(LocationId::new(1)).start();
        dock.paragraphs.push(Paragraph {
            text: "Dock".into(),
            media: Media {
                image: Some("dock".into()),
                sound: Some("gulls".into()),
                track: None,
            },
        });
        let mut sail = Jump::new(JumpId::new(1), LocationId::new(1), LocationId::new(2));
        sail.media = Media::image("boat");
        let mut fuel = Param::new(ParamSlot::new(1).unwrap(), "Fuel", 0, 10, 5);
        fuel.media = Media::image("dock");
        QuestBuilder::new()
            .param(fuel)
            .location(dock)
            .location(Location::new(LocationId::new(2)).ending(Ending::Success))
            .jump(sail)
            .embed("boat", vec![9])
            .build()
            .unwrap()
    }

    #[test]
    fn referenced_media_is_distinct_and_sorted() {
        let quest = illustrated();
        let names: Vec<_> = referenced_media(&quest).into_iter().collect();
        assert_eq!(names, vec!["boat", "dock", "gulls"]);
    }

    #[test]
    fn references_keep_existing_blobs_only() {
        let quest = illustrated();
        let blobs = resolve_blobs(&quest, &MediaResolution::References);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs["boat"], vec![9]);
    }

    #[test]
    fn embed_offers_missing_names() {
        let quest = illustrated();
        let mut assets = HashMap::new();
        assets.insert("dock".to_string(), vec![1, 2]);
        assets.insert("boat".to_string(), vec![7, 7, 7]);
        let blobs = resolve_blobs(&quest, &MediaResolution::Embed(&assets));
        assert_eq!(blobs["dock"], vec![1, 2]);
        // Carried blobs win over the resolver.
        assert_eq!(blobs["boat"], vec![9]);
        assert!(!blobs.contains_key("gulls"));
    }
}
