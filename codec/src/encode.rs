//! Binary quest encoding.

use std::collections::BTreeMap;

use bytestream::{ByteWriter, Width};
use layout::{
    encode_header, ConditionTag, Dialect, FieldLayout, FileFlags, FileHeader, FormulaTag, Limits,
    LimitKind, ParamKindTag, Variant,
};
use quest::{Condition, Jump, Location, Media, Param, ParamChange, ParamKind, Quest};
use tracing::debug;

use crate::error::{CodecError, CodecResult};
use crate::media::{resolve_blobs, MediaResolution};
use crate::tags::{critical_to_tags, ending_to_tag};

/// Encodes a quest as a rich Modern-dialect file.
///
/// The output is not byte-identical to whatever the quest was decoded from,
/// but decoding it yields a quest with the same gameplay fingerprint.
pub fn encode(
    quest: &Quest,
    media: &MediaResolution<'_>,
    limits: &Limits,
) -> CodecResult<Vec<u8>> {
    let blobs = resolve_blobs(quest, media);
    write_quest(quest, Dialect::Modern, Variant::Rich, &blobs, limits)
}

/// Writes a quest with an explicit dialect and variant. Text-only output
/// drops media and blobs.
pub(crate) fn write_quest(
    quest: &Quest,
    dialect: Dialect,
    variant: Variant,
    blobs: &BTreeMap<String, Vec<u8>>,
    limits: &Limits,
) -> CodecResult<Vec<u8>> {
    let media = variant.has_media();
    let embed = media && !blobs.is_empty();
    let mut encoder = Encoder {
        writer: ByteWriter::with_capacity(4096),
        layout: dialect.layout(),
        media,
        limits,
    };

    encode_header(
        &FileHeader::new(variant, FileFlags::with_embedded_media(embed)),
        &mut encoder.writer,
    );
    encoder.writer.write_u8(quest.difficulty());
    encoder.count(
        LimitKind::Params,
        encoder.layout.param_count,
        limits.max_params,
        quest.params().len(),
    )?;
    encoder.count(
        LimitKind::Locations,
        encoder.layout.record_count,
        limits.max_locations,
        quest.locations().len(),
    )?;
    encoder.count(
        LimitKind::Jumps,
        encoder.layout.record_count,
        limits.max_jumps,
        quest.jumps().len(),
    )?;
    encoder.text(quest.task_text())?;
    encoder.text(quest.success_text())?;

    for param in quest.params() {
        encoder.param(param)?;
    }
    for location in quest.locations() {
        encoder.location(location)?;
    }
    for jump in quest.jumps() {
        encoder.jump(jump)?;
    }
    if embed {
        encoder.blobs(blobs)?;
    }

    let bytes = encoder.writer.finish();
    debug!(
        ?dialect,
        ?variant,
        params = quest.params().len(),
        locations = quest.locations().len(),
        jumps = quest.jumps().len(),
        blobs = if embed { blobs.len() } else { 0 },
        bytes = bytes.len(),
        "encoded quest"
    );
    Ok(bytes)
}

struct Encoder<'l> {
    writer: ByteWriter,
    layout: &'static FieldLayout,
    media: bool,
    limits: &'l Limits,
}

impl Encoder<'_> {
    fn count(
        &mut self,
        kind: LimitKind,
        width: Width,
        limit: usize,
        count: usize,
    ) -> CodecResult<()> {
        let limit = limit.min(width.max_unsigned() as usize);
        if count > limit {
            return Err(CodecError::limit(kind, limit, count));
        }
        self.writer.write_unsigned(width, count as u32)?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> CodecResult<()> {
        // Every encodable character takes one byte.
        let len = text.chars().count();
        if len > self.limits.max_string_bytes {
            return Err(CodecError::limit(
                LimitKind::StringBytes,
                self.limits.max_string_bytes,
                len,
            ));
        }
        self.writer.write_string(self.layout.string_len, text)?;
        Ok(())
    }

    fn value(&mut self, value: i32) -> CodecResult<()> {
        self.writer.write_signed(self.layout.value, value)?;
        Ok(())
    }

    fn id(&mut self, id: u32) -> CodecResult<()> {
        self.writer.write_unsigned(self.layout.id, id)?;
        Ok(())
    }

    fn media(&mut self, media: &Media) -> CodecResult<()> {
        if !self.media {
            return Ok(());
        }
        for name in [&media.image, &media.sound, &media.track] {
            self.text(name.as_deref().unwrap_or_default())?;
        }
        Ok(())
    }

    fn param(&mut self, param: &Param) -> CodecResult<()> {
        match param.kind {
            ParamKind::Normal => self.writer.write_u8(ParamKindTag::Normal.raw()),
            ParamKind::Critical(spec) => {
                let (boundary, ending) = critical_to_tags(spec);
                self.writer.write_u8(ParamKindTag::Critical.raw());
                self.writer.write_u8(boundary.raw());
                if self.layout.critical_ending {
                    self.writer.write_u8(ending.raw());
                }
            }
        }
        self.writer.write_bool(param.active);
        self.value(param.min)?;
        self.value(param.max)?;
        self.value(param.start)?;
        self.text(&param.name)?;
        self.text(&param.critical_text)?;

        self.count(
            LimitKind::DisplayRanges,
            Width::One,
            usize::MAX,
            param.display.len(),
        )?;
        for range in &param.display {
            self.value(range.from)?;
            self.value(range.to)?;
            self.text(&range.template)?;
        }
        self.media(&param.media)
    }

    fn location(&mut self, location: &Location) -> CodecResult<()> {
        self.id(location.id.raw())?;
        self.writer.write_bool(location.is_start);
        self.writer.write_u8(ending_to_tag(location.ending).raw());

        self.count(
            LimitKind::Paragraphs,
            Width::One,
            self.limits.max_paragraphs,
            location.paragraphs.len(),
        )?;
        for paragraph in &location.paragraphs {
            self.text(&paragraph.text)?;
            self.media(&paragraph.media)?;
        }
        self.changes(&location.changes)
    }

    fn jump(&mut self, jump: &Jump) -> CodecResult<()> {
        self.id(jump.id.raw())?;
        self.id(jump.from.raw())?;
        self.id(jump.to.raw())?;
        self.writer.write_unsigned(self.layout.order, jump.order)?;
        self.writer.write_u16(jump.pass_limit.unwrap_or(0));
        self.writer.write_u8(ending_to_tag(jump.ending).raw());
        self.text(&jump.label)?;
        self.text(&jump.description)?;

        let conditions = &jump.criteria.conditions;
        self.count(LimitKind::Conditions, Width::One, usize::MAX, conditions.len())?;
        for condition in conditions {
            match *condition {
                Condition::InRange { param, lo, hi } => {
                    self.writer.write_u8(ConditionTag::Range.raw());
                    self.writer.write_u16(param.get());
                    self.value(lo)?;
                    self.value(hi)?;
                }
                Condition::Critical { param } => {
                    self.writer.write_u8(ConditionTag::Critical.raw());
                    self.writer.write_u16(param.get());
                }
            }
        }
        self.changes(&jump.changes)?;
        self.media(&jump.media)
    }

    fn changes(&mut self, changes: &[ParamChange]) -> CodecResult<()> {
        for change in changes {
            match *change {
                ParamChange::Delta(n) => {
                    self.writer.write_u8(FormulaTag::Delta.raw());
                    self.value(n)?;
                }
                ParamChange::Percent(p) => {
                    self.writer.write_u8(FormulaTag::Percent.raw());
                    self.value(p)?;
                }
                ParamChange::Random { lo, hi } => {
                    self.writer.write_u8(FormulaTag::Random.raw());
                    self.value(lo)?;
                    self.value(hi)?;
                }
                ParamChange::Set(n) => {
                    self.writer.write_u8(FormulaTag::Set.raw());
                    self.value(n)?;
                }
            }
        }
        Ok(())
    }

    fn blobs(&mut self, blobs: &BTreeMap<String, Vec<u8>>) -> CodecResult<()> {
        self.count(
            LimitKind::MediaBlobs,
            Width::Four,
            self.limits.max_media_blobs,
            blobs.len(),
        )?;
        let total = blobs
            .values()
            .fold(0usize, |total, bytes| total.saturating_add(bytes.len()));
        let limit = self.limits.max_media_bytes.min(u32::MAX as usize);
        if total > limit {
            return Err(CodecError::limit(LimitKind::MediaBytes, limit, total));
        }
        for (name, bytes) in blobs {
            self.text(name)?;
            self.writer.write_u32(bytes.len() as u32);
            self.writer.write_bytes(bytes);
        }
        Ok(())
    }
}
