//! Binary quest decoding.

use std::collections::BTreeMap;

use bytestream::{ByteReader, Width};
use layout::{
    decode_header, BoundaryTag, ConditionTag, CriticalEndingTag, Dialect, EndingTag, FieldLayout,
    FormulaTag, Limits, LimitKind, ParamKindTag,
};
use quest::{
    Condition, Criteria, DisplayRange, IntegrityError, Jump, JumpId, Location, LocationId, Media,
    Paragraph, Param, ParamChange, ParamKind, ParamSlot, Quest, QuestParts,
};
use tracing::debug;

use crate::error::{CodecError, CodecResult, FormatError};
use crate::tags::{critical_from_tags, ending_from_tag};

/// Decodes a quest file.
///
/// The dialect is not recorded in the file; the caller selects it. Decoding
/// is a pure function of `(bytes, dialect, limits)`.
pub fn decode(bytes: &[u8], dialect: Dialect, limits: &Limits) -> CodecResult<Quest> {
    let mut reader = ByteReader::new(bytes);
    let header = decode_header(&mut reader)?;
    let mut decoder = Decoder {
        reader,
        layout: dialect.layout(),
        media: header.variant.has_media(),
        limits,
    };

    let difficulty = decoder.reader.read_u8()?;
    let param_count = decoder.count(
        LimitKind::Params,
        decoder.layout.param_count,
        limits.max_params,
    )?;
    let location_count = decoder.count(
        LimitKind::Locations,
        decoder.layout.record_count,
        limits.max_locations,
    )?;
    let jump_count = decoder.count(
        LimitKind::Jumps,
        decoder.layout.record_count,
        limits.max_jumps,
    )?;
    let task_text = decoder.text()?;
    let success_text = decoder.text()?;

    decoder.ensure_fits(
        LimitKind::Params,
        param_count,
        decoder.layout.min_param(decoder.media),
    )?;
    let params = (0..param_count)
        .map(|index| decoder.param(ParamSlot::from_index(index)))
        .collect::<CodecResult<Vec<_>>>()?;

    decoder.ensure_fits(
        LimitKind::Locations,
        location_count,
        decoder.layout.min_location(param_count),
    )?;
    let locations = (0..location_count)
        .map(|_| decoder.location(param_count))
        .collect::<CodecResult<Vec<_>>>()?;

    decoder.ensure_fits(
        LimitKind::Jumps,
        jump_count,
        decoder.layout.min_jump(param_count, decoder.media),
    )?;
    let jumps = (0..jump_count)
        .map(|_| decoder.jump(param_count))
        .collect::<CodecResult<Vec<_>>>()?;

    let embedded = if header.flags.has_embedded_media() {
        decoder.blobs()?
    } else {
        BTreeMap::new()
    };

    let reader = decoder.reader;
    reader
        .expect_end()
        .map_err(|remaining| FormatError::TrailingData {
            offset: reader.position(),
            remaining,
        })?;

    let quest = Quest::new(QuestParts {
        dialect,
        difficulty,
        task_text,
        success_text,
        params,
        locations,
        jumps,
        embedded,
    })?;

    debug!(
        ?dialect,
        variant = ?header.variant,
        params = param_count,
        locations = location_count,
        jumps = jump_count,
        blobs = quest.embedded().len(),
        bytes = bytes.len(),
        "decoded quest"
    );
    Ok(quest)
}

struct Decoder<'a, 'l> {
    reader: ByteReader<'a>,
    layout: &'static FieldLayout,
    media: bool,
    limits: &'l Limits,
}

impl Decoder<'_, '_> {
    fn count(&mut self, kind: LimitKind, width: Width, limit: usize) -> CodecResult<usize> {
        let count = self.reader.read_unsigned(width)? as usize;
        if count > limit {
            return Err(CodecError::limit(kind, limit, count));
        }
        Ok(count)
    }

    /// Rejects counts whose smallest possible encoding overruns the input.
    fn ensure_fits(&self, kind: LimitKind, count: usize, min_record: usize) -> CodecResult<()> {
        let remaining = self.reader.remaining();
        if count.saturating_mul(min_record) > remaining {
            return Err(FormatError::ImpossibleCount {
                kind,
                count,
                remaining,
            }
            .into());
        }
        Ok(())
    }

    fn text(&mut self) -> CodecResult<String> {
        let width = self.layout.string_len;
        let len = self.reader.clone().read_unsigned(width)? as usize;
        if len > self.limits.max_string_bytes {
            return Err(CodecError::limit(
                LimitKind::StringBytes,
                self.limits.max_string_bytes,
                len,
            ));
        }
        Ok(self.reader.read_string(width)?)
    }

    fn value(&mut self) -> CodecResult<i32> {
        Ok(self.reader.read_signed(self.layout.value)?)
    }

    fn id(&mut self) -> CodecResult<u32> {
        Ok(self.reader.read_unsigned(self.layout.id)?)
    }

    /// Reads a one-byte count for a nested list.
    fn small_count(
        &mut self,
        kind: LimitKind,
        limit: usize,
        min_record: usize,
    ) -> CodecResult<usize> {
        let count = self.count(kind, Width::One, limit)?;
        self.ensure_fits(kind, count, min_record)?;
        Ok(count)
    }

    fn media(&mut self) -> CodecResult<Media> {
        if !self.media {
            return Ok(Media::default());
        }
        Ok(Media {
            image: non_empty(self.text()?),
            sound: non_empty(self.text()?),
            track: non_empty(self.text()?),
        })
    }

    fn param(&mut self, slot: ParamSlot) -> CodecResult<Param> {
        let kind = match ParamKindTag::parse(self.reader.read_u8()?)? {
            ParamKindTag::Normal => ParamKind::Normal,
            ParamKindTag::Critical => {
                let boundary = BoundaryTag::parse(self.reader.read_u8()?)?;
                let ending = if self.layout.critical_ending {
                    Some(CriticalEndingTag::parse(self.reader.read_u8()?)?)
                } else {
                    None
                };
                ParamKind::Critical(critical_from_tags(boundary, ending))
            }
        };
        let active = self.reader.read_bool()?;
        let min = self.value()?;
        let max = self.value()?;
        let start = self.value()?;
        let name = self.text()?;
        let critical_text = self.text()?;

        let min_range = 2 * self.layout.value.bytes() + self.layout.min_string();
        let range_count = self.small_count(LimitKind::DisplayRanges, usize::MAX, min_range)?;
        let mut display = Vec::with_capacity(range_count);
        for _ in 0..range_count {
            display.push(DisplayRange {
                from: self.value()?,
                to: self.value()?,
                template: self.text()?,
            });
        }
        let media = self.media()?;

        Ok(Param {
            slot,
            name,
            kind,
            active,
            min,
            max,
            start,
            critical_text,
            display,
            media,
        })
    }

    fn location(&mut self, params: usize) -> CodecResult<Location> {
        let id = LocationId::new(self.id()?);
        let is_start = self.reader.read_bool()?;
        let ending = ending_from_tag(EndingTag::parse(self.reader.read_u8()?)?);

        let mut min_paragraph = self.layout.min_string();
        if self.media {
            min_paragraph += self.layout.min_media();
        }
        let paragraph_count = self.small_count(
            LimitKind::Paragraphs,
            self.limits.max_paragraphs,
            min_paragraph,
        )?;
        let mut paragraphs = Vec::with_capacity(paragraph_count);
        for _ in 0..paragraph_count {
            paragraphs.push(Paragraph {
                text: self.text()?,
                media: self.media()?,
            });
        }
        let changes = self.changes(params)?;

        Ok(Location {
            id,
            is_start,
            ending,
            paragraphs,
            changes,
        })
    }

    fn jump(&mut self, params: usize) -> CodecResult<Jump> {
        let id = JumpId::new(self.id()?);
        let from = LocationId::new(self.id()?);
        let to = LocationId::new(self.id()?);
        let order = self.reader.read_unsigned(self.layout.order)?;
        let pass_limit = match self.reader.read_u16()? {
            0 => None,
            limit => Some(limit),
        };
        let ending = ending_from_tag(EndingTag::parse(self.reader.read_u8()?)?);
        let label = self.text()?;
        let description = self.text()?;

        let condition_count = self.small_count(LimitKind::Conditions, usize::MAX, 1 + 2)?;
        let mut conditions = Vec::with_capacity(condition_count);
        for _ in 0..condition_count {
            conditions.push(self.condition(id)?);
        }
        let changes = self.changes(params)?;
        let media = self.media()?;

        Ok(Jump {
            id,
            from,
            to,
            order,
            label,
            description,
            media,
            criteria: Criteria { conditions },
            changes,
            ending,
            pass_limit,
        })
    }

    fn condition(&mut self, jump: JumpId) -> CodecResult<Condition> {
        let tag = ConditionTag::parse(self.reader.read_u8()?)?;
        let raw = self.reader.read_u16()?;
        let param = ParamSlot::new(raw).ok_or(CodecError::Integrity(
            IntegrityError::UnknownParamSlot { jump, slot: raw },
        ))?;
        Ok(match tag {
            ConditionTag::Range => Condition::InRange {
                param,
                lo: self.value()?,
                hi: self.value()?,
            },
            ConditionTag::Critical => Condition::Critical { param },
        })
    }

    fn changes(&mut self, params: usize) -> CodecResult<Vec<ParamChange>> {
        (0..params).map(|_| self.change()).collect()
    }

    fn change(&mut self) -> CodecResult<ParamChange> {
        Ok(match FormulaTag::parse(self.reader.read_u8()?)? {
            FormulaTag::Delta => ParamChange::Delta(self.value()?),
            FormulaTag::Percent => ParamChange::Percent(self.value()?),
            FormulaTag::Random => ParamChange::Random {
                lo: self.value()?,
                hi: self.value()?,
            },
            FormulaTag::Set => ParamChange::Set(self.value()?),
        })
    }

    fn blobs(&mut self) -> CodecResult<BTreeMap<String, Vec<u8>>> {
        let count = self.count(
            LimitKind::MediaBlobs,
            Width::Four,
            self.limits.max_media_blobs,
        )?;
        self.ensure_fits(LimitKind::MediaBlobs, count, self.layout.min_string() + 4)?;

        let mut blobs = BTreeMap::new();
        let mut total = 0usize;
        for _ in 0..count {
            let name = self.text()?;
            let len = self.reader.read_u32()? as usize;
            total = total.saturating_add(len);
            if total > self.limits.max_media_bytes {
                return Err(CodecError::limit(
                    LimitKind::MediaBytes,
                    self.limits.max_media_bytes,
                    total,
                ));
            }
            let bytes = self.reader.read_bytes(len)?.to_vec();
            if blobs.contains_key(&name) {
                return Err(FormatError::DuplicateBlob { name }.into());
            }
            blobs.insert(name, bytes);
        }
        Ok(blobs)
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
