//! Decoding of a single field occurrence.

use super::{Decoder, FieldRecord, FieldValue};
use crate::error::{Error, Result};
use crate::wire::{decode_varint, is_terminated, Tag, WireType};
use std::ops::Range;
use tracing::trace;

impl Decoder {
    /// Decode one field starting at `offset`.
    ///
    /// Returns the record and the offset just past it, or `Ok(None)` when
    /// there are no more fields: either `offset` is at the end of `buf` or
    /// the tag itself runs off the end. Truncated values are reported as
    /// [`Error::Truncated`] for this field only.
    ///
    /// `depth` is the nesting level of `buf`; length-delimited values are
    /// tried as messages one level deeper.
    pub fn decode_field(
        &self,
        buf: &[u8],
        offset: usize,
        depth: usize,
    ) -> Result<Option<(FieldRecord, usize)>> {
        if offset >= buf.len() {
            return Ok(None);
        }

        let (raw_tag, value_start) = decode_varint(buf, offset);
        if !is_terminated(buf, offset, value_start) {
            trace!("Tag at offset {} runs past end of input", offset);
            return Ok(None);
        }

        let tag = Tag::from_raw(raw_tag);
        let (value, end) = match tag.wire_type {
            WireType::Varint => {
                let (value, end) = decode_varint(buf, value_start);
                (FieldValue::Integer(value), end)
            }
            WireType::Fixed64 | WireType::Fixed32 => {
                let width = tag.wire_type.fixed_width().unwrap_or(0);
                let range = take(buf, value_start, value_start, width as u64, tag)?;
                let end = range.end;
                (FieldValue::Integer(read_le(&buf[range])), end)
            }
            WireType::LengthDelimited => {
                let (length, data_start) = decode_varint(buf, value_start);
                let range = take(buf, value_start, data_start, length, tag)?;
                let end = range.end;
                (self.classify(buf, range, depth), end)
            }
            WireType::StartGroup | WireType::EndGroup | WireType::Reserved(_) => {
                (FieldValue::Unknown, value_start)
            }
        };

        trace!(
            "Field {} ({}) at {}..{}: {}",
            tag.field_number,
            tag.wire_type,
            offset,
            end,
            value.kind()
        );

        let record = FieldRecord {
            field_number: tag.field_number,
            wire_type: tag.wire_type,
            value,
            byte_range: offset..end,
        };

        Ok(Some((record, end)))
    }
}

/// Claim `len` bytes starting at `start`, or report truncation at `value_offset`.
fn take(buf: &[u8], value_offset: usize, start: usize, len: u64, tag: Tag) -> Result<Range<usize>> {
    let available = buf.len().saturating_sub(start);

    match usize::try_from(len) {
        Ok(len) if len <= available => Ok(start..start + len),
        _ => Err(Error::truncated(
            value_offset,
            tag.field_number,
            tag.wire_type,
            len,
            available,
        )),
    }
}

/// Interpret up to eight bytes as an unsigned little-endian integer
fn read_le(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(word)
}
