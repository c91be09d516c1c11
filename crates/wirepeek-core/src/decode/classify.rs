//! Classification of length-delimited payloads.

use super::{Decoder, FieldRecord, FieldValue};
use std::ops::Range;
use tracing::trace;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Whether `c` renders as visible text.
///
/// Control, format, private-use, surrogate and unassigned code points are
/// rejected, as are all separators except the ASCII space.
pub fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }

    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

/// Returns the payload as a string if it is valid, printable UTF-8.
pub fn printable_text(bytes: &[u8], allow_empty: bool) -> Option<String> {
    if bytes.is_empty() && !allow_empty {
        return None;
    }

    std::str::from_utf8(bytes)
        .ok()
        .filter(|text| text.chars().all(is_printable))
        .map(str::to_owned)
}

impl Decoder {
    /// Classify the payload at `range` of `buf`, found at nesting `depth`.
    pub(crate) fn classify(&self, buf: &[u8], range: Range<usize>, depth: usize) -> FieldValue {
        let bytes = &buf[range.clone()];

        printable_text(bytes, self.config.allow_empty_text)
            .map(FieldValue::Text)
            .or_else(|| self.try_nested(buf, range, depth).map(FieldValue::Nested))
            .unwrap_or_else(|| FieldValue::Opaque(bytes.to_vec()))
    }

    fn try_nested(&self, buf: &[u8], range: Range<usize>, depth: usize) -> Option<Vec<FieldRecord>> {
        if range.len() < self.config.min_nested_len {
            return None;
        }

        let start = range.start;
        match self.walk_range(buf, range, depth + 1) {
            Ok(fields) => Some(fields),
            Err(e) => {
                trace!("Payload at {} is not a message: {}", start, e);
                None
            }
        }
    }
}
