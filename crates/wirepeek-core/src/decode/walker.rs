//! Walking a buffer field by field.

use super::{Decoder, FieldRecord, Walk, WalkOutcome};
use crate::error::{Error, Result};
use std::ops::Range;
use tracing::{debug, trace};

impl Decoder {
    /// Decode every top-level field in `buf`.
    ///
    /// The walk stops at the first field that fails to decode. Fields decoded
    /// before it are kept, and the failure is reported in [`Walk::outcome`].
    pub fn walk(&self, buf: &[u8]) -> Walk {
        debug!("Starting walk of {} bytes", buf.len());

        let mut fields = Vec::new();
        let mut position = 0;

        let outcome = loop {
            match self.decode_field(buf, position, 0) {
                Ok(Some((record, next))) => {
                    fields.push(record);
                    position = next;
                }
                Ok(None) => {
                    if position < buf.len() {
                        trace!("Ignoring unterminated tag at offset {}", position);
                    }
                    break WalkOutcome::Exhausted;
                }
                Err(error) => {
                    debug!(
                        "Walk stopped at offset {} after {} fields: {}",
                        position,
                        fields.len(),
                        error
                    );
                    break WalkOutcome::Errored {
                        offset: position,
                        error,
                    };
                }
            }
        };

        debug!("Walk complete: {} top-level fields", fields.len());

        Walk {
            fields,
            outcome,
            input_len: buf.len(),
        }
    }

    /// Decode `bytes` as an embedded message at nesting level `depth`.
    ///
    /// Succeeds only if every byte is consumed and at least one field is
    /// found; no partial result is returned.
    pub fn walk_nested(&self, bytes: &[u8], depth: usize) -> Result<Vec<FieldRecord>> {
        self.walk_range(bytes, 0..bytes.len(), depth)
    }

    /// Nested walk over `range` of `buf`, keeping offsets relative to `buf`.
    pub(crate) fn walk_range(
        &self,
        buf: &[u8],
        range: Range<usize>,
        depth: usize,
    ) -> Result<Vec<FieldRecord>> {
        if depth > self.config.max_depth {
            return Err(Error::depth_exceeded(depth, self.config.max_depth));
        }

        // Fields may not read past the end of the payload
        let window = &buf[..range.end];
        let mut fields = Vec::new();
        let mut position = range.start;

        while let Some((record, next)) = self.decode_field(window, position, depth)? {
            fields.push(record);
            position = next;
        }

        if position < range.end {
            return Err(Error::UnterminatedTag { offset: position });
        }
        if fields.is_empty() {
            return Err(Error::EmptyMessage { len: range.len() });
        }

        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecoderConfig, FieldValue, WireType};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn varint_record(field_number: u64, value: u64, byte_range: Range<usize>) -> FieldRecord {
        FieldRecord {
            field_number,
            wire_type: WireType::Varint,
            value: FieldValue::Integer(value),
            byte_range,
        }
    }

    #[test]
    fn test_walk_empty() {
        let walk = Decoder::new().walk(&[]);
        assert!(walk.is_complete());
        assert_eq!(walk.fields_parsed(), 0);
    }

    #[test]
    fn test_walk_single_varint() {
        let walk = Decoder::new().walk(&[0x08, 0x01]);
        assert!(walk.is_complete());
        assert_eq!(walk.fields, vec![varint_record(1, 1, 0..2)]);
    }

    #[test]
    fn test_walk_multiple_fields() {
        // 1: 150, 2: "hi", 3: fixed32 1
        let data = [
            0x08, 0x96, 0x01, 0x12, 0x02, b'h', b'i', 0x1D, 0x01, 0x00, 0x00, 0x00,
        ];
        let walk = Decoder::new().walk(&data);
        assert!(walk.is_complete());
        assert_eq!(walk.fields_parsed(), 3);
        assert_eq!(walk.fields[0], varint_record(1, 150, 0..3));
        assert_eq!(walk.fields[1].value, FieldValue::Text("hi".to_string()));
        assert_eq!(walk.fields[1].byte_range, 3..7);
        assert_eq!(walk.fields[2].value, FieldValue::Integer(1));
        assert_eq!(walk.fields[2].byte_range, 7..12);
    }

    #[test]
    fn test_walk_truncated_first_field() {
        let walk = Decoder::new().walk(&[0x0A, 0x05, b'h', b'i']);
        assert_eq!(walk.fields_parsed(), 0);
        let (offset, error) = walk.error().unwrap();
        assert_eq!(offset, 0);
        assert!(matches!(error, Error::Truncated { .. }));
    }

    #[test]
    fn test_walk_truncated_keeps_prefix() {
        let walk = Decoder::new().walk(&[0x08, 0x01, 0x10, 0x02, 0x1A, 0x09, 0x00]);
        assert!(!walk.is_complete());
        assert_eq!(
            walk.fields,
            vec![varint_record(1, 1, 0..2), varint_record(2, 2, 2..4)]
        );
        assert_eq!(walk.error().map(|(offset, _)| offset), Some(4));
    }

    #[test]
    fn test_walk_trailing_unterminated_tag() {
        let walk = Decoder::new().walk(&[0x08, 0x01, 0x80]);
        assert!(walk.is_complete());
        assert_eq!(walk.fields_parsed(), 1);
    }

    #[test]
    fn test_walk_nested_message() {
        // 2: { 1: 1 }
        let data = [0x12, 0x02, 0x08, 0x01];
        let walk = Decoder::new().walk(&data);
        assert!(walk.is_complete());
        assert_eq!(walk.fields.len(), 1);
        assert_eq!(walk.fields[0].byte_range, 0..4);
        assert_eq!(walk.fields[0].children(), &[varint_record(1, 1, 2..4)]);
    }

    #[test]
    fn test_walk_deeply_nested_offsets() {
        // 1: { 2: { 3: 7 } }
        let data = [0x0A, 0x04, 0x12, 0x02, 0x18, 0x07];
        let walk = Decoder::new().walk(&data);
        let outer = &walk.fields[0];
        let middle = &outer.children()[0];
        let inner = &middle.children()[0];
        assert_eq!(middle.byte_range, 2..6);
        assert_eq!(*inner, varint_record(3, 7, 4..6));
    }

    #[test]
    fn test_walk_nested_fallback_is_opaque() {
        // Payload starts like a field but declares more bytes than it has
        let data = [0x0A, 0x03, 0x0A, 0x05, 0x01];
        let walk = Decoder::new().walk(&data);
        assert!(walk.is_complete());
        assert_eq!(walk.fields[0].value, FieldValue::Opaque(vec![0x0A, 0x05, 0x01]));
    }

    #[test]
    fn test_walk_nested_rejects_trailing_partial_tag() {
        let decoder = Decoder::new();
        assert!(matches!(
            decoder.walk_nested(&[0x08, 0x01, 0x80], 1),
            Err(Error::UnterminatedTag { offset: 2 })
        ));
        assert!(matches!(
            decoder.walk_nested(&[], 1),
            Err(Error::EmptyMessage { len: 0 })
        ));
    }

    #[test]
    fn test_walk_depth_limit() {
        // 1: { 1: { 1: 5 } }
        let data = [0x0A, 0x04, 0x0A, 0x02, 0x08, 0x05];

        let walk = Decoder::new().walk(&data);
        assert_eq!(walk.fields[0].children()[0].children().len(), 1);

        let shallow = Decoder::with_config(DecoderConfig::new().max_depth(1));
        let walk = shallow.walk(&data);
        let middle = &walk.fields[0].children()[0];
        assert_eq!(middle.value, FieldValue::Opaque(vec![0x08, 0x05]));
    }

    #[test]
    fn test_walk_adversarial_nesting() {
        // Two hundred levels of `1: { ... }` around a single varint
        let mut data = vec![0x08, 0x01];
        for _ in 0..200 {
            let mut outer = vec![0x0A];
            crate::wire::encode_varint(data.len() as u64, &mut outer);
            outer.extend_from_slice(&data);
            data = outer;
        }

        let walk = Decoder::new().walk(&data);
        assert!(walk.is_complete());

        let mut depth = 0;
        let mut record = &walk.fields[0];
        while let [child] = record.children() {
            record = child;
            depth += 1;
        }
        assert_eq!(depth, crate::DEFAULT_MAX_DEPTH);
        assert!(matches!(record.value, FieldValue::Opaque(_)));
    }

    #[test]
    fn test_walk_is_idempotent() {
        let data = [0x0A, 0x04, 0x12, 0x02, 0x18, 0x07, 0x10, 0xFF, 0x01];
        let decoder = Decoder::new();
        assert_eq!(decoder.walk(&data).fields, decoder.walk(&data).fields);
    }

    proptest! {
        #[test]
        fn walk_never_panics_and_stays_in_bounds(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let walk = Decoder::new().walk(&data);
            let mut last_end = 0;
            for record in &walk.fields {
                prop_assert_eq!(record.byte_range.start, last_end);
                prop_assert!(record.byte_range.end <= data.len());
                last_end = record.byte_range.end;
            }
            if let Some((offset, _)) = walk.error() {
                prop_assert_eq!(offset, last_end);
            }
        }

        #[test]
        fn walk_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..128)) {
            let decoder = Decoder::new();
            prop_assert_eq!(decoder.walk(&data).fields, decoder.walk(&data).fields);
        }
    }
}
