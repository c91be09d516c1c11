//! Re-encoding of decoded records.
//!
//! Records are written back with the tag and wire type they were read with.
//! For input that uses minimal varints this reproduces the original bytes.

use crate::decode::{FieldRecord, FieldValue};
use crate::wire::{encode_varint, WireType};
use bytes::{BufMut, BytesMut};

/// Encode a single record into `buf`
pub fn encode_record(record: &FieldRecord, buf: &mut impl BufMut) {
    encode_varint(record.tag().to_raw(), buf);

    match &record.value {
        FieldValue::Integer(value) => match record.wire_type {
            WireType::Fixed64 => buf.put_u64_le(*value),
            WireType::Fixed32 => buf.put_u32_le(*value as u32),
            _ => encode_varint(*value, buf),
        },
        FieldValue::Text(text) => put_length_delimited(text.as_bytes(), buf),
        FieldValue::Opaque(bytes) => put_length_delimited(bytes, buf),
        FieldValue::Nested(children) => put_length_delimited(&encode_records(children), buf),
        FieldValue::Unknown => {}
    }
}

/// Encode a sequence of records back to back
pub fn encode_records(records: &[FieldRecord]) -> Vec<u8> {
    let mut buf = BytesMut::new();
    for record in records {
        encode_record(record, &mut buf);
    }
    buf.to_vec()
}

fn put_length_delimited(bytes: &[u8], buf: &mut impl BufMut) {
    encode_varint(bytes.len() as u64, buf);
    buf.put_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Decoder;
    use pretty_assertions::assert_eq;
    use prost::Message;
    use prost_types::{
        DescriptorProto, FieldDescriptorProto, FileDescriptorProto, Timestamp,
    };
    use proptest::prelude::*;

    fn assert_leaves_round_trip(data: &[u8], records: &[FieldRecord]) {
        for record in records {
            let mut buf = Vec::new();
            encode_record(record, &mut buf);
            assert_eq!(buf, &data[record.byte_range.clone()]);
            assert_leaves_round_trip(data, record.children());
        }
    }

    #[test]
    fn test_round_trip_timestamp() {
        let data = Timestamp {
            seconds: 1_700_000_000,
            nanos: 500,
        }
        .encode_to_vec();

        let walk = Decoder::new().walk(&data);
        assert!(walk.is_complete());
        assert_eq!(walk.fields[0].value, FieldValue::Integer(1_700_000_000));
        assert_eq!(walk.fields[1].value, FieldValue::Integer(500));
        assert_eq!(encode_records(&walk.fields), data);
    }

    #[test]
    fn test_round_trip_negative_int32() {
        // Negative int32 values are sign-extended to ten varint bytes
        let data = Timestamp {
            seconds: 0,
            nanos: -1,
        }
        .encode_to_vec();

        let walk = Decoder::new().walk(&data);
        assert_eq!(walk.fields[0].value, FieldValue::Integer(u64::MAX));
        assert_eq!(encode_records(&walk.fields), data);
    }

    #[test]
    fn test_round_trip_file_descriptor() {
        let file = FileDescriptorProto {
            name: Some("shopping/list.proto".to_string()),
            package: Some("shopping".to_string()),
            message_type: vec![DescriptorProto {
                name: Some("ListItem".to_string()),
                field: vec![
                    FieldDescriptorProto {
                        name: Some("identifier".to_string()),
                        number: Some(1),
                        label: Some(1),
                        r#type: Some(9),
                        ..Default::default()
                    },
                    FieldDescriptorProto {
                        name: Some("quantity".to_string()),
                        number: Some(2),
                        label: Some(1),
                        r#type: Some(5),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }],
            syntax: Some("proto3".to_string()),
            ..Default::default()
        };
        let data = file.encode_to_vec();

        let walk = Decoder::new().walk(&data);
        assert!(walk.is_complete());
        assert_eq!(
            walk.fields[0].value,
            FieldValue::Text("shopping/list.proto".to_string())
        );
        assert!(matches!(walk.fields[2].value, FieldValue::Nested(_)));

        assert_eq!(encode_records(&walk.fields), data);
        assert_leaves_round_trip(&data, &walk.fields);
    }

    #[test]
    fn test_round_trip_opaque_and_groups() {
        // 1: <ff fe>, 2: start-group, 2: end-group, 3: fixed32
        let data = [0x0A, 0x02, 0xFF, 0xFE, 0x13, 0x14, 0x1D, 0x78, 0x56, 0x34, 0x12];
        let walk = Decoder::new().walk(&data);
        assert!(walk.is_complete());
        assert_eq!(encode_records(&walk.fields), data);
        assert_leaves_round_trip(&data, &walk.fields);
    }

    fn scalar_field() -> impl Strategy<Value = (u64, u8, u64)> {
        (1u64..=0x1FFF_FFFF, prop_oneof![Just(0u8), Just(1u8), Just(5u8)], any::<u64>())
    }

    proptest! {
        #[test]
        fn scalar_fields_round_trip(fields in proptest::collection::vec(scalar_field(), 1..16)) {
            let mut data = Vec::new();
            for &(field_number, wire_type, value) in &fields {
                encode_varint((field_number << 3) | u64::from(wire_type), &mut data);
                match wire_type {
                    1 => data.put_u64_le(value),
                    5 => data.put_u32_le(value as u32),
                    _ => encode_varint(value, &mut data),
                }
            }

            let walk = Decoder::new().walk(&data);
            prop_assert!(walk.is_complete());
            prop_assert_eq!(walk.fields_parsed(), fields.len());
            prop_assert_eq!(encode_records(&walk.fields), data);
        }
    }
}
