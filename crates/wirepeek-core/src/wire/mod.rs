//! Low-level protobuf wire format primitives.
//!
//! ## Wire Format Overview
//!
//! Each field is encoded as:
//! - A varint "tag" containing the field number and wire type
//! - The field data (format depends on wire type)
//!
//! Wire types:
//! - 0: VARINT (int32, int64, uint32, uint64, sint32, sint64, bool, enum)
//! - 1: I64 (fixed64, sfixed64, double)
//! - 2: LEN (string, bytes, embedded messages, packed repeated fields)
//! - 3, 4: SGROUP / EGROUP (deprecated)
//! - 5: I32 (fixed32, sfixed32, float)

mod varint;

use std::fmt;

pub use varint::{decode_varint, encode_varint, encoded_len_varint, is_terminated};

/// Protobuf wire types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    /// Variable-length integer
    Varint,
    /// 64-bit fixed-width
    Fixed64,
    /// Length-delimited (strings, bytes, embedded messages)
    LengthDelimited,
    /// Start group (deprecated)
    StartGroup,
    /// End group (deprecated)
    EndGroup,
    /// 32-bit fixed-width
    Fixed32,
    /// Bit patterns 6 and 7, which no encoder emits
    Reserved(u8),
}

impl WireType {
    /// Builds a wire type from the low three bits of `bits`.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => WireType::Varint,
            1 => WireType::Fixed64,
            2 => WireType::LengthDelimited,
            3 => WireType::StartGroup,
            4 => WireType::EndGroup,
            5 => WireType::Fixed32,
            other => WireType::Reserved(other),
        }
    }

    /// The three-bit value stored in a tag
    pub fn bits(self) -> u8 {
        match self {
            WireType::Varint => 0,
            WireType::Fixed64 => 1,
            WireType::LengthDelimited => 2,
            WireType::StartGroup => 3,
            WireType::EndGroup => 4,
            WireType::Fixed32 => 5,
            WireType::Reserved(bits) => bits & 0x07,
        }
    }

    /// Label used when rendering fields
    pub fn name(self) -> &'static str {
        match self {
            WireType::Varint => "varint",
            WireType::Fixed64 => "64-bit",
            WireType::LengthDelimited => "length-delimited",
            WireType::StartGroup => "start-group",
            WireType::EndGroup => "end-group",
            WireType::Fixed32 => "32-bit",
            WireType::Reserved(_) => "unknown",
        }
    }

    /// Width in bytes of fixed-width values
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            WireType::Fixed64 => Some(8),
            WireType::Fixed32 => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded field tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    /// Field number (`tag >> 3`); zero and oversized numbers are kept as-is
    pub field_number: u64,
    /// Wire type (`tag & 0b111`)
    pub wire_type: WireType,
}

impl Tag {
    /// Creates a tag from its parts
    pub fn new(field_number: u64, wire_type: WireType) -> Self {
        Self {
            field_number,
            wire_type,
        }
    }

    /// Splits a raw tag varint into field number and wire type
    pub fn from_raw(raw: u64) -> Self {
        Self {
            field_number: raw >> 3,
            wire_type: WireType::from_bits((raw & 0x07) as u8),
        }
    }

    /// Recombines the tag into its varint value
    pub fn to_raw(self) -> u64 {
        (self.field_number << 3) | u64::from(self.wire_type.bits())
    }
}
