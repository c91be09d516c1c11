//! Schema-less structural decoding.
//!
//! A [`Decoder`] walks a buffer field by field, turning each tag and value
//! into a [`FieldRecord`]. Length-delimited values have no declared type, so
//! they are classified by an ordered policy:
//!
//! 1. printable UTF-8 text becomes [`FieldValue::Text`]
//! 2. bytes that decode completely as further fields become [`FieldValue::Nested`]
//! 3. anything else is kept verbatim as [`FieldValue::Opaque`]
//!
//! ## Example
//!
//! ```
//! use wirepeek_core::{Decoder, FieldValue};
//!
//! // Field 1, varint 150
//! let walk = Decoder::new().walk(&[0x08, 0x96, 0x01]);
//! assert!(walk.is_complete());
//! assert_eq!(walk.fields[0].field_number, 1);
//! assert_eq!(walk.fields[0].value, FieldValue::Integer(150));
//! ```

mod classify;
mod field;
mod walker;

use crate::error::Error;
use crate::wire::{Tag, WireType};
use std::ops::Range;

pub use classify::{is_printable, printable_text};

/// Default limit on nested-message recursion
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Decoded value of a single field occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Varint, fixed64 or fixed32 value read as unsigned little-endian
    Integer(u64),
    /// Length-delimited bytes that are printable UTF-8
    Text(String),
    /// Length-delimited bytes that decode as a sequence of fields
    Nested(Vec<FieldRecord>),
    /// Length-delimited bytes that are neither text nor a message
    Opaque(Vec<u8>),
    /// Group markers and reserved wire types
    Unknown,
}

impl FieldValue {
    /// Short name of the variant, used in logs and statistics
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Integer(_) => "integer",
            FieldValue::Text(_) => "text",
            FieldValue::Nested(_) => "nested",
            FieldValue::Opaque(_) => "opaque",
            FieldValue::Unknown => "unknown",
        }
    }
}

/// One decoded field occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    /// Field number from the tag
    pub field_number: u64,
    /// Wire type from the tag
    pub wire_type: WireType,
    /// Decoded value
    pub value: FieldValue,
    /// Bytes covered by this field, tag included
    pub byte_range: Range<usize>,
}

impl FieldRecord {
    /// The tag this record was decoded from
    pub fn tag(&self) -> Tag {
        Tag::new(self.field_number, self.wire_type)
    }

    /// Child records when the value is a nested message
    pub fn children(&self) -> &[FieldRecord] {
        match &self.value {
            FieldValue::Nested(children) => children,
            _ => &[],
        }
    }

    /// Total number of bytes covered by this field
    pub fn encoded_len(&self) -> usize {
        self.byte_range.len()
    }
}

/// How a top-level walk ended
#[derive(Debug)]
pub enum WalkOutcome {
    /// Every byte was consumed, or the input ended inside a tag
    Exhausted,
    /// A field failed to decode; fields before it are still reported
    Errored {
        /// Offset of the tag of the field that failed
        offset: usize,
        /// What went wrong
        error: Error,
    },
}

/// Result of walking a complete buffer
#[derive(Debug)]
pub struct Walk {
    /// Top-level fields in buffer order
    pub fields: Vec<FieldRecord>,
    /// Terminal state of the walk
    pub outcome: WalkOutcome,
    /// Length of the walked buffer
    pub input_len: usize,
}

impl Walk {
    /// Number of top-level fields successfully decoded
    pub fn fields_parsed(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the walk reached the end of the buffer
    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, WalkOutcome::Exhausted)
    }

    /// The error that stopped the walk, if any
    pub fn error(&self) -> Option<(usize, &Error)> {
        match &self.outcome {
            WalkOutcome::Exhausted => None,
            WalkOutcome::Errored { offset, error } => Some((*offset, error)),
        }
    }
}

/// Configuration for the decoder
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Deepest nested message that will be attempted
    pub max_depth: usize,
    /// Shortest length-delimited value that is tried as a nested message
    pub min_nested_len: usize,
    /// Whether a zero-length value counts as text
    pub allow_empty_text: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            min_nested_len: 2,
            allow_empty_text: false,
        }
    }
}

impl DecoderConfig {
    /// Creates a new decoder config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the minimum length for nested-message attempts
    pub fn min_nested_len(mut self, len: usize) -> Self {
        self.min_nested_len = len;
        self
    }

    /// Sets whether empty values are reported as text
    pub fn allow_empty_text(mut self, allow: bool) -> Self {
        self.allow_empty_text = allow;
        self
    }
}

/// Structural decoder for protobuf-encoded buffers
///
/// Holds only configuration; every call decodes from scratch, so one
/// decoder can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Creates a new decoder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new decoder with custom configuration
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}

/// Walk `buf` with the default configuration
pub fn decode(buf: &[u8]) -> Walk {
    Decoder::new().walk(buf)
}
