//! # wirepeek-core
//!
//! A library for inspecting protobuf-encoded buffers without a schema.
//!
//! This crate provides the core functionality for:
//! - Reading varints and tags of the protobuf wire format
//! - Walking a buffer into a tree of field records, guessing which
//!   length-delimited values are text, embedded messages or raw bytes
//! - Rendering that tree as indented text
//! - Re-encoding decoded records
//!
//! ## Architecture
//!
//! - [`wire`]: Varints, tags and wire types
//! - [`decode`]: Field decoding, payload classification and buffer walking
//! - [`render`]: Text output
//! - [`encode`]: Re-encoding of records
//! - [`input`]: File, hex, base64 and snapshot helpers for getting bytes in
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```
//! use wirepeek_core::{decode_hex, render_walk, Decoder, RenderConfig};
//!
//! let data = decode_hex("08960112040a026869")?;
//! let walk = Decoder::new().walk(&data);
//!
//! print!("{}", render_walk(&walk, &RenderConfig::default()));
//! assert_eq!(walk.fields_parsed(), 2);
//! # Ok::<(), wirepeek_core::Error>(())
//! ```
//!
//! ## Extensibility
//!
//! Implement [`FieldWriter`] to produce other output formats from a walk.
//!

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod decode;
pub mod encode;
pub mod error;
pub mod input;
pub mod render;
pub mod wire;

// Re-export primary types for convenience
pub use decode::{
    decode, Decoder, DecoderConfig, FieldRecord, FieldValue, Walk, WalkOutcome, DEFAULT_MAX_DEPTH,
};
pub use encode::{encode_record, encode_records};
pub use error::{Error, Result};
pub use input::{
    decode_base64, decode_hex, decode_input, decode_text, encode_hex, extract_snapshot_payload,
    is_snapshot, looks_like_base64, looks_like_hex, read_input_file,
};
pub use render::{
    render_fields, render_hex_data, render_walk, FieldWriter, RenderConfig, StatsWriter,
    TextRenderer,
};
pub use wire::{Tag, WireType};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
