//! Error types for the wirepeek-core library.
//!
//! Decoding itself never fails as a whole: every error raised while walking a
//! buffer is local to one field or one nested-message attempt. The remaining
//! variants belong to the input helpers that turn text or files into bytes.

use crate::wire::WireType;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wirepeek operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all wirepeek operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A fixed-width or length-delimited value runs past the end of the buffer
    #[error(
        "truncated {} value for field {field_number} at offset {offset}: need {needed} bytes, have {available}",
        .wire_type.name()
    )]
    Truncated {
        /// Byte offset of the value (immediately after the tag)
        offset: usize,
        /// Field number taken from the tag
        field_number: u64,
        /// Wire type taken from the tag
        wire_type: WireType,
        /// Number of bytes the value declares
        needed: u64,
        /// Number of bytes left in the buffer
        available: usize,
    },

    /// A nested message attempt went deeper than the configured limit
    #[error("nesting depth {depth} exceeds maximum of {max}")]
    DepthExceeded {
        /// Depth that was requested
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// A tag varint ran off the end of a nested message
    #[error("unterminated tag at offset {offset}")]
    UnterminatedTag {
        /// Offset where the tag starts
        offset: usize,
    },

    /// Nested message attempt produced no fields
    #[error("no fields decoded from {len} byte blob")]
    EmptyMessage {
        /// Length of the blob
        len: usize,
    },

    /// Input string is not valid hexadecimal
    #[error("invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Input string is not valid base64
    #[error("invalid base64 input: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// Text input is neither hex nor base64
    #[error("input is neither hex nor base64")]
    UnrecognizedEncoding,

    /// Snapshot file contained no payload line
    #[error("no hex data found in snapshot")]
    EmptySnapshot,

    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a new truncation error
    pub fn truncated(
        offset: usize,
        field_number: u64,
        wire_type: WireType,
        needed: u64,
        available: usize,
    ) -> Self {
        Self::Truncated {
            offset,
            field_number,
            wire_type,
            needed,
            available,
        }
    }

    /// Creates a new depth error
    pub fn depth_exceeded(depth: usize, max: usize) -> Self {
        Self::DepthExceeded { depth, max }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }
}
