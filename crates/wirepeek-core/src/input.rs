//! Input helpers: turning files, hex and base64 text into raw bytes.
//!
//! Captured buffers travel in several shapes: raw bytes, hex or base64 text
//! pasted directly, or hex stored as the last line of an `insta` snapshot
//! file:
//!
//! ```text
//! ---
//! source: src/lists.rs
//! expression: hex
//! ---
//! 0a0568656c6c6f
//! ```
//!
//! Raw protobuf often starts with whitespace bytes (`0x0A` is the tag of a
//! length-delimited field 1) and often carries hex ids, so text detection
//! only applies to content that is text from its very first byte.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use tracing::debug;

/// Snapshot header lines that never carry the payload
const SNAPSHOT_HEADER_PREFIXES: [&str; 3] = ["---", "source:", "expression:"];

/// Decode a hex string into bytes.
///
/// Surrounding whitespace is ignored; the rest must be an even number of
/// `[0-9a-fA-F]` characters.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(text.trim())?)
}

/// Encode bytes as lowercase hex
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Whether `text` is non-empty, even-length hex with nothing around it
pub fn looks_like_hex(text: &str) -> bool {
    !text.is_empty() && text.len() % 2 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Decode standard, padded base64 into bytes
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(text.trim())?)
}

/// Whether `text` is non-empty, padded base64 with nothing around it
pub fn looks_like_base64(text: &str) -> bool {
    let body = text.trim_end_matches('=');
    !body.is_empty()
        && text.len() % 4 == 0
        && text.len() - body.len() <= 2
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

/// Decode a textual buffer: hex first, then base64.
pub fn decode_text(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();

    if looks_like_hex(text) {
        debug!("Decoding {} hex chars", text.len());
        decode_hex(text)
    } else if looks_like_base64(text) {
        debug!("Decoding {} base64 chars", text.len());
        decode_base64(text)
    } else {
        Err(Error::UnrecognizedEncoding)
    }
}

/// Whether `content` starts with an `insta` snapshot header
pub fn is_snapshot(content: &str) -> bool {
    content
        .lines()
        .next()
        .is_some_and(|line| line.trim_end() == "---")
}

/// Find the payload line of a snapshot file.
///
/// The payload is the last non-empty line that is not part of the snapshot
/// header.
pub fn extract_snapshot_payload(content: &str) -> Result<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            !SNAPSHOT_HEADER_PREFIXES
                .iter()
                .any(|prefix| line.starts_with(prefix))
        })
        .last()
        .ok_or(Error::EmptySnapshot)
}

/// Turn file or stdin content into the buffer to decode.
///
/// Snapshots yield their payload line. Content that is entirely hex or
/// base64 (a trailing newline aside) is decoded. Anything else is returned
/// untouched as raw bytes.
pub fn decode_input(content: Vec<u8>) -> Result<Vec<u8>> {
    let Ok(text) = std::str::from_utf8(&content) else {
        return Ok(content);
    };

    if is_snapshot(text) {
        let payload = extract_snapshot_payload(text)?;
        debug!("Found snapshot payload ({} chars)", payload.len());
        return decode_text(payload);
    }

    let body = text.trim_end();
    if looks_like_hex(body) || looks_like_base64(body) {
        return decode_text(body);
    }

    Ok(content)
}

/// Read a file and decode it with [`decode_input`]
pub fn read_input_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let content = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;

    debug!("Read {} bytes from {}", content.len(), path.display());
    decode_input(content)
}
