//! Base-128 variable-length integers.
//!
//! Decoding is deliberately lenient: a varint that runs off the end of the
//! buffer yields whatever has accumulated, and continuation bytes past the
//! 64th bit are consumed but contribute nothing.

use bytes::BufMut;

/// Decode a varint starting at `offset`.
///
/// Returns the decoded value and the offset immediately after the last
/// consumed byte. An `offset` at or past the end of `buf` consumes nothing
/// and returns `(0, offset)`.
pub fn decode_varint(buf: &[u8], offset: usize) -> (u64, usize) {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    let mut position = offset;

    while let Some(&byte) = buf.get(position) {
        position += 1;

        if shift < u64::BITS {
            value |= u64::from(byte & 0x7F) << shift;
        }

        if byte & 0x80 == 0 {
            break;
        }
        shift = shift.saturating_add(7);
    }

    (value, position)
}

/// Whether the varint spanning `start..end` ended on a terminating byte.
///
/// `decode_varint` stops silently at end-of-buffer, so this is how callers
/// tell a complete varint apart from one that was cut short.
pub fn is_terminated(buf: &[u8], start: usize, end: usize) -> bool {
    end > start && buf.get(end - 1).is_some_and(|&byte| byte & 0x80 == 0)
}

/// Encode `value` as a varint into `buf`.
pub fn encode_varint(value: u64, buf: &mut impl BufMut) {
    prost::encoding::encode_varint(value, buf);
}

/// Number of bytes `encode_varint` writes for `value`.
pub fn encoded_len_varint(value: u64) -> usize {
    prost::encoding::encoded_len_varint(value)
}
