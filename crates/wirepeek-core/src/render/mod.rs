//! Human-readable rendering of decoded buffers.
//!
//! [`TextRenderer`] prints one line per field, indented by nesting depth:
//!
//! ```text
//! Field 1 (varint): 150
//! Field 2 (length-delimited): <4 bytes, embedded message>
//!   Embedded message:
//!     Field 1 (length-delimited): "hi"
//! Field 3 (length-delimited): <2 bytes, hex: fffe>
//! ```

mod writer;

use crate::decode::{FieldRecord, FieldValue, Walk};
use std::fmt::{self, Write as FmtWrite};

pub use writer::{FieldWriter, NullWriter, StatsWriter};

/// Configuration for text rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Indentation unit
    pub indent_str: String,
    /// Number of leading bytes shown for opaque values
    pub hex_preview_bytes: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_str: "  ".to_string(),
            hex_preview_bytes: 20,
        }
    }
}

impl RenderConfig {
    /// Creates a new render config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation unit
    pub fn indent_str(mut self, s: impl Into<String>) -> Self {
        self.indent_str = s.into();
        self
    }

    /// Sets how many bytes of an opaque value are previewed
    pub fn hex_preview_bytes(mut self, n: usize) -> Self {
        self.hex_preview_bytes = n;
        self
    }
}

/// Writes fields as indented text into any [`fmt::Write`]
pub struct TextRenderer<W> {
    out: W,
    config: RenderConfig,
}

impl<W: FmtWrite> TextRenderer<W> {
    /// Creates a renderer writing into `out`
    pub fn new(out: W, config: RenderConfig) -> Self {
        Self { out, config }
    }

    /// Returns the underlying output
    pub fn into_inner(self) -> W {
        self.out
    }

    fn indent(&mut self, level: usize) -> fmt::Result {
        for _ in 0..level {
            self.out.write_str(&self.config.indent_str)?;
        }
        Ok(())
    }

    fn write_value(&mut self, record: &FieldRecord) -> fmt::Result {
        match &record.value {
            FieldValue::Integer(value) => write!(self.out, "{}", value),
            FieldValue::Text(text) => {
                self.out.write_char('"')?;
                for c in text.chars() {
                    if c == '"' || c == '\\' {
                        self.out.write_char('\\')?;
                    }
                    self.out.write_char(c)?;
                }
                self.out.write_char('"')
            }
            FieldValue::Nested(_) => {
                write!(self.out, "<{} bytes, embedded message>", payload_len(record))
            }
            FieldValue::Opaque(bytes) => {
                let shown = bytes.len().min(self.config.hex_preview_bytes);
                write!(
                    self.out,
                    "<{} bytes, hex: {}{}>",
                    bytes.len(),
                    hex::encode(&bytes[..shown]),
                    if bytes.len() > shown { "..." } else { "" }
                )
            }
            FieldValue::Unknown => {
                write!(self.out, "<unknown wire type {}>", record.wire_type.bits())
            }
        }
    }
}

impl<W: FmtWrite> FieldWriter for TextRenderer<W> {
    fn write_field(&mut self, record: &FieldRecord, depth: usize) -> fmt::Result {
        self.indent(depth * 2)?;
        write!(
            self.out,
            "Field {} ({}): ",
            record.field_number, record.wire_type
        )?;
        self.write_value(record)?;
        self.out.write_char('\n')
    }

    fn begin_nested(&mut self, _record: &FieldRecord, depth: usize) -> fmt::Result {
        self.indent(depth * 2 + 1)?;
        self.out.write_str("Embedded message:\n")
    }
}

/// Payload length of a nested record: its span minus tag and length prefix
fn payload_len(record: &FieldRecord) -> usize {
    match (record.children().first(), record.children().last()) {
        (Some(first), Some(last)) => last.byte_range.end - first.byte_range.start,
        _ => 0,
    }
}

/// Render `fields` without header or trailer
pub fn render_fields(fields: &[FieldRecord], config: &RenderConfig) -> String {
    let mut renderer = TextRenderer::new(String::new(), config.clone());
    // Writing to a String cannot fail
    let _ = renderer.write_records(fields, 0);
    renderer.into_inner()
}

/// Render a complete report: header, fields, any error, and the field count
pub fn render_walk(walk: &Walk, config: &RenderConfig) -> String {
    let mut out = String::from("=== Protobuf Structure ===\n\n");
    out.push_str(&render_fields(&walk.fields, config));

    if let Some((offset, error)) = walk.error() {
        out.push_str(&format!("\nError parsing at position {}: {}\n", offset, error));
    }

    out.push_str(&format!(
        "\n=== Total fields parsed: {} ===\n",
        walk.fields_parsed()
    ));
    out
}

/// Render the hex echo of the whole input that follows a report
pub fn render_hex_data(data: &[u8]) -> String {
    format!("\n=== Hex Data ===\n{}\n", hex::encode(data))
}
