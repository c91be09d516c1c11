//! Extensible field writing traits.
//!
//! This module provides the [`FieldWriter`] trait for customizing
//! how decoded fields are written to output.

use crate::decode::{FieldRecord, FieldValue};
use std::fmt::Result;

/// Trait for writing decoded fields to output.
///
/// Every callback has a no-op default, so implementors only override what
/// they need. [`FieldWriter::write_records`] drives the callbacks over a
/// tree of records in buffer order.
///
/// # Example
///
/// ```
/// use wirepeek_core::render::FieldWriter;
/// use wirepeek_core::{decode, FieldRecord};
///
/// struct FieldNumbers(Vec<u64>);
///
/// impl FieldWriter for FieldNumbers {
///     fn write_field(&mut self, record: &FieldRecord, _depth: usize) -> std::fmt::Result {
///         self.0.push(record.field_number);
///         Ok(())
///     }
/// }
///
/// let walk = decode(&[0x08, 0x01, 0x12, 0x02, 0x18, 0x02]);
/// let mut numbers = FieldNumbers(Vec::new());
/// numbers.write_records(&walk.fields, 0)?;
/// assert_eq!(numbers.0, [1, 2, 3]);
/// # Ok::<(), std::fmt::Error>(())
/// ```
pub trait FieldWriter {
    /// Write a single field line
    fn write_field(&mut self, record: &FieldRecord, depth: usize) -> Result {
        let _ = (record, depth);
        Ok(())
    }

    /// Called after `write_field` for a nested message, before its children
    fn begin_nested(&mut self, record: &FieldRecord, depth: usize) -> Result {
        let _ = (record, depth);
        Ok(())
    }

    /// Called after the last child of a nested message
    fn end_nested(&mut self, record: &FieldRecord, depth: usize) -> Result {
        let _ = (record, depth);
        Ok(())
    }

    /// Write `records` and everything nested inside them
    fn write_records(&mut self, records: &[FieldRecord], depth: usize) -> Result {
        for record in records {
            self.write_field(record, depth)?;

            if let FieldValue::Nested(children) = &record.value {
                self.begin_nested(record, depth)?;
                self.write_records(children, depth + 1)?;
                self.end_nested(record, depth)?;
            }
        }
        Ok(())
    }
}

/// A no-op writer that discards all output
pub struct NullWriter;

impl FieldWriter for NullWriter {}

/// A writer that collects statistics about a decoded buffer
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatsWriter {
    /// Number of fields at every depth
    pub field_count: usize,
    /// Number of integer values
    pub integer_count: usize,
    /// Number of text values
    pub text_count: usize,
    /// Number of nested messages
    pub nested_count: usize,
    /// Number of opaque blobs
    pub opaque_count: usize,
    /// Number of group markers and reserved wire types
    pub unknown_count: usize,
    /// Deepest nesting level seen
    pub max_depth: usize,
}

impl StatsWriter {
    /// One-line summary of the counters
    pub fn summary(&self) -> String {
        format!(
            "{} fields ({} integer, {} text, {} nested, {} opaque, {} unknown), max depth {}",
            self.field_count,
            self.integer_count,
            self.text_count,
            self.nested_count,
            self.opaque_count,
            self.unknown_count,
            self.max_depth
        )
    }
}

impl FieldWriter for StatsWriter {
    fn write_field(&mut self, record: &FieldRecord, depth: usize) -> Result {
        self.field_count += 1;
        self.max_depth = self.max_depth.max(depth);

        match record.value {
            FieldValue::Integer(_) => self.integer_count += 1,
            FieldValue::Text(_) => self.text_count += 1,
            FieldValue::Nested(_) => self.nested_count += 1,
            FieldValue::Opaque(_) => self.opaque_count += 1,
            FieldValue::Unknown => self.unknown_count += 1,
        }
        Ok(())
    }
}
