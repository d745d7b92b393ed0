// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for paramcodec.
//!
//! Every failure carries the context a caller needs to report a precise
//! diagnostic:
//! - Container header/directory/payload reads
//! - Schema and field definition parsing
//! - Per-record field decoding
//! - Display formatting

use thiserror::Error;

/// Errors that can occur while decoding PARAM containers and records.
#[derive(Debug, Error)]
pub enum ParamError {
    /// The input ended before a required read completed.
    #[error("Truncated input while reading {context}: requested {requested} bytes at offset {offset}, but only {available} bytes available")]
    TruncatedInput {
        /// What was being read
        context: String,
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Stream offset where the read started
        offset: u64,
    },

    /// Header values that cannot describe a valid container.
    #[error("Malformed container: {reason}")]
    MalformedContainer {
        /// Validation error message
        reason: String,
    },

    /// The declared sizes do not divide into whole records.
    #[error("Unsupported container layout: {payload_bytes} payload bytes do not divide evenly into {record_count} records")]
    UnsupportedLayout {
        /// Bytes left for record payloads after header and directory
        payload_bytes: i64,
        /// Declared record count
        record_count: i64,
    },

    /// Invalid format descriptor or field definition.
    #[error("Invalid schema '{schema}': {reason}")]
    Schema {
        /// Schema name, field definition, or document path
        schema: String,
        /// Validation error message
        reason: String,
    },

    /// A field read ran past the end of a record's payload.
    #[error("Corrupt record {record_id}: field #{field_index} '{field_name}' at offset {offset}: {cause}")]
    CorruptRecord {
        /// Record identifier
        record_id: i64,
        /// Index of the field in schema order
        field_index: usize,
        /// Internal field name
        field_name: String,
        /// Byte offset inside the record payload
        offset: usize,
        /// Underlying error
        cause: String,
    },

    /// A value cannot be rendered with the given display format.
    #[error("Cannot format {value} with '{format}': {reason}")]
    Format {
        /// Display format string
        format: String,
        /// Debug rendering of the value
        value: String,
        /// Error message
        reason: String,
    },

    /// I/O failure while reading an input document or container.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParamError {
    /// Create a truncated input error.
    pub fn truncated(
        context: impl Into<String>,
        requested: usize,
        available: usize,
        offset: u64,
    ) -> Self {
        ParamError::TruncatedInput {
            context: context.into(),
            requested,
            available,
            offset,
        }
    }

    /// Create a malformed container error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        ParamError::MalformedContainer {
            reason: reason.into(),
        }
    }

    /// Create an unsupported layout error.
    pub fn unsupported_layout(payload_bytes: i64, record_count: i64) -> Self {
        ParamError::UnsupportedLayout {
            payload_bytes,
            record_count,
        }
    }

    /// Create a schema error.
    pub fn schema(schema: impl Into<String>, reason: impl Into<String>) -> Self {
        ParamError::Schema {
            schema: schema.into(),
            reason: reason.into(),
        }
    }

    /// Create a corrupt record error.
    pub fn corrupt_record(
        record_id: i64,
        field_index: usize,
        field_name: impl Into<String>,
        offset: usize,
        cause: impl Into<String>,
    ) -> Self {
        ParamError::CorruptRecord {
            record_id,
            field_index,
            field_name: field_name.into(),
            offset,
            cause: cause.into(),
        }
    }

    /// Create a formatting error.
    pub fn format(
        format: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ParamError::Format {
            format: format.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error invalidates the whole container rather than one record.
    pub fn is_container_level(&self) -> bool {
        matches!(
            self,
            ParamError::TruncatedInput { .. }
                | ParamError::MalformedContainer { .. }
                | ParamError::UnsupportedLayout { .. }
                | ParamError::Io(_)
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            ParamError::TruncatedInput {
                context,
                requested,
                available,
                offset,
            } => vec![
                ("context", context.clone()),
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("offset", offset.to_string()),
            ],
            ParamError::MalformedContainer { reason } => vec![("reason", reason.clone())],
            ParamError::UnsupportedLayout {
                payload_bytes,
                record_count,
            } => vec![
                ("payload_bytes", payload_bytes.to_string()),
                ("record_count", record_count.to_string()),
            ],
            ParamError::Schema { schema, reason } => {
                vec![("schema", schema.clone()), ("reason", reason.clone())]
            }
            ParamError::CorruptRecord {
                record_id,
                field_index,
                field_name,
                offset,
                cause,
            } => vec![
                ("record", record_id.to_string()),
                ("field_index", field_index.to_string()),
                ("field", field_name.clone()),
                ("offset", offset.to_string()),
                ("cause", cause.clone()),
            ],
            ParamError::Format {
                format,
                value,
                reason,
            } => vec![
                ("format", format.clone()),
                ("value", value.clone()),
                ("reason", reason.clone()),
            ],
            ParamError::Io(err) => vec![("message", err.to_string())],
        }
    }
}

/// Result type for paramcodec operations.
pub type Result<T> = std::result::Result<T, ParamError>;
