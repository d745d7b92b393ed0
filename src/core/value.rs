// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoded field values.
//!
//! [`ParamValue`] is the closed set of shapes the field codec produces. The
//! formatter matches over it exhaustively, so there is no runtime type
//! inspection anywhere between decoding and display.

use serde::Serialize;
use std::fmt;

/// One decoded field of a PARAM record.
///
/// Integer variants keep the width the schema declared. Bit-packed fields
/// come out as `UInt8`/`UInt16` when declared with those types and as
/// `UInt32` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParamValue {
    // Signed integers
    Int8(i8),
    Int16(i16),
    Int32(i32),

    // Unsigned integers
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),

    // Floating point
    Float32(f32),

    // Fixed-width string, decoded up to the first NUL
    String(String),

    /// Padding bytes; always reads as zero
    Padding,
}

impl ParamValue {
    /// Check if this value is an integer type (signed or unsigned).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ParamValue::Int8(_)
                | ParamValue::Int16(_)
                | ParamValue::Int32(_)
                | ParamValue::UInt8(_)
                | ParamValue::UInt16(_)
                | ParamValue::UInt32(_)
        )
    }

    /// Check if this value is a signed integer.
    pub fn is_signed_integer(&self) -> bool {
        matches!(
            self,
            ParamValue::Int8(_) | ParamValue::Int16(_) | ParamValue::Int32(_)
        )
    }

    /// Check if this value is padding.
    pub fn is_padding(&self) -> bool {
        matches!(self, ParamValue::Padding)
    }

    /// Widen integer values (and padding) to i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int8(v) => Some(*v as i64),
            ParamValue::Int16(v) => Some(*v as i64),
            ParamValue::Int32(v) => Some(*v as i64),
            ParamValue::UInt8(v) => Some(*v as i64),
            ParamValue::UInt16(v) => Some(*v as i64),
            ParamValue::UInt32(v) => Some(*v as i64),
            ParamValue::Padding => Some(0),
            ParamValue::Float32(_) | ParamValue::String(_) => None,
        }
    }

    /// Convert numeric values to f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float32(v) => Some(*v as f64),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Int8(_) => "s8",
            ParamValue::Int16(_) => "s16",
            ParamValue::Int32(_) => "s32",
            ParamValue::UInt8(_) => "u8",
            ParamValue::UInt16(_) => "u16",
            ParamValue::UInt32(_) => "u32",
            ParamValue::Float32(_) => "f32",
            ParamValue::String(_) => "string",
            ParamValue::Padding => "padding",
        }
    }

    /// Convert to a JSON value for export.
    ///
    /// Non-finite floats have no JSON representation and become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ParamValue::Float32(v) => serde_json::Number::from_f64(*v as f64)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            ParamValue::String(s) => serde_json::Value::String(s.clone()),
            other => match other.as_i64() {
                Some(v) => serde_json::Value::Number(v.into()),
                None => serde_json::Value::Null,
            },
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int8(v) => write!(f, "{v}"),
            ParamValue::Int16(v) => write!(f, "{v}"),
            ParamValue::Int32(v) => write!(f, "{v}"),
            ParamValue::UInt8(v) => write!(f, "{v}"),
            ParamValue::UInt16(v) => write!(f, "{v}"),
            ParamValue::UInt32(v) => write!(f, "{v}"),
            ParamValue::Float32(v) => write!(f, "{v}"),
            ParamValue::String(s) => write!(f, "{s}"),
            ParamValue::Padding => write!(f, "0"),
        }
    }
}

/// One record decoded against a schema: its id plus values in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedRecord {
    /// Record identifier from the container directory
    pub id: i64,
    /// One value per schema field, in schema order
    pub values: Vec<ParamValue>,
}

impl DecodedRecord {
    /// Create a decoded record.
    pub fn new(id: i64, values: Vec<ParamValue>) -> Self {
        Self { id, values }
    }

    /// Number of decoded fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no decoded fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
