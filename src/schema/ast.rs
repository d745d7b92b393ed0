// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Types for parsed PARAMDEF format descriptors.

use crate::core::{ParamError, ParamValue, Result};

/// Storage type of a PARAMDEF field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// 8-bit signed integer (`s8`)
    S8,
    /// 8-bit unsigned integer (`u8`)
    U8,
    /// 16-bit signed integer (`s16`)
    S16,
    /// 16-bit unsigned integer (`u16`)
    U16,
    /// 32-bit signed integer (`s32`)
    S32,
    /// 32-bit unsigned integer (`u32`)
    U32,
    /// 32-bit float (`f32`)
    F32,
    /// Padding byte or byte run (`dummy8`)
    Dummy8,
    /// Fixed-width single-byte string (`fixstr`)
    FixStr,
    /// Fixed-width UTF-16 string (`fixstrW`)
    FixStrW,
}

impl FieldType {
    /// Look up a type by its definition keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "s8" => Some(FieldType::S8),
            "u8" => Some(FieldType::U8),
            "s16" => Some(FieldType::S16),
            "u16" => Some(FieldType::U16),
            "s32" => Some(FieldType::S32),
            "u32" => Some(FieldType::U32),
            "f32" => Some(FieldType::F32),
            "dummy8" => Some(FieldType::Dummy8),
            "fixstr" => Some(FieldType::FixStr),
            "fixstrW" => Some(FieldType::FixStrW),
            _ => None,
        }
    }

    /// Definition keyword of this type.
    pub fn keyword(self) -> &'static str {
        match self {
            FieldType::S8 => "s8",
            FieldType::U8 => "u8",
            FieldType::S16 => "s16",
            FieldType::U16 => "u16",
            FieldType::S32 => "s32",
            FieldType::U32 => "u32",
            FieldType::F32 => "f32",
            FieldType::Dummy8 => "dummy8",
            FieldType::FixStr => "fixstr",
            FieldType::FixStrW => "fixstrW",
        }
    }

    /// Size in bytes of one element of this type.
    pub fn element_size(self) -> usize {
        match self {
            FieldType::S8 | FieldType::U8 | FieldType::Dummy8 | FieldType::FixStr => 1,
            FieldType::S16 | FieldType::U16 | FieldType::FixStrW => 2,
            FieldType::S32 | FieldType::U32 | FieldType::F32 => 4,
        }
    }

    /// Width in bits of the carrier read for a bit-packed field of this type.
    ///
    /// Returns `None` for types that cannot be bit-packed.
    pub fn carrier_bits(self) -> Option<u32> {
        match self {
            FieldType::U8 | FieldType::Dummy8 => Some(8),
            FieldType::U16 => Some(16),
            FieldType::U32 => Some(32),
            _ => None,
        }
    }

    /// Whether this is one of the fixed-width string types.
    pub fn is_string(self) -> bool {
        matches!(self, FieldType::FixStr | FieldType::FixStrW)
    }

    /// Display format used when the descriptor does not provide one.
    pub fn default_display_format(self) -> &'static str {
        match self {
            FieldType::S8
            | FieldType::U8
            | FieldType::S16
            | FieldType::U16
            | FieldType::S32
            | FieldType::U32 => "%d",
            FieldType::F32 => "%f",
            FieldType::FixStr | FieldType::FixStrW => "%s",
            FieldType::Dummy8 => "",
        }
    }

    /// Parse a scalar literal as a value of this type.
    pub fn parse_value(self, text: &str) -> Result<ParamValue> {
        let text = text.trim();
        let invalid = |e: &dyn std::fmt::Display| {
            ParamError::schema(
                text,
                format!("invalid {} literal: {e}", self.keyword()),
            )
        };
        Ok(match self {
            FieldType::S8 => ParamValue::Int8(text.parse().map_err(|e| invalid(&e))?),
            FieldType::U8 => ParamValue::UInt8(text.parse().map_err(|e| invalid(&e))?),
            FieldType::S16 => ParamValue::Int16(text.parse().map_err(|e| invalid(&e))?),
            FieldType::U16 => ParamValue::UInt16(text.parse().map_err(|e| invalid(&e))?),
            FieldType::S32 => ParamValue::Int32(text.parse().map_err(|e| invalid(&e))?),
            FieldType::U32 => ParamValue::UInt32(text.parse().map_err(|e| invalid(&e))?),
            FieldType::F32 => ParamValue::Float32(text.parse().map_err(|e| invalid(&e))?),
            FieldType::FixStr | FieldType::FixStrW => ParamValue::String(text.to_string()),
            FieldType::Dummy8 => ParamValue::Padding,
        })
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Editing behavior flags of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EditFlags(u8);

impl EditFlags {
    /// Editable, does not wrap.
    pub const NONE: EditFlags = EditFlags(0);
    /// Value wraps when incremented or decremented past its bounds.
    pub const WRAP: EditFlags = EditFlags(1);
    /// Value is read-only.
    pub const LOCK: EditFlags = EditFlags(4);

    /// Parse a whitespace-separated list of flag tokens (`Wrap`, `Lock`).
    pub fn parse(list: &str) -> Result<Self> {
        list.split_whitespace()
            .try_fold(EditFlags::NONE, |flags, token| match token {
                "Wrap" => Ok(flags | EditFlags::WRAP),
                "Lock" => Ok(flags | EditFlags::LOCK),
                other => Err(ParamError::schema(
                    list,
                    format!("unrecognized edit flag '{other}'"),
                )),
            })
    }

    /// Raw flag bits.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether every flag in `other` is set.
    pub fn contains(self, other: EditFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no flags are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EditFlags {
    type Output = EditFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        EditFlags(self.0 | rhs.0)
    }
}

impl std::fmt::Display for EditFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = Vec::new();
        if self.contains(EditFlags::WRAP) {
            names.push("Wrap");
        }
        if self.contains(EditFlags::LOCK) {
            names.push("Lock");
        }
        f.write_str(&names.join(" "))
    }
}

/// One field of a format descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Storage type
    pub field_type: FieldType,
    /// Identifier from the definition string
    pub internal_name: String,
    /// Bits occupied inside a shared carrier, for bit-packed fields
    pub bit_width: Option<u32>,
    /// Element count for string and padding runs
    pub array_length: Option<usize>,
    /// Default value, parsed with the field's own type
    pub default_value: Option<ParamValue>,
    /// Human-readable name; defaults to the internal name
    pub display_name: String,
    /// Free-text description
    pub description: Option<String>,
    /// Name of the enum whose labels apply to this field
    pub enum_reference: Option<String>,
    /// printf-style display format
    pub display_format: String,
    /// Editing behavior
    pub edit_flags: EditFlags,
    /// Lower editing bound
    pub minimum: f32,
    /// Upper editing bound
    pub maximum: f32,
    /// Editing step
    pub increment: f32,
    /// Presentation ordering key
    pub sort_key: i32,
}

impl FieldDescriptor {
    /// Create a descriptor with presentation metadata set to its defaults.
    pub fn new(field_type: FieldType, internal_name: impl Into<String>) -> Self {
        let internal_name = internal_name.into();
        Self {
            field_type,
            display_name: internal_name.clone(),
            internal_name,
            bit_width: None,
            array_length: None,
            default_value: None,
            description: None,
            enum_reference: None,
            display_format: field_type.default_display_format().to_string(),
            edit_flags: EditFlags::NONE,
            minimum: 0.0,
            maximum: 0.0,
            increment: 0.0,
            sort_key: 0,
        }
    }

    /// Make this a bit-packed field of `bits` bits.
    pub fn with_bit_width(mut self, bits: u32) -> Self {
        self.bit_width = Some(bits);
        self
    }

    /// Give this field an element count.
    pub fn with_array_length(mut self, length: usize) -> Self {
        self.array_length = Some(length);
        self
    }

    /// Whether the field shares a carrier with its neighbours.
    pub fn is_bit_packed(&self) -> bool {
        self.bit_width.is_some()
    }

    /// Bytes consumed by this field when it is not bit-packed.
    pub fn byte_size(&self) -> usize {
        match self.field_type {
            FieldType::FixStr | FieldType::FixStrW | FieldType::Dummy8 => {
                self.field_type.element_size() * self.array_length.unwrap_or(1)
            }
            other => other.element_size(),
        }
    }

    /// Check the structural invariants of this descriptor.
    ///
    /// - bit widths only on `u8`/`u16`/`u32`/`dummy8`, between 1 and the
    ///   carrier width
    /// - string types need an array length
    /// - numeric types cannot have one
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| Err(ParamError::schema(&self.internal_name, reason));

        if let Some(bits) = self.bit_width {
            let Some(carrier) = self.field_type.carrier_bits() else {
                return fail(format!(
                    "type {} cannot be bit-packed",
                    self.field_type.keyword()
                ));
            };
            if bits == 0 || bits > carrier {
                return fail(format!(
                    "bit width {bits} out of range 1..={carrier} for {}",
                    self.field_type.keyword()
                ));
            }
        }

        match (self.field_type.is_string(), self.array_length) {
            (true, None) => fail(format!(
                "{} field requires an array length",
                self.field_type.keyword()
            )),
            (false, Some(_)) if self.field_type != FieldType::Dummy8 => fail(format!(
                "array length is not supported on {} fields",
                self.field_type.keyword()
            )),
            _ => Ok(()),
        }
    }
}

/// A parsed format descriptor: container metadata plus ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSchema {
    /// Struct type name the descriptor applies to
    pub param_type_name: String,
    /// Data version
    pub data_version: i16,
    /// Descriptor format version
    pub format_version: i16,
    /// Multi-byte values are stored big-endian
    pub is_big_endian: bool,
    /// Names are stored as UTF-16
    pub is_unicode: bool,
    /// Fields in on-disk order
    pub fields: Vec<FieldDescriptor>,
}

impl ParamSchema {
    /// Create an empty little-endian schema.
    pub fn new(param_type_name: impl Into<String>) -> Self {
        Self {
            param_type_name: param_type_name.into(),
            data_version: 0,
            format_version: 0,
            is_big_endian: false,
            is_unicode: false,
            fields: Vec::new(),
        }
    }

    /// Append a field after checking its invariants.
    pub fn push_field(&mut self, field: FieldDescriptor) -> Result<()> {
        field.validate()?;
        self.fields.push(field);
        Ok(())
    }

    /// Builder-style [`ParamSchema::push_field`].
    pub fn with_field(mut self, field: FieldDescriptor) -> Result<Self> {
        self.push_field(field)?;
        Ok(self)
    }

    /// Find a field by internal name.
    pub fn field(&self, internal_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.internal_name == internal_name)
    }

    /// Bytes one record occupies when decoded with this schema.
    ///
    /// Each run of consecutive bit-packed fields costs the size of the
    /// carrier that opens it.
    pub fn record_size(&self) -> usize {
        let mut size = 0;
        let mut in_run = false;
        for field in &self.fields {
            if field.is_bit_packed() {
                if !in_run {
                    size += field.field_type.element_size();
                    in_run = true;
                }
            } else {
                size += field.byte_size();
                in_run = false;
            }
        }
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for keyword in [
            "s8", "u8", "s16", "u16", "s32", "u32", "f32", "dummy8", "fixstr", "fixstrW",
        ] {
            let ty = FieldType::from_keyword(keyword).unwrap();
            assert_eq!(ty.keyword(), keyword);
        }
        assert_eq!(FieldType::from_keyword("u64"), None);
        assert_eq!(FieldType::from_keyword("FIXSTR"), None);
    }

    #[test]
    fn test_default_display_format() {
        assert_eq!(FieldType::S16.default_display_format(), "%d");
        assert_eq!(FieldType::U32.default_display_format(), "%d");
        assert_eq!(FieldType::F32.default_display_format(), "%f");
        assert_eq!(FieldType::FixStrW.default_display_format(), "%s");
        assert_eq!(FieldType::Dummy8.default_display_format(), "");
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(FieldType::S8.parse_value("-1").unwrap(), ParamValue::Int8(-1));
        assert_eq!(
            FieldType::U32.parse_value(" 100 ").unwrap(),
            ParamValue::UInt32(100)
        );
        assert_eq!(
            FieldType::F32.parse_value("1.5").unwrap(),
            ParamValue::Float32(1.5)
        );
        assert_eq!(
            FieldType::FixStr.parse_value("abc").unwrap(),
            ParamValue::String("abc".into())
        );
        assert_eq!(FieldType::Dummy8.parse_value("0").unwrap(), ParamValue::Padding);
        assert!(FieldType::U8.parse_value("256").is_err());
        assert!(FieldType::S32.parse_value("abc").is_err());
    }

    #[test]
    fn test_edit_flags_parse() {
        assert_eq!(EditFlags::parse("").unwrap(), EditFlags::NONE);
        assert_eq!(EditFlags::parse("Wrap").unwrap(), EditFlags::WRAP);
        let both = EditFlags::parse("Wrap Lock").unwrap();
        assert!(both.contains(EditFlags::WRAP));
        assert!(both.contains(EditFlags::LOCK));
        assert_eq!(both.bits(), 5);
        assert_eq!(both.to_string(), "Wrap Lock");
        assert!(EditFlags::parse("Wrap Frozen").is_err());
    }

    #[test]
    fn test_validate_bit_width_type() {
        assert!(FieldDescriptor::new(FieldType::U8, "a")
            .with_bit_width(1)
            .validate()
            .is_ok());
        assert!(FieldDescriptor::new(FieldType::Dummy8, "pad")
            .with_bit_width(7)
            .validate()
            .is_ok());
        assert!(FieldDescriptor::new(FieldType::S8, "a")
            .with_bit_width(1)
            .validate()
            .is_err());
        assert!(FieldDescriptor::new(FieldType::F32, "a")
            .with_bit_width(4)
            .validate()
            .is_err());
        assert!(FieldDescriptor::new(FieldType::U8, "a")
            .with_bit_width(9)
            .validate()
            .is_err());
        assert!(FieldDescriptor::new(FieldType::U16, "a")
            .with_bit_width(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_array_length() {
        assert!(FieldDescriptor::new(FieldType::FixStr, "name")
            .validate()
            .is_err());
        assert!(FieldDescriptor::new(FieldType::FixStrW, "name")
            .with_array_length(16)
            .validate()
            .is_ok());
        assert!(FieldDescriptor::new(FieldType::Dummy8, "pad")
            .with_array_length(3)
            .validate()
            .is_ok());
        assert!(FieldDescriptor::new(FieldType::S32, "arr")
            .with_array_length(3)
            .validate()
            .is_err());
    }

    #[test]
    fn test_byte_size() {
        assert_eq!(FieldDescriptor::new(FieldType::F32, "f").byte_size(), 4);
        assert_eq!(FieldDescriptor::new(FieldType::Dummy8, "p").byte_size(), 1);
        assert_eq!(
            FieldDescriptor::new(FieldType::Dummy8, "p")
                .with_array_length(3)
                .byte_size(),
            3
        );
        assert_eq!(
            FieldDescriptor::new(FieldType::FixStrW, "s")
                .with_array_length(8)
                .byte_size(),
            16
        );
    }

    #[test]
    fn test_record_size_counts_one_carrier_per_run() {
        let schema = ParamSchema::new("TEST_PARAM")
            .with_field(FieldDescriptor::new(FieldType::U32, "id"))
            .and_then(|s| s.with_field(FieldDescriptor::new(FieldType::U8, "lo").with_bit_width(4)))
            .and_then(|s| s.with_field(FieldDescriptor::new(FieldType::U8, "hi").with_bit_width(4)))
            .and_then(|s| {
                s.with_field(FieldDescriptor::new(FieldType::Dummy8, "pad").with_array_length(3))
            })
            .unwrap();
        assert_eq!(schema.record_size(), 8);
        assert_eq!(schema.field("hi").unwrap().bit_width, Some(4));
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_new_descriptor_defaults() {
        let field = FieldDescriptor::new(FieldType::F32, "speed");
        assert_eq!(field.display_name, "speed");
        assert_eq!(field.display_format, "%f");
        assert!(field.edit_flags.is_empty());
        assert_eq!(field.sort_key, 0);
    }
}
