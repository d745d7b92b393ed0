// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Field definition parser using Pest.
//!
//! Parses the compact one-line field definitions found in PARAMDEF `Def`
//! attributes:
//! - `u32 hp` - plain scalar
//! - `u8 isEnabled:1` - bit-packed into a shared carrier
//! - `fixstr name[32]` - fixed-width string (byte count)
//! - `fixstrW label[16]` - fixed-width UTF-16 string (character count)
//! - `dummy8 pad[3]` - padding run
//! - `f32 scale = 1.0` - any of the above with a default value

use crate::core::{ParamError, Result};
use crate::schema::ast::{FieldDescriptor, FieldType};
use pest::error::{Error as PestError, LineColLocation};
use pest::Parser;
use pest_derive::Parser;

/// Pest parser for PARAMDEF field definitions.
#[derive(Parser)]
#[grammar = "schema/parser/def_parser/def.pest"] // Path relative to src/ directory
pub struct DefParser;

/// Parse one field definition into a descriptor.
///
/// Presentation metadata is left at its defaults (display name = internal
/// name, display format chosen by type). The descriptor is validated, so a
/// bit width on a type that cannot carry one is rejected here.
pub fn parse_definition(definition: &str) -> Result<FieldDescriptor> {
    let source = definition.trim();
    let mut pairs = DefParser::parse(Rule::definition, source)
        .map_err(|e| ParamError::schema(source, describe_error(e)))?;

    let Some(root) = pairs.next() else {
        return Err(ParamError::schema(source, "empty field definition"));
    };

    let mut field: Option<FieldDescriptor> = None;
    let mut field_type = None;
    let mut bit_width = None;
    let mut array_length = None;
    let mut default_text = None;

    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::field_type => {
                let keyword = pair.as_str();
                field_type = Some(FieldType::from_keyword(keyword).ok_or_else(|| {
                    ParamError::schema(source, format!("unrecognized type '{keyword}'"))
                })?);
            }
            Rule::name => {
                if let Some(ty) = field_type {
                    field = Some(FieldDescriptor::new(ty, pair.as_str()));
                }
            }
            Rule::bit_width => {
                bit_width = Some(parse_number::<u32>(source, pair)?);
            }
            Rule::array_length => {
                array_length = Some(parse_number::<usize>(source, pair)?);
            }
            Rule::default => {
                default_text = pair
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::default_value)
                    .map(|p| p.as_str().to_string());
            }
            _ => {}
        }
    }

    let Some(mut field) = field else {
        return Err(ParamError::schema(source, "missing type or field name"));
    };
    field.bit_width = bit_width;
    field.array_length = array_length;
    if let Some(text) = default_text {
        field.default_value = Some(field.field_type.parse_value(&text)?);
    }

    field.validate()?;
    Ok(field)
}

fn parse_number<T: std::str::FromStr>(
    source: &str,
    pair: pest::iterators::Pair<'_, Rule>,
) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let digits = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::number)
        .map(|p| p.as_str())
        .unwrap_or_default();
    digits
        .parse()
        .map_err(|e| ParamError::schema(source, format!("invalid number '{digits}': {e}")))
}

fn describe_error(error: PestError<Rule>) -> String {
    let error = error.renamed_rules(|rule| {
        match rule {
            Rule::field_type => "type keyword",
            Rule::name => "field name",
            Rule::number => "digits",
            Rule::close_bracket => "']' after array length",
            Rule::bit_width => "':<bits>'",
            Rule::array_length => "'[<length>]'",
            Rule::default => "'= <default>'",
            Rule::EOI => "end of definition",
            _ => "token",
        }
        .to_string()
    });
    let column = match error.line_col {
        LineColLocation::Pos((_, col)) => col,
        LineColLocation::Span((_, col), _) => col,
    };
    format!("{} at column {column}", error.variant.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ParamValue;

    #[test]
    fn test_parse_bit_field_with_default() {
        let field = parse_definition("u32 hp:8 = 100").unwrap();
        assert_eq!(field.field_type, FieldType::U32);
        assert_eq!(field.internal_name, "hp");
        assert_eq!(field.bit_width, Some(8));
        assert_eq!(field.array_length, None);
        assert_eq!(field.default_value, Some(ParamValue::UInt32(100)));
    }

    #[test]
    fn test_parse_plain_scalars() {
        let cases = [
            ("s8 a", FieldType::S8),
            ("u8 b", FieldType::U8),
            ("s16 c", FieldType::S16),
            ("u16 d", FieldType::U16),
            ("s32 e", FieldType::S32),
            ("u32 f", FieldType::U32),
            ("f32 g", FieldType::F32),
            ("dummy8 h", FieldType::Dummy8),
        ];
        for (def, ty) in cases {
            let field = parse_definition(def).unwrap();
            assert_eq!(field.field_type, ty, "{def}");
            assert_eq!(field.bit_width, None);
            assert_eq!(field.array_length, None);
            assert_eq!(field.default_value, None);
        }
    }

    #[test]
    fn test_parse_string_arrays() {
        let field = parse_definition("fixstr name[32]").unwrap();
        assert_eq!(field.field_type, FieldType::FixStr);
        assert_eq!(field.internal_name, "name");
        assert_eq!(field.array_length, Some(32));

        let field = parse_definition("fixstrW label[16]").unwrap();
        assert_eq!(field.field_type, FieldType::FixStrW);
        assert_eq!(field.array_length, Some(16));
        assert_eq!(field.byte_size(), 32);
    }

    #[test]
    fn test_parse_padding_run_and_bits() {
        let field = parse_definition("dummy8 pad[3]").unwrap();
        assert_eq!(field.array_length, Some(3));

        let field = parse_definition("dummy8 pad2:6").unwrap();
        assert_eq!(field.bit_width, Some(6));
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(
            parse_definition("s32 x = -1").unwrap().default_value,
            Some(ParamValue::Int32(-1))
        );
        assert_eq!(
            parse_definition("f32 scale=1.5").unwrap().default_value,
            Some(ParamValue::Float32(1.5))
        );
        assert_eq!(
            parse_definition("u8 flag:1 = 1").unwrap().default_value,
            Some(ParamValue::UInt8(1))
        );
        assert_eq!(
            parse_definition("dummy8 pad[4] = 0").unwrap().default_value,
            Some(ParamValue::Padding)
        );
    }

    #[test]
    fn test_name_stops_only_at_whitespace_colon_bracket() {
        // Without whitespace the '=' belongs to the name.
        let field = parse_definition("u32 hp=5").unwrap();
        assert_eq!(field.internal_name, "hp=5");
        assert_eq!(field.default_value, None);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let field = parse_definition("  u16   speed :").err();
        assert!(field.is_some());
        let field = parse_definition("  u16   speed  ").unwrap();
        assert_eq!(field.internal_name, "speed");
    }

    #[test]
    fn test_unknown_type_is_schema_error() {
        let err = parse_definition("u64 big").unwrap_err();
        assert!(matches!(err, ParamError::Schema { .. }));
        assert!(err.to_string().contains("unrecognized type 'u64'"));
    }

    #[test]
    fn test_missing_close_bracket() {
        let err = parse_definition("fixstr name[32").unwrap_err();
        assert!(matches!(err, ParamError::Schema { .. }));
        assert!(err.to_string().contains("']' after array length"), "{err}");
    }

    #[test]
    fn test_missing_bit_digits() {
        assert!(parse_definition("u8 flag:").is_err());
        assert!(parse_definition("u8 flag:x").is_err());
    }

    #[test]
    fn test_missing_name() {
        assert!(parse_definition("u32").is_err());
        assert!(parse_definition("").is_err());
    }

    #[test]
    fn test_invalid_bit_width_type_combination() {
        let err = parse_definition("f32 ratio:4").unwrap_err();
        assert!(err.to_string().contains("cannot be bit-packed"));
        assert!(parse_definition("s16 value:3").is_err());
    }

    #[test]
    fn test_invalid_default_literal() {
        assert!(parse_definition("u8 count = 300").is_err());
        assert!(parse_definition("s32 count = ten").is_err());
    }

    #[test]
    fn test_string_without_length_rejected() {
        assert!(parse_definition("fixstr name").is_err());
    }
}
