// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! printf-compatible rendering of decoded values.
//!
//! Display formats come from schema documents written for C tooling, so
//! integers follow C's 32-bit `int`/`unsigned int` argument semantics:
//! `%d` of `0xFFFFFFFF` prints `-1` and `%u` of `-5` prints `4294967291`.
//! Supported directives: `d i u x X f F s` with flags `- + space 0 #`,
//! width, precision and the `hh h l ll` length modifiers.

mod spec;

pub use spec::{Conversion, ConversionKind, Flags, FormatSpec, LengthModifier};

use crate::core::{DecodedRecord, ParamError, ParamValue, Result};
use crate::schema::ParamSchema;

/// Default `%f` precision.
const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Render `value` with a printf-style `format`.
///
/// An empty format renders as an empty string. Padding values render as
/// the integer 0.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use paramcodec::{format_value, ParamValue};
///
/// assert_eq!(format_value(&ParamValue::Int32(3), "%05d")?, "00003");
/// assert_eq!(format_value(&ParamValue::Float32(2.5), "%f")?, "2.500000");
/// # Ok(())
/// # }
/// ```
pub fn format_value(value: &ParamValue, format: &str) -> Result<String> {
    let fail = |reason: String| ParamError::format(format, format!("{value:?}"), reason);
    let spec = FormatSpec::parse(format).map_err(fail)?;

    let mut out = spec.prefix;
    if let Some(conversion) = &spec.conversion {
        out.push_str(&render(value, conversion).map_err(fail)?);
    }
    out.push_str(&spec.suffix);
    Ok(out)
}

/// Render every value of `record` with its field's display format.
pub fn format_record(schema: &ParamSchema, record: &DecodedRecord) -> Result<Vec<String>> {
    if schema.fields.len() != record.values.len() {
        return Err(ParamError::schema(
            &schema.param_type_name,
            format!(
                "record {} has {} values for {} fields",
                record.id,
                record.values.len(),
                schema.fields.len()
            ),
        ));
    }
    schema
        .fields
        .iter()
        .zip(&record.values)
        .map(|(field, value)| format_value(value, &field.display_format))
        .collect()
}

fn render(value: &ParamValue, conv: &Conversion) -> std::result::Result<String, String> {
    match value {
        ParamValue::String(s) => {
            if conv.kind != ConversionKind::Str {
                return Err("string value needs '%s'".to_string());
            }
            Ok(render_str(s, conv))
        }
        ParamValue::Float32(f) => {
            if !conv.kind.is_float() {
                return Err("float value needs '%f' or '%F'".to_string());
            }
            Ok(render_float(*f as f64, conv))
        }
        integer => {
            if !conv.kind.is_integer() {
                return Err("integer value needs an integer conversion".to_string());
            }
            Ok(render_int(integer.as_i64().unwrap_or(0), conv))
        }
    }
}

/// Coerce to a C `int` argument and apply `h`/`hh` narrowing.
fn signed_argument(raw: i64, length: LengthModifier) -> i64 {
    let int = raw as i32;
    match length {
        LengthModifier::Char => int as i8 as i64,
        LengthModifier::Short => int as i16 as i64,
        LengthModifier::Int | LengthModifier::Long => int as i64,
    }
}

/// Coerce to a C `unsigned int` argument and apply `h`/`hh` narrowing.
fn unsigned_argument(raw: i64, length: LengthModifier) -> u64 {
    let uint = raw as u32;
    match length {
        LengthModifier::Char => uint as u8 as u64,
        LengthModifier::Short => uint as u16 as u64,
        LengthModifier::Int | LengthModifier::Long => uint as u64,
    }
}

fn render_int(raw: i64, conv: &Conversion) -> String {
    let flags = conv.flags;
    let (negative, magnitude) = match conv.kind {
        ConversionKind::Signed => {
            let v = signed_argument(raw, conv.length);
            (v < 0, v.unsigned_abs())
        }
        _ => (false, unsigned_argument(raw, conv.length)),
    };

    let mut digits = match conv.kind {
        ConversionKind::HexLower => format!("{magnitude:x}"),
        ConversionKind::HexUpper => format!("{magnitude:X}"),
        _ => magnitude.to_string(),
    };
    if let Some(precision) = conv.precision {
        if precision == 0 && magnitude == 0 {
            digits.clear();
        } else if digits.len() < precision {
            digits = format!("{}{digits}", "0".repeat(precision - digits.len()));
        }
    }

    let prefix = match conv.kind {
        ConversionKind::Signed if negative => "-",
        ConversionKind::Signed if flags.plus_sign => "+",
        ConversionKind::Signed if flags.space_sign => " ",
        ConversionKind::HexLower if flags.alternate && magnitude != 0 => "0x",
        ConversionKind::HexUpper if flags.alternate && magnitude != 0 => "0X",
        _ => "",
    };

    // Precision on an integer conversion disables zero padding.
    let zero_pad = flags.zero_pad && !flags.left_align && conv.precision.is_none();
    pad(prefix, &digits, conv.width, flags.left_align, zero_pad)
}

fn render_float(value: f64, conv: &Conversion) -> String {
    let flags = conv.flags;
    let upper = conv.kind == ConversionKind::FixedUpper;
    let sign = if value.is_sign_negative() && !value.is_nan() {
        "-"
    } else if flags.plus_sign {
        "+"
    } else if flags.space_sign {
        " "
    } else {
        ""
    };

    if !value.is_finite() {
        let text = match (value.is_nan(), upper) {
            (true, false) => "nan",
            (true, true) => "NAN",
            (false, false) => "inf",
            (false, true) => "INF",
        };
        return pad(sign, text, conv.width, flags.left_align, false);
    }

    let precision = conv.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
    let mut body = format!("{:.*}", precision, value.abs());
    if precision == 0 && flags.alternate {
        body.push('.');
    }
    let zero_pad = flags.zero_pad && !flags.left_align;
    pad(sign, &body, conv.width, flags.left_align, zero_pad)
}

fn render_str(value: &str, conv: &Conversion) -> String {
    let text: String = match conv.precision {
        Some(max) => value.chars().take(max).collect(),
        None => value.to_string(),
    };
    pad("", &text, conv.width, conv.flags.left_align, false)
}

/// Apply the field width: spaces on the left, spaces on the right when left
/// aligned, or zeros between the sign/prefix and the body.
fn pad(prefix: &str, body: &str, width: Option<usize>, left_align: bool, zero_pad: bool) -> String {
    let len = prefix.chars().count() + body.chars().count();
    let fill = width.unwrap_or(0).saturating_sub(len);
    if fill == 0 {
        return format!("{prefix}{body}");
    }
    if left_align {
        format!("{prefix}{body}{}", " ".repeat(fill))
    } else if zero_pad {
        format!("{prefix}{}{body}", "0".repeat(fill))
    } else {
        format!("{}{prefix}{body}", " ".repeat(fill))
    }
}
