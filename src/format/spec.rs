// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Parsing of printf-style display format strings.

use std::iter::Peekable;
use std::str::Chars;

/// Conversion character of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// `%d` / `%i`
    Signed,
    /// `%u`
    Unsigned,
    /// `%x`
    HexLower,
    /// `%X`
    HexUpper,
    /// `%f`
    Fixed,
    /// `%F`
    FixedUpper,
    /// `%s`
    Str,
}

impl ConversionKind {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'd' | 'i' => ConversionKind::Signed,
            'u' => ConversionKind::Unsigned,
            'x' => ConversionKind::HexLower,
            'X' => ConversionKind::HexUpper,
            'f' => ConversionKind::Fixed,
            'F' => ConversionKind::FixedUpper,
            's' => ConversionKind::Str,
            _ => return None,
        })
    }

    /// Whether the conversion takes an integer argument.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ConversionKind::Signed
                | ConversionKind::Unsigned
                | ConversionKind::HexLower
                | ConversionKind::HexUpper
        )
    }

    /// Whether the conversion takes a floating-point argument.
    pub fn is_float(self) -> bool {
        matches!(self, ConversionKind::Fixed | ConversionKind::FixedUpper)
    }
}

/// Integer length modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthModifier {
    /// No modifier: `int` / `unsigned int`
    #[default]
    Int,
    /// `h`: `short`
    Short,
    /// `hh`: `char`
    Char,
    /// `l` or `ll`: accepted, no narrowing
    Long,
}

/// Flag characters of a directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub left_align: bool,
    pub plus_sign: bool,
    pub space_sign: bool,
    pub zero_pad: bool,
    pub alternate: bool,
}

/// One `%` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub flags: Flags,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub length: LengthModifier,
    pub kind: ConversionKind,
}

/// A parsed display format: literal text around at most one directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub prefix: String,
    pub conversion: Option<Conversion>,
    pub suffix: String,
}

impl FormatSpec {
    /// Parse a display format.
    ///
    /// `%%` is a literal percent sign anywhere in the text.
    pub fn parse(format: &str) -> std::result::Result<Self, String> {
        let mut chars = format.chars().peekable();
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut conversion = None;

        while let Some(c) = chars.next() {
            let out = if conversion.is_some() {
                &mut suffix
            } else {
                &mut prefix
            };
            if c != '%' {
                out.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                out.push('%');
                continue;
            }
            if conversion.is_some() {
                return Err("more than one conversion".to_string());
            }
            conversion = Some(parse_directive(&mut chars)?);
        }

        Ok(Self {
            prefix,
            conversion,
            suffix,
        })
    }
}

fn parse_directive(chars: &mut Peekable<Chars<'_>>) -> std::result::Result<Conversion, String> {
    let mut flags = Flags::default();
    while let Some(&c) = chars.peek() {
        match c {
            '-' => flags.left_align = true,
            '+' => flags.plus_sign = true,
            ' ' => flags.space_sign = true,
            '0' => flags.zero_pad = true,
            '#' => flags.alternate = true,
            _ => break,
        }
        chars.next();
    }

    if chars.peek() == Some(&'*') {
        return Err("'*' width is not supported".to_string());
    }
    let width = read_digits(chars)?;

    let mut precision = None;
    if chars.peek() == Some(&'.') {
        chars.next();
        if chars.peek() == Some(&'*') {
            return Err("'*' precision is not supported".to_string());
        }
        // A bare '.' means precision zero.
        precision = Some(read_digits(chars)?.unwrap_or(0));
    }

    let length = match chars.peek() {
        Some('h') => {
            chars.next();
            if chars.peek() == Some(&'h') {
                chars.next();
                LengthModifier::Char
            } else {
                LengthModifier::Short
            }
        }
        Some('l') => {
            chars.next();
            if chars.peek() == Some(&'l') {
                chars.next();
            }
            LengthModifier::Long
        }
        _ => LengthModifier::Int,
    };

    let kind = match chars.next() {
        Some(c) => ConversionKind::from_char(c)
            .ok_or_else(|| format!("unsupported conversion '%{c}'"))?,
        None => return Err("incomplete conversion at end of format".to_string()),
    };

    Ok(Conversion {
        flags,
        width,
        precision,
        length,
        kind,
    })
}

fn read_digits(chars: &mut Peekable<Chars<'_>>) -> std::result::Result<Option<usize>, String> {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    if digits.is_empty() {
        return Ok(None);
    }
    digits
        .parse()
        .map(Some)
        .map_err(|_| format!("field width '{digits}' is too large"))
}
