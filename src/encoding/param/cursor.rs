// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Byte cursor over one record's payload.
//!
//! PARAM records are packed without alignment: every read starts exactly
//! where the previous one ended. Multi-byte values use the byte order the
//! schema declares (little-endian unless the schema says otherwise).

use crate::core::{ParamError, Result};

/// Cursor that tracks the read position inside a record payload.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use paramcodec::encoding::param::RecordCursor;
///
/// let data = [0x2A, 0x00, 0x00, 0x00, 0x07];
/// let mut cursor = RecordCursor::new(&data, true);
/// assert_eq!(cursor.read_u32()?, 42);
/// assert_eq!(cursor.read_u8()?, 7);
/// assert!(cursor.is_at_end());
/// # Ok(())
/// # }
/// ```
pub struct RecordCursor<'a> {
    /// The record payload
    data: &'a [u8],
    /// Current read position
    offset: usize,
    /// Whether multi-byte values are little endian
    little_endian: bool,
}

impl<'a> RecordCursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8], little_endian: bool) -> Self {
        Self {
            data,
            offset: 0,
            little_endian,
        }
    }

    /// Get the current position relative to the payload start.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of payload.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Read a fixed number of bytes into an array.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a u16 value.
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_array::<2>()?;
        Ok(if self.little_endian {
            u16::from_le_bytes(bytes)
        } else {
            u16::from_be_bytes(bytes)
        })
    }

    /// Read an i16 value.
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    /// Read a u32 value.
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_array::<4>()?;
        Ok(if self.little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        })
    }

    /// Read an i32 value.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read an f32 value.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Read a byte slice.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(ParamError::truncated(
                "record payload",
                count,
                self.remaining(),
                self.offset as u64,
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Skip bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Read a fixed-width single-byte string of `len` bytes.
    ///
    /// The string ends at the first NUL; bytes outside 7-bit ASCII decode
    /// as `?`.
    pub fn read_fixed_ascii(&mut self, len: usize) -> Result<String> {
        let bytes = self.read_bytes(len)?;
        Ok(bytes
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| if b.is_ascii() { b as char } else { '?' })
            .collect())
    }

    /// Read a fixed-width UTF-16 string of `len` code units.
    ///
    /// The string ends at the first NUL unit; unpaired surrogates decode as
    /// U+FFFD.
    pub fn read_fixed_utf16(&mut self, len: usize) -> Result<String> {
        let byte_len = len.checked_mul(2).ok_or_else(|| {
            ParamError::truncated("record payload", usize::MAX, self.remaining(), self.offset as u64)
        })?;
        let bytes = self.read_bytes(byte_len)?;
        let units = bytes.chunks_exact(2).map(|pair| {
            let pair = [pair[0], pair[1]];
            if self.little_endian {
                u16::from_le_bytes(pair)
            } else {
                u16::from_be_bytes(pair)
            }
        });
        Ok(char::decode_utf16(units.take_while(|&u| u != 0))
            .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect())
    }
}
