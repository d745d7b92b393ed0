// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven record decoder.
//!
//! Walks a [`ParamSchema`] field by field over one record payload. Runs of
//! consecutive bit-packed fields share a carrier integer: the first field of
//! a run reads the carrier, later fields slice further bits out of it, and
//! any non-bit-packed field ends the run.

use crate::core::{DecodedRecord, ParamError, ParamValue, Result};
use crate::schema::{FieldDescriptor, FieldType, ParamSchema};

use super::cursor::RecordCursor;

/// Carrier state of the current bit-packed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct BitPackState {
    /// Carrier value, present while a run is open
    carrier: Option<u32>,
    /// Bits of the carrier already consumed
    bit_offset: u32,
}

impl BitPackState {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Extract `width` bits starting `bit_offset` bits above the carrier's LSB.
///
/// Bits past the top of the 32-bit carrier read as zero.
fn extract_bits(carrier: u32, bit_offset: u32, width: u32) -> u32 {
    match u64::BITS.checked_sub(width + bit_offset) {
        Some(left) => ((carrier as u64) << left >> (u64::BITS - width)) as u32,
        None => 0,
    }
}

/// Decodes record payloads with a fixed schema.
pub struct RecordDecoder<'s> {
    schema: &'s ParamSchema,
}

impl<'s> RecordDecoder<'s> {
    /// Create a decoder for `schema`.
    pub fn new(schema: &'s ParamSchema) -> Self {
        Self { schema }
    }

    /// The schema records are decoded with.
    pub fn schema(&self) -> &ParamSchema {
        self.schema
    }

    /// Decode one record payload into one value per schema field.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::CorruptRecord`] naming the record, the field and
    /// the payload offset when a read runs past the end of `data`, and
    /// [`ParamError::Schema`] for a bit-packed field the schema should not
    /// have admitted.
    pub fn decode(&self, record_id: i64, data: &[u8]) -> Result<DecodedRecord> {
        let mut cursor = RecordCursor::new(data, !self.schema.is_big_endian);
        let mut bits = BitPackState::default();
        let mut values = Vec::with_capacity(self.schema.fields.len());

        for (index, field) in self.schema.fields.iter().enumerate() {
            let offset = cursor.position();
            let value = decode_field(field, &mut cursor, &mut bits).map_err(|e| match e {
                ParamError::Schema { .. } => e,
                other => ParamError::corrupt_record(
                    record_id,
                    index,
                    &field.internal_name,
                    offset,
                    other.to_string(),
                ),
            })?;
            values.push(value);
        }

        if !cursor.is_at_end() {
            tracing::trace!(
                record = record_id,
                unread = cursor.remaining(),
                "schema does not cover the whole record"
            );
        }

        Ok(DecodedRecord::new(record_id, values))
    }
}

fn decode_field(
    field: &FieldDescriptor,
    cursor: &mut RecordCursor<'_>,
    bits: &mut BitPackState,
) -> Result<ParamValue> {
    if let Some(width) = field.bit_width {
        return decode_bit_field(field, width, cursor, bits);
    }
    bits.reset();

    Ok(match field.field_type {
        FieldType::S8 => ParamValue::Int8(cursor.read_i8()?),
        FieldType::U8 => ParamValue::UInt8(cursor.read_u8()?),
        FieldType::S16 => ParamValue::Int16(cursor.read_i16()?),
        FieldType::U16 => ParamValue::UInt16(cursor.read_u16()?),
        FieldType::S32 => ParamValue::Int32(cursor.read_i32()?),
        FieldType::U32 => ParamValue::UInt32(cursor.read_u32()?),
        FieldType::F32 => ParamValue::Float32(cursor.read_f32()?),
        FieldType::Dummy8 => {
            cursor.skip(field.array_length.unwrap_or(1))?;
            ParamValue::Padding
        }
        FieldType::FixStr => {
            ParamValue::String(cursor.read_fixed_ascii(field.array_length.unwrap_or(0))?)
        }
        FieldType::FixStrW => {
            ParamValue::String(cursor.read_fixed_utf16(field.array_length.unwrap_or(0))?)
        }
    })
}

fn decode_bit_field(
    field: &FieldDescriptor,
    width: u32,
    cursor: &mut RecordCursor<'_>,
    bits: &mut BitPackState,
) -> Result<ParamValue> {
    let keyword = field.field_type.keyword();
    let Some(carrier_bits) = field.field_type.carrier_bits() else {
        return Err(ParamError::schema(
            &field.internal_name,
            format!("type {keyword} cannot be bit-packed"),
        ));
    };
    if width == 0 || width > carrier_bits {
        return Err(ParamError::schema(
            &field.internal_name,
            format!("bit width {width} out of range 1..={carrier_bits} for {keyword}"),
        ));
    }

    // A run keeps its opening carrier even if later fields name another type.
    let carrier = match bits.carrier {
        Some(carrier) => carrier,
        None => {
            let carrier = match carrier_bits {
                8 => cursor.read_u8()? as u32,
                16 => cursor.read_u16()? as u32,
                _ => cursor.read_u32()?,
            };
            bits.carrier = Some(carrier);
            bits.bit_offset = 0;
            carrier
        }
    };

    let raw = extract_bits(carrier, bits.bit_offset, width);
    bits.bit_offset += width;

    Ok(match field.field_type {
        FieldType::U16 => ParamValue::UInt16(raw as u16),
        FieldType::U32 => ParamValue::UInt32(raw),
        _ => ParamValue::UInt8(raw as u8),
    })
}
