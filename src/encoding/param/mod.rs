// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! PARAM record payload decoding.
//!
//! - [`cursor`] - Unaligned byte cursor honouring the schema byte order
//! - [`decoder`] - Field walker with bit-packed run handling

pub mod cursor;
pub mod decoder;

pub use cursor::RecordCursor;
pub use decoder::RecordDecoder;

use crate::core::{DecodedRecord, Result};
use crate::io::formats::param::ParamRecord;
use crate::schema::ParamSchema;

/// Decode one container record with `schema`.
pub fn decode_record(schema: &ParamSchema, record: &ParamRecord) -> Result<DecodedRecord> {
    RecordDecoder::new(schema).decode(record.id, &record.raw_data)
}
