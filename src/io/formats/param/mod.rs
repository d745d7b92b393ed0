// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! PARAM container format.
//!
//! Parsing ([`parser`]) is independent of any schema: a container yields
//! opaque records keyed by id. Decoding applies a [`ParamSchema`] to those
//! records, either stopping at the first corrupt record or reporting one
//! result per record.

pub mod constants;
pub mod parser;

pub use parser::{DirectoryEntry, ParamContainer, ParamHeader, ParamRecord};

use rayon::prelude::*;
use tracing::warn;

use crate::core::{DecodedRecord, Result};
use crate::encoding::param::RecordDecoder;
use crate::schema::ParamSchema;

impl ParamRecord {
    /// Decode this record's payload with `schema`.
    pub fn decode(&self, schema: &ParamSchema) -> Result<DecodedRecord> {
        RecordDecoder::new(schema).decode(self.id, &self.raw_data)
    }
}

impl ParamContainer {
    /// Decode every record, failing on the first corrupt one.
    pub fn decode(&self, schema: &ParamSchema) -> Result<Vec<DecodedRecord>> {
        self.check_schema_size(schema);
        let decoder = RecordDecoder::new(schema);
        self.records
            .iter()
            .map(|r| decoder.decode(r.id, &r.raw_data))
            .collect()
    }

    /// Decode every record independently, one result per record.
    pub fn decode_each(&self, schema: &ParamSchema) -> Vec<Result<DecodedRecord>> {
        self.check_schema_size(schema);
        let decoder = RecordDecoder::new(schema);
        self.records
            .iter()
            .map(|r| decoder.decode(r.id, &r.raw_data))
            .collect()
    }

    /// [`ParamContainer::decode_each`] spread across the current rayon pool.
    ///
    /// Results keep on-disk record order.
    pub fn decode_parallel(&self, schema: &ParamSchema) -> Vec<Result<DecodedRecord>> {
        self.check_schema_size(schema);
        self.records
            .par_iter()
            .map(|r| RecordDecoder::new(schema).decode(r.id, &r.raw_data))
            .collect()
    }

    fn check_schema_size(&self, schema: &ParamSchema) {
        let expected = schema.record_size();
        if expected != self.record_byte_size {
            warn!(
                struct_type = %self.struct_type_name,
                schema_bytes = expected,
                record_bytes = self.record_byte_size,
                "schema size does not match container record size"
            );
        }
    }
}
