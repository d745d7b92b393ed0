// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record payload decoding.
//!
//! - [`param`] - Schema-driven PARAM record decoding

pub mod param;

pub use param::{decode_record, RecordCursor, RecordDecoder};
