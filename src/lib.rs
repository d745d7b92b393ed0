// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Paramcodec
//!
//! Decoder for PARAM game-data containers and their PARAMDEF schemas.
//!
//! A container holds fixed-size opaque records keyed by id plus the name of
//! the struct type they follow. The matching PARAMDEF document describes
//! each field in a compact definition language (`u8 isEnabled:1`,
//! `fixstr name[32]`, ...) together with a printf-style display format.
//!
//! ## Architecture
//!
//! - `io/formats/param/` - Container header, directory and record parsing
//! - `schema/` - Field definitions, PARAMDEF documents, schema lookup
//! - `encoding/param/` - Schema-driven record decoding, bit-packed runs
//! - `format/` - printf-compatible value rendering
//! - `names/` - Record name lists and their cache
//!
//! ## Example: Decoding a container
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use paramcodec::{DirectorySchemaProvider, GameVariant, ParamContainer, SchemaProvider};
//!
//! let container = ParamContainer::open("EquipParamWeapon.param")?;
//! let provider = DirectorySchemaProvider::new("Paramdex");
//! if let Some(schema) = provider.find_schema(GameVariant::DarkSouls3, &container.struct_type_name)? {
//!     for record in container.decode(&schema)? {
//!         let shown = paramcodec::format_record(&schema, &record)?;
//!         println!("{}: {}", record.id, shown.join(", "));
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{DecodedRecord, GameVariant, ParamError, ParamValue, Registry, Result};

// Record decoding
pub mod encoding;

pub use encoding::param::{decode_record, RecordDecoder};

// Display formatting
pub mod format;

pub use format::{format_record, format_value};

// Container I/O
pub mod io;

pub use io::formats::param::{DirectoryEntry, ParamContainer, ParamHeader, ParamRecord};

// Name lists
pub mod names;

pub use names::{display_label, DirectoryNameSource, NameCache, NameListSource};

// Schema parsing and lookup
pub mod schema;

pub use schema::{
    DirectorySchemaProvider, FieldDescriptor, FieldType, ParamSchema, SchemaProvider,
    StaticSchemaProvider,
};
