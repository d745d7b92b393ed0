// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod decode;
mod inspect;
mod schema;

pub use decode::DecodeCmd;
pub use inspect::InspectCmd;
pub use schema::SchemaCmd;
