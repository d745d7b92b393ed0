// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for PARAM containers.

pub mod formats;

pub use formats::param::{DirectoryEntry, ParamContainer, ParamHeader, ParamRecord};
