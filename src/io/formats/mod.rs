// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Container format implementations.
//!
//! - [`param`]: PARAM game-data containers

pub mod param;
