// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema parser implementations.
//!
//! - [`def_parser`] - the one-line field definition mini-language
//! - [`paramdef`] - PARAMDEF XML documents built from those definitions

pub mod def_parser;
pub mod paramdef;

pub use def_parser::parse_definition;
pub use paramdef::{load_paramdef, parse_paramdef};
