// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format descriptors for PARAM records.
//!
//! This module provides:
//! - The descriptor model ([`ParamSchema`], [`FieldDescriptor`], [`FieldType`])
//! - Parsing of compact field definitions and PARAMDEF documents
//! - Schema lookup by game and struct type name

pub mod ast;
pub mod parser;
pub mod provider;

pub use ast::{EditFlags, FieldDescriptor, FieldType, ParamSchema};
pub use parser::{load_paramdef, parse_definition, parse_paramdef};
pub use provider::{DirectorySchemaProvider, SchemaProvider, StaticSchemaProvider};
