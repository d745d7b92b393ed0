// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - show a parsed PARAMDEF document.

use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use crate::common::{field_filter, Result};
use paramcodec::schema::{load_paramdef, FieldDescriptor};

/// Show a parsed PARAMDEF document.
#[derive(Args, Clone, Debug)]
pub struct SchemaCmd {
    /// PARAMDEF XML document
    #[arg(value_name = "XML")]
    input: PathBuf,

    /// Only show fields whose internal name matches this regex
    #[arg(long, value_name = "REGEX")]
    fields: Option<String>,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

impl SchemaCmd {
    pub fn run(self) -> Result<()> {
        let schema = load_paramdef(&self.input)?;
        let filter = field_filter(self.fields.as_deref())?;
        let selected: Vec<(usize, &FieldDescriptor)> = schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| filter.as_ref().map_or(true, |re| re.is_match(&f.internal_name)))
            .collect();

        if self.json {
            let fields: Vec<_> = selected
                .iter()
                .map(|(index, f)| {
                    json!({
                        "index": index,
                        "definition": definition(f),
                        "display_name": f.display_name,
                        "display_format": f.display_format,
                        "enum": f.enum_reference,
                        "description": f.description,
                        "edit_flags": f.edit_flags.to_string(),
                        "minimum": f.minimum,
                        "maximum": f.maximum,
                        "increment": f.increment,
                        "sort_id": f.sort_key,
                        "default": f.default_value.as_ref().map(|v| v.to_json()),
                    })
                })
                .collect();
            let report = json!({
                "param_type": schema.param_type_name,
                "data_version": schema.data_version,
                "format_version": schema.format_version,
                "big_endian": schema.is_big_endian,
                "unicode": schema.is_unicode,
                "record_size": schema.record_size(),
                "fields": fields,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("=== {} ===", schema.param_type_name);
        println!(
            "Data version: {}  Format version: {}",
            schema.data_version, schema.format_version
        );
        println!(
            "Byte order: {}  Unicode: {}",
            if schema.is_big_endian { "big" } else { "little" },
            schema.is_unicode
        );
        println!(
            "Fields: {}  Record size: {} bytes",
            schema.fields.len(),
            schema.record_size()
        );
        println!();

        for (index, field) in selected {
            print!("  [{index:>3}] {}", definition(field));
            if field.display_name != field.internal_name {
                print!("  \"{}\"", field.display_name);
            }
            if !field.display_format.is_empty() {
                print!("  {}", field.display_format);
            }
            if let Some(enum_ref) = &field.enum_reference {
                print!("  enum={enum_ref}");
            }
            if !field.edit_flags.is_empty() {
                print!("  [{}]", field.edit_flags);
            }
            println!();
        }

        Ok(())
    }
}

/// Render a descriptor back in definition syntax.
fn definition(field: &FieldDescriptor) -> String {
    let mut text = format!("{} {}", field.field_type, field.internal_name);
    if let Some(bits) = field.bit_width {
        text.push_str(&format!(":{bits}"));
    }
    if let Some(len) = field.array_length {
        text.push_str(&format!("[{len}]"));
    }
    if let Some(default) = &field.default_value {
        if !default.is_padding() {
            text.push_str(&format!(" = {default}"));
        }
    }
    text
}
