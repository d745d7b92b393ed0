// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! PARAMDEF XML document loader.
//!
//! Reads the community PARAMDEF format:
//!
//! ```text
//! <PARAMDEF XmlVersion="2">
//!   <ParamType>EQUIP_PARAM_WEAPON_ST</ParamType>
//!   <DataVersion>1</DataVersion>
//!   <BigEndian>False</BigEndian>
//!   <Unicode>True</Unicode>
//!   <FormatVersion>203</FormatVersion>
//!   <Fields>
//!     <Field Def="s32 behaviorVariationId">
//!       <DisplayName>Behavior Variation ID</DisplayName>
//!       <EditFlags>Wrap</EditFlags>
//!     </Field>
//!   </Fields>
//! </PARAMDEF>
//! ```
//!
//! Loading is pure parse-from-document; which file applies to a container is
//! decided by a [`SchemaProvider`](crate::schema::SchemaProvider).

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::core::{ParamError, Result};
use crate::schema::ast::{EditFlags, FieldDescriptor, ParamSchema};
use crate::schema::parser::def_parser::parse_definition;

/// Element text of one document, as written.
#[derive(Debug, Default)]
struct ParamDefDocument {
    param_type: Option<String>,
    data_version: Option<String>,
    big_endian: Option<String>,
    unicode: Option<String>,
    format_version: Option<String>,
    version: Option<String>,
    fields: Vec<FieldNode>,
}

#[derive(Debug, Default)]
struct FieldNode {
    def: Option<String>,
    display_name: Option<String>,
    enum_reference: Option<String>,
    description: Option<String>,
    display_format: Option<String>,
    edit_flags: Option<String>,
    minimum: Option<String>,
    maximum: Option<String>,
    increment: Option<String>,
    sort_id: Option<String>,
}

impl ParamDefDocument {
    fn slot(&mut self, element: &str) -> Option<&mut Option<String>> {
        Some(match element {
            "ParamType" => &mut self.param_type,
            "DataVersion" => &mut self.data_version,
            "BigEndian" => &mut self.big_endian,
            "Unicode" => &mut self.unicode,
            "FormatVersion" => &mut self.format_version,
            "Version" => &mut self.version,
            _ => return None,
        })
    }
}

impl FieldNode {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let def = start
            .try_get_attribute("Def")
            .map_err(malformed)?
            .map(|attr| attr.unescape_value().map(|v| v.into_owned()))
            .transpose()
            .map_err(malformed)?;
        Ok(Self {
            def,
            ..Self::default()
        })
    }

    fn slot(&mut self, element: &str) -> Option<&mut Option<String>> {
        Some(match element {
            "DisplayName" => &mut self.display_name,
            "Enum" => &mut self.enum_reference,
            "Description" => &mut self.description,
            "DisplayFormat" => &mut self.display_format,
            "EditFlags" => &mut self.edit_flags,
            "Minimum" => &mut self.minimum,
            "Maximum" => &mut self.maximum,
            "Increment" => &mut self.increment,
            "SortID" => &mut self.sort_id,
            _ => return None,
        })
    }
}

fn malformed(error: impl std::fmt::Display) -> ParamError {
    ParamError::schema("PARAMDEF", format!("malformed document: {error}"))
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

/// Where an element sits in the document tree.
fn is_field(path: &[String]) -> bool {
    path.len() == 3 && path[1] == "Fields" && path[2] == "Field"
}

/// Collect element text without trimming so display formats keep their
/// literal whitespace.
fn read_document(xml: &str) -> Result<ParamDefDocument> {
    let mut reader = Reader::from_str(xml);
    let mut doc = ParamDefDocument::default();
    let mut field: Option<FieldNode> = None;
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => {
                path.push(element_name(&start));
                if is_field(&path) {
                    field = Some(FieldNode::from_start(&start)?);
                }
                text.clear();
            }
            Event::Empty(start) => {
                path.push(element_name(&start));
                if is_field(&path) {
                    doc.fields.push(FieldNode::from_start(&start)?);
                } else {
                    store(&mut doc, field.as_mut(), &path, String::new());
                }
                path.pop();
                text.clear();
            }
            Event::Text(content) => text.push_str(&content.unescape().map_err(malformed)?),
            Event::CData(content) => text.push_str(&String::from_utf8_lossy(&content)),
            Event::End(_) => {
                if is_field(&path) {
                    if let Some(node) = field.take() {
                        doc.fields.push(node);
                    }
                } else {
                    store(&mut doc, field.as_mut(), &path, std::mem::take(&mut text));
                }
                path.pop();
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = path.last() {
        return Err(malformed(format!("unexpected end of document inside <{open}>")));
    }
    Ok(doc)
}

/// Record the text of a closed leaf element if it is one the loader reads.
fn store(doc: &mut ParamDefDocument, field: Option<&mut FieldNode>, path: &[String], text: String) {
    let slot = match (path.len(), field) {
        (2, _) => doc.slot(&path[1]),
        (4, Some(node)) if is_field(&path[..3]) => node.slot(&path[3]),
        _ => None,
    };
    if let Some(slot) = slot {
        *slot = Some(text);
    }
}

/// Parse a PARAMDEF document from its XML text.
pub fn parse_paramdef(xml: &str) -> Result<ParamSchema> {
    let xml = xml.trim_start_matches('\u{feff}');
    let doc = read_document(xml)?;

    let name = present(doc.param_type)
        .ok_or_else(|| ParamError::schema("PARAMDEF", "missing <ParamType>"))?;

    let mut schema = ParamSchema::new(name.clone());
    schema.data_version = match present(doc.data_version) {
        Some(text) => parse_scalar(&name, "DataVersion", &text)?,
        None => 0,
    };
    schema.is_big_endian = parse_bool(&name, "BigEndian", doc.big_endian)?;
    schema.is_unicode = parse_bool(&name, "Unicode", doc.unicode)?;
    let version_text = present(doc.format_version)
        .or_else(|| present(doc.version))
        .ok_or_else(|| ParamError::schema(&name, "missing <FormatVersion> or <Version>"))?;
    schema.format_version = parse_scalar(&name, "FormatVersion", &version_text)?;

    for (index, node) in doc.fields.into_iter().enumerate() {
        let field = build_field(&name, node).map_err(|e| match e {
            ParamError::Schema { schema, reason } => {
                ParamError::schema(&name, format!("field #{index} ({schema}): {reason}"))
            }
            other => other,
        })?;
        schema.fields.push(field);
    }

    debug!(
        param_type = %schema.param_type_name,
        fields = schema.fields.len(),
        format_version = schema.format_version,
        "parsed PARAMDEF"
    );
    Ok(schema)
}

/// Read and parse a PARAMDEF document from disk.
pub fn load_paramdef(path: impl AsRef<Path>) -> Result<ParamSchema> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path)?;
    parse_paramdef(&xml).map_err(|e| match e {
        ParamError::Schema { schema, reason } => {
            ParamError::schema(format!("{} ({})", schema, path.display()), reason)
        }
        other => other,
    })
}

fn build_field(schema_name: &str, node: FieldNode) -> Result<FieldDescriptor> {
    let def = node
        .def
        .ok_or_else(|| ParamError::schema(schema_name, "<Field> without a Def attribute"))?;
    let mut field = parse_definition(&def)?;

    // Text elements are taken as written; only a missing element falls back.
    if let Some(display_name) = node.display_name {
        field.display_name = display_name;
    }
    field.enum_reference = node.enum_reference;
    field.description = node.description;
    if let Some(format) = node.display_format {
        field.display_format = format;
    }
    if let Some(flags) = present(node.edit_flags) {
        field.edit_flags = EditFlags::parse(&flags)?;
    }
    let context = format!("{schema_name}.{}", field.internal_name);
    if let Some(text) = present(node.minimum) {
        field.minimum = parse_scalar(&context, "Minimum", &text)?;
    }
    if let Some(text) = present(node.maximum) {
        field.maximum = parse_scalar(&context, "Maximum", &text)?;
    }
    if let Some(text) = present(node.increment) {
        field.increment = parse_scalar(&context, "Increment", &text)?;
    }
    if let Some(text) = present(node.sort_id) {
        field.sort_key = parse_scalar(&context, "SortID", &text)?;
    }
    Ok(field)
}

/// Treat empty scalar elements the same as absent ones.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_scalar<T>(schema: &str, element: &str, text: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    text.trim()
        .parse()
        .map_err(|e| ParamError::schema(schema, format!("invalid <{element}> '{text}': {e}")))
}

fn parse_bool(schema: &str, element: &str, value: Option<String>) -> Result<bool> {
    let text = present(value)
        .ok_or_else(|| ParamError::schema(schema, format!("missing <{element}>")))?;
    if text.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParamError::schema(
            schema,
            format!("invalid <{element}> '{text}': expected True or False"),
        ))
    }
}
