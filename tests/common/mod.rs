// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const HEADER_SIZE: usize = 64;
pub const DIRECTORY_ENTRY_SIZE: usize = 24;

// ============================================================================
// Synthetic containers
// ============================================================================

/// Builds PARAM container bytes in memory.
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    struct_type_name: String,
    format_version: i32,
    type_tags: (i16, i16),
    records: Vec<(i64, Vec<u8>)>,
    declared_sizes: Option<(i32, i32)>,
    count_override: Option<i16>,
}

impl ContainerBuilder {
    pub fn new(struct_type_name: &str) -> Self {
        Self {
            struct_type_name: struct_type_name.to_string(),
            format_version: 1,
            type_tags: (0, 0),
            records: Vec::new(),
            declared_sizes: None,
            count_override: None,
        }
    }

    pub fn format_version(mut self, version: i32) -> Self {
        self.format_version = version;
        self
    }

    pub fn type_tags(mut self, tag_1: i16, tag_2: i16) -> Self {
        self.type_tags = (tag_1, tag_2);
        self
    }

    pub fn record(mut self, id: i64, payload: Vec<u8>) -> Self {
        self.records.push((id, payload));
        self
    }

    /// Override both declared size fields.
    pub fn declared_sizes(mut self, primary: i32, secondary: i32) -> Self {
        self.declared_sizes = Some((primary, secondary));
        self
    }

    /// Override the header record count.
    pub fn record_count(mut self, count: i16) -> Self {
        self.count_override = Some(count);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let count = self.records.len();
        let payload_bytes: usize = self.records.iter().map(|(_, p)| p.len()).sum();
        let size = (HEADER_SIZE + count * DIRECTORY_ENTRY_SIZE + payload_bytes) as i32;
        let (primary, secondary) = self.declared_sizes.unwrap_or((size, size));
        let header_count = self.count_override.unwrap_or(count as i16);

        let mut buf = Vec::new();
        buf.extend_from_slice(&primary.to_le_bytes()); // 0x00
        buf.extend_from_slice(&0i16.to_le_bytes()); // 0x04
        buf.extend_from_slice(&self.type_tags.0.to_le_bytes()); // 0x06
        buf.extend_from_slice(&self.type_tags.1.to_le_bytes()); // 0x08
        buf.extend_from_slice(&header_count.to_le_bytes()); // 0x0A
        buf.extend_from_slice(&0i32.to_le_bytes()); // 0x0C
        buf.extend_from_slice(&secondary.to_le_bytes()); // 0x10
        for _ in 0..6 {
            buf.extend_from_slice(&0i32.to_le_bytes()); // 0x14..0x2C
        }
        buf.extend_from_slice(&self.format_version.to_le_bytes()); // 0x2C
        let data_offset = (HEADER_SIZE + count * DIRECTORY_ENTRY_SIZE) as i32;
        buf.extend_from_slice(&data_offset.to_le_bytes()); // 0x30
        for _ in 0..3 {
            buf.extend_from_slice(&0i32.to_le_bytes()); // 0x34..0x40
        }
        assert_eq!(buf.len(), HEADER_SIZE);

        let mut offset = data_offset as u64;
        for (id, payload) in &self.records {
            buf.extend_from_slice(&id.to_le_bytes());
            buf.extend_from_slice(&offset.to_le_bytes());
            buf.extend_from_slice(&0u64.to_le_bytes());
            offset += payload.len() as u64;
        }
        for (_, payload) in &self.records {
            buf.extend_from_slice(payload);
        }
        buf.extend_from_slice(self.struct_type_name.as_bytes());
        buf.push(0);
        buf
    }
}

/// Payload for the TEST_PARAM layout: `u32 id`, `u8 lo:4`, `u8 hi:4`,
/// `dummy8 pad[3]`.
pub fn test_param_payload(value: u32, lo: u8, hi: u8) -> Vec<u8> {
    let mut payload = value.to_le_bytes().to_vec();
    payload.push((hi << 4) | (lo & 0x0F));
    payload.extend_from_slice(&[0, 0, 0]);
    payload
}

/// The two-record TEST_PARAM container.
pub fn test_param_container() -> Vec<u8> {
    ContainerBuilder::new("TEST_PARAM")
        .format_version(3)
        .type_tags(1, 2)
        .record(100, test_param_payload(1000, 0b0100, 0b1011))
        .record(200, test_param_payload(u32::MAX, 15, 0))
        .build()
}

// ============================================================================
// PARAMDEF documents
// ============================================================================

pub const TEST_PARAMDEF: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<PARAMDEF XmlVersion="2">
  <ParamType>TEST_PARAM</ParamType>
  <DataVersion>1</DataVersion>
  <BigEndian>False</BigEndian>
  <Unicode>True</Unicode>
  <FormatVersion>203</FormatVersion>
  <Fields>
    <Field Def="u32 value">
      <DisplayName>Value</DisplayName>
      <DisplayFormat>%d</DisplayFormat>
    </Field>
    <Field Def="u8 lo:4">
      <DisplayName>Low Nibble</DisplayName>
    </Field>
    <Field Def="u8 hi:4">
      <DisplayFormat>%02X</DisplayFormat>
    </Field>
    <Field Def="dummy8 pad[3]" />
  </Fields>
</PARAMDEF>
"#;

// ============================================================================
// Temporary directories
// ============================================================================

/// Temporary directory removed on drop.
pub struct TempDir(PathBuf);

impl TempDir {
    pub fn new(label: &str) -> Self {
        let random = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let thread_id = format!("{:?}", std::thread::current().id())
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>();
        let dir = std::env::temp_dir().join(format!(
            "paramcodec_{label}_{}_{thread_id}_{random}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.0.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}
