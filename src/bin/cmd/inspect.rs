// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show container header fields and record ids.

use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use crate::common::Result;
use paramcodec::ParamContainer;

/// Show container header fields and record ids.
#[derive(Args, Clone, Debug)]
pub struct InspectCmd {
    /// Input container
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print as JSON
    #[arg(long)]
    json: bool,

    /// Omit the record id list
    #[arg(long)]
    no_ids: bool,
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        let container = ParamContainer::open(&self.input)?;

        if self.json {
            let ids: Vec<i64> = if self.no_ids {
                Vec::new()
            } else {
                container.ids().collect()
            };
            let report = json!({
                "file": self.input.display().to_string(),
                "struct_type": container.struct_type_name,
                "format_version": container.format_version,
                "type_tags": [container.type_tag_1, container.type_tag_2],
                "record_count": container.record_count(),
                "record_byte_size": container.record_byte_size,
                "header": container.header,
                "ids": ids,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        let header = &container.header;
        println!("=== {} ===", self.input.display());
        println!("Struct type: {}", container.struct_type_name);
        println!("Format version: {}", container.format_version);
        println!(
            "Type tags: {}, {}",
            container.type_tag_1, container.type_tag_2
        );
        println!(
            "Records: {} x {} bytes",
            container.record_count(),
            container.record_byte_size
        );
        println!(
            "Declared size: {} / {}",
            header.file_size, header.file_size_2
        );
        println!("Data offset: {}", header.data_offset);
        let unknown: Vec<String> = header
            .unknown
            .iter()
            .map(|w| format!("{:#010x}", *w as u32))
            .collect();
        println!(
            "Unknown words: {:#06x} {}",
            header.unknown_short as u16,
            unknown.join(" ")
        );

        if !self.no_ids {
            println!();
            println!("Record ids:");
            for id in container.ids() {
                println!("  {id}");
            }
        }

        Ok(())
    }
}
