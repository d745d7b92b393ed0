// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

mod settings;

use std::path::Path;

use regex::Regex;

pub use anyhow::Result as CliResult;
pub use settings::Settings;
pub type Result<T = ()> = CliResult<T>;

/// Compile an optional field-name filter.
pub fn field_filter(pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern
        .map(|p| Regex::new(p).map_err(|e| anyhow::anyhow!("Invalid --fields pattern '{p}': {e}")))
        .transpose()
}

/// Container file name used as the name-list key.
pub fn container_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Render bytes as space-separated hex pairs.
pub fn hex_bytes(bytes: &[u8]) -> String {
    let encoded = hex::encode_upper(bytes);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / 2);
    for (i, pair) in encoded.as_bytes().chunks(2).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&String::from_utf8_lossy(pair));
    }
    out
}

/// Quote a CSV cell when it contains a separator, quote or line break.
pub fn csv_cell(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
