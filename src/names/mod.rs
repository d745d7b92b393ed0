// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record name lookup from sidecar name lists.
//!
//! A name list is plain text with one `<decimal id><separator><name>` entry
//! per line. Lists are located by a [`NameListSource`] and parsed at most
//! once per container file name by a caller-owned [`NameCache`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{GameVariant, Registry, Result};
use crate::schema::provider::is_plain_file_stem;

/// Parsed id to name mapping of one container.
pub type NameList = HashMap<i64, String>;

/// Supplies the raw text of a container's name list.
pub trait NameListSource: Send + Sync {
    /// Load the list for `container_file_name`, or `None` if there is none.
    fn load(&self, game: GameVariant, container_file_name: &str) -> Result<Option<String>>;
}

/// Reads name lists from `<root>/<game folder>/Names/<file stem>.txt`.
pub struct DirectoryNameSource {
    root: PathBuf,
}

impl DirectoryNameSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the list for a container file name, which may include
    /// leading directories and an extension.
    pub fn names_path(&self, game: GameVariant, container_file_name: &str) -> Option<PathBuf> {
        let stem = Path::new(container_file_name).file_stem()?.to_str()?;
        if !is_plain_file_stem(stem) {
            return None;
        }
        Some(
            self.root
                .join(game.folder_code())
                .join("Names")
                .join(format!("{stem}.txt")),
        )
    }
}

impl NameListSource for DirectoryNameSource {
    fn load(&self, game: GameVariant, container_file_name: &str) -> Result<Option<String>> {
        let Some(path) = self.names_path(game, container_file_name) else {
            return Ok(None);
        };
        if !path.is_file() {
            debug!(path = %path.display(), "no name list");
            return Ok(None);
        }
        let bytes = std::fs::read(&path)?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(Some(text.trim_start_matches('\u{feff}').to_string()))
    }
}

/// Parse name list text.
///
/// Blank lines are skipped. Lines that do not start with a decimal id
/// followed by a separator character are skipped with a warning. Later
/// entries for the same id replace earlier ones.
pub fn parse_name_list(text: &str) -> NameList {
    let mut names = NameList::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let digits_end = line
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(line.len());
        let mut rest = line[digits_end..].chars();
        let separator = rest.next();
        let id = line[..digits_end].parse::<i64>();

        match (id, separator) {
            (Ok(id), Some(_)) => {
                names.insert(id, rest.as_str().to_string());
            }
            _ => {
                warn!(line = index + 1, text = line, "skipping malformed name list line");
            }
        }
    }
    names
}

/// Caller-owned cache of parsed name lists keyed by container file name.
///
/// The first lookup for a file name loads and parses its list under a
/// lock; every later lookup shares the parsed map. A missing list is cached
/// as empty.
#[derive(Default)]
pub struct NameCache {
    lists: Registry<NameList>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the parsed list for a container file, loading it on first use.
    pub fn names(
        &self,
        source: &dyn NameListSource,
        game: GameVariant,
        container_file_name: &str,
    ) -> Result<Arc<NameList>> {
        self.lists.get_or_try_insert_with(container_file_name, || {
            let names = source
                .load(game, container_file_name)?
                .map(|text| parse_name_list(&text))
                .unwrap_or_default();
            debug!(
                file = container_file_name,
                entries = names.len(),
                "loaded name list"
            );
            Ok(names)
        })
    }

    /// Look up the name of record `id` of a container file.
    pub fn resolve(
        &self,
        source: &dyn NameListSource,
        game: GameVariant,
        container_file_name: &str,
        id: i64,
    ) -> Result<Option<String>> {
        Ok(self
            .names(source, game, container_file_name)?
            .get(&id)
            .cloned())
    }

    /// Forget the list of one container file. Returns whether it was cached.
    pub fn invalidate(&self, container_file_name: &str) -> bool {
        self.lists.remove(container_file_name)
    }

    /// Forget every cached list.
    pub fn clear(&self) {
        self.lists.clear();
    }

    /// Number of cached lists.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

/// Label for a record: its name, or the bare id when it has none.
pub fn display_label(id: i64, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => id.to_string(),
    }
}
