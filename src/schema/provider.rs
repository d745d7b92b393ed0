// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema lookup for containers.
//!
//! A container only names its struct type; the matching format descriptor
//! lives outside the file. [`SchemaProvider`] is the seam where callers plug
//! in that lookup, and [`DirectorySchemaProvider`] implements the usual
//! on-disk layout `<root>/<game folder>/Defs/<struct type>.xml`.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{GameVariant, Registry, Result};
use crate::schema::ast::ParamSchema;
use crate::schema::parser::paramdef::load_paramdef;

/// Resolves `(game, struct type name)` to a format descriptor.
///
/// A missing descriptor is not an error: implementations return `Ok(None)`
/// and the container's records stay available undecoded.
pub trait SchemaProvider: Send + Sync {
    /// Find the schema for a container's struct type.
    fn find_schema(
        &self,
        game: GameVariant,
        struct_type_name: &str,
    ) -> Result<Option<Arc<ParamSchema>>>;
}

/// Loads PARAMDEF documents from a directory tree and caches them.
pub struct DirectorySchemaProvider {
    root: PathBuf,
    cache: Registry<ParamSchema>,
}

impl DirectorySchemaProvider {
    /// Create a provider rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Registry::new(),
        }
    }

    /// Path a schema for `struct_type_name` would be read from.
    ///
    /// Returns `None` for names that would escape the `Defs` directory.
    pub fn schema_path(&self, game: GameVariant, struct_type_name: &str) -> Option<PathBuf> {
        if !is_plain_file_stem(struct_type_name) {
            return None;
        }
        Some(
            self.root
                .join(game.folder_code())
                .join("Defs")
                .join(format!("{struct_type_name}.xml")),
        )
    }

    /// Drop every cached schema.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl SchemaProvider for DirectorySchemaProvider {
    fn find_schema(
        &self,
        game: GameVariant,
        struct_type_name: &str,
    ) -> Result<Option<Arc<ParamSchema>>> {
        let Some(path) = self.schema_path(game, struct_type_name) else {
            warn!(struct_type = struct_type_name, "struct type name is not a plain file name");
            return Ok(None);
        };
        if !path.is_file() {
            debug!(path = %path.display(), "no schema document");
            return Ok(None);
        }

        let key = format!("{}/{}", game.folder_code(), struct_type_name);
        let schema = self.cache.get_or_try_insert_with(&key, || {
            debug!(path = %path.display(), "loading schema document");
            load_paramdef(&path)
        })?;
        Ok(Some(schema))
    }
}

/// In-memory provider keyed by struct type name, ignoring the game.
#[derive(Default)]
pub struct StaticSchemaProvider {
    schemas: Registry<ParamSchema>,
}

impl StaticSchemaProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under its `param_type_name`.
    pub fn register(&self, schema: ParamSchema) -> Arc<ParamSchema> {
        let name = schema.param_type_name.clone();
        self.schemas.insert(name, schema)
    }

    /// Register a schema under an explicit struct type name.
    pub fn register_as(&self, struct_type_name: &str, schema: ParamSchema) -> Arc<ParamSchema> {
        self.schemas.insert(struct_type_name, schema)
    }
}

impl SchemaProvider for StaticSchemaProvider {
    fn find_schema(
        &self,
        _game: GameVariant,
        struct_type_name: &str,
    ) -> Result<Option<Arc<ParamSchema>>> {
        Ok(self.schemas.get(struct_type_name))
    }
}

pub(crate) fn is_plain_file_stem(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && !name.contains(':')
}
