// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Optional TOML settings shared by the commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use paramcodec::GameVariant;
use serde::Deserialize;
use tracing::debug;

use super::Result;

/// Settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "paramcodec.toml";

/// Values a command uses when the matching flag is not given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Root of the schema and name-list layout
    pub paramdex_root: Option<PathBuf>,
    /// Game whose schemas and names are used
    pub game: Option<GameVariant>,
    /// Worker threads for record decoding
    pub jobs: Option<usize>,
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing settings file {}", path.display()))
    }

    /// Load an explicitly named file, or the default file when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let default = Path::new(DEFAULT_SETTINGS_FILE);
        if default.is_file() {
            debug!(path = %default.display(), "loading settings");
            return Self::from_file(default);
        }
        Ok(Self::default())
    }

    /// Overlay command-line values; given flags win.
    pub fn merge(&self, other: Settings) -> Settings {
        Settings {
            paramdex_root: other.paramdex_root.or_else(|| self.paramdex_root.clone()),
            game: other.game.or(self.game),
            jobs: other.jobs.or(self.jobs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings() {
        let settings = Settings::from_toml(
            r#"
            paramdex_root = "/data/Paramdex"
            game = "DS3"
            jobs = 4
            "#,
        )
        .unwrap();
        assert_eq!(settings.paramdex_root, Some(PathBuf::from("/data/Paramdex")));
        assert_eq!(settings.game, Some(GameVariant::DarkSouls3));
        assert_eq!(settings.jobs, Some(4));
    }

    #[test]
    fn test_empty_settings() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Settings::from_toml("threads = 2").is_err());
    }

    #[test]
    fn test_merge_prefers_flags() {
        let file = Settings {
            paramdex_root: Some(PathBuf::from("/a")),
            game: Some(GameVariant::Sekiro),
            jobs: Some(2),
        };
        let flags = Settings {
            game: Some(GameVariant::EldenRing),
            ..Settings::default()
        };
        let merged = file.merge(flags);
        assert_eq!(merged.paramdex_root, Some(PathBuf::from("/a")));
        assert_eq!(merged.game, Some(GameVariant::EldenRing));
        assert_eq!(merged.jobs, Some(2));
    }
}
