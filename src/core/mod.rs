// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout paramcodec.
//!
//! This module provides the foundational types for the library:
//! - [`ParamError`] - Error taxonomy for container, schema, record and format failures
//! - [`ParamValue`] - Closed set of decoded field values
//! - [`Registry`] - Populate-once shared cache
//! - [`GameVariant`] - Game family identifier used by external lookups

pub mod error;
pub mod registry;
pub mod value;

pub use error::{ParamError, Result};
pub use registry::Registry;
pub use value::{DecodedRecord, ParamValue};

use serde::{Deserialize, Serialize};

/// Game family a container belongs to.
///
/// Schema documents and name lists are laid out per game under a short
/// folder code (see [`GameVariant::folder_code`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameVariant {
    /// Dark Souls II: Scholar of the First Sin
    #[serde(rename = "DS2S", alias = "ds2s", alias = "ds2")]
    DarkSouls2,
    /// Dark Souls III
    #[serde(rename = "DS3", alias = "ds3")]
    DarkSouls3,
    /// Bloodborne
    #[serde(rename = "BB", alias = "bb")]
    Bloodborne,
    /// Sekiro: Shadows Die Twice
    #[serde(rename = "SDT", alias = "sdt", alias = "sekiro")]
    Sekiro,
    /// Elden Ring
    #[serde(rename = "ER", alias = "er", alias = "eldenring")]
    EldenRing,
}

/// Error returned when parsing a `GameVariant` from string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGameVariantError {
    input: String,
}

impl std::fmt::Display for ParseGameVariantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown game '{}', expected one of DS2S, DS3, BB, SDT, ER",
            self.input
        )
    }
}

impl std::error::Error for ParseGameVariantError {}

impl std::str::FromStr for GameVariant {
    type Err = ParseGameVariantError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "ds2s" | "ds2" | "darksouls2" | "darksoulsii" => Ok(GameVariant::DarkSouls2),
            "ds3" | "darksouls3" | "darksoulsiii" => Ok(GameVariant::DarkSouls3),
            "bb" | "bloodborne" => Ok(GameVariant::Bloodborne),
            "sdt" | "sekiro" => Ok(GameVariant::Sekiro),
            "er" | "eldenring" => Ok(GameVariant::EldenRing),
            _ => Err(ParseGameVariantError {
                input: s.to_string(),
            }),
        }
    }
}

impl GameVariant {
    /// All supported game variants.
    pub const ALL: [GameVariant; 5] = [
        GameVariant::DarkSouls2,
        GameVariant::DarkSouls3,
        GameVariant::Bloodborne,
        GameVariant::Sekiro,
        GameVariant::EldenRing,
    ];

    /// Short folder code used by the schema and name-list directory layout.
    pub fn folder_code(&self) -> &'static str {
        match self {
            GameVariant::DarkSouls2 => "DS2S",
            GameVariant::DarkSouls3 => "DS3",
            GameVariant::Bloodborne => "BB",
            GameVariant::Sekiro => "SDT",
            GameVariant::EldenRing => "ER",
        }
    }
}

impl std::fmt::Display for GameVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.folder_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_variant_from_str() {
        assert_eq!("DS3".parse::<GameVariant>(), Ok(GameVariant::DarkSouls3));
        assert_eq!("ds3".parse::<GameVariant>(), Ok(GameVariant::DarkSouls3));
        assert_eq!(
            "Elden Ring".parse::<GameVariant>(),
            Ok(GameVariant::EldenRing)
        );
        assert_eq!("sekiro".parse::<GameVariant>(), Ok(GameVariant::Sekiro));
        assert_eq!("DS2S".parse::<GameVariant>(), Ok(GameVariant::DarkSouls2));
        assert_eq!("bb".parse::<GameVariant>(), Ok(GameVariant::Bloodborne));
        assert!("ds1".parse::<GameVariant>().is_err());
    }

    #[test]
    fn test_game_variant_folder_codes_round_trip() {
        for game in GameVariant::ALL {
            assert_eq!(game.folder_code().parse::<GameVariant>(), Ok(game));
            assert_eq!(game.to_string(), game.folder_code());
        }
    }

    #[test]
    fn test_game_variant_parse_error_message() {
        let err = "xyz".parse::<GameVariant>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown game 'xyz', expected one of DS2S, DS3, BB, SDT, ER"
        );
    }
}
