// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Name list lookup tests.

mod common;

use common::TempDir;
use paramcodec::names::parse_name_list;
use paramcodec::{display_label, DirectoryNameSource, GameVariant, NameCache, NameListSource};

#[test]
fn test_parse_name_list() {
    let names = parse_name_list("100 Longsword\n\n200\tDagger\r\n300 \nnot a line\n100 Broadsword\n");
    assert_eq!(names.len(), 3);
    assert_eq!(names[&100], "Broadsword");
    assert_eq!(names[&200], "Dagger");
    assert_eq!(names[&300], "");
}

#[test]
fn test_directory_source_layout() {
    let dir = TempDir::new("names_layout");
    dir.write("DS3/Names/EquipParamWeapon.txt", "\u{feff}1 Club\n");
    let source = DirectoryNameSource::new(dir.path());

    let text = source
        .load(GameVariant::DarkSouls3, "EquipParamWeapon.param")
        .unwrap()
        .unwrap();
    assert_eq!(text, "1 Club\n");
    assert!(source
        .load(GameVariant::EldenRing, "EquipParamWeapon.param")
        .unwrap()
        .is_none());
}

#[test]
fn test_cache_resolves_and_caches_missing_lists() {
    let dir = TempDir::new("names_cache");
    dir.write("ER/Names/NpcParam.txt", "10 Merchant\n11 Knight\n");
    let source = DirectoryNameSource::new(dir.path());
    let cache = NameCache::new();

    assert_eq!(
        cache
            .resolve(&source, GameVariant::EldenRing, "NpcParam.param", 11)
            .unwrap(),
        Some("Knight".to_string())
    );
    assert_eq!(
        cache
            .resolve(&source, GameVariant::EldenRing, "NpcParam.param", 99)
            .unwrap(),
        None
    );
    assert!(cache
        .names(&source, GameVariant::EldenRing, "Missing.param")
        .unwrap()
        .is_empty());
    assert_eq!(cache.len(), 2);

    // Cached lists do not see later edits until invalidated.
    dir.write("ER/Names/NpcParam.txt", "10 Trader\n");
    assert_eq!(
        cache
            .resolve(&source, GameVariant::EldenRing, "NpcParam.param", 10)
            .unwrap(),
        Some("Merchant".to_string())
    );
    assert!(cache.invalidate("NpcParam.param"));
    assert_eq!(
        cache
            .resolve(&source, GameVariant::EldenRing, "NpcParam.param", 10)
            .unwrap(),
        Some("Trader".to_string())
    );

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_display_label() {
    assert_eq!(display_label(5, Some("Ring")), "Ring");
    assert_eq!(display_label(5, Some("")), "5");
    assert_eq!(display_label(-1, None), "-1");
}
