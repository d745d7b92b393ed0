// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! PARAM container layout constants.

/// Size of the fixed container header.
pub const HEADER_SIZE: usize = 64;

/// Size of one record directory entry.
pub const DIRECTORY_ENTRY_SIZE: usize = 24;

/// Number of 32-bit header words whose meaning is unknown.
pub const UNKNOWN_HEADER_WORDS: usize = 10;

// Header field offsets
pub const OFFSET_FILE_SIZE: u64 = 0x00;
pub const OFFSET_TYPE_TAG_1: u64 = 0x06;
pub const OFFSET_TYPE_TAG_2: u64 = 0x08;
pub const OFFSET_RECORD_COUNT: u64 = 0x0A;
pub const OFFSET_FILE_SIZE_2: u64 = 0x10;
pub const OFFSET_FORMAT_VERSION: u64 = 0x2C;
pub const OFFSET_DATA_OFFSET: u64 = 0x30;
