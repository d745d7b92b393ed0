// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! PARAM container parser.
//!
//! # Container Structure
//!
//! ```text
//! +-----------------------------+ 0x00
//! | header (64 bytes)           |
//! +-----------------------------+ 0x40
//! | directory (count x 24)      |
//! +-----------------------------+
//! | payloads (count x size)     |
//! +-----------------------------+
//! | struct type name, NUL       |
//! +-----------------------------+
//! ```
//!
//! ## Header (little endian)
//! - 0x00 `i32` declared size
//! - 0x04 `i16` unknown
//! - 0x06 `i16` type tag 1
//! - 0x08 `i16` type tag 2
//! - 0x0A `i16` record count
//! - 0x0C `i32` unknown
//! - 0x10 `i32` second declared size
//! - 0x14..0x2C six unknown `i32` words
//! - 0x2C `i32` format version
//! - 0x30 `i32` data offset
//! - 0x34..0x40 three unknown `i32` words
//!
//! The record size is not stored; it is derived from the smaller declared
//! size, the header size, the directory size and the record count. Payloads
//! are read contiguously after the directory regardless of the directory
//! entries' offsets.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use serde::Serialize;
use tracing::debug;

use super::constants::{DIRECTORY_ENTRY_SIZE, HEADER_SIZE, UNKNOWN_HEADER_WORDS};
use crate::core::{ParamError, Result};

/// Raw 64-byte container header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamHeader {
    /// Declared container size
    pub file_size: i32,
    /// Second declared container size
    pub file_size_2: i32,
    /// First type tag
    pub type_tag_1: i16,
    /// Second type tag
    pub type_tag_2: i16,
    /// Number of records
    pub record_count: i16,
    /// Format version
    pub format_version: i32,
    /// Declared payload start offset
    pub data_offset: i32,
    /// 16-bit word at 0x04
    pub unknown_short: i16,
    /// Remaining unknown 32-bit words in on-disk order (0x0C, 0x14..0x28,
    /// 0x34..0x3C)
    pub unknown: [i32; UNKNOWN_HEADER_WORDS],
}

impl ParamHeader {
    /// Parse the header from exactly [`HEADER_SIZE`] bytes.
    pub fn parse(bytes: &[u8; HEADER_SIZE]) -> Result<Self> {
        let mut cursor = Cursor::new(&bytes[..]);
        let mut unknown = [0i32; UNKNOWN_HEADER_WORDS];

        let file_size = cursor.read_i32::<LittleEndian>()?;
        let unknown_short = cursor.read_i16::<LittleEndian>()?;
        let type_tag_1 = cursor.read_i16::<LittleEndian>()?;
        let type_tag_2 = cursor.read_i16::<LittleEndian>()?;
        let record_count = cursor.read_i16::<LittleEndian>()?;
        unknown[0] = cursor.read_i32::<LittleEndian>()?;
        let file_size_2 = cursor.read_i32::<LittleEndian>()?;
        for word in &mut unknown[1..7] {
            *word = cursor.read_i32::<LittleEndian>()?;
        }
        let format_version = cursor.read_i32::<LittleEndian>()?;
        let data_offset = cursor.read_i32::<LittleEndian>()?;
        for word in &mut unknown[7..] {
            *word = cursor.read_i32::<LittleEndian>()?;
        }

        Ok(Self {
            file_size,
            file_size_2,
            type_tag_1,
            type_tag_2,
            record_count,
            format_version,
            data_offset,
            unknown_short,
            unknown,
        })
    }

    /// The authoritative declared size: the smaller of the two size fields.
    pub fn declared_size(&self) -> i32 {
        self.file_size.min(self.file_size_2)
    }

    /// Derive the per-record payload size.
    ///
    /// # Errors
    ///
    /// - [`ParamError::MalformedContainer`] for a non-positive record count or
    ///   a declared size too small for the header and directory
    /// - [`ParamError::UnsupportedLayout`] when the payload bytes do not
    ///   divide evenly into records
    pub fn record_byte_size(&self) -> Result<usize> {
        let count = self.record_count as i64;
        if count <= 0 {
            return Err(ParamError::malformed(format!(
                "record count {count} must be positive"
            )));
        }
        let payload = self.declared_size() as i64
            - HEADER_SIZE as i64
            - count * DIRECTORY_ENTRY_SIZE as i64;
        if payload < 0 {
            return Err(ParamError::malformed(format!(
                "declared size {} is smaller than header and directory ({} bytes)",
                self.declared_size(),
                HEADER_SIZE as i64 + count * DIRECTORY_ENTRY_SIZE as i64
            )));
        }
        if payload % count != 0 {
            return Err(ParamError::unsupported_layout(payload, count));
        }
        Ok((payload / count) as usize)
    }
}

/// One 24-byte directory entry.
///
/// Only `id` is interpreted; the offsets are kept as read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    /// Record identifier
    pub id: i64,
    /// Payload offset as stored
    pub data_offset: u64,
    /// Name offset as stored
    pub name_offset: u64,
}

impl DirectoryEntry {
    fn parse(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);
        Ok(Self {
            id: cursor.read_i64::<LittleEndian>()?,
            data_offset: cursor.read_u64::<LittleEndian>()?,
            name_offset: cursor.read_u64::<LittleEndian>()?,
        })
    }
}

/// One record: identifier plus undecoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamRecord {
    /// Identifier, unique within its container
    pub id: i64,
    /// Exactly `record_byte_size` payload bytes
    pub raw_data: Vec<u8>,
}

/// A decoded PARAM container.
#[derive(Debug, Clone)]
pub struct ParamContainer {
    /// Struct type name from the trailing string; selects the schema
    pub struct_type_name: String,
    /// Format version from the header
    pub format_version: i32,
    /// First type tag
    pub type_tag_1: i16,
    /// Second type tag
    pub type_tag_2: i16,
    /// Size of every record payload
    pub record_byte_size: usize,
    /// Raw header
    pub header: ParamHeader,
    /// Directory entries in on-disk order
    pub directory: Vec<DirectoryEntry>,
    /// Records in on-disk order
    pub records: Vec<ParamRecord>,
}

impl ParamContainer {
    /// Decode a container from a byte stream.
    ///
    /// # Errors
    ///
    /// [`ParamError::TruncatedInput`] if the stream ends early,
    /// [`ParamError::MalformedContainer`] or [`ParamError::UnsupportedLayout`]
    /// if the header cannot describe a valid container.
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let mut stream = CountingReader::new(reader);

        let mut header_bytes = [0u8; HEADER_SIZE];
        header_bytes.copy_from_slice(&stream.read_block(HEADER_SIZE, "header")?);
        let header = ParamHeader::parse(&header_bytes)?;
        let record_byte_size = header.record_byte_size()?;
        let count = header.record_count as usize;

        debug!(
            record_count = count,
            record_byte_size,
            format_version = header.format_version,
            "parsed container header"
        );

        let contiguous_start = HEADER_SIZE + count * DIRECTORY_ENTRY_SIZE;
        if header.data_offset as i64 != contiguous_start as i64 {
            debug!(
                data_offset = header.data_offset,
                contiguous_start, "header data offset differs from contiguous layout"
            );
        }

        let mut directory = Vec::with_capacity(count);
        for index in 0..count {
            let bytes = stream.read_block(
                DIRECTORY_ENTRY_SIZE,
                &format!("directory entry {index}"),
            )?;
            directory.push(DirectoryEntry::parse(&bytes)?);
        }

        let mut records = Vec::with_capacity(count);
        for entry in &directory {
            let raw_data =
                stream.read_block(record_byte_size, &format!("record {} payload", entry.id))?;
            records.push(ParamRecord {
                id: entry.id,
                raw_data,
            });
        }

        let struct_type_name = stream.read_c_string("struct type name")?;
        debug!(struct_type = %struct_type_name, "parsed container");

        Ok(Self {
            struct_type_name,
            format_version: header.format_version,
            type_tag_1: header.type_tag_1,
            type_tag_2: header.type_tag_2,
            record_byte_size,
            header,
            directory,
            records,
        })
    }

    /// Decode a container held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::read(data)
    }

    /// Memory-map and decode a container file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        // The map is only read while this call runs and the parsed container
        // owns copies of everything it keeps.
        let mmap = unsafe { memmap2::Mmap::map(&file) }?;
        debug!(path = %path.display(), len = mmap.len(), "mapped container");
        Self::from_bytes(&mmap)
    }

    /// Number of records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Find a record by identifier.
    pub fn record(&self, id: i64) -> Option<&ParamRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Record identifiers in on-disk order.
    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.records.iter().map(|r| r.id)
    }
}

/// Reader wrapper tracking the absolute stream offset for diagnostics.
struct CountingReader<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> CountingReader<R> {
    fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    /// Read exactly `len` bytes or fail with the number actually available.
    fn read_block(&mut self, len: usize, context: &str) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() < len {
            return Err(ParamError::truncated(context, len, buf.len(), self.offset));
        }
        self.offset += len as u64;
        Ok(buf)
    }

    /// Read a NUL-terminated single-byte string.
    fn read_c_string(&mut self, context: &str) -> Result<String> {
        let start = self.offset;
        let mut bytes = Vec::new();
        loop {
            let mut byte = [0u8; 1];
            let n = self.inner.read(&mut byte)?;
            if n == 0 {
                return Err(ParamError::truncated(
                    context,
                    bytes.len() + 1,
                    bytes.len(),
                    start,
                ));
            }
            self.offset += 1;
            if byte[0] == 0 {
                break;
            }
            bytes.push(byte[0]);
        }
        Ok(bytes
            .iter()
            .map(|&b| if b.is_ascii() { b as char } else { '?' })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::formats::param::constants::{
        OFFSET_DATA_OFFSET, OFFSET_FILE_SIZE, OFFSET_FILE_SIZE_2, OFFSET_FORMAT_VERSION,
        OFFSET_RECORD_COUNT, OFFSET_TYPE_TAG_1, OFFSET_TYPE_TAG_2,
    };

    fn header_bytes(file_size: i32, file_size_2: i32, count: i16) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_SIZE];
        buf[OFFSET_FILE_SIZE as usize..][..4].copy_from_slice(&file_size.to_le_bytes());
        buf[OFFSET_TYPE_TAG_1 as usize..][..2].copy_from_slice(&2i16.to_le_bytes());
        buf[OFFSET_TYPE_TAG_2 as usize..][..2].copy_from_slice(&5i16.to_le_bytes());
        buf[OFFSET_RECORD_COUNT as usize..][..2].copy_from_slice(&count.to_le_bytes());
        buf[OFFSET_FILE_SIZE_2 as usize..][..4].copy_from_slice(&file_size_2.to_le_bytes());
        buf[0x14..0x18].copy_from_slice(&0x1111i32.to_le_bytes());
        buf[OFFSET_FORMAT_VERSION as usize..][..4].copy_from_slice(&3i32.to_le_bytes());
        buf[OFFSET_DATA_OFFSET as usize..][..4].copy_from_slice(&112i32.to_le_bytes());
        buf[0x3C..0x40].copy_from_slice(&0x2222i32.to_le_bytes());
        buf
    }

    fn container_bytes(ids: &[i64], record_size: usize, name: &str) -> Vec<u8> {
        let count = ids.len();
        let size = (HEADER_SIZE + count * (DIRECTORY_ENTRY_SIZE + record_size)) as i32;
        let mut buf = header_bytes(size, size, count as i16);
        for id in ids {
            buf.extend_from_slice(&id.to_le_bytes());
            buf.extend_from_slice(&[0u8; 16]);
        }
        for (i, _) in ids.iter().enumerate() {
            buf.extend(std::iter::repeat(i as u8 + 1).take(record_size));
        }
        buf.extend_from_slice(name.as_bytes());
        buf.push(0);
        buf
    }

    #[test]
    fn test_parse_header_fields() {
        let bytes: [u8; HEADER_SIZE] = header_bytes(160, 200, 2).try_into().unwrap();
        let header = ParamHeader::parse(&bytes).unwrap();
        assert_eq!(header.file_size, 160);
        assert_eq!(header.file_size_2, 200);
        assert_eq!(header.type_tag_1, 2);
        assert_eq!(header.type_tag_2, 5);
        assert_eq!(header.record_count, 2);
        assert_eq!(header.format_version, 3);
        assert_eq!(header.data_offset, 112);
        assert_eq!(header.unknown[1], 0x1111);
        assert_eq!(header.unknown[9], 0x2222);
        assert_eq!(header.declared_size(), 160);
        assert_eq!(header.record_byte_size().unwrap(), 8);
    }

    #[test]
    fn test_smaller_declared_size_wins() {
        let bytes: [u8; HEADER_SIZE] = header_bytes(1000, 160, 2).try_into().unwrap();
        let header = ParamHeader::parse(&bytes).unwrap();
        assert_eq!(header.record_byte_size().unwrap(), 8);
    }

    #[test]
    fn test_record_count_must_be_positive() {
        for count in [0i16, -1] {
            let bytes: [u8; HEADER_SIZE] = header_bytes(64, 64, count).try_into().unwrap();
            let err = ParamHeader::parse(&bytes)
                .unwrap()
                .record_byte_size()
                .unwrap_err();
            assert!(matches!(err, ParamError::MalformedContainer { .. }));
        }
    }

    #[test]
    fn test_uneven_division_is_unsupported() {
        let bytes: [u8; HEADER_SIZE] = header_bytes(64 + 48 + 17, 64 + 48 + 17, 2)
            .try_into()
            .unwrap();
        let err = ParamHeader::parse(&bytes)
            .unwrap()
            .record_byte_size()
            .unwrap_err();
        assert!(matches!(
            err,
            ParamError::UnsupportedLayout {
                payload_bytes: 17,
                record_count: 2
            }
        ));
    }

    #[test]
    fn test_declared_size_too_small() {
        let bytes: [u8; HEADER_SIZE] = header_bytes(80, 80, 2).try_into().unwrap();
        let err = ParamHeader::parse(&bytes)
            .unwrap()
            .record_byte_size()
            .unwrap_err();
        assert!(matches!(err, ParamError::MalformedContainer { .. }));
    }

    #[test]
    fn test_read_container() {
        let bytes = container_bytes(&[100, 200], 8, "TEST_PARAM");
        let container = ParamContainer::from_bytes(&bytes).unwrap();
        assert_eq!(container.struct_type_name, "TEST_PARAM");
        assert_eq!(container.record_byte_size, 8);
        assert_eq!(container.format_version, 3);
        assert_eq!(container.type_tag_1, 2);
        assert_eq!(container.type_tag_2, 5);
        assert_eq!(container.ids().collect::<Vec<_>>(), vec![100, 200]);
        assert_eq!(container.record(200).unwrap().raw_data, vec![2u8; 8]);
        assert!(container.record(300).is_none());
        assert_eq!(container.directory.len(), 2);
    }

    #[test]
    fn test_short_header_is_truncation() {
        let err = ParamContainer::from_bytes(&[0u8; 10]).unwrap_err();
        assert!(matches!(
            err,
            ParamError::TruncatedInput {
                requested: 64,
                available: 10,
                offset: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_payload_reports_offset() {
        let mut bytes = container_bytes(&[1, 2], 8, "X");
        bytes.truncate(HEADER_SIZE + 2 * DIRECTORY_ENTRY_SIZE + 8 + 3);
        let err = ParamContainer::from_bytes(&bytes).unwrap_err();
        match err {
            ParamError::TruncatedInput {
                requested,
                available,
                offset,
                ..
            } => {
                assert_eq!(requested, 8);
                assert_eq!(available, 3);
                assert_eq!(offset, (HEADER_SIZE + 2 * DIRECTORY_ENTRY_SIZE + 8) as u64);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_name_terminator_is_truncation() {
        let mut bytes = container_bytes(&[1], 4, "NAME");
        bytes.pop();
        let err = ParamContainer::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, ParamError::TruncatedInput { .. }));
    }

    #[test]
    fn test_non_ascii_name_bytes_are_replaced() {
        let mut bytes = container_bytes(&[1], 4, "AB");
        let len = bytes.len();
        bytes[len - 2] = 0xE9;
        let container = ParamContainer::from_bytes(&bytes).unwrap();
        assert_eq!(container.struct_type_name, "A?");
    }
}
