//! Archive header and file block structures

use binrw::{BinRead, BinWrite};

use super::constants::{MAX_NAME_LEN, NAME_FIELD_SIZE};

/// Archive magic bytes
pub const ARCHIVE_MAGIC: [u8; 10] = *b"SQUARESOFT";

/// Terminator tag written after the last file block; never length-prefixed
/// and never validated on parse
pub const ARCHIVE_TERMINATOR: [u8; 14] = *b"SQUARESOFT END";

/// Fixed 16-byte archive header
///
/// The two reserved fields are carried through parse and rebuild untouched.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct ArchiveHeader {
    /// Reserved field preceding the magic
    pub reserved_pre: u16,
    /// Magic bytes (always "SQUARESOFT")
    pub magic: [u8; 10],
    /// Number of directory entries
    pub file_count: u16,
    /// Reserved field trailing the count
    pub reserved_post: u16,
}

impl ArchiveHeader {
    /// Create a header for an empty archive
    pub fn empty() -> Self {
        Self {
            reserved_pre: 0,
            magic: ARCHIVE_MAGIC,
            file_count: 0,
            reserved_post: 0,
        }
    }

    /// Check the magic tag
    pub fn has_valid_magic(&self) -> bool {
        self.magic == ARCHIVE_MAGIC
    }
}

/// 24-byte header preceding each payload block
///
/// This is where an entry's size actually lives; the 27-byte directory record
/// deliberately does not carry one.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct FileBlockHeader {
    /// Null-padded copy of the entry name
    pub name: [u8; NAME_FIELD_SIZE],
    /// Payload size in bytes
    pub filesize: u32,
}

/// Decode a null-padded name field into a string
pub(crate) fn decode_name(raw: &[u8; NAME_FIELD_SIZE]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Encode a name into a null-padded field, clamped to the significant length
pub(crate) fn encode_name(name: &str) -> [u8; NAME_FIELD_SIZE] {
    let mut field = [0u8; NAME_FIELD_SIZE];
    let bytes = name.as_bytes();
    let len = bytes.len().min(MAX_NAME_LEN);
    field[..len].copy_from_slice(&bytes[..len]);
    field
}

/// Clamp a name to its significant byte length, respecting char boundaries
pub(crate) fn truncate_name(name: &str) -> String {
    if name.len() <= MAX_NAME_LEN {
        return name.to_string();
    }
    let mut end = MAX_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_string()
}
