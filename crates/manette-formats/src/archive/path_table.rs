//! Folder path table structures
//!
//! The path table records folder membership independently of directory order:
//! each group holds `(folder name, directory index)` pairs. The table is
//! copied through verbatim on rebuild, so the raw 128-byte folder fields are
//! kept as parsed.

use binrw::{BinRead, BinWrite, binrw};

use super::constants::FOLDER_FIELD_SIZE;

/// One folder membership record
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct PathEntry {
    /// Raw null-padded folder name field
    pub folder: [u8; FOLDER_FIELD_SIZE],
    /// Directory index this folder record points at
    pub directory_index: u16,
}

impl PathEntry {
    /// Create a record from a folder name (clamped to the field size) and a
    /// directory index
    pub fn new(folder_name: &str, directory_index: u16) -> Self {
        let mut folder = [0u8; FOLDER_FIELD_SIZE];
        let bytes = folder_name.as_bytes();
        let len = bytes.len().min(FOLDER_FIELD_SIZE - 1);
        folder[..len].copy_from_slice(&bytes[..len]);
        Self {
            folder,
            directory_index,
        }
    }

    /// The folder name, trimmed at the first null byte
    pub fn folder_name(&self) -> String {
        let end = self
            .folder
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.folder.len());
        String::from_utf8_lossy(&self.folder[..end]).into_owned()
    }
}

/// A group of folder membership records
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathGroup {
    #[br(temp)]
    #[bw(calc = entries.len() as u16)]
    path_count: u16,
    /// The group's folder records
    #[br(count = path_count)]
    pub entries: Vec<PathEntry>,
}

/// The archive's folder path table
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTable {
    #[br(temp)]
    #[bw(calc = groups.len() as u16)]
    group_count: u16,
    /// The ordered path groups
    #[br(count = group_count)]
    pub groups: Vec<PathGroup>,
}

impl PathTable {
    /// Serialized size of the table in bytes
    pub fn byte_len(&self) -> usize {
        2 + self
            .groups
            .iter()
            .map(|group| 2 + group.entries.len() * (FOLDER_FIELD_SIZE + 2))
            .sum::<usize>()
    }
}
