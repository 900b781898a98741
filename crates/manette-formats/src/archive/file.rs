//! The archive container: parse, mutate, serialize
//!
//! An [`Archive`] is constructed from a whole in-memory buffer and mutated
//! through its overlay until [`Archive::build`] materializes a brand-new
//! buffer. The source buffer is never patched in place.

use std::collections::HashMap;
use std::io::{Cursor, Seek, SeekFrom, Write};

use binrw::{BinRead, BinWrite};
use tracing::{debug, trace};

use super::constants::{
    DEFAULT_KIND_TAG, DIRECTORY_RECORD_SIZE, FILE_HEADER_SIZE, HASH_TABLE_SIZE, HEADER_SIZE,
};
use super::entry::{DirectoryEntry, DirectoryRecord};
use super::error::{ArchiveError, ArchiveResult};
use super::hash::HashTable;
use super::header::{
    ARCHIVE_MAGIC, ARCHIVE_TERMINATOR, ArchiveHeader, FileBlockHeader, encode_name, truncate_name,
};
use super::path_table::PathTable;

/// An in-memory `SQUARESOFT` archive
///
/// Holds the parsed directory, lookup table, and path table together with the
/// immutable source buffer and an overlay of uncommitted edits. A single
/// logical writer is assumed; overlay writes are visible to every subsequent
/// read and to [`Archive::build`].
#[derive(Debug, Clone)]
pub struct Archive {
    header: ArchiveHeader,
    entries: Vec<DirectoryEntry>,
    hash_table: HashTable,
    path_table: PathTable,
    /// Uncommitted filename -> bytes substitutions, applied transparently by
    /// `get_file` until the next build
    pending: HashMap<String, Vec<u8>>,
    source: Vec<u8>,
}

impl Archive {
    /// Create an empty archive with no source buffer
    pub fn new() -> Self {
        Self {
            header: ArchiveHeader::empty(),
            entries: Vec::new(),
            hash_table: HashTable::empty(),
            path_table: PathTable::default(),
            pending: HashMap::new(),
            source: Vec::new(),
        }
    }

    /// Parse a whole archive buffer
    ///
    /// Validates the magic tag, then reads the fixed header, the directory,
    /// the 900-slot lookup table, and the path table in order. A second pass
    /// dereferences each entry's payload block for its embedded size field;
    /// the 27-byte directory record genuinely does not carry one.
    ///
    /// # Errors
    ///
    /// A magic mismatch or any structural failure is fatal for the buffer.
    pub fn parse(data: &[u8]) -> ArchiveResult<Self> {
        let mut cursor = Cursor::new(data);

        let header = ArchiveHeader::read_le(&mut cursor)?;
        if !header.has_valid_magic() {
            return Err(ArchiveError::InvalidMagic(header.magic));
        }

        let mut entries = Vec::with_capacity(header.file_count as usize);
        for _ in 0..header.file_count {
            let record = DirectoryRecord::read_le(&mut cursor)?;
            entries.push(DirectoryEntry::from_record(&record));
        }

        let hash_table = HashTable::read_le(&mut cursor)?;
        let path_table = PathTable::read_le(&mut cursor)?;

        // Second pass: each entry's size lives in its payload block, not in
        // the directory record.
        for entry in &mut entries {
            cursor.seek(SeekFrom::Start(u64::from(entry.stored_offset) + 20))?;
            let filesize = u32::read_le(&mut cursor)?;
            let end = entry.stored_offset as usize + FILE_HEADER_SIZE + filesize as usize;
            if end > data.len() {
                return Err(ArchiveError::PayloadOutOfBounds {
                    name: entry.name.clone(),
                    offset: entry.stored_offset,
                    size: filesize,
                    buffer_len: data.len(),
                });
            }
            entry.runtime_filesize = filesize;
            trace!("Entry {}: {} bytes at {}", entry.name, filesize, entry.stored_offset);
        }

        debug!(
            "Parsed archive: {} entries, {} path groups, {} bytes",
            entries.len(),
            path_table.groups.len(),
            data.len()
        );

        Ok(Self {
            header,
            entries,
            hash_table,
            path_table,
            pending: HashMap::new(),
            source: data.to_vec(),
        })
    }

    /// Read-only snapshot of the directory
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Number of directory entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the archive holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if an entry with this exact name exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// The lookup table as parsed; [`Archive::build`] always recomputes it
    /// from the directory
    pub fn hash_table(&self) -> &HashTable {
        &self.hash_table
    }

    /// The folder path table
    pub fn path_table(&self) -> &PathTable {
        &self.path_table
    }

    /// Get an entry's current bytes
    ///
    /// Overlay bytes shadow the source buffer; otherwise this is exactly
    /// `runtime_filesize` bytes of payload from the entry's file block.
    pub fn get_file(&self, name: &str) -> Option<&[u8]> {
        if let Some(bytes) = self.pending.get(name) {
            return Some(bytes);
        }
        let entry = self.entries.iter().find(|entry| entry.name == name)?;
        let start = entry.stored_offset as usize + FILE_HEADER_SIZE;
        Some(&self.source[start..start + entry.runtime_filesize as usize])
    }

    /// Replace an existing entry's bytes
    ///
    /// Returns `false` without side effects when no entry has this name.
    pub fn set_file(&mut self, name: &str, bytes: Vec<u8>) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.name == name) else {
            return false;
        };
        entry.runtime_filesize = bytes.len() as u32;
        self.pending.insert(entry.name.clone(), bytes);
        true
    }

    /// Append a new entry
    ///
    /// The name is clamped to its 19 significant bytes first; returns `false`
    /// when an entry with the clamped name already exists. New entries get
    /// the default kind tag and path-group index 0.
    pub fn insert_file(&mut self, name: &str, bytes: Vec<u8>) -> bool {
        let name = truncate_name(name);
        if self.contains(&name) {
            return false;
        }
        self.entries.push(DirectoryEntry {
            name: name.clone(),
            stored_offset: 0,
            runtime_filesize: bytes.len() as u32,
            kind_tag: DEFAULT_KIND_TAG,
            path_group_index: 0,
        });
        self.header.file_count += 1;
        self.pending.insert(name, bytes);
        true
    }

    /// Remove an entry
    ///
    /// Returns `false` when no entry has this name. Any overlay bytes for the
    /// name are discarded with it.
    pub fn remove_file(&mut self, name: &str) -> bool {
        let Some(index) = self.entries.iter().position(|entry| entry.name == name) else {
            return false;
        };
        self.entries.remove(index);
        self.header.file_count -= 1;
        self.pending.remove(name);
        true
    }

    /// Serialize the archive into a brand-new buffer
    ///
    /// Always a deterministic full rebuild: every entry is assigned a fresh
    /// sequential offset immediately after the previous payload, the lookup
    /// table is recomputed from the directory, and the path table is copied
    /// through verbatim. Payload bytes come from [`Archive::get_file`], so
    /// overlay and original bytes are indistinguishable to the writer.
    ///
    /// # Errors
    ///
    /// Fails when a directory name cannot be hashed; no partial output is
    /// ever produced.
    pub fn build(&self) -> ArchiveResult<Vec<u8>> {
        if self.entries.len() > usize::from(u16::MAX) {
            return Err(ArchiveError::InvalidFormat(format!(
                "Directory cannot hold {} entries",
                self.entries.len()
            )));
        }

        let prefix_len = HEADER_SIZE
            + self.entries.len() * DIRECTORY_RECORD_SIZE
            + HASH_TABLE_SIZE
            + self.path_table.byte_len();

        let mut offsets = Vec::with_capacity(self.entries.len());
        let mut offset = prefix_len as u32;
        for entry in &self.entries {
            offsets.push(offset);
            offset += FILE_HEADER_SIZE as u32 + entry.runtime_filesize;
        }

        let hash_table = HashTable::rebuild(&self.entries)?;

        let header = ArchiveHeader {
            reserved_pre: self.header.reserved_pre,
            magic: ARCHIVE_MAGIC,
            file_count: self.entries.len() as u16,
            reserved_post: self.header.reserved_post,
        };

        let mut cursor = Cursor::new(Vec::with_capacity(
            offset as usize + ARCHIVE_TERMINATOR.len(),
        ));
        header.write_le(&mut cursor)?;
        for (entry, &stored_offset) in self.entries.iter().zip(&offsets) {
            entry
                .to_record(stored_offset, DEFAULT_KIND_TAG)
                .write_le(&mut cursor)?;
        }
        hash_table.write_le(&mut cursor)?;
        self.path_table.write_le(&mut cursor)?;

        for (entry, &stored_offset) in self.entries.iter().zip(&offsets) {
            debug_assert_eq!(cursor.position(), u64::from(stored_offset));
            let payload = self.get_file(&entry.name).ok_or_else(|| {
                ArchiveError::InvalidFormat(format!("Missing payload for \"{}\"", entry.name))
            })?;
            let block = FileBlockHeader {
                name: encode_name(&entry.name),
                filesize: entry.runtime_filesize,
            };
            block.write_le(&mut cursor)?;
            cursor.write_all(payload)?;
        }

        cursor.write_all(&ARCHIVE_TERMINATOR)?;

        let buffer = cursor.into_inner();
        debug!(
            "Built archive: {} entries, {} bytes",
            self.entries.len(),
            buffer.len()
        );
        Ok(buffer)
    }
}

impl Default for Archive {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::PakFormat for Archive {
    fn parse(data: &[u8]) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::parse(data)?)
    }

    fn build(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        Ok(self.build()?)
    }
}
