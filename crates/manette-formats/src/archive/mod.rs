//! `SQUARESOFT` archive container parsing, mutation, and serialization
//!
//! Archives are flat containers bundling a fixed-record file directory, a
//! 900-slot filename lookup table, a folder path table, and the payload
//! blocks themselves. The engine stays byte-for-byte compatible with the
//! original closed format: archives written here load in the original
//! consumer and in other compatible tooling.
//!
//! # Binary Layout
//!
//! All integers little-endian:
//!
//! ```text
//! Header          16 B       u16 reserved; "SQUARESOFT"; u16 file count; u16 reserved
//! Directory       27 B x n   20 B name; u32 offset; u8 kind tag; u16 path group
//! Hash table      900 x 4 B  u16 first entry (1-based, 0 = empty); u16 match count
//! Path table      variable   u16 group count; groups of 128 B folder + u16 index pairs
//! File block      24 B + n   20 B name; u32 filesize; payload bytes
//! Terminator      14 B       fixed ASCII tag
//! ```
//!
//! The directory record carries no size field: an entry's size is read at
//! parse time from its payload block's embedded size field.
//!
//! # Usage
//!
//! ```rust
//! use manette_formats::archive::Archive;
//!
//! let mut archive = Archive::new();
//! assert!(archive.insert_file("title.p", b"title screen bytes".to_vec()));
//! let bytes = archive.build()?;
//!
//! let reopened = Archive::parse(&bytes)?;
//! assert_eq!(reopened.get_file("title.p"), Some(&b"title screen bytes"[..]));
//! # Ok::<(), manette_formats::archive::ArchiveError>(())
//! ```
//!
//! # Mutation Model
//!
//! Mutations land in an in-memory overlay keyed by filename; the source
//! buffer is never patched. [`Archive::build`] composes overlay and original
//! bytes into a brand-new buffer, reassigning every payload offset and
//! recomputing the lookup table from the directory.

mod entry;
mod error;
mod file;
mod hash;
mod header;
mod path_table;


pub use entry::{DirectoryEntry, DirectoryRecord};
pub use error::{ArchiveError, ArchiveResult};
pub use file::Archive;
pub use hash::{HASH_SLOTS, HashSlot, HashTable, name_hash};
pub use header::{ARCHIVE_MAGIC, ARCHIVE_TERMINATOR, ArchiveHeader, FileBlockHeader};
pub use path_table::{PathEntry, PathGroup, PathTable};

/// Archive layout constants
pub mod constants {
    /// Size of the fixed archive header in bytes
    pub const HEADER_SIZE: usize = 16;

    /// Size of one directory record in bytes
    pub const DIRECTORY_RECORD_SIZE: usize = 27;

    /// Serialized size of the 900-slot lookup table in bytes
    pub const HASH_TABLE_SIZE: usize = super::HASH_SLOTS * 4;

    /// Size of the per-file block header (name + size) in bytes
    pub const FILE_HEADER_SIZE: usize = 24;

    /// Size of the null-padded name field in directory records and file
    /// blocks
    pub const NAME_FIELD_SIZE: usize = 20;

    /// Longest significant name length; longer names are clamped
    pub const MAX_NAME_LEN: usize = 19;

    /// Size of the folder name field in path table records
    pub const FOLDER_FIELD_SIZE: usize = 128;

    /// Kind tag stamped on every directory record at build time and given to
    /// newly inserted entries
    pub const DEFAULT_KIND_TAG: u8 = 0;
}
