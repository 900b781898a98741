//! Directory entry structures

use binrw::{BinRead, BinWrite};

use super::constants::NAME_FIELD_SIZE;
use super::header::{decode_name, encode_name};

/// Raw 27-byte directory record as stored on disk
///
/// There is no size field; an entry's size lives in its payload block header.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct DirectoryRecord {
    /// Null-padded name field
    pub name: [u8; NAME_FIELD_SIZE],
    /// Absolute offset of the entry's file block
    pub stored_offset: u32,
    /// Entry kind tag
    pub kind_tag: u8,
    /// Index into the path-group table
    pub path_group_index: u16,
}

/// Parsed directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Entry filename (at most 19 significant bytes, unique per archive,
    /// compared exactly)
    pub name: String,
    /// Absolute offset of the entry's file block in the source buffer
    pub stored_offset: u32,
    /// Payload size, read at parse time from the file block's embedded size
    /// field rather than from the directory record
    pub runtime_filesize: u32,
    /// Entry kind tag as parsed
    pub kind_tag: u8,
    /// Index into the path-group table
    pub path_group_index: u16,
}

impl DirectoryEntry {
    /// Lift a raw record into an entry; the runtime size is filled in by the
    /// second parse pass
    pub(crate) fn from_record(record: &DirectoryRecord) -> Self {
        Self {
            name: decode_name(&record.name),
            stored_offset: record.stored_offset,
            runtime_filesize: 0,
            kind_tag: record.kind_tag,
            path_group_index: record.path_group_index,
        }
    }

    /// Lower to a raw record with a freshly assigned offset and the stamped
    /// kind tag
    pub(crate) fn to_record(&self, stored_offset: u32, kind_tag: u8) -> DirectoryRecord {
        DirectoryRecord {
            name: encode_name(&self.name),
            stored_offset,
            kind_tag,
            path_group_index: self.path_group_index,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_record_is_27_bytes() {
        let record = DirectoryRecord {
            name: encode_name("aaaa.p"),
            stored_offset: 0x1000,
            kind_tag: 3,
            path_group_index: 2,
        };

        let mut buffer = Cursor::new(Vec::new());
        record.write_le(&mut buffer).expect("write should succeed");
        assert_eq!(buffer.get_ref().len(), 27);
    }

    #[test]
    fn test_record_round_trip() {
        let record = DirectoryRecord {
            name: encode_name("map-00.dat"),
            stored_offset: 0xDEAD,
            kind_tag: 7,
            path_group_index: 1,
        };

        let mut buffer = Cursor::new(Vec::new());
        record.write_le(&mut buffer).expect("write should succeed");
        buffer.set_position(0);
        let parsed = DirectoryRecord::read_le(&mut buffer).expect("read should succeed");
        assert_eq!(parsed, record);

        let entry = DirectoryEntry::from_record(&parsed);
        assert_eq!(entry.name, "map-00.dat");
        assert_eq!(entry.stored_offset, 0xDEAD);
        assert_eq!(entry.runtime_filesize, 0);
        assert_eq!(entry.kind_tag, 7);
        assert_eq!(entry.path_group_index, 1);
    }
}
