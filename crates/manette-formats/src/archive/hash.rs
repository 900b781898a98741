//! Legacy filename hash and the 900-slot lookup table
//!
//! The original consumer accelerates name lookup with a fixed table of 900
//! slots indexed by a hash of the filename stem's first two characters. The
//! hash must be preserved exactly; it is the compatibility-critical piece of
//! the directory format.

use binrw::{BinRead, BinWrite};

use super::entry::DirectoryEntry;
use super::error::{ArchiveError, ArchiveResult};

/// Number of slots in the lookup table (30 x 30 symbol pairs)
pub const HASH_SLOTS: usize = 900;

/// First-symbol values are scaled by the symbol-table radix
const SYMBOL_RADIX: u16 = 30;

/// One 4-byte lookup slot
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct HashSlot {
    /// 1-based directory index of the first entry hashing here (0 = empty)
    pub first_entry: u16,
    /// Number of directory entries hashing here
    pub match_count: u16,
}

/// The fixed 900-slot filename lookup table
///
/// Entirely derived from the directory: it never carries information the
/// directory does not already have, and is always rebuilt from scratch rather
/// than patched incrementally.
#[derive(BinRead, BinWrite, Debug, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct HashTable {
    /// The 900 slots in symbol-pair order
    #[br(count = HASH_SLOTS)]
    pub slots: Vec<HashSlot>,
}

impl HashTable {
    /// Create a table with every slot empty
    pub fn empty() -> Self {
        Self {
            slots: vec![HashSlot::default(); HASH_SLOTS],
        }
    }

    /// Rebuild the table from scratch over the directory, in entry order
    ///
    /// The first entry hashing to a slot claims its `first_entry` (1-based);
    /// every entry hashing there bumps `match_count`.
    pub fn rebuild(entries: &[DirectoryEntry]) -> ArchiveResult<Self> {
        let mut slots = vec![HashSlot::default(); HASH_SLOTS];
        for (index, entry) in entries.iter().enumerate() {
            let slot = &mut slots[name_hash(&entry.name)? as usize];
            if slot.first_entry == 0 {
                slot.first_entry = index as u16 + 1;
            }
            slot.match_count += 1;
        }
        Ok(Self { slots })
    }

    /// Look up a slot by filename
    pub fn slot_for(&self, name: &str) -> ArchiveResult<HashSlot> {
        Ok(self.slots[name_hash(name)? as usize])
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::empty()
    }
}

/// Map one character through the legacy symbol table
///
/// Digits map to 0..=9 and letters (case-insensitive) to 0..=25; `_` and `-`
/// alias the letters at positions 10 and 11. Anything else is outside the
/// format's representable name set.
fn symbol_value(symbol: char) -> Option<u16> {
    match symbol {
        '0'..='9' => Some(symbol as u16 - '0' as u16),
        'a'..='z' => Some(symbol as u16 - 'a' as u16),
        'A'..='Z' => Some(symbol as u16 - 'A' as u16),
        '_' => Some(10),
        '-' => Some(11),
        _ => None,
    }
}

/// Hash a filename into the lookup-table range `[0, 899]`
///
/// Only the stem (text before the first `.`) participates, and of the stem
/// only its first two characters: `l1 * 30 + l2 + 1`, or `l1 * 30` for
/// single-character stems.
pub fn name_hash(name: &str) -> ArchiveResult<u16> {
    let stem = name.split('.').next().unwrap_or("");
    let mut symbols = stem.chars();

    let first = symbols
        .next()
        .ok_or_else(|| ArchiveError::EmptyStem(name.to_string()))?;
    let l1 = symbol_value(first).ok_or_else(|| ArchiveError::IllegalHashSymbol {
        name: name.to_string(),
        symbol: first,
    })?;

    let l2 = match symbols.next() {
        Some(second) => {
            symbol_value(second).ok_or_else(|| ArchiveError::IllegalHashSymbol {
                name: name.to_string(),
                symbol: second,
            })? + 1
        }
        None => 0,
    };

    Ok(l1 * SYMBOL_RADIX + l2)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(name: &str) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_string(),
            stored_offset: 0,
            runtime_filesize: 0,
            kind_tag: 0,
            path_group_index: 0,
        }
    }

    #[test]
    fn test_known_hashes() {
        assert_eq!(name_hash("aaaa.p").expect("hash should succeed"), 1);
        assert_eq!(name_hash("b.dat").expect("hash should succeed"), 30);
        assert_eq!(name_hash("0.p").expect("hash should succeed"), 0);
        assert_eq!(name_hash("99.p").expect("hash should succeed"), 280);
        assert_eq!(name_hash("zz.x").expect("hash should succeed"), 776);
    }

    #[test]
    fn test_only_first_two_stem_characters_matter() {
        let a = name_hash("title-screen.p").expect("hash should succeed");
        let b = name_hash("tizzzzz.p").expect("hash should succeed");
        assert_eq!(a, b);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            name_hash("AbC.p").expect("hash should succeed"),
            name_hash("abc.p").expect("hash should succeed"),
        );
    }

    #[test]
    fn test_underscore_and_dash_alias_letters() {
        assert_eq!(
            name_hash("_a.p").expect("hash should succeed"),
            name_hash("ka.p").expect("hash should succeed"),
        );
        assert_eq!(
            name_hash("-a.p").expect("hash should succeed"),
            name_hash("la.p").expect("hash should succeed"),
        );
    }

    #[test]
    fn test_hash_stays_in_table_range() {
        for first in "0123456789abcdefghijklmnopqrstuvwxyz_-".chars() {
            for second in "0123456789abcdefghijklmnopqrstuvwxyz_-".chars() {
                let name = format!("{first}{second}.p");
                let hash = name_hash(&name).expect("hash should succeed");
                assert!(hash < HASH_SLOTS as u16, "{name} hashed to {hash}");
            }
        }
    }

    #[test]
    fn test_empty_stem_rejected() {
        assert!(matches!(
            name_hash(".hidden"),
            Err(ArchiveError::EmptyStem(_))
        ));
        assert!(matches!(name_hash(""), Err(ArchiveError::EmptyStem(_))));
    }

    #[test]
    fn test_illegal_symbol_rejected() {
        let err = name_hash("a!b.p").expect_err("hash should fail");
        assert!(matches!(
            err,
            ArchiveError::IllegalHashSymbol { symbol: '!', .. }
        ));
    }

    #[test]
    fn test_rebuild_counts_and_first_entries() {
        let entries = vec![entry("aaaa.p"), entry("ab.p"), entry("b.p")];
        // "aaaa" and "ab" collide on l1='a', l2='a'/'b'+1 -> slots 1 and 2
        let table = HashTable::rebuild(&entries).expect("rebuild should succeed");

        assert_eq!(table.slots[1], HashSlot { first_entry: 1, match_count: 1 });
        assert_eq!(table.slots[2], HashSlot { first_entry: 2, match_count: 1 });
        assert_eq!(table.slots[30], HashSlot { first_entry: 3, match_count: 1 });
        assert_eq!(table.slots[0], HashSlot::default());
    }

    #[test]
    fn test_rebuild_collisions_share_a_slot() {
        let entries = vec![entry("aa1.p"), entry("aa2.p"), entry("AA.p")];
        let table = HashTable::rebuild(&entries).expect("rebuild should succeed");

        let slot = table.slot_for("aa.p").expect("lookup should succeed");
        assert_eq!(slot.first_entry, 1);
        assert_eq!(slot.match_count, 3);
    }

    #[test]
    fn test_rebuild_rejects_unhashable_name() {
        let entries = vec![entry("ok.p"), entry("!bad.p")];
        assert!(HashTable::rebuild(&entries).is_err());
    }
}
