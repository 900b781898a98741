//! Greedy LZS encoding

use std::collections::HashMap;

use super::{MAX_MATCH, MIN_MATCH, WINDOW_SIZE};

/// Most-recent-position dictionary over byte-content prefixes
///
/// Content-addressed, not position-addressed: the forward map keys on prefix
/// bytes (lengths 3..=18) and holds the latest start position for each. The
/// reverse map keys on the window slot a position occupies, so registering a
/// position evicts whatever prefix sat in that slot a full window earlier,
/// and re-registering a prefix abandons the slot it held before. Stale
/// entries would otherwise let the encoder reference bytes that have already
/// left the window.
struct MatchDict {
    by_prefix: HashMap<Vec<u8>, isize>,
    by_slot: HashMap<(usize, usize), Vec<u8>>,
}

impl MatchDict {
    fn new() -> Self {
        Self {
            by_prefix: HashMap::new(),
            by_slot: HashMap::new(),
        }
    }

    /// Ring slot a stream position occupies in the decoder's window
    fn slot_of(pos: isize) -> usize {
        (pos - MAX_MATCH as isize).rem_euclid(WINDOW_SIZE as isize) as usize
    }

    /// Register every prefix (3..=18 bytes) starting at `pos`
    fn insert(&mut self, data: &[u8], pos: isize) {
        for len in MIN_MATCH..=MAX_MATCH {
            let Some(prefix) = prefix_at(data, pos, len) else {
                break;
            };
            self.insert_prefix(prefix, pos);
        }
    }

    fn insert_prefix(&mut self, prefix: Vec<u8>, pos: isize) {
        let len = prefix.len();
        let slot = Self::slot_of(pos);

        // The prefix abandons whatever slot it was registered in before
        if let Some(old_pos) = self.by_prefix.insert(prefix.clone(), pos) {
            let old_slot = Self::slot_of(old_pos);
            if old_slot != slot {
                self.by_slot.remove(&(old_slot, len));
            }
        }
        // The slot's previous occupant fell a full window behind
        if let Some(stale) = self.by_slot.insert((slot, len), prefix) {
            if self
                .by_prefix
                .get(&stale)
                .is_some_and(|&p| Self::slot_of(p) == slot && p != pos)
            {
                self.by_prefix.remove(&stale);
            }
        }
    }

    fn find(&self, prefix: &[u8]) -> Option<isize> {
        self.by_prefix.get(prefix).copied()
    }
}

/// Prefix of `len` bytes starting at `pos`; positions before the stream
/// start are the implicit zero run the decoder assumes
fn prefix_at(data: &[u8], pos: isize, len: usize) -> Option<Vec<u8>> {
    if pos + len as isize > data.len() as isize {
        return None;
    }
    let mut prefix = Vec::with_capacity(len);
    for step in 0..len as isize {
        let at = pos + step;
        prefix.push(if at < 0 { 0 } else { data[at as usize] });
    }
    Some(prefix)
}

/// Shrink a buffer with the greedy single-pass encoder
///
/// At each position the longest dictionary hit (lengths searched 18 down
/// to 3) at an offset other than the current position becomes a
/// back-reference; otherwise one literal is emitted. Every intermediate
/// position of a matched run is re-inserted into the dictionary while
/// advancing, so later matches may overlap the run just emitted. The output
/// always decodes back to the exact input; the encoder is compact, not
/// optimal.
pub fn compress(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() / 2 + 16);
    let mut dict = MatchDict::new();
    // Seed the pre-stream zero run so early references may point before
    // position 0, exactly like the decoder allows
    dict.insert(input, -(MAX_MATCH as isize));

    let mut group: Vec<u8> = Vec::with_capacity(2 * 8);
    let mut control: u8 = 0;
    let mut tokens: u8 = 0;
    let mut pos: usize = 0;

    while pos < input.len() {
        let mut matched = None;
        for len in (MIN_MATCH..=MAX_MATCH).rev() {
            if pos + len > input.len() {
                continue;
            }
            if let Some(start) = dict.find(&input[pos..pos + len]) {
                let distance = pos as isize - start;
                if distance != 0 && distance < WINDOW_SIZE as isize {
                    matched = Some((start, len));
                    break;
                }
            }
        }

        match matched {
            Some((start, len)) => {
                let offset = MatchDict::slot_of(start);
                group.push((offset & 0xFF) as u8);
                group.push((((offset >> 4) & 0xF0) | (len - MIN_MATCH)) as u8);
                for step in 0..len {
                    dict.insert(input, (pos + step) as isize);
                }
                pos += len;
            }
            None => {
                control |= 1 << tokens;
                group.push(input[pos]);
                dict.insert(input, pos as isize);
                pos += 1;
            }
        }

        tokens += 1;
        if tokens == 8 {
            out.push(control);
            out.extend_from_slice(&group);
            control = 0;
            tokens = 0;
            group.clear();
        }
    }

    if tokens > 0 {
        out.push(control);
        out.extend_from_slice(&group);
    }
    out
}
