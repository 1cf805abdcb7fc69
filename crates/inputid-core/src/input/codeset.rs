// Inputid Input Layer - Code Sets
// Fixed-capacity bit set over event codes with range queries

use std::ops::Range;

const WORD_BITS: usize = u64::BITS as usize;

/// Set of event codes (key, relative axis or absolute axis codes).
///
/// Codes at or above the capacity given at construction are ignored on insert
/// and never reported as present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSet {
    words: Vec<u64>,
    capacity: u16,
}

impl CodeSet {
    /// Create an empty set able to hold codes `0..capacity`
    pub fn new(capacity: u16) -> Self {
        let words = (capacity as usize).div_ceil(WORD_BITS);
        Self {
            words: vec![0; words],
            capacity,
        }
    }

    /// Create a set from a list of codes
    pub fn with_codes(capacity: u16, codes: &[u16]) -> Self {
        let mut set = Self::new(capacity);
        for &code in codes {
            set.insert(code);
        }
        set
    }

    pub fn capacity(&self) -> u16 {
        self.capacity
    }

    /// Mark a code as present
    pub fn insert(&mut self, code: u16) {
        if code < self.capacity {
            let bit = code as usize;
            self.words[bit / WORD_BITS] |= 1 << (bit % WORD_BITS);
        }
    }

    /// Check whether a single code is present
    pub fn contains(&self, code: u16) -> bool {
        if code >= self.capacity {
            return false;
        }
        let bit = code as usize;
        self.words[bit / WORD_BITS] & (1 << (bit % WORD_BITS)) != 0
    }

    /// Check whether any code in `range` is present
    pub fn any_in(&self, range: Range<u16>) -> bool {
        let end = range.end.min(self.capacity);
        (range.start..end).any(|code| self.contains(code))
    }

    /// Check whether any code at all is present
    pub fn any(&self) -> bool {
        self.words.iter().any(|&w| w != 0)
    }

    /// Iterate over present codes in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        (0..self.capacity).filter(move |&code| self.contains(code))
    }
}

impl Extend<u16> for CodeSet {
    fn extend<I: IntoIterator<Item = u16>>(&mut self, iter: I) {
        for code in iter {
            self.insert(code);
        }
    }
}
