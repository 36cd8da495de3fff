//! Fixed-size transposition table.
//!
//! One entry per slot, indexed by key modulo the table length. A store
//! always overwrites the slot; a probe only trusts an entry whose stored key
//! matches the full 64-bit key, so index collisions cost a miss, never a
//! wrong value.

use chess_core::Move;

/// What a stored value says about the true score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The value is the exact score.
    Exact,
    /// The search failed high; the true score is at least the value.
    Lower,
    /// No move raised alpha; the true score is at most the value.
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtEntry {
    pub key: u64,
    pub depth: u8,
    pub value: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

pub struct TranspositionTable {
    slots: Vec<Option<TtEntry>>,
}

impl TranspositionTable {
    /// Table with `entries` slots (at least one).
    pub fn new(entries: usize) -> Self {
        Self {
            slots: vec![None; entries.max(1)],
        }
    }

    /// Table sized to roughly `megabytes` of memory.
    pub fn with_megabytes(megabytes: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TtEntry>>();
        Self::new(megabytes * 1024 * 1024 / entry_size)
    }

    #[inline(always)]
    fn index(&self, key: u64) -> usize {
        (key % self.slots.len() as u64) as usize
    }

    /// The entry stored for `key`, if the slot still holds it.
    #[inline]
    pub fn probe(&self, key: u64) -> Option<&TtEntry> {
        self.slots[self.index(key)]
            .as_ref()
            .filter(|entry| entry.key == key)
    }

    /// Stores an entry, replacing whatever the slot held.
    #[inline]
    pub fn store(
        &mut self,
        key: u64,
        depth: u8,
        value: i32,
        bound: Bound,
        best_move: Option<Move>,
    ) {
        let i = self.index(key);
        self.slots[i] = Some(TtEntry {
            key,
            depth,
            value,
            bound,
            best_move,
        });
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("entries", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;
