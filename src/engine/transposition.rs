/* =======================================================================
Sharpmate is a chess playing engine.

Sharpmate is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License version 3 as published by
the Free Software Foundation.

Sharpmate is distributed in the hope that it will be useful, but WITHOUT
ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License
for more details.

You should have received a copy of the GNU General Public License along
with this program.  If not, see <http://www.gnu.org/licenses/>.
======================================================================= */

use crate::board::defs::ZobristKey;
use crate::movegen::defs::ShortMove;
use crate::search::defs::CHECKMATE_THRESHOLD;
use std::mem::size_of;

// Local, thread-local-cache-sized table used as a front line for TT probes
// before the shared, lock-protected table is consulted.
const LOCAL_CACHE_ENTRIES: usize = 4096;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum HashFlag {
    Alpha,
    Exact,
    Beta,
}

// Implemented by every type stored in a TT so the table's replacement
// policy can compare stored depths without knowing anything else about T.
pub trait TTReplace {
    fn depth(&self) -> i8;
}

// One transposition table entry for the main search. Mate scores are stored
// relative to the node at which they were found, not the root, because the
// same entry can be reused from a different ply on a later probe.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchData {
    pub depth: i8,
    pub flag: HashFlag,
    pub score: i16,
    pub best_move: ShortMove,
}

impl TTReplace for SearchData {
    fn depth(&self) -> i8 {
        self.depth
    }
}

impl SearchData {
    pub fn create(depth: i8, ply: i8, flag: HashFlag, score: i16, best_move: ShortMove) -> Self {
        Self {
            depth,
            flag,
            score: Self::to_tt(score, ply),
            best_move,
        }
    }

    fn to_tt(score: i16, ply: i8) -> i16 {
        if score > CHECKMATE_THRESHOLD {
            score + ply as i16
        } else if score < -CHECKMATE_THRESHOLD {
            score - ply as i16
        } else {
            score
        }
    }

    fn from_tt(score: i16, ply: i8) -> i16 {
        if score > CHECKMATE_THRESHOLD {
            score - ply as i16
        } else if score < -CHECKMATE_THRESHOLD {
            score + ply as i16
        } else {
            score
        }
    }

    // Returns Some(score) only when depth and bound type allow the caller to
    // use it directly as a cutoff; the stored move is always returned so it
    // can still seed move ordering on a depth miss.
    pub fn get(&self, depth: i8, ply: i8, alpha: i16, beta: i16) -> (Option<i16>, ShortMove) {
        let mut usable = None;

        if self.depth >= depth {
            let score = Self::from_tt(self.score, ply);
            usable = match self.flag {
                HashFlag::Exact => Some(score),
                HashFlag::Alpha if score <= alpha => Some(alpha),
                HashFlag::Beta if score >= beta => Some(beta),
                _ => None,
            };
        }

        (usable, self.best_move)
    }
}

// Entry for a perft-count cache: keyed purely on depth, since perft node
// counts don't depend on alpha/beta bounds or a best move.
#[derive(Copy, Clone, Debug)]
pub struct PerftData {
    pub depth: i8,
    pub leaf_nodes: u64,
}

impl PerftData {
    pub fn create(depth: i8, leaf_nodes: u64) -> Self {
        Self { depth, leaf_nodes }
    }

    pub fn get(&self, depth: i8) -> Option<u64> {
        if self.depth == depth {
            Some(self.leaf_nodes)
        } else {
            None
        }
    }
}

impl TTReplace for PerftData {
    fn depth(&self) -> i8 {
        self.depth
    }
}

#[derive(Copy, Clone)]
struct Entry<T> {
    verification: ZobristKey,
    generation: u8,
    data: T,
}

// Generic transposition table, sized in megabytes. Entries carry the full
// zobrist key alongside the data so that index collisions (two positions
// sharing a slot) are detected on probe rather than silently returning
// another position's data. Replacement is generation- and depth-aware: an
// entry from an older generation is always replaced, and within the same
// generation a shallower stored search only gives way to an equal-or-deeper
// one, so a root re-probe of the current game doesn't evict a deeper line
// computed a move or two ago.
pub struct TT<T> {
    entries: Vec<Option<Entry<T>>>,
    generation: u8,
}

impl<T: Copy + TTReplace> TT<T> {
    pub fn new(megabytes: usize) -> Self {
        let mut tt = Self {
            entries: Vec::new(),
            generation: 0,
        };
        tt.resize(megabytes);
        tt
    }

    pub fn resize(&mut self, megabytes: usize) {
        let entry_size = size_of::<Option<Entry<T>>>().max(1);
        let num_entries = (megabytes * 1024 * 1024) / entry_size;
        self.entries = vec![None; num_entries.max(1)];
    }

    fn index(&self, key: ZobristKey) -> usize {
        (key as usize) % self.entries.len()
    }

    // Bumps the current generation. Called once per "go" and on
    // "ucinewgame" so stale entries from an earlier search or an earlier
    // game age out instead of sticking around behind a same-or-shallower
    // depth check forever.
    pub fn new_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn insert(&mut self, key: ZobristKey, data: T) {
        let i = self.index(key);
        let generation = self.generation;
        let should_replace = match &self.entries[i] {
            None => true,
            Some(e) => e.generation != generation || data.depth() >= e.data.depth(),
        };

        if should_replace {
            self.entries[i] = Some(Entry {
                verification: key,
                generation,
                data,
            });
        }
    }

    pub fn probe(&self, key: ZobristKey) -> Option<&T> {
        let i = self.index(key);
        self.entries[i]
            .as_ref()
            .filter(|e| e.verification == key)
            .map(|e| &e.data)
    }

    pub fn clear(&mut self) {
        for e in self.entries.iter_mut() {
            *e = None;
        }
        self.generation = 0;
    }

    // Per-mille fullness, sampled over a prefix of the table so this stays
    // cheap to call from the "info hashfull" reporting path.
    pub fn hash_full(&self) -> u16 {
        let sample = self.entries.len().min(1000);
        if sample == 0 {
            return 0;
        }
        let occupied = self.entries[..sample].iter().filter(|e| e.is_some()).count();
        ((occupied * 1000) / sample) as u16
    }
}

// Small direct-mapped cache kept per search thread to absorb repeat probes
// of the same position without taking the shared table's read lock.
#[derive(PartialEq)]
pub struct LocalTTCache<T> {
    entries: Vec<Option<(ZobristKey, T)>>,
}

impl<T: Copy> LocalTTCache<T> {
    pub fn new() -> Self {
        Self {
            entries: vec![None; LOCAL_CACHE_ENTRIES],
        }
    }

    fn index(&self, key: ZobristKey) -> usize {
        (key as usize) % self.entries.len()
    }

    pub fn probe(&self, key: ZobristKey) -> Option<&T> {
        let i = self.index(key);
        self.entries[i]
            .as_ref()
            .filter(|(k, _)| *k == key)
            .map(|(_, d)| d)
    }

    pub fn insert(&mut self, key: ZobristKey, data: T) {
        let i = self.index(key);
        self.entries[i] = Some((key, data));
    }

    pub fn clear(&mut self) {
        for e in self.entries.iter_mut() {
            *e = None;
        }
    }
}

impl<T: Copy> Default for LocalTTCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_probe_round_trips() {
        let mut tt: TT<SearchData> = TT::new(1);
        let data = SearchData::create(4, 0, HashFlag::Exact, 123, ShortMove::new(0, 0, 0));
        tt.insert(0xABCDu64, data);
        let probed = tt.probe(0xABCDu64).expect("entry should be present");
        assert_eq!(probed.get(4, 0, -1000, 1000).0, Some(123));
    }

    #[test]
    fn probe_miss_on_key_collision_at_same_index() {
        let mut tt: TT<SearchData> = TT::new(1);
        let data = SearchData::create(4, 0, HashFlag::Exact, 123, ShortMove::new(0, 0, 0));
        tt.insert(1, data);
        // Colliding on the same index with a different key must not satisfy the probe.
        assert!(tt.probe(1 + tt.entries.len() as u64).is_none());
    }

    #[test]
    fn mate_score_is_ply_adjusted_on_store_and_load() {
        let mate_in_two_from_root = CHECKMATE_THRESHOLD + 50;
        let data = SearchData::create(2, 3, HashFlag::Exact, mate_in_two_from_root, ShortMove::new(0, 0, 0));
        let (score, _) = data.get(2, 3, -25_000, 25_000);
        assert_eq!(score, Some(mate_in_two_from_root));
    }

    #[test]
    fn shallower_stored_depth_is_unusable_for_a_deeper_query() {
        let data = SearchData::create(2, 0, HashFlag::Exact, 10, ShortMove::new(0, 0, 0));
        assert_eq!(data.get(5, 0, -1000, 1000).0, None);
    }

    #[test]
    fn local_cache_round_trips_and_clears() {
        let mut cache: LocalTTCache<SearchData> = LocalTTCache::new();
        let data = SearchData::create(3, 0, HashFlag::Beta, 77, ShortMove::new(0, 0, 0));
        cache.insert(42, data);
        assert!(cache.probe(42).is_some());
        cache.clear();
        assert!(cache.probe(42).is_none());
    }
}
