//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Slots are addressed by `key % capacity` and every store overwrites its
//! slot. A probe only hits on full-key equality.

use std::collections::TryReserveError;
use std::sync::{Arc, Mutex};

use crate::game_state::jieqi_types::Move;
use crate::search::board_scoring::MATE_SCORE;

/// Default slot count of the process-wide table.
pub const MAX_ZOBRIST: usize = 1 << 20;

/// Scores at least this far from zero are mate scores counted from the root.
const MATE_TT_THRESHOLD: i32 = MATE_SCORE - 1000;

/// Mate score found `ply` plies below the root, re-counted from the node.
#[inline]
pub fn tt_score_for_storage(score: i32, ply: u8) -> i32 {
    if score >= MATE_TT_THRESHOLD {
        score.saturating_add(i32::from(ply))
    } else if score <= -MATE_TT_THRESHOLD {
        score.saturating_sub(i32::from(ply))
    } else {
        score
    }
}

/// Inverse of [`tt_score_for_storage`] for a node `ply` plies below the root.
#[inline]
pub fn tt_score_from_storage(score: i32, ply: u8) -> i32 {
    if score >= MATE_TT_THRESHOLD {
        score.saturating_sub(i32::from(ply))
    } else if score <= -MATE_TT_THRESHOLD {
        score.saturating_add(i32::from(ply))
    } else {
        score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

/// Outcome of a depth- and window-aware probe.
///
/// `hit` means `score` can be returned as is. `best_move` is filled whenever
/// the key matched, deep enough or not, for move ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtProbe {
    pub hit: bool,
    pub score: i32,
    pub best_move: Option<Move>,
    pub bound: Bound,
}

impl TtProbe {
    const MISS: TtProbe = TtProbe {
        hit: false,
        score: 0,
        best_move: None,
        bound: Bound::Upper,
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    stats: TTStats,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::with_capacity(MAX_ZOBRIST)
    }
}

impl TranspositionTable {
    /// Table with `capacity` slots.
    ///
    /// When the allocation fails the table is disabled: probes miss and
    /// stores are dropped.
    pub fn with_capacity(capacity: usize) -> Self {
        match allocate(capacity.max(1)) {
            Ok(entries) => Self {
                entries,
                stats: TTStats::default(),
            },
            Err(err) => {
                log::warn!(
                    "transposition table allocation of {capacity} slots failed ({err}); running without one"
                );
                Self::disabled()
            }
        }
    }

    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let entry_size = std::mem::size_of::<Option<TTEntry>>().max(1);
        Self::with_capacity((bytes / entry_size).max(1))
    }

    pub fn disabled() -> Self {
        Self {
            entries: Vec::new(),
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        !self.entries.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = TTStats::default();
    }

    /// Slot count, not the number of filled slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    /// Raw entry for `key`, if its slot currently holds it.
    pub fn entry(&self, key: u64) -> Option<TTEntry> {
        if !self.is_enabled() {
            return None;
        }
        self.entries[self.idx(key)].filter(|e| e.key == key)
    }

    /// Probe for a node `ply` plies below the root. Stored mate scores come
    /// back counted from that root.
    pub fn probe(&mut self, key: u64, depth: u8, ply: u8, alpha: i32, beta: i32) -> TtProbe {
        self.stats.probes += 1;
        let Some(entry) = self.entry(key) else {
            return TtProbe::MISS;
        };

        let score = tt_score_from_storage(entry.score, ply);
        let usable = entry.depth >= depth
            && match entry.bound {
                Bound::Exact => true,
                Bound::Lower => score >= beta,
                Bound::Upper => score <= alpha,
            };
        if usable {
            self.stats.hits += 1;
        }
        TtProbe {
            hit: usable,
            score,
            best_move: entry.best_move,
            bound: entry.bound,
        }
    }

    pub fn store(&mut self, entry: TTEntry) {
        if !self.is_enabled() {
            return;
        }
        self.stats.stores += 1;
        let idx = self.idx(entry.key);
        self.entries[idx] = Some(entry);
    }
}

fn allocate(capacity: usize) -> Result<Vec<Option<TTEntry>>, TryReserveError> {
    let mut entries = Vec::new();
    entries.try_reserve_exact(capacity)?;
    entries.resize(capacity, None);
    Ok(entries)
}

/// Transposition table behind one mutex, shared by every search that holds
/// the `Arc`.
///
/// A poisoned lock reads as a miss and drops stores.
#[derive(Debug)]
pub struct SharedTranspositionTable {
    table: Mutex<TranspositionTable>,
}

impl SharedTranspositionTable {
    pub fn new(table: TranspositionTable) -> Arc<Self> {
        Arc::new(Self {
            table: Mutex::new(table),
        })
    }

    pub fn with_capacity(capacity: usize) -> Arc<Self> {
        Self::new(TranspositionTable::with_capacity(capacity))
    }

    pub fn probe(&self, key: u64, depth: u8, ply: u8, alpha: i32, beta: i32) -> TtProbe {
        let Ok(mut guard) = self.table.lock() else {
            return TtProbe::MISS;
        };
        guard.probe(key, depth, ply, alpha, beta)
    }

    pub fn entry(&self, key: u64) -> Option<TTEntry> {
        let Ok(guard) = self.table.lock() else {
            return None;
        };
        guard.entry(key)
    }

    pub fn store(&self, entry: TTEntry) {
        if let Ok(mut guard) = self.table.lock() {
            guard.store(entry);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.table.lock() {
            guard.clear();
        }
    }

    pub fn capacity(&self) -> usize {
        self.table.lock().map(|g| g.capacity()).unwrap_or(0)
    }

    pub fn stats(&self) -> TTStats {
        self.table.lock().map(|g| g.stats()).unwrap_or_default()
    }
}
