//! Pure pair enumeration
//!
//! Produces every unordered index pair `(i, j)` with `i < j` in
//! lexicographic order. That order is the canonical position of each pair
//! for chunking and for reassembling results.

use serde::Serialize;

/// Unordered pair of point positions, always `i < j`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PairIndex {
    pub i: usize,
    pub j: usize,
}

impl PairIndex {
    pub fn new(i: usize, j: usize) -> Self {
        debug_assert!(i < j, "pair indices must satisfy i < j");
        Self { i, j }
    }
}

/// Pure: number of unordered pairs over `n` points
pub fn pair_count(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}

/// Pure: enumerate all pairs over `n` points in canonical order
///
/// Returns an empty sequence for `n < 2`; callers must treat that as "no
/// distances" rather than as a zero distance.
pub fn enumerate_pairs(n: usize) -> Vec<PairIndex> {
    let mut pairs = Vec::with_capacity(pair_count(n));
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push(PairIndex { i, j });
        }
    }
    pairs
}
