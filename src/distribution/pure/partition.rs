//! Pure chunk planning
//!
//! Splits `total` canonically ordered items into one contiguous chunk per
//! worker using ceiling division. Trailing workers may receive an empty
//! chunk; concatenating the chunks in worker order always reproduces
//! `[0, total)`.

use serde::Serialize;
use std::ops::Range;

/// Contiguous half-open range of pair positions assigned to one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub worker: usize,
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Pure: per-worker chunk size, `ceil(total / workers)`
///
/// Flooring here would silently drop the last `total % workers` items.
pub fn chunk_size(total: usize, workers: usize) -> usize {
    assert!(workers >= 1, "worker count must be at least 1");
    total.div_ceil(workers)
}

/// Pure: plan one chunk per worker covering `[0, total)` exactly
///
/// Worker `w` receives `[w*size, min((w+1)*size, total))`, clamped so that
/// workers past the end get an empty chunk at `total` instead of an error.
pub fn plan_chunks(total: usize, workers: usize) -> Vec<Chunk> {
    let size = chunk_size(total, workers);

    (0..workers)
        .map(|worker| {
            let start = (worker * size).min(total);
            let end = ((worker + 1) * size).min(total);
            Chunk { worker, start, end }
        })
        .collect()
}
