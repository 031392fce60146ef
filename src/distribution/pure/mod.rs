//! Pure planning functions for the distributed phase
//!
//! Enumeration and partitioning perform no I/O and are deterministic for a
//! given point count and worker count.

pub mod pairs;
pub mod partition;

pub use pairs::{enumerate_pairs, pair_count, PairIndex};
pub use partition::{chunk_size, plan_chunks, Chunk};
