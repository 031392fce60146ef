//! Result reduction
//!
//! Turns the aggregated distance list into the run report: the maximum
//! distance, the pair realising it, and the time spent in the distributed
//! phase.

use super::coordinator::DistributedRun;
use super::pure::PairIndex;
use crate::error::{DistError, Result};
use crate::points::PointStore;
use serde::Serialize;

/// The two points furthest apart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarthestPair {
    #[serde(flatten)]
    pub pair: PairIndex,
    pub first: String,
    pub second: String,
}

/// Output contract of a completed run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceReport {
    pub max_distance_km: f64,
    pub elapsed_seconds: f64,
    pub farthest_pair: FarthestPair,
    pub pair_count: usize,
    pub workers: usize,
}

/// Pure: position and value of the largest distance
///
/// Ties resolve to the first occurrence. NaN entries never win; returns
/// `None` for a list with no comparable value.
pub fn reduce_max(distances: &[f64]) -> Option<(usize, f64)> {
    distances
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, d)| !d.is_nan())
        .fold(None, |best, (idx, d)| match best {
            Some((_, max)) if d <= max => best,
            _ => Some((idx, d)),
        })
}

/// Reduce a distributed run to its report
///
/// An empty run (fewer than two points) is `InsufficientInput`, never a
/// zero-kilometre maximum.
pub fn reduce(run: &DistributedRun, store: &PointStore) -> Result<DistanceReport> {
    let (position, max_distance_km) = reduce_max(&run.distances)
        .ok_or(DistError::InsufficientInput {
            points: store.len(),
        })?;

    let pair = run.pairs[position];
    let name = |idx: usize| {
        store
            .get(idx)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    };

    Ok(DistanceReport {
        max_distance_km,
        elapsed_seconds: run.elapsed.as_secs_f64(),
        farthest_pair: FarthestPair {
            pair,
            first: name(pair.i),
            second: name(pair.j),
        },
        pair_count: run.distances.len(),
        workers: run.workers(),
    })
}
