//! Distributed all-pairs distance computation
//!
//! The pipeline is: enumerate canonical pairs, plan one contiguous chunk per
//! worker, scatter chunks, gather results in worker order, reduce to the
//! maximum.
//!
//! - `pure` - pair enumeration and chunk planning, no I/O
//! - `kernel` - haversine distance and the `DistanceKernel` seam
//! - `state_machine` - coordinator protocol phases
//! - `worker` - one-chunk worker tasks
//! - `coordinator` - scatter/gather driver and phase timing
//! - `reducer` - maximum and run report
//! - `serial` - single-threaded reference path

pub mod coordinator;
pub mod kernel;
pub mod pure;
pub mod reducer;
pub mod serial;
pub mod state_machine;
pub mod worker;

pub use coordinator::{Coordinator, DistributedRun};
pub use kernel::{haversine_km, CoordinatePair, DistanceKernel, Haversine, EARTH_RADIUS_KM};
pub use pure::{chunk_size, enumerate_pairs, pair_count, plan_chunks, Chunk, PairIndex};
pub use reducer::{reduce, reduce_max, DistanceReport, FarthestPair};
pub use serial::serial_distances;
pub use state_machine::{apply_transition, ProtocolState, ProtocolTransition};

use crate::config::RunConfig;
use crate::error::Result;
use crate::points::PointStore;
use tracing::info;

/// Run the whole distributed phase and reduce it to a report
pub async fn compute_max_distance(store: &PointStore, config: &RunConfig) -> Result<DistanceReport> {
    let coordinator = Coordinator::from_config(config)?;
    let run = coordinator.run(store).await?;
    let report = reduce(&run, store)?;

    info!(
        "Maximum distance {:.0} km between '{}' and '{}' ({} pairs, {} workers, {:.3}s)",
        report.max_distance_km,
        report.farthest_pair.first,
        report.farthest_pair.second,
        report.pair_count,
        report.workers,
        report.elapsed_seconds
    );

    Ok(report)
}
