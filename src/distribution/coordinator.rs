//! Coordinator for the distributed phase
//!
//! The coordinator owns the point store and the canonical pair sequence. It
//! scatters one contiguous chunk to each worker, gathers the result lists
//! back in worker-index order and concatenates them. Because chunks are
//! gap-free and increasing, the concatenation is already in canonical pair
//! order; no pair identifiers travel with the results.

use super::kernel::{CoordinatePair, DistanceKernel, Haversine};
use super::pure::{chunk_size, enumerate_pairs, plan_chunks, Chunk, PairIndex};
use super::state_machine::{apply_transition, ProtocolState, ProtocolTransition};
use super::worker::{spawn_worker, ChunkAssignment, WorkerHandle};
use crate::config::RunConfig;
use crate::error::{DistError, Result, Stage};
use crate::points::PointStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

/// Output of one distributed run, before reduction
#[derive(Debug, Clone)]
pub struct DistributedRun {
    /// Canonical pair sequence; `distances[k]` belongs to `pairs[k]`
    pub pairs: Vec<PairIndex>,
    pub distances: Vec<f64>,
    pub chunks: Vec<Chunk>,
    /// Wall-clock time from distributing through aggregating
    pub elapsed: Duration,
}

impl DistributedRun {
    pub fn workers(&self) -> usize {
        self.chunks.len()
    }
}

/// Scatter/gather driver, generic over the distance kernel
pub struct Coordinator<K: DistanceKernel = Haversine> {
    kernel: Arc<K>,
    workers: usize,
    timeout: Option<Duration>,
}

impl Coordinator<Haversine> {
    /// Build a haversine coordinator from a validated run configuration
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        let coordinator = Self::new(Haversine::new(config.earth_radius_km), config.workers)?;
        Ok(match config.timeout() {
            Some(limit) => coordinator.with_timeout(limit),
            None => coordinator,
        })
    }
}

impl<K: DistanceKernel> Coordinator<K> {
    pub fn new(kernel: K, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(DistError::config("worker count must be at least 1"));
        }

        Ok(Self {
            kernel: Arc::new(kernel),
            workers,
            timeout: None,
        })
    }

    /// Fail the whole run if workers have not all replied within `limit`
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Compute the distance of every pair in `store` across the worker pool
    ///
    /// Fewer than two points is not an error here: every worker receives an
    /// empty chunk and the run returns no distances.
    pub async fn run(&self, store: &PointStore) -> Result<DistributedRun> {
        let pairs = enumerate_pairs(store.len());
        let total = pairs.len();
        let chunks = plan_chunks(total, self.workers);
        let batches = chunks
            .iter()
            .map(|chunk| resolve_coordinates(store, &pairs[chunk.range()]))
            .collect::<Result<Vec<_>>>()?;

        let mut state = ProtocolState::Idle;
        let started = Instant::now();

        state = apply_transition(
            state,
            ProtocolTransition::Distribute {
                workers: self.workers,
                total_pairs: total,
            },
        )?;
        info!(
            "Distributing {} pairs across {} workers (chunk size {})",
            total,
            self.workers,
            chunk_size(total, self.workers)
        );

        let cancel = Arc::new(AtomicBool::new(false));
        let handles = match self.scatter(&chunks, batches, &cancel) {
            Ok(handles) => handles,
            Err(err) => {
                cancel.store(true, Ordering::Release);
                return Err(err);
            }
        };
        let abort_handles: Vec<AbortHandle> =
            handles.iter().map(WorkerHandle::abort_handle).collect();

        state = apply_transition(state, ProtocolTransition::Dispatched)?;
        state = apply_transition(state, ProtocolTransition::Collect)?;

        let gathered = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, gather(handles, total)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("Workers did not finish within {:?}, aborting run", limit);
                    Err(DistError::Timeout { limit })
                }
            },
            None => gather(handles, total).await,
        };

        let distances = match gathered {
            Ok(distances) => distances,
            Err(err) => {
                cancel.store(true, Ordering::Release);
                abort_handles.iter().for_each(AbortHandle::abort);
                return Err(err);
            }
        };

        state = apply_transition(state, ProtocolTransition::Finish)?;
        debug_assert!(state.is_done());

        let elapsed = started.elapsed();
        debug!("Protocol reached {} in {:?}", state, elapsed);

        Ok(DistributedRun {
            pairs,
            distances,
            chunks,
            elapsed,
        })
    }

    /// Spawn one worker per chunk and move each its batch of coordinates
    fn scatter(
        &self,
        chunks: &[Chunk],
        batches: Vec<Vec<CoordinatePair>>,
        cancel: &Arc<AtomicBool>,
    ) -> Result<Vec<WorkerHandle>> {
        chunks
            .iter()
            .zip(batches)
            .map(|(chunk, pairs)| {
                let mut handle =
                    spawn_worker(chunk.worker, Arc::clone(&self.kernel), Arc::clone(cancel));
                handle.send_chunk(ChunkAssignment {
                    chunk: *chunk,
                    pairs,
                })?;
                Ok(handle)
            })
            .collect()
    }
}

/// Join workers in index order and concatenate their results
///
/// Each chunk must start where the previous one ended, and the total must
/// equal the number of pairs.
async fn gather(handles: Vec<WorkerHandle>, total: usize) -> Result<Vec<f64>> {
    let mut distances = Vec::with_capacity(total);

    for handle in handles {
        let id = handle.id();
        let result = handle.collect().await?;

        if result.chunk.start != distances.len() {
            return Err(DistError::protocol(
                Stage::Aggregate,
                format!(
                    "worker {} returned chunk starting at {}, expected {}",
                    id,
                    result.chunk.start,
                    distances.len()
                ),
            ));
        }

        debug!(
            "Worker {} returned {} distances for pairs [{}, {})",
            id,
            result.distances.len(),
            result.chunk.start,
            result.chunk.end
        );
        distances.extend(result.distances);
    }

    if distances.len() != total {
        return Err(DistError::protocol(
            Stage::Aggregate,
            format!("expected {} distances, gathered {}", total, distances.len()),
        ));
    }

    Ok(distances)
}

/// Materialize the coordinates of a run of pairs in canonical order
fn resolve_coordinates(store: &PointStore, pairs: &[PairIndex]) -> Result<Vec<CoordinatePair>> {
    pairs
        .iter()
        .map(|pair| match (store.get(pair.i), store.get(pair.j)) {
            (Some(a), Some(b)) => Ok(CoordinatePair::new(a, b)),
            _ => Err(DistError::protocol(
                Stage::Enumerate,
                format!("pair ({}, {}) outside point store", pair.i, pair.j),
            )),
        })
        .collect()
}
