//! Worker role
//!
//! A worker is a tokio task that receives exactly one chunk over a one-shot
//! channel, applies the distance kernel to every pair on the blocking pool,
//! and replies with one ordered result list. Workers share nothing mutable
//! and never talk to each other.

use super::kernel::{CoordinatePair, DistanceKernel};
use super::pure::Chunk;
use crate::error::{DistError, Stage};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, trace, warn};

/// The chunk handed to one worker, with coordinates already resolved
#[derive(Debug, Clone)]
pub struct ChunkAssignment {
    pub chunk: Chunk,
    pub pairs: Vec<CoordinatePair>,
}

/// Distances for one chunk, in the chunk's pair order
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkResult {
    pub chunk: Chunk,
    pub distances: Vec<f64>,
}

type WorkerReply = Result<ChunkResult, String>;

/// Coordinator-side handle to a spawned worker
pub struct WorkerHandle {
    id: usize,
    assignment_tx: Option<oneshot::Sender<ChunkAssignment>>,
    result_rx: oneshot::Receiver<WorkerReply>,
    task: JoinHandle<()>,
}

/// Apply the kernel to every pair of an assignment
///
/// `cancel` is checked before each pair; once set, the chunk is abandoned
/// and no further pairs are computed.
pub fn compute_chunk<K: DistanceKernel + ?Sized>(
    kernel: &K,
    assignment: ChunkAssignment,
    cancel: &AtomicBool,
) -> WorkerReply {
    let total = assignment.pairs.len();
    let mut distances = Vec::with_capacity(total);

    for (done, pair) in assignment.pairs.iter().enumerate() {
        if cancel.load(Ordering::Acquire) {
            return Err(format!("cancelled after {} of {} pairs", done, total));
        }
        distances.push(kernel.distance(pair));
    }

    Ok(ChunkResult {
        chunk: assignment.chunk,
        distances,
    })
}

/// Spawn a worker that waits for its chunk
///
/// Setting `cancel` stops the kernel loop between pairs. Aborting the task
/// alone cannot interrupt work already on the blocking pool.
pub fn spawn_worker<K: DistanceKernel>(
    id: usize,
    kernel: Arc<K>,
    cancel: Arc<AtomicBool>,
) -> WorkerHandle {
    let (assignment_tx, assignment_rx) = oneshot::channel::<ChunkAssignment>();
    let (result_tx, result_rx) = oneshot::channel::<WorkerReply>();

    let task = tokio::spawn(async move {
        let assignment = match assignment_rx.await {
            Ok(assignment) => assignment,
            Err(_) => {
                debug!("Worker {} shut down before receiving a chunk", id);
                return;
            }
        };

        trace!(
            "Worker {} received pairs [{}, {})",
            id,
            assignment.chunk.start,
            assignment.chunk.end
        );

        let reply = tokio::task::spawn_blocking(move || {
            compute_chunk(&*kernel, assignment, &cancel)
        })
        .await
        .map_err(|join_err| {
            if join_err.is_panic() {
                format!("kernel panicked: {}", join_err)
            } else {
                format!("computation cancelled: {}", join_err)
            }
        })
        .and_then(|reply| reply);

        if result_tx.send(reply).is_err() {
            warn!("Worker {} finished but the coordinator stopped listening", id);
        }
    });

    WorkerHandle {
        id,
        assignment_tx: Some(assignment_tx),
        result_rx,
        task,
    }
}

impl WorkerHandle {
    /// Handle whose reply is already decided, for exercising the gather path
    #[cfg(test)]
    pub(crate) fn with_reply(id: usize, reply: WorkerReply) -> Self {
        let (result_tx, result_rx) = oneshot::channel();
        let _ = result_tx.send(reply);

        Self {
            id,
            assignment_tx: None,
            result_rx,
            task: tokio::spawn(async {}),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Handle for aborting the worker task from outside a pending collect
    pub fn abort_handle(&self) -> AbortHandle {
        self.task.abort_handle()
    }

    /// Send the worker its single chunk
    pub fn send_chunk(&mut self, assignment: ChunkAssignment) -> Result<(), DistError> {
        let tx = self.assignment_tx.take().ok_or_else(|| {
            DistError::protocol(
                Stage::Distribute,
                format!("worker {} was already assigned a chunk", self.id),
            )
        })?;

        tx.send(assignment).map_err(|_| {
            DistError::protocol(
                Stage::Distribute,
                format!("worker {} exited before receiving its chunk", self.id),
            )
        })
    }

    /// Block until the worker returns its whole chunk
    ///
    /// A closed reply channel, a panicked or cancelled kernel, a result list
    /// whose length differs from the chunk, or a distance that is negative
    /// or not finite is a fatal worker failure.
    pub async fn collect(self) -> Result<ChunkResult, DistError> {
        let id = self.id;

        let reply = self
            .result_rx
            .await
            .map_err(|_| DistError::worker(id, "worker exited without replying"))?;
        let result = reply.map_err(|reason| DistError::worker(id, reason))?;

        self.task
            .await
            .map_err(|e| DistError::worker(id, format!("worker task failed: {}", e)))?;

        if result.distances.len() != result.chunk.len() {
            return Err(DistError::worker(
                id,
                format!(
                    "returned {} distances for a chunk of {} pairs",
                    result.distances.len(),
                    result.chunk.len()
                ),
            ));
        }

        if let Some((offset, distance)) = result
            .distances
            .iter()
            .enumerate()
            .find(|(_, d)| !(d.is_finite() && **d >= 0.0))
        {
            return Err(DistError::worker(
                id,
                format!(
                    "distance {} for pair {} is not a finite non-negative number",
                    distance,
                    result.chunk.start + offset
                ),
            ));
        }

        Ok(result)
    }
}
