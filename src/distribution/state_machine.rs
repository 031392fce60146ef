//! Pure coordinator protocol state machine
//!
//! ## State Machine Diagram
//!
//! ```text
//! ┌──────┐  Distribute   ┌──────────────┐  Dispatched  ┌───────────┐
//! │ Idle │ ────────────▶ │ Distributing │ ───────────▶ │ Computing │
//! └──────┘               └──────────────┘              └─────┬─────┘
//!                                                            │ Collect
//!                                                            ▼
//!                        ┌──────┐        Finish        ┌─────────────┐
//!                        │ Done │ ◀─────────────────── │ Aggregating │
//!                        └──────┘                      └─────────────┘
//! ```
//!
//! Any other transition is rejected. `Done` is terminal; a failed run never
//! reaches it.

use crate::error::{DistError, Stage};
use std::fmt;

/// Phase of one distributed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolState {
    Idle,
    Distributing { workers: usize, total_pairs: usize },
    Computing { workers: usize, total_pairs: usize },
    Aggregating { total_pairs: usize },
    Done { total_pairs: usize },
}

/// Events that move the coordinator between phases
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolTransition {
    /// Chunk boundaries are planned and workers are about to be spawned
    Distribute { workers: usize, total_pairs: usize },
    /// Every worker has been handed its chunk
    Dispatched,
    /// Start joining workers in index order
    Collect,
    /// The aggregate list holds exactly `total_pairs` results
    Finish,
}

impl ProtocolState {
    /// Stage reported when a transition out of this state is rejected
    pub fn stage(&self) -> Stage {
        match self {
            Self::Idle | Self::Distributing { .. } => Stage::Distribute,
            Self::Computing { .. } => Stage::Compute,
            Self::Aggregating { .. } | Self::Done { .. } => Stage::Aggregate,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}

impl fmt::Display for ProtocolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "IDLE",
            Self::Distributing { .. } => "DISTRIBUTING",
            Self::Computing { .. } => "COMPUTING",
            Self::Aggregating { .. } => "AGGREGATING",
            Self::Done { .. } => "DONE",
        };
        f.write_str(name)
    }
}

/// Apply a transition to the current state
pub fn apply_transition(
    state: ProtocolState,
    transition: ProtocolTransition,
) -> Result<ProtocolState, DistError> {
    match (state, transition) {
        (
            ProtocolState::Idle,
            ProtocolTransition::Distribute {
                workers,
                total_pairs,
            },
        ) => Ok(ProtocolState::Distributing {
            workers,
            total_pairs,
        }),

        (
            ProtocolState::Distributing {
                workers,
                total_pairs,
            },
            ProtocolTransition::Dispatched,
        ) => Ok(ProtocolState::Computing {
            workers,
            total_pairs,
        }),

        (ProtocolState::Computing { total_pairs, .. }, ProtocolTransition::Collect) => {
            Ok(ProtocolState::Aggregating { total_pairs })
        }

        (ProtocolState::Aggregating { total_pairs }, ProtocolTransition::Finish) => {
            Ok(ProtocolState::Done { total_pairs })
        }

        (state, transition) => Err(DistError::protocol(
            state.stage(),
            format!("invalid transition {:?} from {}", transition, state),
        )),
    }
}
