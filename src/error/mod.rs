use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// Pipeline stage that raised an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Config,
    Load,
    Enumerate,
    Distribute,
    Compute,
    Aggregate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Config => "config",
            Self::Load => "load",
            Self::Enumerate => "enumerate",
            Self::Distribute => "distribute",
            Self::Compute => "compute",
            Self::Aggregate => "aggregate",
        };
        f.write_str(name)
    }
}

/// Every way a run can fail
///
/// All variants are fatal for the run. Numeric domain problems inside the
/// haversine kernel never surface here; they are clamped at the source.
#[derive(Error, Debug)]
pub enum DistError {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Insufficient input: {points} point(s) supplied, at least 2 required")]
    InsufficientInput { points: usize },

    #[error("Worker {worker} failed: {reason}")]
    WorkerFailure { worker: usize, reason: String },

    #[error("Distributed phase timed out after {limit:?}")]
    Timeout { limit: Duration },

    #[error("Protocol error during {stage}: {message}")]
    Protocol { stage: Stage, message: String },
}

impl DistError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a worker failure
    pub fn worker(worker: usize, reason: impl Into<String>) -> Self {
        Self::WorkerFailure {
            worker,
            reason: reason.into(),
        }
    }

    /// Create a protocol error for the given stage
    pub fn protocol(stage: Stage, message: impl Into<String>) -> Self {
        Self::Protocol {
            stage,
            message: message.into(),
        }
    }

    /// Attach a source error (only meaningful for configuration errors)
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        if let Self::Config { source: src, .. } = &mut self {
            *src = Some(source.into());
        }
        self
    }

    /// The stage of the pipeline that failed
    pub fn stage(&self) -> Stage {
        match self {
            Self::Config { .. } => Stage::Config,
            Self::Io { .. } | Self::MalformedRecord { .. } => Stage::Load,
            Self::InsufficientInput { .. } => Stage::Enumerate,
            Self::WorkerFailure { .. } | Self::Timeout { .. } => Stage::Compute,
            Self::Protocol { stage, .. } => *stage,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { source, .. } => match source {
                Some(err) if err.is::<toml::de::Error>() => ErrorCode::CONFIG_INVALID_TOML,
                Some(err) if err.is::<std::io::Error>() => ErrorCode::CONFIG_NOT_FOUND,
                Some(_) => ErrorCode::CONFIG_GENERIC,
                None => ErrorCode::CONFIG_INVALID_VALUE,
            },
            Self::Io { .. } => ErrorCode::LOAD_IO_ERROR,
            Self::MalformedRecord { .. } => ErrorCode::LOAD_MALFORMED_RECORD,
            Self::InsufficientInput { .. } => ErrorCode::ENUMERATE_INSUFFICIENT_INPUT,
            Self::WorkerFailure { .. } => ErrorCode::COMPUTE_WORKER_FAILED,
            Self::Timeout { .. } => ErrorCode::COMPUTE_TIMEOUT,
            Self::Protocol { stage, .. } => match stage {
                Stage::Config => ErrorCode::CONFIG_GENERIC,
                Stage::Load => ErrorCode::LOAD_PROTOCOL,
                Stage::Enumerate => ErrorCode::ENUMERATE_PROTOCOL,
                Stage::Distribute => ErrorCode::DISTRIBUTE_PROTOCOL,
                Stage::Compute => ErrorCode::COMPUTE_PROTOCOL,
                Stage::Aggregate => ErrorCode::AGGREGATE_LENGTH_MISMATCH,
            },
        }
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.stage() {
            Stage::Config => 2,
            Stage::Load => 3,
            Stage::Enumerate => 4,
            Stage::Distribute => 5,
            Stage::Compute => 6,
            Stage::Aggregate => 7,
        }
    }

    /// Get a user-friendly error message naming the failed stage
    pub fn user_message(&self) -> String {
        let detail = match self {
            Self::Config { message, .. } => format!("configuration problem: {}", message),
            Self::Io { path, source } => format!("cannot read {}: {}", path.display(), source),
            Self::MalformedRecord { line, reason } => {
                format!("line {} is not a valid point record: {}", line, reason)
            }
            Self::InsufficientInput { points } => format!(
                "no pairs to compute ({} point(s) supplied, at least 2 required)",
                points
            ),
            Self::WorkerFailure { worker, reason } => {
                format!("worker {} did not return its chunk: {}", worker, reason)
            }
            Self::Timeout { limit } => format!("workers did not finish within {:?}", limit),
            Self::Protocol { message, .. } => message.clone(),
        };
        format!("Stage '{}' failed: {}", self.stage(), detail)
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut message = format!("[E{:04}] {}", self.code(), self);
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        message
    }
}

pub type Result<T> = std::result::Result<T, DistError>;

#[cfg(test)]
mod tests;
