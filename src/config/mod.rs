//! Run configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `DIST_CITIES_*` environment variables, then command-line flags.

use crate::distribution::EARTH_RADIUS_KM;
use crate::error::{DistError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub const ENV_WORKERS: &str = "DIST_CITIES_WORKERS";
pub const ENV_TIMEOUT_SECS: &str = "DIST_CITIES_TIMEOUT_SECS";

/// Settings for one distributed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Number of worker roles, fixed for the whole run
    pub workers: usize,
    /// Sphere radius used by the haversine kernel
    pub earth_radius_km: f64,
    /// Abort the run if workers have not all replied in time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            earth_radius_km: EARTH_RADIUS_KM,
            timeout_secs: None,
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl RunConfig {
    /// Load a TOML configuration file on top of the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DistError::config(format!("cannot read {}", path.display())).with_source(e)
        })?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded run configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| DistError::config("invalid configuration file").with_source(e))
    }

    /// Apply `DIST_CITIES_*` environment overrides
    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_WORKERS) {
            self.workers = parse_env(ENV_WORKERS, &value)?;
        }

        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = Some(parse_env(ENV_TIMEOUT_SECS, &value)?);
        }

        Ok(())
    }

    /// Reject settings the coordinator cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(DistError::config("workers must be at least 1"));
        }

        if !(self.earth_radius_km.is_finite() && self.earth_radius_km > 0.0) {
            return Err(DistError::config(format!(
                "earth_radius_km must be a positive number, got {}",
                self.earth_radius_km
            )));
        }

        if self.timeout_secs == Some(0) {
            return Err(DistError::config("timeout_secs must be greater than 0"));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        DistError::config(format!("{} must be a non-negative integer, got '{}'", key, value))
    })
}
