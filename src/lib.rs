//! # dist-cities
//!
//! Finds the largest great-circle distance between any two points of a city
//! list by spreading the all-pairs haversine computation over a pool of
//! cooperating workers.
//!
//! ## Usage
//!
//! ```bash
//! dist-cities [cities.txt] [-w workers] [--json]
//! ```
//!
//! ## Modules
//!
//! - `app` - Logging setup and fatal error reporting for the binary
//! - `config` - Layered run configuration (defaults, TOML, environment)
//! - `distribution` - Pair enumeration, chunking, coordinator/worker protocol and reduction
//! - `error` - Stage-aware error type with codes and exit statuses
//! - `points` - Point records and the city-file loader
pub mod app;
pub mod config;
pub mod distribution;
pub mod error;
pub mod points;

pub use config::RunConfig;
pub use distribution::{compute_max_distance, DistanceReport};
pub use error::{DistError, Result};
pub use points::{Point, PointStore};
