//! Point Store
//!
//! Holds the ordered, immutable list of input points. A point's identity is
//! its position in the store; names need not be unique.

mod parser;

pub use parser::parse_points;

use crate::error::{DistError, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A named geographic location in decimal degrees
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20} {:8.2} {:8.2}",
            self.name, self.latitude, self.longitude
        )
    }
}

/// Ordered, read-only collection of points
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Read and parse a point file
    ///
    /// Any unreadable file or malformed line fails the whole load.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = parse_points(&text)?;
        debug!("Loaded {} points from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl FromIterator<Point> for PointStore {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
