//! Single-threaded reference path
//!
//! Runs the kernel over the canonical pair sequence with no workers. The
//! distributed result for any worker count must equal this element for
//! element.

use super::kernel::{CoordinatePair, DistanceKernel};
use super::pure::enumerate_pairs;
use crate::points::PointStore;

pub fn serial_distances<K: DistanceKernel + ?Sized>(store: &PointStore, kernel: &K) -> Vec<f64> {
    let points = store.points();

    enumerate_pairs(points.len())
        .into_iter()
        .map(|pair| kernel.distance(&CoordinatePair::new(&points[pair.i], &points[pair.j])))
        .collect()
}
