//! Property tests for the pure distribution functions
//!
//! - Pair enumeration is complete, unique and canonically ordered
//! - Chunk plans cover the pair sequence exactly once, in order
//! - The haversine kernel is symmetric, non-negative and bounded

use dist_cities::distribution::{
    chunk_size, enumerate_pairs, haversine_km, pair_count, plan_chunks, EARTH_RADIUS_KM,
};
use proptest::prelude::*;
use std::collections::HashSet;
use std::f64::consts::PI;

mod pairs {
    use super::*;

    proptest! {
        #[test]
        fn enumeration_is_complete_and_unique(n in 0usize..60) {
            let pairs = enumerate_pairs(n);
            prop_assert_eq!(pairs.len(), n * n.saturating_sub(1) / 2);
            prop_assert_eq!(pairs.len(), pair_count(n));

            let unique: HashSet<(usize, usize)> = pairs.iter().map(|p| (p.i, p.j)).collect();
            prop_assert_eq!(unique.len(), pairs.len());
            prop_assert!(pairs.iter().all(|p| p.i < p.j && p.j < n));
        }

        #[test]
        fn enumeration_is_lexicographic(n in 2usize..60) {
            let pairs = enumerate_pairs(n);
            prop_assert!(pairs.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

mod partition {
    use super::*;

    proptest! {
        #[test]
        fn chunks_cover_total_exactly(total in 0usize..5_000, workers in 1usize..64) {
            let chunks = plan_chunks(total, workers);
            prop_assert_eq!(chunks.len(), workers);

            let mut next = 0;
            for (w, chunk) in chunks.iter().enumerate() {
                prop_assert_eq!(chunk.worker, w);
                prop_assert_eq!(chunk.start, next);
                prop_assert!(chunk.end >= chunk.start);
                prop_assert!(chunk.len() <= chunk_size(total, workers));
                next = chunk.end;
            }
            prop_assert_eq!(next, total);
        }

        #[test]
        fn only_trailing_chunks_are_short(total in 1usize..5_000, workers in 1usize..64) {
            let size = chunk_size(total, workers);
            let chunks = plan_chunks(total, workers);

            // Once a chunk falls short of the full size, every later one is empty.
            let first_short = chunks.iter().position(|c| c.len() < size);
            if let Some(pos) = first_short {
                prop_assert!(chunks[pos + 1..].iter().all(|c| c.is_empty()));
            }
        }
    }
}

mod kernel {
    use super::*;

    fn latitude() -> impl Strategy<Value = f64> {
        -90.0f64..=90.0
    }

    fn longitude() -> impl Strategy<Value = f64> {
        -180.0f64..=180.0
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            lat1 in latitude(), lon1 in longitude(),
            lat2 in latitude(), lon2 in longitude(),
        ) {
            let forward = haversine_km(lat1, lon1, lat2, lon2, EARTH_RADIUS_KM);
            let backward = haversine_km(lat2, lon2, lat1, lon1, EARTH_RADIUS_KM);
            prop_assert!((forward - backward).abs() < 1e-9);
        }

        #[test]
        fn distance_is_bounded_by_half_circumference(
            lat1 in latitude(), lon1 in longitude(),
            lat2 in latitude(), lon2 in longitude(),
        ) {
            let d = haversine_km(lat1, lon1, lat2, lon2, EARTH_RADIUS_KM);
            prop_assert!(d.is_finite());
            prop_assert!(d >= 0.0);
            prop_assert!(d <= PI * EARTH_RADIUS_KM + 1e-6);
        }

        #[test]
        fn identical_points_are_zero(lat in latitude(), lon in longitude()) {
            prop_assert_eq!(haversine_km(lat, lon, lat, lon, EARTH_RADIUS_KM), 0.0);
        }
    }
}
