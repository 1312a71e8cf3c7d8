//! Fastest-first ordering of routes.

use std::cmp::Ordering;

use crate::domain::Route;

/// Compare two routes: shorter duration first, then shorter distance.
pub fn fastest_first(a: &Route, b: &Route) -> Ordering {
    a.duration
        .total_cmp(&b.duration)
        .then_with(|| a.distance.total_cmp(&b.distance))
}

/// Rank routes fastest first.
///
/// Routes are ordered by:
/// 1. Duration (shorter is better)
/// 2. Distance (shorter is better)
///
/// The sort is stable, so routes with identical keys keep their input order.
pub fn rank_routes(mut routes: Vec<Route>) -> Vec<Route> {
    routes.sort_by(fastest_first);
    routes
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Location;
    use proptest::prelude::*;

    /// Small value ranges so that ties are common.
    fn arb_routes() -> impl Strategy<Value = Vec<Route>> {
        prop::collection::vec((0u8..5, 0u8..5), 0..30).prop_map(|keys| {
            keys.into_iter()
                .enumerate()
                .map(|(i, (duration, distance))| {
                    let dest = Location::parse(&format!("{}.0,0.0", i % 89)).unwrap();
                    Route::new(dest, f64::from(distance), f64::from(duration))
                })
                .collect()
        })
    }

    proptest! {
        /// Adjacent routes are ordered by duration, then distance
        #[test]
        fn adjacent_pairs_ordered(routes in arb_routes()) {
            let ranked = rank_routes(routes);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].duration <= pair[1].duration);
                if pair[0].duration == pair[1].duration {
                    prop_assert!(pair[0].distance <= pair[1].distance);
                }
            }
        }

        /// Ranking is a permutation of the input
        #[test]
        fn preserves_length_and_members(routes in arb_routes()) {
            let ranked = rank_routes(routes.clone());
            prop_assert_eq!(ranked.len(), routes.len());
            for r in &routes {
                let expected = routes.iter().filter(|x| *x == r).count();
                let found = ranked.iter().filter(|x| *x == r).count();
                prop_assert_eq!(expected, found);
            }
        }

        /// Ranking the same input twice gives the same order
        #[test]
        fn deterministic(routes in arb_routes()) {
            prop_assert_eq!(rank_routes(routes.clone()), rank_routes(routes));
        }

        /// Ranking an already-ranked list changes nothing
        #[test]
        fn idempotent(routes in arb_routes()) {
            let once = rank_routes(routes);
            prop_assert_eq!(rank_routes(once.clone()), once);
        }
    }
}
