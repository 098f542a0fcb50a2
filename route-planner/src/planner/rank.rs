//! Itinerary ranking for search results.

use chrono::NaiveDate;

use super::Criterion;
use crate::domain::Itinerary;

/// Rank itineraries by preference under a criterion.
///
/// Itineraries are ranked by:
/// 1. Path cost under `criterion` (lower is better)
/// 2. For time, number of legs (fewer is better)
///
/// The sort is stable, so itineraries that tie keep the order they were
/// found in. Returns itineraries sorted best-first.
pub fn rank_itineraries(
    mut itineraries: Vec<Itinerary>,
    criterion: Criterion,
    anchor: NaiveDate,
) -> Vec<Itinerary> {
    itineraries.sort_by_key(|itinerary| criterion.rank_key(itinerary, anchor));
    itineraries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Departure, TransportMode};
    use std::sync::Arc;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn make_itinerary(legs: &[(&str, &str, &str, u32, u32)]) -> Itinerary {
        Itinerary::new(
            legs.iter()
                .map(|(from, to, dep, duration, price)| {
                    Arc::new(Departure::new(
                        TransportMode::Bus,
                        from,
                        to,
                        dep,
                        *duration,
                        *price,
                        5,
                    ))
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn rank_by_price() {
        let dear = make_itinerary(&[("A", "C", "08:00", 60, 900)]);
        let cheap = make_itinerary(&[("A", "B", "08:00", 60, 200), ("B", "C", "10:00", 60, 300)]);

        let ranked = rank_itineraries(vec![dear.clone(), cheap.clone()], Criterion::Price, date());
        assert_eq!(ranked, vec![cheap, dear]);
    }

    #[test]
    fn rank_by_time_prefers_fewer_legs_on_tie() {
        let change = make_itinerary(&[("A", "B", "08:00", 30, 0), ("B", "C", "08:40", 20, 0)]);
        let direct = make_itinerary(&[("A", "C", "09:00", 60, 0)]);

        let ranked =
            rank_itineraries(vec![change.clone(), direct.clone()], Criterion::Time, date());
        assert_eq!(ranked, vec![direct, change]);
    }

    #[test]
    fn rank_by_transfers() {
        let two = make_itinerary(&[
            ("A", "B", "08:00", 30, 0),
            ("B", "C", "09:00", 30, 0),
            ("C", "D", "10:00", 30, 0),
        ]);
        let one = make_itinerary(&[("A", "C", "08:00", 30, 0), ("C", "D", "10:00", 30, 0)]);

        let ranked = rank_itineraries(vec![two.clone(), one.clone()], Criterion::Transfers, date());
        assert_eq!(ranked, vec![one, two]);
    }

    #[test]
    fn ties_keep_discovery_order() {
        let first = make_itinerary(&[("A", "C", "08:00", 30, 100)]);
        let second = make_itinerary(&[("A", "C", "09:00", 30, 100)]);

        let ranked =
            rank_itineraries(vec![first.clone(), second.clone()], Criterion::Price, date());
        assert_eq!(ranked, vec![first, second]);
    }

    #[test]
    fn empty_input() {
        assert!(rank_itineraries(vec![], Criterion::Time, date()).is_empty());
    }
}
