//! Per-criterion search strategies.
//!
//! Each criterion supplies how a partial itinerary's cost accumulates, which
//! frontier orders the search, and how visited states are pruned. The search
//! driver in `search.rs` is generic over these.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use super::Criterion;
use super::frontier::{CostQueue, FifoQueue, Frontier};
use crate::domain::{Departure, Timeline, TripTime};

/// Cost model and search shape for one criterion.
pub(crate) trait Strategy {
    /// State carried along a partial itinerary.
    type Label: Clone;
    /// Frontier used to order partial itineraries.
    type Frontier: Frontier<Self::Label>;
    /// Pruning used when looking for the single best itinerary.
    type Pruning: Pruning<Self::Label>;

    const CRITERION: Criterion;

    /// Label after boarding the first leg.
    fn start(&self, leg: &Departure) -> Self::Label;

    /// Label after boarding a connecting leg.
    fn extend(&self, label: &Self::Label, leg: &Departure) -> Self::Label;

    /// Accumulated cost of a label.
    fn cost(&self, label: &Self::Label) -> u64;
}

/// Visited-state bookkeeping for a search run.
pub(crate) trait Pruning<L>: Default {
    /// Record the start city before anything is admitted.
    fn origin(&mut self, city: &str);

    /// Whether a newly generated partial itinerary may join the frontier.
    fn admit(&mut self, city: &str, hops: usize, label: &L, cost: u64) -> bool;

    /// Whether a partial itinerary taken off the frontier should be expanded.
    fn expand(&mut self, city: &str, hops: usize, label: &L, cost: u64) -> bool;
}

/// Best cost seen per city; ties survive.
#[derive(Debug, Default)]
pub(crate) struct BestCost {
    best: HashMap<String, u64>,
}

impl<L> Pruning<L> for BestCost {
    fn origin(&mut self, city: &str) {
        // Coming back to the start is never cheaper than not leaving
        self.best.insert(city.to_string(), 0);
    }

    fn admit(&mut self, city: &str, _hops: usize, _label: &L, cost: u64) -> bool {
        match self.best.get(city) {
            Some(&best) if cost > best => false,
            _ => {
                self.best.insert(city.to_string(), cost);
                true
            }
        }
    }

    fn expand(&mut self, city: &str, _hops: usize, _label: &L, cost: u64) -> bool {
        self.best.get(city).is_none_or(|&best| cost <= best)
    }
}

/// Each (city, hop count) is expanded at most once.
#[derive(Debug, Default)]
pub(crate) struct VisitedHops {
    visited: HashSet<(String, usize)>,
}

impl<L> Pruning<L> for VisitedHops {
    fn origin(&mut self, _city: &str) {}

    fn admit(&mut self, _city: &str, _hops: usize, _label: &L, _cost: u64) -> bool {
        true
    }

    fn expand(&mut self, city: &str, hops: usize, _label: &L, _cost: u64) -> bool {
        self.visited.insert((city.to_string(), hops))
    }
}

/// When a partial itinerary left its origin, when it reached its current
/// city, and how many legs it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Arrival {
    departed: TripTime,
    arrived: TripTime,
    hops: usize,
}

impl Arrival {
    /// Left no earlier, arrived no later and used no more legs, without
    /// being identical.
    fn dominates(&self, other: &Arrival) -> bool {
        self != other
            && self.departed >= other.departed
            && self.arrived <= other.arrived
            && self.hops <= other.hops
    }
}

/// Non-dominated arrivals per city.
///
/// A timeline is discarded only when another one at the same city left no
/// earlier, arrived no later and used no more legs. Identical arrivals both
/// survive.
#[derive(Debug, Default)]
pub(crate) struct ParetoArrivals {
    origin: Option<String>,
    fronts: HashMap<String, Vec<Arrival>>,
}

impl ParetoArrivals {
    fn dominated(&self, city: &str, arrival: &Arrival) -> bool {
        self.fronts
            .get(city)
            .is_some_and(|front| front.iter().any(|other| other.dominates(arrival)))
    }
}

fn arrival_of(timeline: &Timeline, hops: usize) -> Arrival {
    Arrival {
        departed: timeline.departed(),
        arrived: timeline.arrived(),
        hops,
    }
}

impl Pruning<Option<Timeline>> for ParetoArrivals {
    fn origin(&mut self, city: &str) {
        // Leaving again later always beats a round trip
        self.origin = Some(city.to_string());
    }

    fn admit(&mut self, city: &str, hops: usize, label: &Option<Timeline>, _cost: u64) -> bool {
        if self.origin.as_deref() == Some(city) {
            return false;
        }
        // Malformed times cost nothing and never prune
        let Some(timeline) = label else {
            return true;
        };
        let arrival = arrival_of(timeline, hops);
        if self.dominated(city, &arrival) {
            return false;
        }

        let front = self.fronts.entry(city.to_string()).or_default();
        front.retain(|other| !arrival.dominates(other));
        if !front.contains(&arrival) {
            front.push(arrival);
        }
        true
    }

    fn expand(&mut self, city: &str, hops: usize, label: &Option<Timeline>, _cost: u64) -> bool {
        label
            .as_ref()
            .is_none_or(|timeline| !self.dominated(city, &arrival_of(timeline, hops)))
    }
}

/// Shortest elapsed time, honouring transfer buffers and day rollover.
pub(crate) struct TimeSearch {
    anchor: NaiveDate,
}

impl TimeSearch {
    pub fn new(anchor: NaiveDate) -> Self {
        Self { anchor }
    }
}

impl Strategy for TimeSearch {
    /// `None` once any leg's time failed to parse.
    type Label = Option<Timeline>;
    type Frontier = CostQueue<Self::Label>;
    type Pruning = ParetoArrivals;

    const CRITERION: Criterion = Criterion::Time;

    fn start(&self, leg: &Departure) -> Self::Label {
        Timeline::start(leg, self.anchor).ok()
    }

    fn extend(&self, label: &Self::Label, leg: &Departure) -> Self::Label {
        label.as_ref().and_then(|timeline| timeline.board(leg).ok())
    }

    fn cost(&self, label: &Self::Label) -> u64 {
        label.as_ref().map_or(0, Timeline::elapsed_minutes)
    }
}

/// Cheapest total fare.
pub(crate) struct PriceSearch;

impl Strategy for PriceSearch {
    type Label = u64;
    type Frontier = CostQueue<Self::Label>;
    type Pruning = BestCost;

    const CRITERION: Criterion = Criterion::Price;

    fn start(&self, leg: &Departure) -> Self::Label {
        u64::from(leg.price)
    }

    fn extend(&self, label: &Self::Label, leg: &Departure) -> Self::Label {
        label + u64::from(leg.price)
    }

    fn cost(&self, label: &Self::Label) -> u64 {
        *label
    }
}

/// Fewest changes, by breadth-first search.
pub(crate) struct TransferSearch;

impl Strategy for TransferSearch {
    /// Number of legs.
    type Label = usize;
    type Frontier = FifoQueue<Self::Label>;
    type Pruning = VisitedHops;

    const CRITERION: Criterion = Criterion::Transfers;

    fn start(&self, _leg: &Departure) -> Self::Label {
        1
    }

    fn extend(&self, label: &Self::Label, _leg: &Departure) -> Self::Label {
        label + 1
    }

    fn cost(&self, label: &Self::Label) -> u64 {
        (label - 1) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransportMode;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn leg(dep: &str, duration: u32, price: u32, transfer: u32) -> Departure {
        Departure::new(TransportMode::Bus, "A", "A", dep, duration, price, transfer)
    }

    #[test]
    fn time_strategy_accumulates_elapsed() {
        let s = TimeSearch::new(date());
        let first = s.start(&leg("08:00", 30, 0, 0));
        assert_eq!(s.cost(&first), 30);

        let second = s.extend(&first, &leg("09:00", 15, 0, 5));
        assert_eq!(s.cost(&second), 75);
    }

    #[test]
    fn time_strategy_malformed_is_zero() {
        let s = TimeSearch::new(date());
        let first = s.start(&leg("08:00", 30, 0, 0));
        let broken = s.extend(&first, &leg("nine", 15, 0, 5));
        assert_eq!(s.cost(&broken), 0);

        // Stays zero once broken
        let after = s.extend(&broken, &leg("10:00", 15, 0, 5));
        assert_eq!(s.cost(&after), 0);
    }

    #[test]
    fn price_strategy_sums() {
        let s = PriceSearch;
        let first = s.start(&leg("08:00", 30, 120, 0));
        let second = s.extend(&first, &leg("09:00", 15, 80, 5));
        assert_eq!(s.cost(&second), 200);
    }

    #[test]
    fn transfer_strategy_counts_changes() {
        let s = TransferSearch;
        let first = s.start(&leg("08:00", 30, 120, 0));
        assert_eq!(s.cost(&first), 0);
        let second = s.extend(&first, &leg("09:00", 15, 80, 5));
        assert_eq!(s.cost(&second), 1);
    }

    #[test]
    fn best_cost_keeps_ties() {
        let mut p = BestCost::default();
        assert!(p.admit("A", 1, &(), 10));
        assert!(p.admit("A", 2, &(), 10));
        assert!(!p.admit("A", 1, &(), 11));
        assert!(p.admit("A", 3, &(), 5));

        assert!(p.expand("A", 1, &(), 5));
        assert!(!p.expand("A", 1, &(), 10));
        assert!(p.expand("B", 1, &(), 100));
    }

    #[test]
    fn best_cost_origin_only_admits_free() {
        let mut p = BestCost::default();
        Pruning::<()>::origin(&mut p, "A");
        assert!(!p.admit("A", 2, &(), 1));
        assert!(p.admit("A", 2, &(), 0));
    }

    #[test]
    fn visited_hops_expands_once() {
        let mut p = VisitedHops::default();
        assert!(p.admit("A", 1, &(), 0));
        assert!(p.expand("A", 1, &(), 0));
        assert!(!p.expand("A", 1, &(), 0));
        assert!(p.expand("A", 2, &(), 0));
    }

    fn timeline(dep: &str, duration: u32) -> Option<Timeline> {
        TimeSearch::new(date()).start(&leg(dep, duration, 0, 0))
    }

    #[test]
    fn pareto_keeps_later_departure_arriving_later() {
        let mut p = ParetoArrivals::default();
        let early = timeline("08:00", 30);
        let late = timeline("09:00", 40);

        // More elapsed time, but left an hour later
        assert!(p.admit("X", 1, &early, 30));
        assert!(p.admit("X", 1, &late, 40));
        assert!(p.expand("X", 1, &early, 30));
        assert!(p.expand("X", 1, &late, 40));
    }

    #[test]
    fn pareto_discards_dominated() {
        let mut p = ParetoArrivals::default();
        let slow = timeline("08:00", 90);
        let fast = timeline("08:00", 30);

        assert!(p.admit("X", 1, &slow, 90));
        assert!(p.admit("X", 1, &fast, 30));
        assert!(!p.expand("X", 1, &slow, 90));
        assert!(!p.admit("X", 1, &slow, 90));

        // Same times with fewer legs
        assert!(!p.admit("X", 2, &fast, 30));
    }

    #[test]
    fn pareto_keeps_identical() {
        let mut p = ParetoArrivals::default();
        let a = timeline("08:00", 30);

        assert!(p.admit("X", 1, &a, 30));
        assert!(p.admit("X", 1, &a, 30));
        assert!(p.expand("X", 1, &a, 30));
    }

    #[test]
    fn pareto_blocks_origin_but_not_malformed() {
        let mut p = ParetoArrivals::default();
        p.origin("A");
        assert!(!p.admit("A", 2, &timeline("08:00", 30), 30));

        let fast = timeline("08:00", 30);
        assert!(p.admit("X", 1, &fast, 30));
        assert!(p.admit("X", 3, &None, 0));
        assert!(p.expand("X", 3, &None, 0));
    }
}
