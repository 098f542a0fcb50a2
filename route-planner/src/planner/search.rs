//! Route search over the timetable.
//!
//! Finds the best itinerary between two cities for a criterion, or the
//! best few distinct ones. Time and price use a label-correcting
//! best-first search; transfers use breadth-first search. Both are bounded
//! by the guards in [`SearchConfig`].

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::domain::{Departure, Itinerary};
use crate::timetable::Timetable;

use super::config::SearchConfig;
use super::criterion::Criterion;
use super::frontier::{Frontier, Node};
use super::rank::rank_itineraries;
use super::strategy::{PriceSearch, Pruning, Strategy, TimeSearch, TransferSearch, VisitedHops};

/// Result of a route search.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Found itineraries, ranked best-first.
    pub itineraries: Vec<Itinerary>,

    /// Number of partial itineraries taken off the frontier.
    pub routes_explored: usize,

    /// Whether the iteration guard stopped the search with work left.
    pub truncated: bool,
}

impl SearchOutcome {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Route finder over a shared timetable.
///
/// Holds no search state of its own; every call allocates its frontier and
/// pruning maps, so one finder (or one timetable) can serve many threads.
///
/// # Examples
///
/// ```
/// use route_planner::domain::TransportMode;
/// use route_planner::planner::{Criterion, RouteFinder, SearchConfig};
/// use route_planner::timetable::TimetableBuilder;
///
/// let mut builder = TimetableBuilder::new();
/// builder.add_city("A", "A_bus", "A_train").unwrap();
/// builder.add_city("B", "B_bus", "B_train").unwrap();
/// builder
///     .add_departure("A_train", TransportMode::Train, "B", "08:00", 30, 100, 5)
///     .unwrap();
/// let timetable = builder.build();
/// let config = SearchConfig::default();
///
/// let finder = RouteFinder::new(&timetable, &config);
/// let route = finder.find_route("A", "B", Criterion::Price).unwrap();
/// assert_eq!(route.total_price(), 100);
/// ```
pub struct RouteFinder<'a> {
    timetable: &'a Timetable,
    config: &'a SearchConfig,
}

impl<'a> RouteFinder<'a> {
    /// Create a new route finder.
    pub fn new(timetable: &'a Timetable, config: &'a SearchConfig) -> Self {
        Self { timetable, config }
    }

    /// The best itinerary from `start` to `end`, or `None` if there is none.
    pub fn find_route(&self, start: &str, end: &str, criterion: Criterion) -> Option<Itinerary> {
        self.search_route(start, end, criterion)
            .itineraries
            .into_iter()
            .next()
    }

    /// Up to `limit` distinct itineraries from `start` to `end`, best first.
    pub fn find_top_routes(
        &self,
        start: &str,
        end: &str,
        criterion: Criterion,
        limit: usize,
    ) -> Vec<Itinerary> {
        self.search_top_routes(start, end, criterion, limit)
            .itineraries
    }

    /// The first of the top routes.
    pub fn find_best_route(
        &self,
        start: &str,
        end: &str,
        criterion: Criterion,
    ) -> Option<Itinerary> {
        self.find_top_routes(start, end, criterion, 1)
            .into_iter()
            .next()
    }

    /// Search for the best itinerary, with diagnostics.
    pub fn search_route(&self, start: &str, end: &str, criterion: Criterion) -> SearchOutcome {
        if !self.endpoints_valid(start, end) {
            return SearchOutcome::empty();
        }

        let outcome = match criterion {
            Criterion::Time => {
                self.best_route(&TimeSearch::new(self.config.anchor_date()), start, end)
            }
            Criterion::Price => self.best_route(&PriceSearch, start, end),
            Criterion::Transfers => self.best_route(&TransferSearch, start, end),
        };

        debug!(
            start,
            end,
            %criterion,
            found = !outcome.itineraries.is_empty(),
            routes_explored = outcome.routes_explored,
            truncated = outcome.truncated,
            "Route search finished"
        );

        outcome
    }

    /// Search for up to `limit` distinct itineraries, with diagnostics.
    pub fn search_top_routes(
        &self,
        start: &str,
        end: &str,
        criterion: Criterion,
        limit: usize,
    ) -> SearchOutcome {
        if limit == 0 || !self.endpoints_valid(start, end) {
            return SearchOutcome::empty();
        }

        let anchor = self.config.anchor_date();
        let outcome = match criterion {
            Criterion::Time => {
                self.top_routes(&TimeSearch::new(anchor), start, end, limit, anchor)
            }
            Criterion::Price => self.top_routes(&PriceSearch, start, end, limit, anchor),
            Criterion::Transfers => self.top_routes(&TransferSearch, start, end, limit, anchor),
        };

        debug!(
            start,
            end,
            %criterion,
            limit,
            found = outcome.itineraries.len(),
            routes_explored = outcome.routes_explored,
            truncated = outcome.truncated,
            "Top routes search finished"
        );

        outcome
    }

    /// Unknown and identical endpoints have no route.
    fn endpoints_valid(&self, start: &str, end: &str) -> bool {
        if !self.timetable.contains(start) {
            debug!(city = start, "Unknown start city");
            return false;
        }
        if !self.timetable.contains(end) {
            debug!(city = end, "Unknown end city");
            return false;
        }
        if start == end {
            debug!(city = start, "Start and end are the same city");
            return false;
        }
        true
    }

    /// Single best itinerary: the first destination pop wins.
    fn best_route<S: Strategy>(&self, strategy: &S, start: &str, end: &str) -> SearchOutcome {
        let mut frontier = S::Frontier::default();
        let mut pruning = S::Pruning::default();
        self.seed(strategy, start, &mut frontier, &mut pruning);

        let mut routes_explored = 0;
        loop {
            if routes_explored >= self.config.max_iterations && !frontier.is_empty() {
                return Self::guard_tripped(S::CRITERION, routes_explored, frontier.len());
            }
            let Some(node) = frontier.pop() else {
                break;
            };
            routes_explored += 1;

            trace!(
                city = node.city(),
                legs = node.hops(),
                cost = node.cost,
                "Expanding route"
            );

            if node.city() == end {
                return SearchOutcome {
                    itineraries: node.into_itinerary().into_iter().collect(),
                    routes_explored,
                    truncated: false,
                };
            }

            if !pruning.expand(node.city(), node.hops(), &node.label, node.cost) {
                continue;
            }

            self.expand(strategy, &node, &mut frontier, &mut pruning);
        }

        SearchOutcome {
            itineraries: Vec::new(),
            routes_explored,
            truncated: false,
        }
    }

    /// Best itinerary first, then further arrivals until `limit` are found.
    fn top_routes<S: Strategy>(
        &self,
        strategy: &S,
        start: &str,
        end: &str,
        limit: usize,
        anchor: NaiveDate,
    ) -> SearchOutcome {
        let best = self.best_route(strategy, start, end);
        let Some(first) = best.itineraries.into_iter().next() else {
            return SearchOutcome {
                itineraries: Vec::new(),
                ..best
            };
        };

        // Legs are compared by identity, so twin timetable records stay distinct
        let mut seen: HashSet<Vec<*const Departure>> = HashSet::new();
        seen.insert(leg_identity(&first));
        let mut found = vec![first];

        let mut frontier = S::Frontier::default();
        let mut pruning = VisitedHops::default();
        self.seed(strategy, start, &mut frontier, &mut pruning);

        let mut iterations = 0;
        let mut truncated = false;
        while found.len() < limit {
            if iterations >= self.config.max_iterations && !frontier.is_empty() {
                debug!(
                    criterion = %S::CRITERION,
                    found = found.len(),
                    pending = frontier.len(),
                    "Iteration limit reached while collecting alternatives"
                );
                truncated = true;
                break;
            }
            let Some(node) = frontier.pop() else {
                break;
            };
            iterations += 1;

            if node.city() == end {
                if let Some(itinerary) = node.into_itinerary() {
                    if seen.insert(leg_identity(&itinerary)) {
                        found.push(itinerary);
                    }
                }
                continue;
            }

            if !pruning.expand(node.city(), node.hops(), &node.label, node.cost) {
                continue;
            }

            self.expand(strategy, &node, &mut frontier, &mut pruning);
        }

        let mut itineraries = rank_itineraries(found, S::CRITERION, anchor);
        itineraries.truncate(limit);

        SearchOutcome {
            itineraries,
            routes_explored: best.routes_explored + iterations,
            truncated,
        }
    }

    /// Push one single-leg itinerary per departure from `start`.
    fn seed<S: Strategy, P: Pruning<S::Label>>(
        &self,
        strategy: &S,
        start: &str,
        frontier: &mut S::Frontier,
        pruning: &mut P,
    ) {
        pruning.origin(start);

        for leg in self.timetable.departures_from(start) {
            let label = strategy.start(leg);
            let cost = strategy.cost(&label);
            if !pruning.admit(&leg.destination, 1, &label, cost) {
                continue;
            }
            frontier.push(Node {
                legs: vec![Arc::clone(leg)],
                label,
                cost,
            });
        }
    }

    /// Push every admissible one-leg extension of `node`.
    fn expand<S: Strategy, P: Pruning<S::Label>>(
        &self,
        strategy: &S,
        node: &Node<S::Label>,
        frontier: &mut S::Frontier,
        pruning: &mut P,
    ) {
        if node.transfers() >= self.config.max_transfers {
            trace!(city = node.city(), legs = node.hops(), "Transfer limit reached");
            return;
        }

        for leg in self.timetable.departures_from(node.city()) {
            let label = strategy.extend(&node.label, leg);
            let cost = strategy.cost(&label);
            if !pruning.admit(&leg.destination, node.hops() + 1, &label, cost) {
                continue;
            }

            let mut legs = node.legs.clone();
            legs.push(Arc::clone(leg));
            frontier.push(Node { legs, label, cost });
        }
    }

    fn guard_tripped(
        criterion: Criterion,
        routes_explored: usize,
        pending: usize,
    ) -> SearchOutcome {
        debug!(
            %criterion,
            routes_explored,
            pending,
            "Iteration limit reached; treating as no route"
        );
        SearchOutcome {
            itineraries: Vec::new(),
            routes_explored,
            truncated: true,
        }
    }
}

/// The timetable records an itinerary rides, by address.
fn leg_identity(itinerary: &Itinerary) -> Vec<*const Departure> {
    itinerary.legs().iter().map(Arc::as_ptr).collect()
}
