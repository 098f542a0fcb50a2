//! Route planner over a static timetable.
//!
//! This module answers "how do I get from this city to that one?" for one
//! of three criteria: shortest total time, lowest total price, or fewest
//! transfers. It can return the single best itinerary or the best few
//! distinct ones.
//!
//! Time and price use a label-correcting best-first search that honours
//! each leg's minimum transfer time and day rollover. Transfers use
//! breadth-first search.

mod config;
mod criterion;
mod frontier;
mod rank;
mod search;
mod strategy;


pub use config::SearchConfig;
pub use criterion::{Criterion, UnknownCriterion};
pub use rank::rank_itineraries;
pub use search::{RouteFinder, SearchOutcome};
