//! Domain types for the route planner.
//!
//! This module contains the timetable data model (cities, stations,
//! departures), itineraries built from departures, and the date-aware time
//! arithmetic used to chain legs across midnight.

mod city;
mod departure;
mod error;
mod itinerary;
mod time;

pub use city::{City, Station};
pub use departure::{Departure, TransportMode};
pub use error::DomainError;
pub use itinerary::Itinerary;
pub use time::{
    LegTimes, TimeError, Timeline, TripTime, elapsed_minutes, parse_time_of_day, schedule_legs,
};
