//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{City, Departure, Itinerary, LegTimes, TransportMode, TripTime};

/// Query for the route endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteQuery {
    /// Start city name
    pub from: String,

    /// End city name
    pub to: String,

    /// `time`, `price` or `transfers` (defaults to time)
    pub criterion: Option<String>,

    /// Number of alternatives (top routes only)
    pub limit: Option<usize>,
}

/// Response listing the known cities.
#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    /// Cities in alphabetical order
    pub cities: Vec<CityResult>,
}

/// A city and its stations.
#[derive(Debug, Serialize)]
pub struct CityResult {
    pub name: String,

    pub bus_station: String,

    pub train_station: String,

    /// Number of departures leaving either station
    pub departures: usize,
}

/// An itinerary in a response.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    /// Legs in travel order
    pub legs: Vec<LegResult>,

    /// Dated departure of the first leg
    pub departure: Option<String>,

    /// Dated arrival of the last leg
    pub arrival: Option<String>,

    /// Minutes from first departure to final arrival, including waits
    pub total_minutes: u64,

    /// Sum of leg prices
    pub total_price: u64,

    /// Number of changes
    pub transfers: usize,
}

/// One leg of an itinerary.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub mode: TransportMode,

    /// Origin city
    pub from: String,

    /// Destination city
    pub to: String,

    /// Dated departure, or the timetable's time of day if it can't be dated
    pub departure: String,

    /// Dated arrival, if the itinerary's times are all valid
    pub arrival: Option<String>,

    pub duration_mins: u32,

    pub price: u32,

    /// Minimum time needed to board this leg after arriving
    pub min_transfer_mins: u32,
}

/// Response for a single route search.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// The best itinerary, if any
    pub itinerary: Option<ItineraryResult>,

    /// Number of routes explored
    pub routes_explored: usize,
}

/// Response for a top routes search.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    /// Found itineraries, best first
    pub itineraries: Vec<ItineraryResult>,

    /// Number of routes explored
    pub routes_explored: usize,
}

/// Response for the best route endpoint.
#[derive(Debug, Serialize)]
pub struct BestRouteResponse {
    pub itinerary: Option<ItineraryResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl ItineraryResult {
    /// Create from a domain Itinerary, with the first leg departing on
    /// `anchor`.
    pub fn from_itinerary(itinerary: &Itinerary, anchor: NaiveDate) -> Self {
        // A malformed time anywhere makes the whole schedule unknown
        let schedule = itinerary.schedule(anchor).ok();

        let legs = itinerary
            .legs()
            .iter()
            .enumerate()
            .map(|(i, leg)| {
                LegResult::from_leg(leg, schedule.as_ref().map(|times| &times[i]))
            })
            .collect();

        Self {
            legs,
            departure: itinerary.departure_time(anchor).ok().as_ref().map(format_time),
            arrival: itinerary.arrival_time(anchor).ok().as_ref().map(format_time),
            total_minutes: itinerary.total_minutes(anchor),
            total_price: itinerary.total_price(),
            transfers: itinerary.transfer_count(),
        }
    }
}

impl CityResult {
    /// Create from a domain City.
    pub fn from_city(city: &City) -> Self {
        Self {
            name: city.name().to_string(),
            bus_station: city.bus_station().id().to_string(),
            train_station: city.train_station().id().to_string(),
            departures: city.departures().count(),
        }
    }
}

impl LegResult {
    /// Create from a departure and its dated times, if known.
    pub fn from_leg(leg: &Departure, times: Option<&LegTimes>) -> Self {
        Self {
            mode: leg.mode,
            from: leg.origin.clone(),
            to: leg.destination.clone(),
            departure: times
                .map(|t| format_time(&t.departure))
                .unwrap_or_else(|| leg.departure_time.clone()),
            arrival: times.map(|t| format_time(&t.arrival)),
            duration_mins: leg.duration_minutes,
            price: leg.price,
            min_transfer_mins: leg.min_transfer_minutes,
        }
    }
}

/// Format a trip time as "YYYY-MM-DD HH:MM".
fn format_time(time: &TripTime) -> String {
    time.to_datetime().format("%Y-%m-%d %H:%M").to_string()
}
