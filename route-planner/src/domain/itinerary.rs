//! Itinerary types.
//!
//! An `Itinerary` represents a complete trip from a start city to an end
//! city as an ordered chain of departures.

use std::sync::Arc;

use chrono::NaiveDate;

use super::time::{self, LegTimes, TimeError, TripTime};
use super::{Departure, DomainError};

/// A complete trip: one or more legs, each leaving from the city the
/// previous one arrived at.
///
/// Two itineraries are equal when their leg sequences are equal.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs connect (destination of one = origin of next)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Itinerary {
    legs: Vec<Arc<Departure>>,
}

impl Itinerary {
    /// Constructs an itinerary from its legs.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - The list of legs is empty
    /// - Legs don't connect (destination != next origin)
    ///
    /// # Examples
    ///
    /// ```
    /// use route_planner::domain::{Departure, Itinerary, TransportMode};
    /// use std::sync::Arc;
    ///
    /// let first = Arc::new(Departure::new(TransportMode::Bus, "A", "B", "08:00", 30, 100, 5));
    /// let second = Arc::new(Departure::new(TransportMode::Train, "B", "C", "09:00", 45, 250, 10));
    ///
    /// let itinerary = Itinerary::new(vec![first, second]).unwrap();
    /// assert_eq!(itinerary.transfer_count(), 1);
    /// assert_eq!(itinerary.total_price(), 350);
    /// ```
    pub fn new(legs: Vec<Arc<Departure>>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }

        for window in legs.windows(2) {
            if window[0].destination != window[1].origin {
                return Err(DomainError::CitiesNotConnected(
                    window[0].destination.clone(),
                    window[1].origin.clone(),
                ));
            }
        }

        Ok(Itinerary { legs })
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Arc<Departure>] {
        &self.legs
    }

    /// Returns the number of legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Returns the number of transfers (legs - 1).
    pub fn transfer_count(&self) -> usize {
        self.legs.len() - 1
    }

    /// Returns the start city.
    pub fn origin(&self) -> &str {
        &self.legs[0].origin
    }

    /// Returns the end city.
    pub fn destination(&self) -> &str {
        &self.legs[self.legs.len() - 1].destination
    }

    /// Sum of all leg prices.
    pub fn total_price(&self) -> u64 {
        self.legs.iter().map(|leg| u64::from(leg.price)).sum()
    }

    /// Minutes from the first departure to the final arrival, including
    /// waits for connections.
    ///
    /// Zero if any leg has a malformed departure time.
    pub fn total_minutes(&self, anchor: NaiveDate) -> u64 {
        time::elapsed_minutes(self.legs.iter().map(|leg| leg.as_ref()), anchor)
    }

    /// Dated departure and arrival of every leg, with the first leg
    /// departing on `anchor`.
    pub fn schedule(&self, anchor: NaiveDate) -> Result<Vec<LegTimes>, TimeError> {
        time::schedule_legs(self.legs.iter().map(|leg| leg.as_ref()), anchor)
    }

    /// Returns the dated departure time of the first leg.
    pub fn departure_time(&self, anchor: NaiveDate) -> Result<TripTime, TimeError> {
        Ok(TripTime::new(anchor, self.legs[0].time_of_day()?))
    }

    /// Returns the dated arrival time of the last leg.
    pub fn arrival_time(&self, anchor: NaiveDate) -> Result<TripTime, TimeError> {
        let schedule = self.schedule(anchor)?;
        // Non-empty by construction
        Ok(schedule[schedule.len() - 1].arrival)
    }

    /// Returns true if this is a direct trip (no transfers).
    pub fn is_direct(&self) -> bool {
        self.legs.len() == 1
    }
}
