//! Scheduled departures: the legs of the transport network.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::time::{TimeError, parse_time_of_day};

/// Mode of transport for a departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Bus,
    Train,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Bus => f.write_str("bus"),
            TransportMode::Train => f.write_str("train"),
        }
    }
}

/// One scheduled bus or train run between two cities.
///
/// The departure time is kept as loaded ("HH:MM") and parsed on demand, so
/// that a single corrupt record can be tolerated by the search instead of
/// rejecting the whole timetable. Durations, prices and transfer buffers are
/// unsigned, so they can never be negative.
///
/// # Examples
///
/// ```
/// use route_planner::domain::{Departure, TransportMode};
///
/// let leg = Departure::new(TransportMode::Train, "Banja Luka", "Doboj", "08:15", 90, 1200, 10);
/// assert_eq!(leg.origin, "Banja Luka");
/// assert!(leg.time_of_day().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Departure {
    pub mode: TransportMode,
    /// Name of the city this leg leaves from.
    pub origin: String,
    /// Name of the city this leg arrives at.
    pub destination: String,
    /// Time of day in "HH:MM" format.
    pub departure_time: String,
    pub duration_minutes: u32,
    pub price: u32,
    /// Buffer required after a previous arrival before boarding this leg.
    pub min_transfer_minutes: u32,
}

impl Departure {
    /// Create a new departure.
    pub fn new(
        mode: TransportMode,
        origin: &str,
        destination: &str,
        departure_time: &str,
        duration_minutes: u32,
        price: u32,
        min_transfer_minutes: u32,
    ) -> Self {
        Self {
            mode,
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_time: departure_time.to_string(),
            duration_minutes,
            price,
            min_transfer_minutes,
        }
    }

    /// Parsed time of day of this departure.
    pub fn time_of_day(&self) -> Result<NaiveTime, TimeError> {
        parse_time_of_day(&self.departure_time)
    }
}

impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} at {} ({} min, price {})",
            self.mode,
            self.origin,
            self.destination,
            self.departure_time,
            self.duration_minutes,
            self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_serde() {
        assert_eq!(serde_json::to_string(&TransportMode::Bus).unwrap(), "\"bus\"");
        let mode: TransportMode = serde_json::from_str("\"train\"").unwrap();
        assert_eq!(mode, TransportMode::Train);
        assert!(serde_json::from_str::<TransportMode>("\"plane\"").is_err());
    }

    #[test]
    fn display() {
        let leg = Departure::new(TransportMode::Bus, "A", "B", "07:05", 40, 250, 5);
        assert_eq!(leg.to_string(), "bus A -> B at 07:05 (40 min, price 250)");
    }

    #[test]
    fn malformed_time_of_day() {
        let leg = Departure::new(TransportMode::Bus, "A", "B", "7:05", 40, 250, 5);
        assert!(leg.time_of_day().is_err());
    }

    #[test]
    fn equality_is_by_value() {
        let a = Departure::new(TransportMode::Bus, "A", "B", "07:05", 40, 250, 5);
        let b = Departure::new(TransportMode::Bus, "A", "B", "07:05", 40, 250, 5);
        let c = Departure::new(TransportMode::Train, "A", "B", "07:05", 40, 250, 5);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
