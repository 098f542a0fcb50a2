//! JSON timetable loading.
//!
//! The timetable document lists stations (one bus and one train station per
//! city) and departures. A departure's `from` is a station id and its `to`
//! is a city name:
//!
//! ```json
//! {
//!   "stations": [{"city": "G_0_0", "busStation": "A_0_0", "trainStation": "Z_0_0"}],
//!   "departures": [{"type": "bus", "from": "A_0_0", "to": "G_0_1",
//!                   "departureTime": "08:15", "duration": 45, "price": 300,
//!                   "minTransferTime": 10}]
//! }
//! ```
//!
//! Other top-level keys (such as the generator's `countryMap`) are ignored.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Timetable, TimetableBuilder, TimetableError};
use crate::domain::TransportMode;

/// A city and the ids of its two stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    pub city: String,
    pub bus_station: String,
    pub train_station: String,
}

/// A departure as stored in the timetable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureRecord {
    #[serde(rename = "type")]
    pub mode: TransportMode,
    /// Station id the departure leaves from.
    pub from: String,
    /// City name the departure arrives at.
    pub to: String,
    pub departure_time: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    pub price: u32,
    #[serde(rename = "minTransferTime")]
    pub min_transfer_minutes: u32,
}

/// The whole timetable document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableFile {
    #[serde(default)]
    pub stations: Vec<StationRecord>,
    #[serde(default)]
    pub departures: Vec<DepartureRecord>,
}

impl TimetableFile {
    /// Build a timetable from the document.
    ///
    /// Departures leaving an unknown station are skipped with a warning.
    pub fn into_timetable(self) -> Result<Timetable, TimetableError> {
        let mut builder = TimetableBuilder::new();

        for station in &self.stations {
            builder.add_city(&station.city, &station.bus_station, &station.train_station)?;
        }

        let mut skipped = 0usize;
        for dep in &self.departures {
            let added = builder.add_departure(
                &dep.from,
                dep.mode,
                &dep.to,
                &dep.departure_time,
                dep.duration_minutes,
                dep.price,
                dep.min_transfer_minutes,
            );
            match added {
                Ok(_) => {}
                Err(TimetableError::UnknownStation(id)) => {
                    warn!(station = %id, to = %dep.to, "Skipping departure from unknown station");
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            cities = self.stations.len(),
            departures = self.departures.len() - skipped,
            skipped,
            "Timetable built"
        );

        Ok(builder.build())
    }
}

impl Timetable {
    /// Parse a timetable from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, TimetableError> {
        let file: TimetableFile = serde_json::from_str(json)?;
        file.into_timetable()
    }

    /// Read and parse a timetable file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TimetableError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
