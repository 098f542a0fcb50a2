//! The timetable: every city in the network and the departures leaving it.
//!
//! A `Timetable` is assembled once, through [`TimetableBuilder`] or the JSON
//! loader, and is read-only afterwards. It can be shared between concurrent
//! searches behind an `Arc`.

mod error;
mod load;

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{City, Departure, Station};

pub use error::TimetableError;
pub use load::{DepartureRecord, StationRecord, TimetableFile};

/// Read-only transport network.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    cities: HashMap<String, City>,
}

impl Timetable {
    /// Look up a city by name.
    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.get(name)
    }

    /// Check whether a city exists.
    pub fn contains(&self, name: &str) -> bool {
        self.cities.contains_key(name)
    }

    /// All departures leaving a city's bus and train stations.
    ///
    /// Empty for an unknown city.
    pub fn departures_from(&self, city: &str) -> impl Iterator<Item = &Arc<Departure>> {
        self.cities.get(city).into_iter().flat_map(|c| c.departures())
    }

    /// Iterate over all cities, in no particular order.
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    /// City names in alphabetical order.
    pub fn city_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cities().map(City::name).collect();
        names.sort_unstable();
        names
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns true if there are no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Total number of departures across all stations.
    pub fn departure_count(&self) -> usize {
        self.cities.values().map(|c| c.departures().count()).sum()
    }
}

/// Builds a [`Timetable`].
///
/// # Examples
///
/// ```
/// use route_planner::domain::TransportMode;
/// use route_planner::timetable::TimetableBuilder;
///
/// let mut builder = TimetableBuilder::new();
/// builder.add_city("A", "A_bus", "A_train").unwrap();
/// builder.add_city("B", "B_bus", "B_train").unwrap();
/// builder
///     .add_departure("A_bus", TransportMode::Bus, "B", "08:00", 30, 100, 5)
///     .unwrap();
///
/// let timetable = builder.build();
/// assert_eq!(timetable.departures_from("A").count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TimetableBuilder {
    cities: HashMap<String, City>,
    /// Station id to owning city name.
    station_cities: HashMap<String, String>,
}

impl TimetableBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city with its bus and train station ids.
    pub fn add_city(
        &mut self,
        name: &str,
        bus_station: &str,
        train_station: &str,
    ) -> Result<&mut Self, TimetableError> {
        if self.cities.contains_key(name) {
            return Err(TimetableError::DuplicateCity(name.to_string()));
        }
        for id in [bus_station, train_station] {
            if self.station_cities.contains_key(id) {
                return Err(TimetableError::DuplicateStation(id.to_string()));
            }
        }
        if bus_station == train_station {
            return Err(TimetableError::DuplicateStation(bus_station.to_string()));
        }

        self.station_cities
            .insert(bus_station.to_string(), name.to_string());
        self.station_cities
            .insert(train_station.to_string(), name.to_string());
        self.cities.insert(
            name.to_string(),
            City::new(name, Station::new(bus_station), Station::new(train_station)),
        );

        Ok(self)
    }

    /// Append a departure to a station.
    ///
    /// The departure's origin is the city owning `station_id`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_departure(
        &mut self,
        station_id: &str,
        mode: crate::domain::TransportMode,
        destination: &str,
        departure_time: &str,
        duration_minutes: u32,
        price: u32,
        min_transfer_minutes: u32,
    ) -> Result<&mut Self, TimetableError> {
        let origin = self
            .station_cities
            .get(station_id)
            .ok_or_else(|| TimetableError::UnknownStation(station_id.to_string()))?;

        let departure = Departure::new(
            mode,
            origin,
            destination,
            departure_time,
            duration_minutes,
            price,
            min_transfer_minutes,
        );

        let station = self
            .cities
            .get_mut(origin)
            .and_then(|city| city.station_mut(station_id))
            .ok_or_else(|| TimetableError::UnknownStation(station_id.to_string()))?;
        station.push(Arc::new(departure));

        Ok(self)
    }

    /// Finish building.
    pub fn build(self) -> Timetable {
        Timetable {
            cities: self.cities,
        }
    }
}
