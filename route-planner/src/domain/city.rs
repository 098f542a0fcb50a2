//! Cities and their stations.

use std::sync::Arc;

use super::Departure;

/// A bus or train station and the departures leaving it.
#[derive(Debug, Clone)]
pub struct Station {
    id: String,
    departures: Vec<Arc<Departure>>,
}

impl Station {
    /// Create a station with no departures.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            departures: Vec::new(),
        }
    }

    /// Returns the station id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Departures in the order they were loaded.
    pub fn departures(&self) -> &[Arc<Departure>] {
        &self.departures
    }

    pub(crate) fn push(&mut self, departure: Arc<Departure>) {
        self.departures.push(departure);
    }
}

/// A city in the network, with exactly one bus and one train station.
#[derive(Debug, Clone)]
pub struct City {
    name: String,
    bus_station: Station,
    train_station: Station,
}

impl City {
    /// Create a city from its two stations.
    pub fn new(name: &str, bus_station: Station, train_station: Station) -> Self {
        Self {
            name: name.to_string(),
            bus_station,
            train_station,
        }
    }

    /// Returns the city name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bus_station(&self) -> &Station {
        &self.bus_station
    }

    pub fn train_station(&self) -> &Station {
        &self.train_station
    }

    pub(crate) fn station_mut(&mut self, id: &str) -> Option<&mut Station> {
        if self.bus_station.id == id {
            Some(&mut self.bus_station)
        } else if self.train_station.id == id {
            Some(&mut self.train_station)
        } else {
            None
        }
    }

    /// All departures leaving this city: bus station first, then train station.
    pub fn departures(&self) -> impl Iterator<Item = &Arc<Departure>> {
        self.bus_station
            .departures
            .iter()
            .chain(self.train_station.departures.iter())
    }
}
