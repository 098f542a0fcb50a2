//! Optimisation criteria and their path costs.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Itinerary;

/// What a search optimises for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Total elapsed minutes, including waits for connections.
    Time,
    /// Sum of leg prices.
    Price,
    /// Number of changes between legs.
    Transfers,
}

/// Error returned when parsing an unknown criterion name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown criterion: {0} (expected time, price or transfers)")]
pub struct UnknownCriterion(String);

impl Criterion {
    /// All criteria.
    pub const ALL: [Criterion; 3] = [Criterion::Time, Criterion::Price, Criterion::Transfers];

    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Time => "time",
            Criterion::Price => "price",
            Criterion::Transfers => "transfers",
        }
    }

    /// Cost of a whole itinerary under this criterion.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_planner::domain::{Departure, Itinerary, TransportMode};
    /// use route_planner::planner::Criterion;
    /// use chrono::NaiveDate;
    /// use std::sync::Arc;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let itinerary = Itinerary::new(vec![
    ///     Arc::new(Departure::new(TransportMode::Bus, "A", "B", "08:00", 30, 100, 0)),
    ///     Arc::new(Departure::new(TransportMode::Bus, "B", "C", "09:00", 30, 150, 5)),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(Criterion::Time.path_cost(&itinerary, date), 90);
    /// assert_eq!(Criterion::Price.path_cost(&itinerary, date), 250);
    /// assert_eq!(Criterion::Transfers.path_cost(&itinerary, date), 1);
    /// ```
    pub fn path_cost(&self, itinerary: &Itinerary, anchor: NaiveDate) -> u64 {
        match self {
            Criterion::Time => itinerary.total_minutes(anchor),
            Criterion::Price => itinerary.total_price(),
            Criterion::Transfers => itinerary.transfer_count() as u64,
        }
    }

    /// Sort key for ranking: path cost, then fewer legs for time.
    pub fn rank_key(&self, itinerary: &Itinerary, anchor: NaiveDate) -> (u64, usize) {
        let tie_break = match self {
            Criterion::Time => itinerary.leg_count(),
            Criterion::Price | Criterion::Transfers => 0,
        };
        (self.path_cost(itinerary, anchor), tie_break)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = UnknownCriterion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(Criterion::Time),
            "price" => Ok(Criterion::Price),
            "transfers" => Ok(Criterion::Transfers),
            _ => Err(UnknownCriterion(s.to_string())),
        }
    }
}
