//! Trip time handling for timetable legs.
//!
//! Timetables give departure times as "HH:MM" strings with no date. This
//! module provides date-aware instants and the transfer-aware timeline used
//! to chain legs, so that a leg boarded "at 00:10" after arriving at 23:50
//! is understood to run the next day.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;

use super::Departure;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a time of day from "HH:MM" format.
///
/// # Examples
///
/// ```
/// use route_planner::domain::parse_time_of_day;
///
/// assert!(parse_time_of_day("00:00").is_ok());
/// assert!(parse_time_of_day("23:59").is_ok());
///
/// assert!(parse_time_of_day("1430").is_err());
/// assert!(parse_time_of_day("14:3").is_err());
/// assert!(parse_time_of_day("25:00").is_err());
/// ```
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, TimeError> {
    // Must be exactly 5 characters: HH:MM
    if s.len() != 5 {
        return Err(TimeError::new("expected HH:MM format"));
    }

    let bytes = s.as_bytes();

    if bytes[2] != b':' {
        return Err(TimeError::new("expected colon at position 2"));
    }

    let hour =
        parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new("hour must be 0-23"));
    }

    let minute =
        parse_two_digits(&bytes[3..5]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
}

/// A date-aware instant on a trip.
///
/// Legs only carry a time of day, but an itinerary can run past midnight.
/// Two instants at "01:30" might be on different dates.
///
/// # Examples
///
/// ```
/// use route_planner::domain::TripTime;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let time = TripTime::parse_hhmm("14:30", date).unwrap();
/// assert_eq!(time.to_string(), "14:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TripTime {
    date: NaiveDate,
    time: NaiveTime,
}

impl TripTime {
    /// Create a new TripTime from date and time components.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Parse a time from "HH:MM" format on a given date.
    pub fn parse_hhmm(s: &str, date: NaiveDate) -> Result<Self, TimeError> {
        Ok(Self {
            date,
            time: parse_time_of_day(s)?,
        })
    }

    /// Returns the date component.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the time component.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// Converts to a NaiveDateTime.
    pub fn to_datetime(&self) -> chrono::NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Add a duration to this time.
    ///
    /// Crossing midnight advances the date.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_planner::domain::TripTime;
    /// use chrono::{Duration, NaiveDate};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let time = TripTime::parse_hhmm("23:30", date).unwrap();
    ///
    /// let later = time.checked_add(Duration::hours(1)).unwrap();
    /// assert_eq!(later.to_string(), "00:30");
    /// assert_eq!(later.date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    /// ```
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let dt = self.to_datetime().checked_add_signed(duration)?;
        Some(Self {
            date: dt.date(),
            time: dt.time(),
        })
    }

    /// Returns the duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.to_datetime()
            .signed_duration_since(other.to_datetime())
    }

    /// The first instant at or after `earliest` whose time of day is `time`.
    ///
    /// The time of day is placed on `earliest`'s date; if that falls before
    /// `earliest`, it moves to the following day.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_planner::domain::TripTime;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let earliest = TripTime::parse_hhmm("23:55", date).unwrap();
    /// let ten_past = NaiveTime::from_hms_opt(0, 10, 0).unwrap();
    ///
    /// let boarded = TripTime::next_at(ten_past, earliest).unwrap();
    /// assert_eq!(boarded.date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    /// ```
    pub fn next_at(time: NaiveTime, earliest: TripTime) -> Result<Self, TimeError> {
        let same_day = Self::new(earliest.date, time);
        if same_day >= earliest {
            return Ok(same_day);
        }
        let next_day = earliest
            .date
            .succ_opt()
            .ok_or_else(|| TimeError::new("date overflow"))?;
        Ok(Self::new(next_day, time))
    }
}

impl Ord for TripTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_datetime().cmp(&other.to_datetime())
    }
}

impl PartialOrd for TripTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for TripTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TripTime({} {:02}:{:02})",
            self.date,
            self.hour(),
            self.minute()
        )
    }
}

impl fmt::Display for TripTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// The dated departure and arrival of one leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegTimes {
    pub departure: TripTime,
    pub arrival: TripTime,
}

/// Running clock of a partial itinerary under the transfer-aware model.
///
/// Tracks when the first leg departed and when the most recent leg arrived.
/// Each connecting leg can be boarded no earlier than the previous arrival
/// plus that leg's minimum transfer time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    departed: TripTime,
    last: LegTimes,
}

impl Timeline {
    /// Start a timeline with the first leg, departing on `anchor`.
    pub fn start(leg: &Departure, anchor: NaiveDate) -> Result<Self, TimeError> {
        let departure = TripTime::new(anchor, leg.time_of_day()?);
        let arrival = arrive(departure, leg)?;
        Ok(Self {
            departed: departure,
            last: LegTimes { departure, arrival },
        })
    }

    /// Board a connecting leg at its first feasible departure.
    pub fn board(&self, leg: &Departure) -> Result<Self, TimeError> {
        let time = leg.time_of_day()?;
        let earliest = self
            .last
            .arrival
            .checked_add(Duration::minutes(i64::from(leg.min_transfer_minutes)))
            .ok_or_else(|| TimeError::new("time overflow"))?;
        let departure = TripTime::next_at(time, earliest)?;
        let arrival = arrive(departure, leg)?;
        Ok(Self {
            departed: self.departed,
            last: LegTimes { departure, arrival },
        })
    }

    /// When the first leg departed.
    pub fn departed(&self) -> TripTime {
        self.departed
    }

    /// Times of the most recently boarded leg.
    pub fn last_leg(&self) -> LegTimes {
        self.last
    }

    /// When the most recent leg arrived.
    pub fn arrived(&self) -> TripTime {
        self.last.arrival
    }

    /// Elapsed time from the first departure to the latest arrival.
    pub fn elapsed(&self) -> Duration {
        self.last.arrival.signed_duration_since(self.departed)
    }

    /// Elapsed time in whole minutes.
    pub fn elapsed_minutes(&self) -> u64 {
        u64::try_from(self.elapsed().num_minutes()).unwrap_or(0)
    }
}

fn arrive(departure: TripTime, leg: &Departure) -> Result<TripTime, TimeError> {
    departure
        .checked_add(Duration::minutes(i64::from(leg.duration_minutes)))
        .ok_or_else(|| TimeError::new("time overflow"))
}

/// Dated times of every leg in a chain, in order.
pub fn schedule_legs<'a, I>(legs: I, anchor: NaiveDate) -> Result<Vec<LegTimes>, TimeError>
where
    I: IntoIterator<Item = &'a Departure>,
{
    let mut result = Vec::new();
    let mut timeline: Option<Timeline> = None;

    for leg in legs {
        let next = match &timeline {
            None => Timeline::start(leg, anchor)?,
            Some(current) => current.board(leg)?,
        };
        result.push(next.last_leg());
        timeline = Some(next);
    }

    Ok(result)
}

/// Total elapsed minutes of a chain of legs.
///
/// Returns zero when any leg has a malformed departure time, so a corrupt
/// record never aborts a search.
pub fn elapsed_minutes<'a, I>(legs: I, anchor: NaiveDate) -> u64
where
    I: IntoIterator<Item = &'a Departure>,
{
    let mut timeline: Option<Timeline> = None;

    for leg in legs {
        let next = match &timeline {
            None => Timeline::start(leg, anchor),
            Some(current) => current.board(leg),
        };
        match next {
            Ok(t) => timeline = Some(t),
            Err(_) => return 0,
        }
    }

    timeline.map_or(0, |t| t.elapsed_minutes())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::TransportMode;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    prop_compose! {
        fn valid_date()(
            year in 2000i32..2100,
            month in 1u32..=12,
            day in 1u32..=28
        ) -> NaiveDate {
            NaiveDate::from_ymd_opt(year, month, day).unwrap()
        }
    }

    prop_compose! {
        fn any_leg()(
            dep in valid_time(),
            duration in 0u32..600,
            transfer in 0u32..60
        ) -> Departure {
            Departure::new(TransportMode::Train, "A", "A", &dep, duration, 0, transfer)
        }
    }

    proptest! {
        /// Parse then display roundtrips
        #[test]
        fn parse_display_roundtrip(time_str in valid_time(), date in valid_date()) {
            let parsed = TripTime::parse_hhmm(&time_str, date).unwrap();
            prop_assert_eq!(parsed.to_string(), time_str);
        }

        /// Invalid hour is rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(parse_time_of_day(&s).is_err());
        }

        /// next_at never goes backwards and waits less than a day
        #[test]
        fn next_at_within_a_day(
            time_str in valid_time(),
            earliest_str in valid_time(),
            date in valid_date()
        ) {
            let earliest = TripTime::parse_hhmm(&earliest_str, date).unwrap();
            let time = parse_time_of_day(&time_str).unwrap();
            let t = TripTime::next_at(time, earliest).unwrap();

            prop_assert!(t >= earliest);
            prop_assert!(t.signed_duration_since(earliest) < Duration::days(1));
            prop_assert_eq!(t.time(), time);
        }

        /// Elapsed time never decreases as legs are added
        #[test]
        fn elapsed_monotonic(legs in prop::collection::vec(any_leg(), 1..6), date in valid_date()) {
            let mut previous = 0;
            for n in 1..=legs.len() {
                let elapsed = elapsed_minutes(legs[..n].iter(), date);
                prop_assert!(elapsed >= previous);
                previous = elapsed;
            }
        }

        /// Each connection honours the transfer buffer
        #[test]
        fn schedule_respects_buffers(
            legs in prop::collection::vec(any_leg(), 2..6),
            date in valid_date()
        ) {
            let schedule = schedule_legs(legs.iter(), date).unwrap();
            for i in 1..legs.len() {
                let wait = schedule[i].departure.signed_duration_since(schedule[i - 1].arrival);
                prop_assert!(wait >= Duration::minutes(i64::from(legs[i].min_transfer_minutes)));
            }
        }
    }
}
