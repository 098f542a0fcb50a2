//! Search configuration for the route planner.

use chrono::{Local, NaiveDate};

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of transfers in an itinerary.
    /// Longer partial itineraries are discarded during search.
    pub max_transfers: usize,

    /// Maximum number of frontier entries examined per search.
    /// Reaching it ends the search with whatever was found so far.
    pub max_iterations: usize,

    /// Number of alternatives returned when the caller doesn't ask for a
    /// specific count.
    pub default_limit: usize,

    /// Largest number of alternatives a caller may ask for.
    pub max_limit: usize,

    /// Calendar date the first leg of every itinerary departs on.
    /// `None` means the local date at the time of each search.
    pub anchor: Option<NaiveDate>,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_transfers: usize,
        max_iterations: usize,
        default_limit: usize,
        max_limit: usize,
        anchor_date: NaiveDate,
    ) -> Self {
        Self {
            max_transfers,
            max_iterations,
            default_limit,
            max_limit,
            anchor: Some(anchor_date),
        }
    }

    /// Returns a copy pinned to a fixed anchor date.
    pub fn with_anchor_date(mut self, anchor_date: NaiveDate) -> Self {
        self.anchor = Some(anchor_date);
        self
    }

    /// The anchor date to use for a search starting now.
    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Check a requested number of alternatives against the configured bounds.
    ///
    /// A missing request means the default; out-of-range requests give `None`.
    pub fn resolve_limit(&self, requested: Option<usize>) -> Option<usize> {
        match requested {
            None => Some(self.default_limit),
            Some(n) if (1..=self.max_limit).contains(&n) => Some(n),
            Some(_) => None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_transfers: 50,
            max_iterations: 200_000,
            default_limit: 5,
            max_limit: 50,
            anchor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.max_transfers, 50);
        assert_eq!(config.max_iterations, 200_000);
        assert_eq!(config.default_limit, 5);
        assert_eq!(config.max_limit, 50);
        assert_eq!(config.anchor, None);
    }

    #[test]
    fn unpinned_anchor_is_today() {
        let config = SearchConfig::default();
        let before = Local::now().date_naive();
        let anchor = config.anchor_date();
        let after = Local::now().date_naive();

        assert!(before <= anchor && anchor <= after);
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(3, 1000, 2, 10, date());

        assert_eq!(config.max_transfers, 3);
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.default_limit, 2);
        assert_eq!(config.max_limit, 10);
        assert_eq!(config.anchor_date(), date());
    }

    #[test]
    fn with_anchor_date() {
        let config = SearchConfig::default().with_anchor_date(date());
        assert_eq!(config.anchor, Some(date()));
        assert_eq!(config.anchor_date(), date());
        assert_eq!(config.max_transfers, 50);
    }

    #[test]
    fn resolve_limit() {
        let config = SearchConfig::new(3, 1000, 2, 10, date());

        assert_eq!(config.resolve_limit(None), Some(2));
        assert_eq!(config.resolve_limit(Some(1)), Some(1));
        assert_eq!(config.resolve_limit(Some(10)), Some(10));
        assert_eq!(config.resolve_limit(Some(0)), None);
        assert_eq!(config.resolve_limit(Some(11)), None);
    }
}
