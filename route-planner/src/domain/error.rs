//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from loader and HTTP errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Consecutive legs don't meet in the same city
    #[error("leg arriving at {0} does not connect to leg leaving {1}")]
    CitiesNotConnected(String, String),

    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::CitiesNotConnected("Doboj".into(), "Tuzla".into());
        assert_eq!(
            err.to_string(),
            "leg arriving at Doboj does not connect to leg leaving Tuzla"
        );

        let err = DomainError::EmptyItinerary;
        assert_eq!(err.to_string(), "itinerary must have at least one leg");
    }
}
