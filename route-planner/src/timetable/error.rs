//! Timetable construction errors.

use std::io;

/// Errors raised while building or loading a timetable.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// Could not read the timetable file
    #[error("failed to read timetable: {0}")]
    Io(#[from] io::Error),

    /// The file is not a valid timetable document
    #[error("invalid timetable JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two cities share a name
    #[error("duplicate city: {0}")]
    DuplicateCity(String),

    /// A station id is used more than once
    #[error("duplicate station id: {0}")]
    DuplicateStation(String),

    /// A departure refers to a station no city owns
    #[error("unknown station id: {0}")]
    UnknownStation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TimetableError::DuplicateCity("G_0_0".into());
        assert_eq!(err.to_string(), "duplicate city: G_0_0");

        let err = TimetableError::UnknownStation("A_9_9".into());
        assert_eq!(err.to_string(), "unknown station id: A_9_9");

        let err = TimetableError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.to_string(), "failed to read timetable: gone");
    }
}
