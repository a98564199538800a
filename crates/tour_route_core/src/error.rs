use std::time::Duration;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("too many waypoints: {count} exceeds the configured maximum of {max}")]
    TooManyWaypoints { count: usize, max: usize },
    #[error("optimization cancelled")]
    Cancelled,
    #[error("optimization exceeded its time limit after {:.3}s", .elapsed.as_secs_f64())]
    TimedOut { elapsed: Duration },
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Error;

    #[test]
    fn too_many_waypoints_names_both_counts() {
        let err = Error::TooManyWaypoints { count: 600, max: 500 };
        let msg = err.to_string();
        assert!(msg.contains("600"));
        assert!(msg.contains("500"));
    }

    #[test]
    fn timed_out_reports_elapsed_seconds() {
        let err = Error::TimedOut {
            elapsed: Duration::from_millis(1_500),
        };
        assert_eq!(
            err.to_string(),
            "optimization exceeded its time limit after 1.500s"
        );
    }

    #[test]
    fn invalid_input_prefixes_message() {
        assert_eq!(
            Error::invalid_input("no waypoints").to_string(),
            "invalid input: no waypoints"
        );
    }
}
