//! Error types for pinpoint

use thiserror::Error;

/// Main error type for pinpoint operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("History error: {0}")]
    History(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Geo error: {0}")]
    Geo(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Result type alias for pinpoint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a failed asynchronous lookup (geocode, search, location fix)
///
/// This is the only failure shape the selection controller ever sees.
/// Provider errors are translated at the session boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The request was superseded by a newer one of the same kind
    #[error("request cancelled")]
    Cancelled,

    /// Network, geocoder or search failure
    #[error("{0}")]
    ProviderFailure(String),

    /// Location access is unavailable for this session
    #[error("location permission denied")]
    PermissionDenied,
}

impl LookupError {
    /// Whether this outcome should be shown to the user
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::ProviderFailure(_))
    }
}

impl From<Error> for LookupError {
    fn from(err: Error) -> Self {
        match err {
            Error::Lookup(lookup) => lookup,
            other => Self::ProviderFailure(other.to_string()),
        }
    }
}

/// Result of an asynchronous lookup
pub type LookupResult<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_provider_failure_is_visible() {
        assert!(LookupError::ProviderFailure("boom".into()).is_user_visible());
        assert!(!LookupError::Cancelled.is_user_visible());
        assert!(!LookupError::PermissionDenied.is_user_visible());
    }

    #[test]
    fn test_crate_error_becomes_provider_failure() {
        let err: LookupError = Error::Geo("Nominatim returned status: 500".into()).into();
        assert_eq!(
            err,
            LookupError::ProviderFailure("Geo error: Nominatim returned status: 500".into())
        );
    }

    #[test]
    fn test_lookup_error_survives_round_trip() {
        let err: Error = LookupError::PermissionDenied.into();
        assert_eq!(err.to_string(), "location permission denied");
        assert_eq!(LookupError::from(err), LookupError::PermissionDenied);
    }
}
