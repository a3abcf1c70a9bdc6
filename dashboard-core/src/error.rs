use thiserror::Error;

/// Failure of the geolocation capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// No position source could answer, e.g. the lookup service is unreachable.
    #[error("location unavailable: {0}")]
    Unavailable(String),

    /// Location access was turned off by the user.
    #[error("location access denied")]
    Denied,
}

/// Failure of one HTTP call to an external API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("{0}")]
    Status(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Everything that can go wrong while loading the dashboard.
///
/// The `Display` text of the first three variants is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("Geolocation is not supported on this system.")]
    GeolocationUnavailable,

    #[error("Unable to retrieve your location. Please allow location access.")]
    GeolocationDenied,

    #[error("{0}")]
    WeatherFetchFailed(String),

    /// Only ever logged; the dashboard falls back to the placeholder background.
    #[error("{0}")]
    ImageFetchFailed(String),
}

impl From<LocationError> for DashboardError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::Unavailable(_) => DashboardError::GeolocationUnavailable,
            LocationError::Denied => DashboardError::GeolocationDenied,
        }
    }
}
