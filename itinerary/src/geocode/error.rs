//! Geocoding error types.

/// Errors from resolving addresses or coordinates.
///
/// Callers can tell the conditions apart: [`EmptyAddress`] and
/// [`InvalidCoordinates`] are input problems detected before any request,
/// [`NotFound`] means the provider answered with no match, and everything
/// for which [`is_transport`] is true is a network or provider failure
/// worth retrying later. The gateway itself never retries.
///
/// [`EmptyAddress`]: GeocodeError::EmptyAddress
/// [`InvalidCoordinates`]: GeocodeError::InvalidCoordinates
/// [`NotFound`]: GeocodeError::NotFound
/// [`is_transport`]: GeocodeError::is_transport
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// Address was blank
    #[error("address is empty")]
    EmptyAddress,

    /// Coordinates for a reverse lookup are not on the globe
    #[error("invalid coordinates: ({lat}, {lng})")]
    InvalidCoordinates { lat: f64, lng: f64 },

    /// The provider found no match
    #[error("no match for {query:?}")]
    NotFound { query: String },

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned a non-success status
    #[error("provider error {status}: {message}")]
    Api { status: u16, message: String },

    /// Provider asked us to slow down
    #[error("rate limited by geocoding provider")]
    RateLimited,

    /// Provider response could not be understood
    #[error("unexpected provider response: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Client could not be built from its configuration
    #[error("invalid geocoder configuration: {0}")]
    Config(String),
}

impl GeocodeError {
    /// Whether this is a network or provider failure rather than a problem
    /// with the query.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GeocodeError::Http(_)
                | GeocodeError::Api { .. }
                | GeocodeError::RateLimited
                | GeocodeError::Json { .. }
        )
    }
}
