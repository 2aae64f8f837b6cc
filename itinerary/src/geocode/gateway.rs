//! Rate-limited geocoding gateway.

use tracing::debug;

use crate::domain::{Location, validate_coordinates};

use super::client::{GeocodeProvider, NominatimClient};
use super::config::GeocoderConfig;
use super::error::GeocodeError;
use super::limiter::{Clock, RateLimiter, TokioClock};

/// Resolves addresses to locations and back, one request per interval.
///
/// Input is checked before a rate-limit slot is taken, so blank addresses
/// and impossible coordinates fail immediately. Failures are returned as
/// they are; nothing is retried.
#[derive(Debug)]
pub struct Geocoder<P, C = TokioClock> {
    provider: P,
    limiter: RateLimiter<C>,
}

impl Geocoder<NominatimClient> {
    /// A gateway to the Nominatim instance described by `config`.
    pub fn nominatim(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = NominatimClient::new(config)?;
        Ok(Self::new(client, RateLimiter::new(config.min_interval)))
    }
}

impl<P: GeocodeProvider, C: Clock> Geocoder<P, C> {
    pub fn new(provider: P, limiter: RateLimiter<C>) -> Self {
        Self { provider, limiter }
    }

    /// Resolve a free-text address to its best matching location.
    pub async fn resolve(&self, address: &str) -> Result<Location, GeocodeError> {
        let query = address.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        self.limiter.acquire().await;
        debug!(query, "geocoding address");
        self.provider
            .search(query)
            .await?
            .ok_or_else(|| GeocodeError::NotFound {
                query: query.to_string(),
            })
    }

    /// Find a display address for a point.
    pub async fn reverse(&self, lat: f64, lng: f64) -> Result<String, GeocodeError> {
        validate_coordinates(lat, lng).map_err(|_| GeocodeError::InvalidCoordinates { lat, lng })?;

        self.limiter.acquire().await;
        debug!(lat, lng, "reverse geocoding");
        self.provider
            .reverse(lat, lng)
            .await?
            .ok_or_else(|| GeocodeError::NotFound {
                query: format!("{lat},{lng}"),
            })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
