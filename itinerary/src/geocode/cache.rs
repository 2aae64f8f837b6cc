//! Caching layer for geocoding lookups.
//!
//! Users re-enter the same places (the hotel, the airport) often. Caching
//! successful answers saves both a request and a rate-limit slot. Failures
//! are never cached, so a transient outage does not stick.

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::Location;

use super::client::GeocodeProvider;
use super::config::GeocodeCacheConfig;
use super::error::GeocodeError;
use super::gateway::Geocoder;
use super::limiter::{Clock, TokioClock};

/// Reverse lookups are keyed by the exact bit patterns of the coordinates.
type PointKey = (u64, u64);

/// A [`Geocoder`] with a cache in front of it.
pub struct CachedGeocoder<P, C = TokioClock> {
    geocoder: Geocoder<P, C>,
    forward: MokaCache<String, Location>,
    reverse: MokaCache<PointKey, String>,
}

impl<P: GeocodeProvider, C: Clock> CachedGeocoder<P, C> {
    pub fn new(geocoder: Geocoder<P, C>, config: &GeocodeCacheConfig) -> Self {
        let forward = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let reverse = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            geocoder,
            forward,
            reverse,
        }
    }

    /// Resolve an address, answering from cache when possible.
    ///
    /// Addresses differing only in case or surrounding whitespace share an
    /// entry.
    pub async fn resolve(&self, address: &str) -> Result<Location, GeocodeError> {
        let key = normalize(address);
        if key.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        if let Some(cached) = self.forward.get(&key).await {
            debug!(query = %key, "geocode cache hit");
            return Ok(cached);
        }

        let location = self.geocoder.resolve(address).await?;
        self.forward.insert(key, location.clone()).await;
        Ok(location)
    }

    /// Reverse-geocode a point, answering from cache when possible.
    pub async fn reverse(&self, lat: f64, lng: f64) -> Result<String, GeocodeError> {
        let key = (lat.to_bits(), lng.to_bits());
        if let Some(cached) = self.reverse.get(&key).await {
            debug!(lat, lng, "reverse geocode cache hit");
            return Ok(cached);
        }

        let address = self.geocoder.reverse(lat, lng).await?;
        self.reverse.insert(key, address.clone()).await;
        Ok(address)
    }

    /// Access the underlying gateway for lookups that bypass the cache.
    pub fn geocoder(&self) -> &Geocoder<P, C> {
        &self.geocoder
    }

    /// Drop every cached answer.
    pub fn invalidate_all(&self) {
        self.forward.invalidate_all();
        self.reverse.invalidate_all();
    }
}

fn normalize(address: &str) -> String {
    address.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::geocode::RateLimiter;
    use crate::geocode::gateway::testing::RecordingProvider;
    use crate::geocode::limiter::testing::ManualClock;

    fn cached(clock: &ManualClock) -> CachedGeocoder<RecordingProvider<ManualClock>, ManualClock> {
        let hnd = Location::new(35.5494, 139.7798, "Haneda Airport").unwrap();
        let provider = RecordingProvider::new(clock.clone()).with_place("Haneda Airport", hnd);
        let geocoder = Geocoder::new(
            provider,
            RateLimiter::with_clock(Duration::from_millis(1000), clock.clone()),
        );
        CachedGeocoder::new(geocoder, &GeocodeCacheConfig::default())
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Haneda AIRPORT "), "haneda airport");
    }

    #[tokio::test]
    async fn hit_skips_provider_and_limiter() {
        let clock = ManualClock::new();
        let geocoder = cached(&clock);

        let first = geocoder.resolve("Haneda Airport").await.unwrap();
        let second = geocoder.resolve("  haneda airport").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(geocoder.geocoder().provider().call_count(), 1);
        assert!(clock.sleeps().is_empty());
    }

    #[tokio::test]
    async fn misses_are_not_cached() {
        let clock = ManualClock::new();
        let geocoder = cached(&clock);

        assert!(geocoder.resolve("Atlantis").await.is_err());
        assert!(geocoder.resolve("Atlantis").await.is_err());
        assert_eq!(geocoder.geocoder().provider().call_count(), 2);
    }

    #[tokio::test]
    async fn blank_address_rejected_before_cache() {
        let clock = ManualClock::new();
        let geocoder = cached(&clock);
        assert!(matches!(
            geocoder.resolve("  ").await,
            Err(GeocodeError::EmptyAddress)
        ));
    }

    #[tokio::test]
    async fn reverse_is_cached() {
        let clock = ManualClock::new();
        let geocoder = cached(&clock);

        assert_eq!(
            geocoder.reverse(35.5494, 139.7798).await.unwrap(),
            "Haneda Airport"
        );
        assert_eq!(
            geocoder.reverse(35.5494, 139.7798).await.unwrap(),
            "Haneda Airport"
        );
        assert_eq!(geocoder.geocoder().provider().call_count(), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let clock = ManualClock::new();
        let geocoder = cached(&clock);

        geocoder.resolve("Haneda Airport").await.unwrap();
        geocoder.invalidate_all();
        geocoder.resolve("Haneda Airport").await.unwrap();
        assert_eq!(geocoder.geocoder().provider().call_count(), 2);
    }
}
