//! Geocoder configuration.

use std::time::Duration;

/// Default base URL: the public OpenStreetMap Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default client identifier sent as `User-Agent` on every request.
pub const DEFAULT_USER_AGENT: &str = concat!("itinerary/", env!("CARGO_PKG_VERSION"));

/// Default minimum gap between outbound requests (Nominatim allows one per second).
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1000);

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Base URL of a Nominatim-compatible provider
    pub base_url: String,
    /// Client identifier header value
    pub user_agent: String,
    /// Minimum time between the starts of two requests
    pub min_interval: Duration,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocoderConfig {
    /// Create a config with the defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            min_interval: DEFAULT_MIN_INTERVAL,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the client identifier.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the minimum request interval.
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the geocoding result cache.
#[derive(Debug, Clone)]
pub struct GeocodeCacheConfig {
    /// How long a resolved address stays cached.
    pub ttl: Duration,
    /// Maximum number of cached lookups (per direction).
    pub max_capacity: u64,
}

impl Default for GeocodeCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 1000,
        }
    }
}
