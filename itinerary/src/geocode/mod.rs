//! Address ↔ coordinate resolution.
//!
//! This module provides a client for Nominatim-compatible geocoding
//! services and a gateway that spaces out requests.
//!
//! Key characteristics of the public Nominatim service:
//! - At most one request per second per client
//! - Every request must identify the client via `User-Agent`
//! - No API key; coordinates come back as strings

mod cache;
mod client;
mod config;
mod error;
mod gateway;
mod limiter;
mod types;

pub use cache::CachedGeocoder;
pub use client::{GeocodeProvider, NominatimClient};
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MIN_INTERVAL, DEFAULT_USER_AGENT, GeocodeCacheConfig,
    GeocoderConfig,
};
pub use error::GeocodeError;
pub use gateway::Geocoder;
pub use limiter::{Clock, RateLimiter, TokioClock};
