//! Nominatim HTTP client.
//!
//! Issues the raw search and reverse requests. Rate limiting is not done
//! here; wrap the client in a [`Geocoder`](super::Geocoder).

use std::future::Future;

use crate::domain::Location;

use super::config::GeocoderConfig;
use super::error::GeocodeError;
use super::types::{ReverseHit, SearchHit};

/// A source of geocoding answers.
///
/// This abstraction allows the gateway to be tested without a network.
pub trait GeocodeProvider: Send + Sync {
    /// The best match for a free-text address, if any.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<Location>, GeocodeError>> + Send;

    /// A display address for a point, if any.
    fn reverse(
        &self,
        lat: f64,
        lng: f64,
    ) -> impl Future<Output = Result<Option<String>, GeocodeError>> + Send;
}

/// Client for a Nominatim-compatible geocoding API.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    /// Create a client. Every request carries the configured `User-Agent`.
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        if config.user_agent.trim().is_empty() {
            return Err(GeocodeError::Config("user agent must not be empty".into()));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String, GeocodeError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

impl GeocodeProvider for NominatimClient {
    async fn search(&self, query: &str) -> Result<Option<Location>, GeocodeError> {
        let body = self
            .get(
                "search",
                &[
                    ("q", query.to_string()),
                    ("format", "json".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        let hits: Vec<SearchHit> = serde_json::from_str(&body).map_err(|e| json_error(e, &body))?;
        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };

        let (Some(lat), Some(lng)) = (hit.lat.value(), hit.lon.value()) else {
            return Err(GeocodeError::Json {
                message: "coordinates are not numbers".to_string(),
                body: Some(truncate(&body)),
            });
        };

        Location::new(lat, lng, hit.display_name)
            .map(Some)
            .map_err(|e| GeocodeError::Json {
                message: e.to_string(),
                body: None,
            })
    }

    async fn reverse(&self, lat: f64, lng: f64) -> Result<Option<String>, GeocodeError> {
        let body = self
            .get(
                "reverse",
                &[
                    ("lat", lat.to_string()),
                    ("lon", lng.to_string()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        let hit: ReverseHit = serde_json::from_str(&body).map_err(|e| json_error(e, &body))?;
        if hit.error.is_some() {
            return Ok(None);
        }
        Ok(hit.display_name.filter(|name| !name.trim().is_empty()))
    }
}

fn json_error(err: serde_json::Error, body: &str) -> GeocodeError {
    GeocodeError::Json {
        message: err.to_string(),
        body: Some(truncate(body)),
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(500).collect()
}
