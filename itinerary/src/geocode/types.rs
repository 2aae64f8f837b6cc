//! Wire types for the Nominatim JSON API.
//!
//! Only the fields we use are modelled; everything else is ignored.

use serde::Deserialize;

/// A coordinate as sent by the provider.
///
/// Nominatim sends coordinates as strings (`"35.6595"`); other compatible
/// providers send numbers. Both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    pub(crate) fn value(&self) -> Option<f64> {
        match self {
            Coordinate::Number(n) => Some(*n),
            Coordinate::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One element of the `/search` response array.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchHit {
    pub lat: Coordinate,
    pub lon: Coordinate,
    pub display_name: String,
}

/// The `/reverse` response object.
///
/// A lookup with no match comes back as `{"error": "Unable to geocode"}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReverseHit {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
