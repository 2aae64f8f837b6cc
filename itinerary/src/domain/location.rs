//! Geographic locations and bounding boxes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A resolved point on the map with its human-readable address.
///
/// Coordinates are validated at construction: latitude within [-90, 90],
/// longitude within [-180, 180], both finite.
///
/// # Examples
///
/// ```
/// use itinerary::domain::Location;
///
/// let hnd = Location::new(35.5494, 139.7798, "Haneda Airport").unwrap();
/// assert_eq!(hnd.address(), "Haneda Airport");
///
/// assert!(Location::new(91.0, 0.0, "North of north").is_err());
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    lat: f64,
    lng: f64,
    address: String,
}

impl Location {
    /// Create a location, validating the coordinates.
    pub fn new(lat: f64, lng: f64, address: impl Into<String>) -> Result<Self, ValidationError> {
        validate_coordinates(lat, lng)?;
        Ok(Self {
            lat,
            lng,
            address: address.into(),
        })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Human-readable address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Re-check the coordinate invariant (used on values read from storage).
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_coordinates(self.lat, self.lng)
    }
}

/// Check that a latitude/longitude pair is a real point on the globe.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
    let lng_ok = lng.is_finite() && (-180.0..=180.0).contains(&lng);
    if lat_ok && lng_ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidCoordinates { lat, lng })
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({}, {} {:?})", self.lat, self.lng, self.address)
    }
}

/// The minimal latitude/longitude rectangle enclosing a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum latitude
    pub south: f64,
    /// Minimum longitude
    pub west: f64,
    /// Maximum latitude
    pub north: f64,
    /// Maximum longitude
    pub east: f64,
}

impl Bounds {
    /// A degenerate box covering exactly one point.
    pub fn around(location: &Location) -> Self {
        Self {
            south: location.lat,
            west: location.lng,
            north: location.lat,
            east: location.lng,
        }
    }

    /// Grow the box so it also covers `location`.
    pub fn extend(&mut self, location: &Location) {
        self.south = self.south.min(location.lat);
        self.west = self.west.min(location.lng);
        self.north = self.north.max(location.lat);
        self.east = self.east.max(location.lng);
    }

    /// Whether the point lies inside the box (edges included).
    pub fn contains(&self, location: &Location) -> bool {
        (self.south..=self.north).contains(&location.lat)
            && (self.west..=self.east).contains(&location.lng)
    }

    /// The midpoint of the box, as `(lat, lng)`.
    ///
    /// Boxes spanning the antimeridian are not special-cased.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}
