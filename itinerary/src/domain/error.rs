//! Domain error types.
//!
//! These errors represent validation failures in the itinerary model.
//! They are distinct from storage and geocoding errors.

use super::{ItemId, TripId};

/// Validation failures raised when constructing or checking domain values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required name was empty or whitespace
    #[error("{0} must not be blank")]
    BlankName(&'static str),

    /// An end timestamp precedes its start
    #[error("{field} ends before it starts")]
    EndBeforeStart { field: &'static str },

    /// A flight or stay whose item start or end differs from its own dates
    #[error("{field} start and end must match its own schedule")]
    ScheduleMismatch { field: &'static str },

    /// Latitude or longitude out of range or not finite
    #[error("invalid coordinates: ({lat}, {lng})")]
    InvalidCoordinates { lat: f64, lng: f64 },

    /// An item references a different trip than the one holding it
    #[error("item {item} belongs to trip {expected}, not {found}")]
    TripMismatch {
        item: ItemId,
        expected: TripId,
        found: TripId,
    },

    /// Two items in the same trip share an id
    #[error("duplicate item id {0}")]
    DuplicateItem(ItemId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::BlankName("trip name");
        assert_eq!(err.to_string(), "trip name must not be blank");

        let err = ValidationError::EndBeforeStart { field: "flight" };
        assert_eq!(err.to_string(), "flight ends before it starts");

        let err = ValidationError::ScheduleMismatch { field: "flight" };
        assert_eq!(
            err.to_string(),
            "flight start and end must match its own schedule"
        );

        let err = ValidationError::InvalidCoordinates {
            lat: 91.0,
            lng: 0.0,
        };
        assert_eq!(err.to_string(), "invalid coordinates: (91, 0)");
    }
}
