//! Itinerary items: flights, accommodation and activities.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ItemId, Location, Timestamp, TripId, ValidationError};

/// The discriminant of an [`ItineraryItem`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Flight,
    Accommodation,
    Activity,
}

impl ItemKind {
    /// The tag used for this kind in serialized items.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Flight => "flight",
            ItemKind::Accommodation => "accommodation",
            ItemKind::Activity => "activity",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What sort of thing an activity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Restaurant,
    Tour,
    Attraction,
    #[default]
    Other,
}

/// A flight between two airports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub origin: Location,
    pub destination: Location,
    pub departure: Timestamp,
    pub arrival: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_code: Option<String>,
}

impl Flight {
    /// A flight with no airline, number or confirmation code.
    pub fn new(
        origin: Location,
        destination: Location,
        departure: Timestamp,
        arrival: Timestamp,
    ) -> Self {
        Self {
            origin,
            destination,
            departure,
            arrival,
            airline: None,
            flight_number: None,
            confirmation_code: None,
        }
    }

    /// Set the airline and flight number.
    pub fn with_carrier(mut self, airline: impl Into<String>, number: impl Into<String>) -> Self {
        self.airline = Some(airline.into());
        self.flight_number = Some(number.into());
        self
    }

    /// Set the booking confirmation code.
    pub fn with_confirmation(mut self, code: impl Into<String>) -> Self {
        self.confirmation_code = Some(code.into());
        self
    }
}

/// A stay at a hotel, hostel, rental and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub name: String,
    pub location: Location,
    pub check_in: Timestamp,
    pub check_out: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_reference: Option<String>,
}

impl Accommodation {
    pub fn new(
        name: impl Into<String>,
        location: Location,
        check_in: Timestamp,
        check_out: Timestamp,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            check_in,
            check_out,
            booking_reference: None,
        }
    }

    /// Set the booking reference.
    pub fn with_booking_reference(mut self, reference: impl Into<String>) -> Self {
        self.booking_reference = Some(reference.into());
        self
    }
}

/// Something to do: a meal, a tour, a sight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub name: String,
    pub location: Location,
    pub category: ActivityCategory,
    /// Free-form time of day as entered, e.g. "19:30" or "morning".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl Activity {
    pub fn new(name: impl Into<String>, location: Location, category: ActivityCategory) -> Self {
        Self {
            name: name.into(),
            location,
            category,
            time: None,
        }
    }

    /// Set the time-of-day label.
    pub fn at_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}

/// Variant-specific payload of an item.
///
/// Serialized inline with the item, discriminated by a `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemDetails {
    Flight(Flight),
    Accommodation(Accommodation),
    Activity(Activity),
}

impl ItemDetails {
    /// The discriminant of this payload.
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemDetails::Flight(_) => ItemKind::Flight,
            ItemDetails::Accommodation(_) => ItemKind::Accommodation,
            ItemDetails::Activity(_) => ItemKind::Activity,
        }
    }

    /// The fixed schedule of flights and stays as `(field, start, end)`.
    /// Activities are scheduled freely and return `None`.
    fn schedule(&self) -> Option<(&'static str, Timestamp, Timestamp)> {
        match self {
            ItemDetails::Flight(flight) => Some(("flight", flight.departure, flight.arrival)),
            ItemDetails::Accommodation(stay) => {
                Some(("accommodation", stay.check_in, stay.check_out))
            }
            ItemDetails::Activity(_) => None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ItemDetails::Flight(flight) => {
                flight.origin.validate()?;
                flight.destination.validate()?;
                if flight.arrival < flight.departure {
                    return Err(ValidationError::EndBeforeStart { field: "flight" });
                }
            }
            ItemDetails::Accommodation(stay) => {
                require_name(&stay.name, "accommodation name")?;
                stay.location.validate()?;
                if stay.check_out < stay.check_in {
                    return Err(ValidationError::EndBeforeStart {
                        field: "accommodation",
                    });
                }
            }
            ItemDetails::Activity(activity) => {
                require_name(&activity.name, "activity name")?;
                activity.location.validate()?;
            }
        }
        Ok(())
    }
}

/// One entry of a trip's itinerary.
///
/// Every item carries the fields shared by all variants (id, owning trip,
/// start, optional end, notes) plus its variant payload. Constructors check
/// the date and naming invariants, so a value built through them is valid.
///
/// # Examples
///
/// ```
/// use itinerary::domain::{Activity, ActivityCategory, ItemKind, ItineraryItem, Location, TripId};
/// use chrono::DateTime;
///
/// let trip = TripId::generate();
/// let crossing = Location::new(35.6595, 139.7005, "Shibuya Crossing").unwrap();
/// let start = DateTime::parse_from_rfc3339("2024-04-02T10:00:00+09:00").unwrap();
///
/// let item = ItineraryItem::activity(
///     trip,
///     start,
///     Activity::new("Shibuya Crossing", crossing, ActivityCategory::Attraction),
/// )
/// .unwrap();
///
/// assert_eq!(item.kind(), ItemKind::Activity);
/// assert_eq!(item.trip_id(), trip);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryItem {
    id: ItemId,
    trip_id: TripId,
    start: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(flatten)]
    details: ItemDetails,
}

impl ItineraryItem {
    /// A flight item, starting at departure and ending at arrival.
    pub fn flight(trip_id: TripId, flight: Flight) -> Result<Self, ValidationError> {
        let (start, end) = (flight.departure, flight.arrival);
        Self::build(trip_id, start, Some(end), ItemDetails::Flight(flight))
    }

    /// An accommodation item, starting at check-in and ending at check-out.
    pub fn accommodation(trip_id: TripId, stay: Accommodation) -> Result<Self, ValidationError> {
        let (start, end) = (stay.check_in, stay.check_out);
        Self::build(trip_id, start, Some(end), ItemDetails::Accommodation(stay))
    }

    /// An activity item starting at `start`, with no end.
    pub fn activity(
        trip_id: TripId,
        start: Timestamp,
        activity: Activity,
    ) -> Result<Self, ValidationError> {
        Self::build(trip_id, start, None, ItemDetails::Activity(activity))
    }

    fn build(
        trip_id: TripId,
        start: Timestamp,
        end: Option<Timestamp>,
        details: ItemDetails,
    ) -> Result<Self, ValidationError> {
        let item = Self {
            id: ItemId::generate(),
            trip_id,
            start,
            end,
            notes: None,
            details,
        };
        item.validate()?;
        Ok(item)
    }

    /// Attach free-text notes. Blank notes clear them.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }

    /// Set or clear the end timestamp of an activity.
    ///
    /// Flights and accommodation end at arrival or check-out; changing
    /// their end here fails with [`ValidationError::ScheduleMismatch`].
    pub fn with_end(mut self, end: Option<Timestamp>) -> Result<Self, ValidationError> {
        self.end = end;
        self.validate()?;
        Ok(self)
    }

    /// Replace the variant payload, keeping id, trip and notes.
    ///
    /// Flights and accommodation take their start and end from the new
    /// payload; activities keep the current schedule.
    pub fn with_details(mut self, details: ItemDetails) -> Result<Self, ValidationError> {
        if let Some((_, start, end)) = details.schedule() {
            self.start = start;
            self.end = Some(end);
        }
        self.details = details;
        self.validate()?;
        Ok(self)
    }

    /// Move an activity to a new start, keeping its end.
    ///
    /// Flights and accommodation start at departure or check-in; reschedule
    /// them with [`with_details`](Self::with_details) instead.
    pub fn with_start(mut self, start: Timestamp) -> Result<Self, ValidationError> {
        self.start = start;
        self.validate()?;
        Ok(self)
    }

    /// Check every invariant of this item.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.details.validate()?;
        if let Some((field, start, end)) = self.details.schedule() {
            let end_matches = self.end.is_some_and(|own| same_moment(own, end));
            if !same_moment(self.start, start) || !end_matches {
                return Err(ValidationError::ScheduleMismatch { field });
            }
        }
        if let Some(end) = self.end
            && end < self.start
        {
            return Err(ValidationError::EndBeforeStart { field: "item" });
        }
        Ok(())
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn trip_id(&self) -> TripId {
        self.trip_id
    }

    /// The primary start timestamp, used for ordering and day grouping.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Option<Timestamp> {
        self.end
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn details(&self) -> &ItemDetails {
        &self.details
    }

    pub fn kind(&self) -> ItemKind {
        self.details.kind()
    }

    /// A short label for timelines: the name, or "ORIGIN → DESTINATION" for flights.
    pub fn title(&self) -> String {
        match &self.details {
            ItemDetails::Flight(flight) => match &flight.flight_number {
                Some(number) => format!(
                    "{number}: {} → {}",
                    flight.origin.address(),
                    flight.destination.address()
                ),
                None => format!(
                    "{} → {}",
                    flight.origin.address(),
                    flight.destination.address()
                ),
            },
            ItemDetails::Accommodation(stay) => stay.name.clone(),
            ItemDetails::Activity(activity) => activity.name.clone(),
        }
    }
}

/// Same instant and same offset, so the calendar day agrees too.
fn same_moment(a: Timestamp, b: Timestamp) -> bool {
    a == b && a.offset() == b.offset()
}

fn require_name(name: &str, what: &'static str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::BlankName(what))
    } else {
        Ok(())
    }
}
