//! Timestamp handling for itinerary items.
//!
//! Items keep the UTC offset they were entered with, so that a 23:30
//! departure in Tokyo stays on the Tokyo calendar day even when the
//! instant falls on the previous day in UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// An instant together with its original UTC offset.
///
/// Equality and ordering compare instants, not offsets.
pub type Timestamp = DateTime<FixedOffset>;

/// The current instant, expressed in UTC.
pub fn now() -> Timestamp {
    Utc::now().fixed_offset()
}

/// The calendar day of a timestamp in its own offset.
///
/// # Examples
///
/// ```
/// use itinerary::domain::calendar_day;
/// use chrono::{DateTime, NaiveDate};
///
/// let late = DateTime::parse_from_rfc3339("2024-04-01T23:30:00+09:00").unwrap();
/// assert_eq!(calendar_day(&late), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
/// ```
pub fn calendar_day(ts: &Timestamp) -> NaiveDate {
    ts.date_naive()
}
