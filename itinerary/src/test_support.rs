//! Builders and proptest strategies shared by unit tests.

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use proptest::prelude::*;

use crate::domain::{
    Accommodation, Activity, ActivityCategory, Flight, ItineraryItem, Location, Timestamp, Trip,
    TripId,
};

pub fn ts(s: &str) -> Timestamp {
    DateTime::parse_from_rfc3339(s).unwrap()
}

pub fn loc(lat: f64, lng: f64, address: &str) -> Location {
    Location::new(lat, lng, address).unwrap()
}

pub fn flight(trip: TripId, from: &Location, to: &Location, dep: &str, arr: &str) -> ItineraryItem {
    ItineraryItem::flight(trip, Flight::new(from.clone(), to.clone(), ts(dep), ts(arr))).unwrap()
}

pub fn stay(
    trip: TripId,
    name: &str,
    at: &Location,
    check_in: &str,
    check_out: &str,
) -> ItineraryItem {
    ItineraryItem::accommodation(
        trip,
        Accommodation::new(name, at.clone(), ts(check_in), ts(check_out)),
    )
    .unwrap()
}

pub fn activity(trip: TripId, name: &str, at: &Location, start: &str) -> ItineraryItem {
    ItineraryItem::activity(
        trip,
        ts(start),
        Activity::new(name, at.clone(), ActivityCategory::Attraction),
    )
    .unwrap()
}

/// The "Japan 2024" trip: a flight on the 1st, an activity on the 2nd.
pub fn japan_trip() -> Trip {
    let mut trip = Trip::new(
        "Japan 2024",
        ts("2024-04-01T00:00:00Z"),
        ts("2024-04-10T00:00:00Z"),
        ts("2024-03-01T09:30:15.123Z"),
    )
    .unwrap();
    let nrt = loc(35.772, 140.3929, "Narita International Airport");
    let hnd = loc(35.5494, 139.7798, "Haneda Airport");
    let shibuya = loc(35.6595, 139.7005, "Shibuya Crossing");
    let now = ts("2024-03-02T10:00:00.456Z");
    trip.add_item(
        flight(trip.id(), &nrt, &hnd, "2024-04-01T08:00:00Z", "2024-04-01T18:00:00Z"),
        now,
    )
    .unwrap();
    trip.add_item(
        activity(trip.id(), "Shibuya Crossing", &shibuya, "2024-04-02T10:00:00Z"),
        now,
    )
    .unwrap();
    trip
}

fn arb_location() -> impl Strategy<Value = Location> {
    (-90.0f64..=90.0, -180.0f64..=180.0, "[a-zA-Z ]{1,12}")
        .prop_map(|(lat, lng, address)| Location::new(lat, lng, address).unwrap())
}

/// Timestamps spread over a fortnight, at millisecond precision, in a
/// handful of offsets.
fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
    (0i64..14 * 24 * 60 * 60 * 1000, prop::sample::select(vec![-8, 0, 1, 9]))
        .prop_map(|(millis, hours)| {
            let offset = FixedOffset::east_opt(hours * 3600).unwrap();
            let base = offset.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
            base + Duration::milliseconds(millis)
        })
}

fn arb_duration() -> impl Strategy<Value = Duration> {
    (0i64..3 * 24 * 60).prop_map(Duration::minutes)
}

fn arb_category() -> impl Strategy<Value = ActivityCategory> {
    prop_oneof![
        Just(ActivityCategory::Restaurant),
        Just(ActivityCategory::Tour),
        Just(ActivityCategory::Attraction),
        Just(ActivityCategory::Other),
    ]
}

pub fn arb_item(trip: TripId) -> impl Strategy<Value = ItineraryItem> {
    let flight = (arb_location(), arb_location(), arb_timestamp(), arb_duration(), any::<bool>())
        .prop_map(move |(origin, destination, departure, length, numbered)| {
            let mut flight = Flight::new(origin, destination, departure, departure + length);
            if numbered {
                flight = flight.with_carrier("JAL", "JL5").with_confirmation("ABC123");
            }
            ItineraryItem::flight(trip, flight).unwrap()
        });
    let stay = ("[a-zA-Z]{1,10}", arb_location(), arb_timestamp(), arb_duration())
        .prop_map(move |(name, at, check_in, length)| {
            ItineraryItem::accommodation(
                trip,
                Accommodation::new(name, at, check_in, check_in + length)
                    .with_booking_reference("BK-1"),
            )
            .unwrap()
        });
    let activity = (
        "[a-zA-Z]{1,10}",
        arb_location(),
        arb_timestamp(),
        arb_category(),
        proptest::option::of("[a-z ]{1,8}"),
    )
        .prop_map(move |(name, at, start, category, notes)| {
            let activity = Activity::new(name, at, category).at_time("19:30");
            let item = ItineraryItem::activity(trip, start, activity).unwrap();
            match notes {
                Some(notes) => item.with_notes(notes),
                None => item,
            }
        });
    prop_oneof![flight, stay, activity]
}

pub fn arb_items() -> impl Strategy<Value = Vec<ItineraryItem>> {
    let trip = TripId::generate();
    prop::collection::vec(arb_item(trip), 0..24)
}

pub fn arb_trip() -> impl Strategy<Value = Trip> {
    ("[a-zA-Z]{1,12}", arb_timestamp(), arb_duration(), arb_timestamp()).prop_flat_map(
        |(name, start, length, created)| {
            let trip = Trip::new(name, start, start + length, created).unwrap();
            let id = trip.id();
            prop::collection::vec(arb_item(id), 0..8).prop_map(move |items| {
                let mut trip = trip.clone();
                for item in items {
                    trip.add_item(item, created).unwrap();
                }
                trip
            })
        },
    )
}
