//! Map markers, bounds and the travel route.

use crate::domain::{Bounds, ItemDetails, ItineraryItem, Location};

use super::sort_chronologically;

/// Every location an item puts on the map, in item order.
///
/// Flights contribute origin then destination; accommodation and
/// activities contribute their single location.
pub fn all_locations(items: &[ItineraryItem]) -> Vec<&Location> {
    let mut locations = Vec::with_capacity(items.len() * 2);
    for item in items {
        match item.details() {
            ItemDetails::Flight(flight) => {
                locations.push(&flight.origin);
                locations.push(&flight.destination);
            }
            ItemDetails::Accommodation(stay) => locations.push(&stay.location),
            ItemDetails::Activity(activity) => locations.push(&activity.location),
        }
    }
    locations
}

/// The smallest box covering every location in `items`, or `None` if
/// there are no locations.
pub fn trip_bounds(items: &[ItineraryItem]) -> Option<Bounds> {
    let mut locations = all_locations(items).into_iter();
    let first = locations.next()?;
    Some(locations.fold(Bounds::around(first), |mut bounds, location| {
        bounds.extend(location);
        bounds
    }))
}

/// The points of the travel path, in chronological order.
///
/// Flights contribute origin then destination and activities their
/// location. Accommodation is left out of the path; hotels still appear
/// as markers via [`all_locations`].
pub fn route_locations(items: &[ItineraryItem]) -> Vec<&Location> {
    let mut route = Vec::with_capacity(items.len() * 2);
    for item in sort_chronologically(items) {
        match item.details() {
            ItemDetails::Flight(flight) => {
                route.push(&flight.origin);
                route.push(&flight.destination);
            }
            ItemDetails::Accommodation(_) => {}
            ItemDetails::Activity(activity) => route.push(&activity.location),
        }
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TripId;
    use crate::test_support::{activity, flight, loc, stay};

    #[test]
    fn flights_contribute_two_locations() {
        let trip = TripId::generate();
        let nrt = loc(35.77, 140.39, "NRT");
        let hnd = loc(35.55, 139.78, "HND");
        let hotel = loc(35.69, 139.69, "Shinjuku");
        let items = vec![
            stay(trip, "Park Hyatt", &hotel, "2024-04-01T20:00:00Z", "2024-04-05T11:00:00Z"),
            flight(trip, &nrt, &hnd, "2024-04-01T08:00:00Z", "2024-04-01T18:00:00Z"),
        ];

        let addresses: Vec<&str> = all_locations(&items).iter().map(|l| l.address()).collect();
        assert_eq!(addresses, ["Shinjuku", "NRT", "HND"]);
    }

    #[test]
    fn bounds_of_nothing_is_none() {
        assert_eq!(trip_bounds(&[]), None);
    }

    #[test]
    fn bounds_of_one_point_is_degenerate() {
        let trip = TripId::generate();
        let shibuya = loc(35.6595, 139.7005, "Shibuya");
        let items = vec![activity(trip, "Crossing", &shibuya, "2024-04-02T10:00:00Z")];

        let bounds = trip_bounds(&items).unwrap();
        assert_eq!(bounds, Bounds::around(&shibuya));
    }

    #[test]
    fn bounds_cover_all_points() {
        let trip = TripId::generate();
        let sfo = loc(37.62, -122.38, "SFO");
        let nrt = loc(35.77, 140.39, "NRT");
        let kyoto = loc(35.01, 135.77, "Kyoto");
        let items = vec![
            flight(trip, &sfo, &nrt, "2024-03-31T11:00:00Z", "2024-04-01T03:00:00Z"),
            activity(trip, "Fushimi Inari", &kyoto, "2024-04-04T09:00:00Z"),
        ];

        assert_eq!(
            trip_bounds(&items),
            Some(Bounds {
                south: 35.01,
                west: -122.38,
                north: 37.62,
                east: 140.39,
            })
        );
    }

    #[test]
    fn route_skips_accommodation_and_sorts() {
        let trip = TripId::generate();
        let nrt = loc(35.77, 140.39, "NRT");
        let hnd = loc(35.55, 139.78, "HND");
        let hotel = loc(35.69, 139.69, "Hotel");
        let shibuya = loc(35.66, 139.70, "Shibuya");
        let items = vec![
            activity(trip, "Crossing", &shibuya, "2024-04-02T10:00:00Z"),
            stay(trip, "Park Hyatt", &hotel, "2024-04-01T20:00:00Z", "2024-04-05T11:00:00Z"),
            flight(trip, &nrt, &hnd, "2024-04-01T08:00:00Z", "2024-04-01T18:00:00Z"),
        ];

        let addresses: Vec<&str> = route_locations(&items)
            .iter()
            .map(|l| l.address())
            .collect();
        assert_eq!(addresses, ["NRT", "HND", "Shibuya"]);
    }

    #[test]
    fn route_ties_keep_insertion_order() {
        let trip = TripId::generate();
        let a = loc(1.0, 1.0, "A");
        let b = loc(2.0, 2.0, "B");
        let same = "2024-04-02T10:00:00Z";
        let items = vec![
            activity(trip, "second-by-name", &b, same),
            activity(trip, "first-by-name", &a, same),
        ];

        let addresses: Vec<&str> = route_locations(&items)
            .iter()
            .map(|l| l.address())
            .collect();
        assert_eq!(addresses, ["B", "A"]);
    }
}
