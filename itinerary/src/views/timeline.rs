//! Chronological ordering and day-by-day grouping.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{ItineraryItem, calendar_day};

/// Items ordered by start time. Ties keep their original order.
pub fn sort_chronologically(items: &[ItineraryItem]) -> Vec<&ItineraryItem> {
    let mut sorted: Vec<&ItineraryItem> = items.iter().collect();
    // sort_by_key is stable
    sorted.sort_by_key(|item| item.start());
    sorted
}

/// Items grouped by the calendar day they start on, in the offset they
/// were entered with.
///
/// Days iterate in ascending order; within a day items are ordered by start
/// time, ties keeping their original order.
pub fn group_by_day(items: &[ItineraryItem]) -> BTreeMap<NaiveDate, Vec<&ItineraryItem>> {
    let mut days: BTreeMap<NaiveDate, Vec<&ItineraryItem>> = BTreeMap::new();
    for item in sort_chronologically(items) {
        days.entry(calendar_day(&item.start()))
            .or_default()
            .push(item);
    }
    days
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_support::arb_items;
    use proptest::prelude::*;

    proptest! {
        /// Grouping loses nothing and duplicates nothing.
        #[test]
        fn group_by_day_partitions(items in arb_items()) {
            let days = group_by_day(&items);
            let mut grouped: Vec<_> = days.values().flatten().map(|i| i.id()).collect();
            let mut original: Vec<_> = items.iter().map(|i| i.id()).collect();
            grouped.sort();
            original.sort();
            prop_assert_eq!(grouped, original);
        }

        /// Each item sits under its own start day, and days are sorted.
        #[test]
        fn group_by_day_keys(items in arb_items()) {
            let days = group_by_day(&items);
            let keys: Vec<NaiveDate> = days.keys().copied().collect();
            prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
            for (day, group) in &days {
                prop_assert!(!group.is_empty());
                prop_assert!(group.iter().all(|i| calendar_day(&i.start()) == *day));
            }
        }

        /// Within a day, start times never decrease and ties keep input order.
        #[test]
        fn group_by_day_orders_within_day(items in arb_items()) {
            let position = |id| items.iter().position(|i| i.id() == id).unwrap();
            for group in group_by_day(&items).values() {
                for pair in group.windows(2) {
                    prop_assert!(pair[0].start() <= pair[1].start());
                    if pair[0].start() == pair[1].start() {
                        prop_assert!(position(pair[0].id()) < position(pair[1].id()));
                    }
                }
            }
        }
    }
}
