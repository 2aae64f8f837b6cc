//! Subsetting items by kind and by time.

use crate::domain::{ItemKind, ItineraryItem, Timestamp};

/// Items of the given kind, in their original order.
pub fn filter_by_kind(items: &[ItineraryItem], kind: ItemKind) -> Vec<&ItineraryItem> {
    items.iter().filter(|item| item.kind() == kind).collect()
}

/// Items whose start falls within `[start, end]`, both ends inclusive.
pub fn items_in_range(
    items: &[ItineraryItem],
    start: Timestamp,
    end: Timestamp,
) -> Vec<&ItineraryItem> {
    items
        .iter()
        .filter(|item| (start..=end).contains(&item.start()))
        .collect()
}
