//! Trips: named, dated collections of itinerary items.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{ItemId, ItineraryItem, Timestamp, TripId, ValidationError};

/// A named trip bounded by a date range, holding items in insertion order.
///
/// Item mutations bump `updated_at`. The trip checks that every item it
/// holds references it and that item ids are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    id: TripId,
    name: String,
    start: Timestamp,
    end: Timestamp,
    items: Vec<ItineraryItem>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Trip {
    /// Create an empty trip with a fresh id.
    pub fn new(
        name: impl Into<String>,
        start: Timestamp,
        end: Timestamp,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_header(&name, start, end)?;
        Ok(Self {
            id: TripId::generate(),
            name,
            start,
            end,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> TripId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Items in the order they were added.
    pub fn items(&self) -> &[ItineraryItem] {
        &self.items
    }

    /// Look up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&ItineraryItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Number of calendar days covered, counting both ends.
    pub fn day_count(&self) -> i64 {
        (self.end.date_naive() - self.start.date_naive()).num_days() + 1
    }

    /// Change name and/or dates. `None` leaves a field as it is.
    pub fn update(
        &mut self,
        name: Option<String>,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        let name = name.unwrap_or_else(|| self.name.clone());
        let start = start.unwrap_or(self.start);
        let end = end.unwrap_or(self.end);
        validate_header(&name, start, end)?;

        self.name = name;
        self.start = start;
        self.end = end;
        self.updated_at = now;
        Ok(())
    }

    /// Append an item. The item must belong to this trip and carry a new id.
    pub fn add_item(&mut self, item: ItineraryItem, now: Timestamp) -> Result<(), ValidationError> {
        self.check_membership(&item)?;
        item.validate()?;
        if self.item(item.id()).is_some() {
            return Err(ValidationError::DuplicateItem(item.id()));
        }
        self.items.push(item);
        self.updated_at = now;
        Ok(())
    }

    /// Replace the item with the same id, keeping its position.
    ///
    /// Returns `Ok(false)` if no such item exists.
    pub fn replace_item(
        &mut self,
        item: ItineraryItem,
        now: Timestamp,
    ) -> Result<bool, ValidationError> {
        self.check_membership(&item)?;
        item.validate()?;
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                self.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove an item by id, returning it if it existed.
    pub fn remove_item(&mut self, id: ItemId, now: Timestamp) -> Option<ItineraryItem> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        self.updated_at = now;
        Some(self.items.remove(index))
    }

    /// Check every invariant of the trip and its items.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_header(&self.name, self.start, self.end)?;
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            self.check_membership(item)?;
            item.validate()?;
            if !seen.insert(item.id()) {
                return Err(ValidationError::DuplicateItem(item.id()));
            }
        }
        Ok(())
    }

    fn check_membership(&self, item: &ItineraryItem) -> Result<(), ValidationError> {
        if item.trip_id() == self.id {
            Ok(())
        } else {
            Err(ValidationError::TripMismatch {
                item: item.id(),
                expected: self.id,
                found: item.trip_id(),
            })
        }
    }
}

fn validate_header(name: &str, start: Timestamp, end: Timestamp) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::BlankName("trip name"));
    }
    if end < start {
        return Err(ValidationError::EndBeforeStart { field: "trip" });
    }
    Ok(())
}
