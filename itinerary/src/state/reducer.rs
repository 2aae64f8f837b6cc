//! The trip state and its transition function.

use tracing::trace;

use crate::domain::{ItemId, ItineraryItem, Timestamp, Trip, TripId};

use super::error::ActionError;

/// Every trip the user has, plus which one is selected.
///
/// Values are snapshots: [`apply`] returns a new state and leaves the old
/// one untouched, so a reader holding a snapshot never sees a partial
/// change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripState {
    trips: Vec<Trip>,
    current_trip_id: Option<TripId>,
}

impl TripState {
    /// No trips, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a state from already validated parts.
    ///
    /// A current trip id that names no trip is dropped.
    pub(crate) fn from_parts(trips: Vec<Trip>, current_trip_id: Option<TripId>) -> Self {
        let current_trip_id = current_trip_id.filter(|id| trips.iter().any(|t| t.id() == *id));
        Self {
            trips,
            current_trip_id,
        }
    }

    /// Trips in creation order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn trip(&self, id: TripId) -> Option<&Trip> {
        self.trips.iter().find(|trip| trip.id() == id)
    }

    pub fn current_trip_id(&self) -> Option<TripId> {
        self.current_trip_id
    }

    /// The selected trip, if any.
    pub fn current_trip(&self) -> Option<&Trip> {
        self.current_trip_id.and_then(|id| self.trip(id))
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Shorthand for [`apply`]`(self, action, now)`.
    pub fn apply(&self, action: TripAction, now: Timestamp) -> Result<Self, ActionError> {
        apply(self, action, now)
    }

    fn trip_mut(&mut self, id: TripId) -> Result<&mut Trip, ActionError> {
        self.trips
            .iter_mut()
            .find(|trip| trip.id() == id)
            .ok_or(ActionError::TripNotFound(id))
    }
}

/// Field changes for [`TripAction::UpdateTrip`]. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripChanges {
    pub name: Option<String>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

/// A user-triggered change to the trip state.
#[derive(Debug, Clone, PartialEq)]
pub enum TripAction {
    /// Add a new trip (built with [`Trip::new`]).
    CreateTrip(Trip),
    /// Rename or re-date a trip.
    UpdateTrip { id: TripId, changes: TripChanges },
    /// Delete a trip and everything in it.
    DeleteTrip(TripId),
    /// Select a trip, or clear the selection.
    SelectTrip(Option<TripId>),
    /// Append an item to the trip it references.
    AddItem(ItineraryItem),
    /// Replace the item with the same id, in the trip it references.
    UpdateItem(ItineraryItem),
    /// Remove an item from a trip.
    RemoveItem { trip_id: TripId, item_id: ItemId },
}

/// Compute the state that results from applying `action` at time `now`.
///
/// On error `state` is unchanged and no partial result exists.
pub fn apply(
    state: &TripState,
    action: TripAction,
    now: Timestamp,
) -> Result<TripState, ActionError> {
    trace!(?action, "applying action");
    let mut next = state.clone();
    match action {
        TripAction::CreateTrip(trip) => {
            trip.validate()?;
            if next.trip(trip.id()).is_some() {
                return Err(ActionError::DuplicateTrip(trip.id()));
            }
            next.trips.push(trip);
        }
        TripAction::UpdateTrip { id, changes } => {
            next.trip_mut(id)?
                .update(changes.name, changes.start, changes.end, now)?;
        }
        TripAction::DeleteTrip(id) => {
            let before = next.trips.len();
            next.trips.retain(|trip| trip.id() != id);
            if next.trips.len() == before {
                return Err(ActionError::TripNotFound(id));
            }
            if next.current_trip_id == Some(id) {
                next.current_trip_id = None;
            }
        }
        TripAction::SelectTrip(selection) => {
            if let Some(id) = selection
                && next.trip(id).is_none()
            {
                return Err(ActionError::TripNotFound(id));
            }
            next.current_trip_id = selection;
        }
        TripAction::AddItem(item) => {
            next.trip_mut(item.trip_id())?.add_item(item, now)?;
        }
        TripAction::UpdateItem(item) => {
            let (trip, id) = (item.trip_id(), item.id());
            if !next.trip_mut(trip)?.replace_item(item, now)? {
                return Err(ActionError::ItemNotFound { trip, item: id });
            }
        }
        TripAction::RemoveItem { trip_id, item_id } => {
            if next.trip_mut(trip_id)?.remove_item(item_id, now).is_none() {
                return Err(ActionError::ItemNotFound {
                    trip: trip_id,
                    item: item_id,
                });
            }
        }
    }
    Ok(next)
}
