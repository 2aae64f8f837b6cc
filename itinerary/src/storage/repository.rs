//! Encoding the trip set into the key-value store and back.
//!
//! Trips are stored as one JSON array under [`TRIPS_KEY`], items nested
//! inline and tagged with their `type`. Timestamps are RFC 3339 strings
//! with their original offset and full sub-second precision. The selected
//! trip id lives under [`CURRENT_TRIP_KEY`] in the same store.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::domain::{Trip, TripId};
use crate::state::TripState;

use super::error::StorageError;
use super::kv::{KeyValueStore, Write};

/// Key holding the JSON array of trips.
pub const TRIPS_KEY: &str = "itinerary.trips";

/// Key holding the selected trip id.
pub const CURRENT_TRIP_KEY: &str = "itinerary.current-trip";

/// Serialize trips to the stored text form.
pub fn encode_trips(trips: &[Trip]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(trips)?)
}

/// Parse the stored text form, checking every model invariant.
///
/// Each item's variant is chosen from its `type` tag before its own
/// fields (departure, check-in and so on) are read.
pub fn decode_trips(text: &str) -> Result<Vec<Trip>, StorageError> {
    let trips: Vec<Trip> = serde_json::from_str(text)?;
    let mut ids = HashSet::with_capacity(trips.len());
    for trip in &trips {
        trip.validate()?;
        if !ids.insert(trip.id()) {
            return Err(StorageError::DuplicateTrip(trip.id()));
        }
    }
    Ok(trips)
}

/// Loads and saves the trip state through a [`KeyValueStore`].
#[derive(Debug)]
pub struct TripRepository<S> {
    store: S,
}

impl<S: KeyValueStore> TripRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist every trip and the current trip id in one batch.
    ///
    /// Encoding happens before anything is written; on error the store
    /// keeps whatever it held before the call.
    pub fn save(&self, state: &TripState) -> Result<(), StorageError> {
        let trips = encode_trips(state.trips())?;
        let bytes = trips.len();
        let current = match state.current_trip_id() {
            Some(id) => Write::Put {
                key: CURRENT_TRIP_KEY,
                value: id.to_string(),
            },
            None => Write::Delete {
                key: CURRENT_TRIP_KEY,
            },
        };

        self.store.commit(&[
            Write::Put {
                key: TRIPS_KEY,
                value: trips,
            },
            current,
        ])?;
        debug!(trips = state.trips().len(), bytes, "saved trips");
        Ok(())
    }

    /// Load the trips. Missing, unreadable or invalid data yields an empty list.
    pub fn load_trips(&self) -> Vec<Trip> {
        let text = match self.store.get(TRIPS_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read stored trips, starting empty");
                return Vec::new();
            }
        };
        match decode_trips(&text) {
            Ok(trips) => trips,
            Err(e) => {
                warn!(error = %e, "stored trips are corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Load the current trip id. Missing or unparsable values yield `None`.
    pub fn load_current_trip(&self) -> Option<TripId> {
        let text = match self.store.get(CURRENT_TRIP_KEY) {
            Ok(text) => text?,
            Err(e) => {
                warn!(error = %e, "could not read current trip id");
                return None;
            }
        };
        match text.trim().parse() {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(error = %e, value = %text, "ignoring unparsable current trip id");
                None
            }
        }
    }

    /// Load the whole state. Never fails: bad data degrades to empty, and a
    /// current trip id naming no loaded trip is dropped.
    pub fn load(&self) -> TripState {
        let trips = self.load_trips();
        let current = self.load_current_trip();
        let state = TripState::from_parts(trips, current);
        if current.is_some() && state.current_trip_id().is_none() {
            warn!("current trip id names no stored trip, clearing selection");
        }
        state
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use crate::test_support::arb_trip;
    use proptest::prelude::*;

    proptest! {
        /// load(save(T)) == T, variant fields and timestamps included.
        #[test]
        fn save_then_load_is_identity(
            trips in prop::collection::vec(arb_trip(), 0..4),
            select in any::<prop::sample::Index>(),
        ) {
            let current = if trips.is_empty() {
                None
            } else {
                Some(trips[select.index(trips.len())].id())
            };
            let state = TripState::from_parts(trips, current);

            let repo = TripRepository::new(MemoryStore::new());
            repo.save(&state).unwrap();
            prop_assert_eq!(repo.load(), state);
        }

        /// The same law holds through the file-backed store.
        #[test]
        fn file_store_round_trip(trips in prop::collection::vec(arb_trip(), 0..3)) {
            let dir = tempfile::tempdir().unwrap();
            let state = TripState::from_parts(trips, None);

            let repo = TripRepository::new(FileStore::new(dir.path()));
            repo.save(&state).unwrap();
            prop_assert_eq!(repo.load(), state);
        }

        /// Arbitrary text never makes load fail.
        #[test]
        fn load_never_fails(text in ".{0,200}") {
            let store = MemoryStore::new();
            store.set(TRIPS_KEY, text).unwrap();
            let _ = TripRepository::new(store).load();
        }
    }
}
