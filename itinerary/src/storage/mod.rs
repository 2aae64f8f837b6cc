//! Local persistence of trips.
//!
//! A [`KeyValueStore`] holds flat text values; [`TripRepository`] encodes
//! the trip state into it. Loading never fails the caller: missing or
//! corrupt data comes back as an empty state. Saving is all-or-nothing.

mod error;
mod file;
mod kv;
mod repository;

pub use error::StorageError;
pub use file::FileStore;
pub use kv::{KeyValueStore, MemoryStore, Write};
pub use repository::{CURRENT_TRIP_KEY, TRIPS_KEY, TripRepository, decode_trips, encode_trips};
