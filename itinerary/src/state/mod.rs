//! Trip state transitions.
//!
//! [`apply`] is the only way state changes: it takes a snapshot and an
//! action and returns the next snapshot. The host owns the state and
//! threads it through; [`SharedTrips`] is a ready-made owner for hosts
//! that share state across tasks.

mod error;
mod reducer;
mod shared;

pub use error::{ActionError, DispatchError};
pub use reducer::{TripAction, TripChanges, TripState, apply};
pub use shared::SharedTrips;
