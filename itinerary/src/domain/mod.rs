//! Domain types for the itinerary planner.
//!
//! This module contains the core itinerary model: locations, the three
//! item variants and trips. Constructors enforce the model's invariants,
//! so code that receives these types can trust their validity. Values
//! read back from storage are re-checked with `validate`.

mod error;
mod id;
mod item;
mod location;
mod time;
mod trip;

pub use error::ValidationError;
pub use id::{ItemId, TripId};
pub use item::{
    Accommodation, Activity, ActivityCategory, Flight, ItemDetails, ItemKind, ItineraryItem,
};
pub use location::{Bounds, Location, validate_coordinates};
pub use time::{Timestamp, calendar_day, now};
pub use trip::Trip;
