//! Opaque identifiers for trips and items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a [`Trip`](super::Trip).
///
/// Generated from random UUIDs, so collisions are practically impossible.
/// The textual form is opaque; callers should only compare and store it.
///
/// # Examples
///
/// ```
/// use itinerary::domain::TripId;
///
/// let a = TripId::generate();
/// let b = TripId::generate();
/// assert_ne!(a, b);
///
/// let parsed: TripId = a.to_string().parse().unwrap();
/// assert_eq!(parsed, a);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(Uuid);

/// Identifier of an [`ItineraryItem`](super::ItineraryItem).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

macro_rules! opaque_id {
    ($name:ident) => {
        impl $name {
            /// Generate a fresh identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

opaque_id!(TripId);
opaque_id!(ItemId);
