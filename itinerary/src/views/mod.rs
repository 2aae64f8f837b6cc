//! Derived views over a trip's items.
//!
//! Everything here is a pure function of its input: the map layer asks for
//! markers, bounds and the travel route; the timeline asks for items grouped
//! by calendar day. Functions borrow the items rather than cloning them.

mod filter;
mod map;
mod timeline;

pub use filter::{filter_by_kind, items_in_range};
pub use map::{all_locations, route_locations, trip_bounds};
pub use timeline::{group_by_day, sort_chronologically};
