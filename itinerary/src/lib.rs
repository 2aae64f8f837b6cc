//! Travel itinerary core.
//!
//! Build trips out of flights, stays and activities, keep them in a local
//! text store, and derive what a map and a day-by-day timeline need to
//! show: markers, bounds, the travel route and items grouped by day.

pub mod domain;
pub mod geocode;
pub mod state;
pub mod storage;
pub mod views;

#[cfg(test)]
mod test_support;
