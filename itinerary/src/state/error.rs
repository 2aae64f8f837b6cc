//! Errors from applying actions to trip state.

use crate::domain::{ItemId, TripId, ValidationError};
use crate::storage::StorageError;

/// Why an action could not be applied. The state is left unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("trip not found: {0}")]
    TripNotFound(TripId),

    #[error("item {item} not found in trip {trip}")]
    ItemNotFound { trip: TripId, item: ItemId },

    #[error("trip {0} already exists")]
    DuplicateTrip(TripId),
}

/// Errors from [`SharedTrips::dispatch`](super::SharedTrips::dispatch).
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The action was rejected; nothing changed.
    #[error("action rejected: {0}")]
    Action(#[from] ActionError),

    /// The action was applied in memory but saving failed. The previously
    /// persisted copy is intact.
    #[error("change applied but not saved: {0}")]
    Persistence(#[from] StorageError),
}
