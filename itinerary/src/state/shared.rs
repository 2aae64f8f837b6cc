//! Thread-safe trip state with write-through persistence.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::{Timestamp, now};
use crate::storage::{KeyValueStore, TripRepository};

use super::error::DispatchError;
use super::reducer::{TripAction, TripState};

/// Trip state shared between tasks, saved after every change.
///
/// The trips and the current trip id sit behind a single lock, and an
/// action is applied and saved while the write lock is held, so readers
/// see either the state before an action or the state after it.
pub struct SharedTrips<S> {
    state: Arc<RwLock<TripState>>,
    repository: Arc<TripRepository<S>>,
}

impl<S> Clone for SharedTrips<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<S: KeyValueStore> SharedTrips<S> {
    /// Load the persisted state (empty if there is none or it is corrupt).
    pub fn open(repository: TripRepository<S>) -> Self {
        let state = repository.load();
        Self {
            state: Arc::new(RwLock::new(state)),
            repository: Arc::new(repository),
        }
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> TripState {
        self.state.read().await.clone()
    }

    /// Run `f` against the current state without cloning it.
    pub async fn read<R>(&self, f: impl FnOnce(&TripState) -> R) -> R {
        let guard = self.state.read().await;
        f(&guard)
    }

    /// Apply an action stamped with the current time.
    pub async fn dispatch(&self, action: TripAction) -> Result<(), DispatchError> {
        self.dispatch_at(action, now()).await
    }

    /// Apply an action at `now` and save the result.
    ///
    /// A rejected action changes nothing. If saving fails the new state is
    /// kept in memory, the previous saved copy stays on disk, and
    /// [`DispatchError::Persistence`] is returned; the next successful
    /// dispatch saves everything.
    pub async fn dispatch_at(
        &self,
        action: TripAction,
        now: Timestamp,
    ) -> Result<(), DispatchError> {
        let mut guard = self.state.write().await;
        let next = guard.apply(action, now)?;
        *guard = next;
        if let Err(e) = self.repository.save(&guard) {
            warn!(error = %e, "failed to save trips");
            return Err(e.into());
        }
        Ok(())
    }

    /// The repository this state saves into.
    pub fn repository(&self) -> &TripRepository<S> {
        &self.repository
    }
}
