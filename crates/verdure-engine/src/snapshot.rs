//! Tick snapshots and the persistence seam.
//!
//! A [`Snapshot`] captures everything needed to continue a run from the
//! end of a tick: the population, the world, the configured species
//! names, and the random generator state. The engine writes one through a
//! [`SnapshotStore`] after every tick; restoring the latest snapshot and
//! stepping onward produces the same trajectory the uninterrupted run
//! would have.
//!
//! The engine only knows the [`SnapshotStore`] trait. The filesystem
//! implementation lives in `verdure-store`; [`MemoryStore`] here backs
//! tests and ephemeral runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use verdure_types::{Organism, RunId, SimRng};
use verdure_world::World;

/// Full engine state at the end of one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The run this snapshot belongs to.
    pub run_id: RunId,
    /// The tick the snapshot was taken after (0 for the initial state).
    pub tick: u64,
    /// Wall-clock time the snapshot was written.
    pub saved_at: DateTime<Utc>,
    /// Configured species, preserved so empty species survive restarts.
    pub species_names: Vec<String>,
    /// The full population, dead records included.
    pub organisms: Vec<Organism>,
    /// The world grids and tick counter.
    pub world: World,
    /// The random generator state at the end of the tick.
    pub rng: SimRng,
}

/// Errors from saving or loading snapshots.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("snapshot io error: {source}")]
    Io {
        /// The underlying io error.
        #[from]
        source: std::io::Error,
    },

    /// A snapshot could not be serialized or deserialized.
    #[error("snapshot serialization error: {source}")]
    Serialization {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },

    /// A stored snapshot file does not match the expected layout.
    #[error("corrupt snapshot at {path}")]
    Corrupt {
        /// Path of the offending entry.
        path: String,
    },
}

/// Where snapshots go after each tick and come from on resume.
pub trait SnapshotStore {
    /// Persist one snapshot.
    ///
    /// # Errors
    ///
    /// Fails if the snapshot cannot be written.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Load the snapshot with the highest tick, if any exist.
    ///
    /// # Errors
    ///
    /// Fails if the backing storage cannot be read or a stored snapshot
    /// cannot be decoded.
    fn load_latest(&self) -> Result<Option<Snapshot>, StoreError>;
}

/// In-memory store for tests and runs that do not need durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: Vec<Snapshot>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every snapshot saved so far, in save order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }

    fn load_latest(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self
            .snapshots
            .iter()
            .max_by_key(|snapshot| snapshot.tick)
            .cloned())
    }
}
