//! Simulation engine for Verdure: the universe control loop, intent
//! resolution, the population registry, and tick snapshots.
//!
//! The engine owns the canonical run state. Each tick it collects one
//! proposal per living organism against the frozen pre-tick state,
//! resolves conflicts first-claim-wins in a seeded random order, applies
//! admitted world withdrawals, rebuilds the per-species registry, and
//! persists a snapshot. All randomness flows through the single run RNG,
//! so a run is a pure function of its seed and configuration.
//!
//! # Modules
//!
//! - [`error`] -- Error types ([`TickError`])
//! - [`intent`] -- First-claim-wins proposal resolution
//! - [`registry`] -- The derived per-species population view
//! - [`snapshot`] -- Snapshots, the [`SnapshotStore`] seam, [`MemoryStore`]
//! - [`universe`] -- The control loop ([`Universe`])

pub mod error;
pub mod intent;
pub mod registry;
pub mod snapshot;
pub mod universe;

pub use error::TickError;
pub use intent::{Resolution, resolve};
pub use registry::{Registry, SpeciesEntry};
pub use snapshot::{MemoryStore, Snapshot, SnapshotStore, StoreError};
pub use universe::{
    AbortReason, RunBounds, RunInfo, RunOutcome, TickSummary, Universe, UniverseSeed,
};
