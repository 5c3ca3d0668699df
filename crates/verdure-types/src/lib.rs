//! Shared type definitions for the Verdure simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the Verdure workspace: organism and species records, the enumerations
//! they reference, typed identifiers, and the seeded random source that
//! every stochastic decision in a run draws from.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`enums`] -- Enumeration types (actions, causes of death, resources)
//! - [`structs`] -- Core entity structs (organisms, species traits, stats)
//! - [`rng`] -- The checkpointable random source threaded through a run

pub mod enums;
pub mod ids;
pub mod rng;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Action, CauseOfDeath, ResourceKind};
pub use ids::{OrganismId, RunId};
pub use rng::{SimRng, rng_from_seed};
pub use structs::{
    Organism, PopulationStats, ResourceLevel, ResourceTraits, SpeciesTraits, Withdrawal,
};
