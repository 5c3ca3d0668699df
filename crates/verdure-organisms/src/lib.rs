//! Organism lifecycle, vitals, and behavior dispatch for the Verdure
//! simulation.
//!
//! This crate contains the logic layer for organisms -- everything that
//! operates on organism state without touching I/O. It sits between
//! `verdure-types` (which defines the data structures) and the engine crate
//! (which handles resolution, persistence, and orchestration).
//!
//! # Modules
//!
//! - [`behavior`] -- Name-keyed behavior tables and the built-in policies
//! - [`error`] -- Error types for all organism operations ([`OrganismError`])
//! - [`lifecycle`] -- Creation, replication, death transitions, carry-over
//! - [`step`] -- The per-tick organism step producing an intent set
//! - [`vitals`] -- Per-tick resource metabolism and starvation checks

pub mod behavior;
pub mod error;
pub mod lifecycle;
pub mod step;
pub mod vitals;

// Re-export primary types at crate root for convenience.
pub use behavior::{
    BehaviorOutcome, BehaviorRegistry, BehaviorTable, Capability, PopulationView, StepContext,
};
pub use error::OrganismError;
pub use step::{IntentSet, step_organism};
