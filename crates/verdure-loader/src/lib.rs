//! Run configuration loading and universe seeding for the Verdure
//! simulation.
//!
//! A run is described by one YAML document (see [`config::RunConfig`]).
//! The loader parses and validates it, then [`build::build_seed`] turns
//! it into a [`verdure_engine::UniverseSeed`] using only the configured
//! seed's random stream, so seeding is as reproducible as the run itself.
//!
//! # Modules
//!
//! - [`build`] -- Config to universe seed ([`build_seed`])
//! - [`config`] -- Typed YAML structures ([`RunConfig`])
//! - [`error`] -- Error types ([`LoaderError`])

pub mod build;
pub mod config;
pub mod error;

pub use build::build_seed;
pub use config::{GridSection, ResourceSection, RunConfig, RunSection, SpeciesSection, WorldSection};
pub use error::LoaderError;
