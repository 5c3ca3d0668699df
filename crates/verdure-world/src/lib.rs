//! Bounded grid environment for the Verdure simulation.
//!
//! The world is a 1- or 2-dimensional grid of cells holding per-cell
//! resource quantities (water, food, obstacles) plus a monotonic tick
//! counter. It is created once at simulation start and mutated only by
//! resource withdrawals and its own per-tick advance -- organisms never
//! touch it directly during proposal computation.
//!
//! # Modules
//!
//! - [`error`] -- Error types ([`WorldError`])
//! - [`grid`] -- Shape-checked per-cell resource storage ([`ResourceGrid`])
//! - [`world`] -- The environment itself ([`World`])

pub mod error;
pub mod grid;
pub mod world;

pub use error::WorldError;
pub use grid::ResourceGrid;
pub use world::World;
