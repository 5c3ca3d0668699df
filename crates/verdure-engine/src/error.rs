//! Error types for the verdure-engine crate.

use verdure_organisms::OrganismError;
use verdure_world::WorldError;

use crate::snapshot::StoreError;

/// Errors that can abort a tick or a run.
///
/// A tick either completes fully or fails; there are no partially applied
/// ticks. Any of these surfacing from [`crate::universe::Universe::step`]
/// means the universe must not be stepped further.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// An organism step or behavior dispatch failed.
    #[error("organism error: {source}")]
    Organism {
        /// The underlying organism error.
        #[from]
        source: OrganismError,
    },

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// Persisting or loading a snapshot failed.
    #[error("snapshot store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },

    /// An arithmetic overflow occurred during tick bookkeeping.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}
