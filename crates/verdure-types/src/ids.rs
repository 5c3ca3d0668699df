//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Entities carry strongly-typed IDs to prevent accidental mixing of
//! identifiers at compile time. During a run, organism IDs are generated
//! from the simulation's seeded random source via [`OrganismId::from_rng`]
//! so that identifier assignment is reproducible across restarts; the
//! `new()` constructors exist for cases where app-side generation is
//! acceptable (tests, ad-hoc seed data).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rng::SimRng;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v4 (process randomness).
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an organism in the simulation.
    OrganismId
}

define_id! {
    /// Unique identifier for a simulation run (recorded in snapshots).
    RunId
}

impl OrganismId {
    /// Generate an identifier from the simulation's seeded random source.
    ///
    /// This is the constructor used during a run: IDs drawn this way are
    /// reproducible given the same seed, which keeps checkpointed runs
    /// bit-for-bit continuable.
    pub fn from_rng(rng: &mut SimRng) -> Self {
        use rand::Rng;
        Self(Uuid::from_u128(rng.random()))
    }
}
