//! Error types for the verdure-organisms crate.
//!
//! All operations that can fail return typed errors rather than panicking.
//! A behavior dispatch failure is a configuration defect and is expected to
//! abort the run; it is never skipped silently.

use verdure_types::ResourceKind;
use verdure_world::WorldError;

use crate::behavior::Capability;

/// Errors that can occur during organism operations.
#[derive(Debug, thiserror::Error)]
pub enum OrganismError {
    /// A capability's policy name has no matching function in the override
    /// tables or the built-in table.
    #[error("unsupported {capability} behavior: no function registered for policy '{policy}'")]
    UnsupportedBehavior {
        /// The capability being dispatched.
        capability: Capability,
        /// The policy name that failed to resolve.
        policy: String,
    },

    /// A capability was invoked on a species that never configured it.
    #[error("species '{species}' has no {capability} policy configured")]
    PolicyUnset {
        /// The capability being dispatched.
        capability: Capability,
        /// The species missing the policy.
        species: String,
    },

    /// A resource operation ran on a species without the matching traits.
    /// The loader validates this, so hitting it means a malformed organism
    /// was introduced after load.
    #[error("species '{species}' does not enable the {kind} resource")]
    ResourceDisabled {
        /// The resource the operation needed.
        kind: ResourceKind,
        /// The species missing the resource traits.
        species: String,
    },

    /// A condition that must never occur was detected; this indicates a
    /// defect in a capability implementation, not a recoverable runtime
    /// condition.
    #[error("invariant violation: {context}")]
    InvariantViolation {
        /// Description of the violated invariant.
        context: String,
    },

    /// An arithmetic overflow occurred during a state computation.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}
