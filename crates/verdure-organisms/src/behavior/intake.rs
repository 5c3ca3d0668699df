//! Shared constant-rate intake logic for drinking and eating.
//!
//! Intake never mutates the world directly. The behavior raises the
//! organism's reserve and records a [`Withdrawal`] for the same amount;
//! the engine applies admitted withdrawals to the world afterwards.

use verdure_types::{Organism, ResourceKind, Withdrawal};

use crate::behavior::{BehaviorOutcome, StepContext};
use crate::error::OrganismError;

/// Take up to the species' intake rate of `kind` from the occupied cell,
/// limited by what the cell holds and by remaining reserve headroom.
pub fn constant_intake(
    mut organism: Organism,
    kind: ResourceKind,
    ctx: &StepContext<'_>,
) -> Result<BehaviorOutcome, OrganismError> {
    let traits = organism.species.resource_traits(kind).ok_or_else(|| {
        OrganismError::ResourceDisabled {
            kind,
            species: organism.species.name.clone(),
        }
    })?;
    let position = organism.position.clone();
    let available = ctx.world.available(kind, &position)?;
    let level = organism
        .resource_mut(kind)
        .ok_or_else(|| OrganismError::InvariantViolation {
            context: format!("organism carries {kind} traits but no {kind} reserve"),
        })?;

    let headroom = traits.capacity.saturating_sub(level.current);
    let intake = available.min(headroom).min(traits.intake);
    level.current = level.current.saturating_add(intake).min(traits.capacity);

    let mut outcome = BehaviorOutcome::single(organism);
    if intake > 0 {
        outcome.withdrawals.push(Withdrawal {
            position,
            kind,
            amount: intake,
        });
    }
    Ok(outcome)
}
