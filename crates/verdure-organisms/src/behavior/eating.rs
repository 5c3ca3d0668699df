//! Built-in eating policies.

use verdure_types::{Organism, ResourceKind, SimRng};

use crate::behavior::{BehaviorOutcome, StepContext, intake};
use crate::error::OrganismError;

/// Eat up to the species' food intake rate from the occupied cell.
pub fn constant_eat(
    organism: Organism,
    ctx: &StepContext<'_>,
    _rng: &mut SimRng,
) -> Result<BehaviorOutcome, OrganismError> {
    intake::constant_intake(organism, ResourceKind::Food, ctx)
}
