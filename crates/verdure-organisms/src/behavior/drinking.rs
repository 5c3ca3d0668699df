//! Built-in drinking policies.

use verdure_types::{Organism, ResourceKind, SimRng};

use crate::behavior::{BehaviorOutcome, StepContext, intake};
use crate::error::OrganismError;

/// Drink up to the species' water intake rate from the occupied cell.
pub fn constant_drink(
    organism: Organism,
    ctx: &StepContext<'_>,
    _rng: &mut SimRng,
) -> Result<BehaviorOutcome, OrganismError> {
    intake::constant_intake(organism, ResourceKind::Water, ctx)
}
