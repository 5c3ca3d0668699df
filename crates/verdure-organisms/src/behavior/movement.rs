//! Built-in movement policies.

use rand::Rng;
use verdure_types::{Organism, SimRng};

use crate::behavior::{BehaviorOutcome, StepContext};
use crate::error::OrganismError;

/// Stay on the current cell.
pub fn stationary(
    organism: Organism,
    _ctx: &StepContext<'_>,
    _rng: &mut SimRng,
) -> Result<BehaviorOutcome, OrganismError> {
    Ok(BehaviorOutcome::single(organism))
}

/// Take one random step of -1 or +1 on every axis, clamped to the
/// grid. The world does not wrap: an organism on an edge that draws the
/// outward direction stays put on that axis.
pub fn simple_random(
    mut organism: Organism,
    ctx: &StepContext<'_>,
    rng: &mut SimRng,
) -> Result<BehaviorOutcome, OrganismError> {
    let size = ctx.world.size();
    if organism.position.len() != size.len() {
        return Err(OrganismError::InvariantViolation {
            context: format!(
                "organism {} has a {}-axis position in a {}-axis world",
                organism.id,
                organism.position.len(),
                size.len()
            ),
        });
    }
    for (coord, &axis_len) in organism.position.iter_mut().zip(size) {
        let limit = axis_len.saturating_sub(1);
        if rng.random_range(0..2_u8) == 0 {
            *coord = coord.saturating_sub(1);
        } else {
            *coord = coord.saturating_add(1).min(limit);
        }
    }
    Ok(BehaviorOutcome::single(organism))
}
