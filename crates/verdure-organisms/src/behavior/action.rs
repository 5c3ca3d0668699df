//! Built-in action-selection policies.
//!
//! Each policy draws from the shared run RNG and returns the action to
//! take this tick. The mixes use fixed integer odds so a seeded run is
//! exactly reproducible.

use rand::Rng;
use verdure_types::{Action, Organism, SimRng};

use crate::behavior::StepContext;
use crate::error::OrganismError;

/// Always move.
pub fn move_only(
    _organism: &Organism,
    _ctx: &StepContext<'_>,
    _rng: &mut SimRng,
) -> Result<Action, OrganismError> {
    Ok(Action::Move)
}

/// Reproduce with probability 1/8, otherwise move.
pub fn move_and_reproduce(
    _organism: &Organism,
    _ctx: &StepContext<'_>,
    rng: &mut SimRng,
) -> Result<Action, OrganismError> {
    if rng.random_range(0..8_u8) == 0 {
        Ok(Action::Reproduce)
    } else {
        Ok(Action::Move)
    }
}

/// Drink with probability 1/2, otherwise move.
pub fn move_and_drink(
    _organism: &Organism,
    _ctx: &StepContext<'_>,
    rng: &mut SimRng,
) -> Result<Action, OrganismError> {
    if rng.random_range(0..2_u8) == 0 {
        Ok(Action::Drink)
    } else {
        Ok(Action::Move)
    }
}

/// Eat with probability 1/2, otherwise move.
pub fn move_and_eat(
    _organism: &Organism,
    _ctx: &StepContext<'_>,
    rng: &mut SimRng,
) -> Result<Action, OrganismError> {
    if rng.random_range(0..2_u8) == 0 {
        Ok(Action::Eat)
    } else {
        Ok(Action::Move)
    }
}

/// Reproduce 1/8, drink 3/8, move 1/2.
pub fn move_reproduce_drink(
    _organism: &Organism,
    _ctx: &StepContext<'_>,
    rng: &mut SimRng,
) -> Result<Action, OrganismError> {
    match rng.random_range(0..8_u8) {
        0 => Ok(Action::Reproduce),
        1..=3 => Ok(Action::Drink),
        _ => Ok(Action::Move),
    }
}

/// Reproduce 1/8, eat 3/8, move 1/2.
pub fn move_reproduce_eat(
    _organism: &Organism,
    _ctx: &StepContext<'_>,
    rng: &mut SimRng,
) -> Result<Action, OrganismError> {
    match rng.random_range(0..8_u8) {
        0 => Ok(Action::Reproduce),
        1..=3 => Ok(Action::Eat),
        _ => Ok(Action::Move),
    }
}
