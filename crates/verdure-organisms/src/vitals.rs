//! Per-tick resource metabolism and starvation checks.
//!
//! Drinking and eating share one numeric contract, applied after an
//! organism's action each tick:
//!
//! - Metabolism decrements the current level.
//! - A level above capacity is clamped down to capacity.
//! - A level at zero increments the consecutive-empty-ticks counter;
//!   a positive level resets it.
//! - A counter exceeding the species' `max_ticks_without` threshold is
//!   death by thirst or hunger.
//!
//! Clamping at the capacity and zero bounds is normal, silent behavior --
//! not an error.

use verdure_types::{CauseOfDeath, Organism, ResourceKind, ResourceLevel, ResourceTraits};

use crate::error::OrganismError;
use crate::lifecycle::mark_dead;

/// Apply one metabolic tick to a single resource level.
///
/// # Errors
///
/// Returns [`OrganismError::ArithmeticOverflow`] if the empty-ticks counter
/// would overflow.
pub fn resource_tick(
    level: &mut ResourceLevel,
    traits: ResourceTraits,
) -> Result<(), OrganismError> {
    level.current = level.current.saturating_sub(traits.metabolism);
    if level.current > traits.capacity {
        level.current = traits.capacity;
    }
    if level.current == 0 {
        level.ticks_without =
            level
                .ticks_without
                .checked_add(1)
                .ok_or_else(|| OrganismError::ArithmeticOverflow {
                    context: String::from("empty-ticks counter overflow"),
                })?;
    } else {
        level.ticks_without = 0;
    }
    Ok(())
}

/// Run the post-action resource bookkeeping for one organism.
///
/// For each enabled resource: apply the metabolic tick, then check the
/// starvation threshold and transition to dead (cause `thirst` or
/// `hunger`) when exceeded. A death from the water check suppresses the
/// food update for the same tick; dead organisms are never updated.
pub fn apply_metabolism(organism: &mut Organism) -> Result<(), OrganismError> {
    for kind in [ResourceKind::Water, ResourceKind::Food] {
        if !organism.alive {
            break;
        }
        if !organism.species.resource_enabled(kind) {
            continue;
        }
        let Some(traits) = organism.species.resource_traits(kind) else {
            return Err(OrganismError::ResourceDisabled {
                kind,
                species: organism.species.name.clone(),
            });
        };
        let Some(level) = organism.resource_mut(kind) else {
            return Err(OrganismError::ResourceDisabled {
                kind,
                species: organism.species.name.clone(),
            });
        };
        resource_tick(level, traits)?;
        let starved = level.ticks_without > traits.max_ticks_without;
        if starved {
            let cause = match kind {
                ResourceKind::Water => CauseOfDeath::Thirst,
                ResourceKind::Food => CauseOfDeath::Hunger,
            };
            mark_dead(organism, cause);
        }
    }
    Ok(())
}
