//! Creation, replication, death transitions, and carry-over.
//!
//! Death is a state transition, never a removal: a dead organism keeps its
//! record (with `age_at_death` and `cause_of_death` set) and is excluded
//! from acting, but stays in the population for bookkeeping. The transition
//! is terminal -- marking an already-dead organism dead again is a no-op,
//! so a late death check can never overwrite the original cause.
//!
//! The update-style duality is explicit here: [`mark_dead`] mutates a
//! record the caller exclusively owns, [`with_death`] returns a new record
//! and leaves the original untouched. There is no flag selecting between
//! the two.

use verdure_types::{CauseOfDeath, Organism, OrganismId, ResourceKind, SimRng};

use crate::error::OrganismError;

/// Transition an organism to the dead state in place.
///
/// Sets `alive = false` and records the age and cause of death. Calling
/// this on an already-dead organism changes nothing.
pub fn mark_dead(organism: &mut Organism, cause: CauseOfDeath) {
    if !organism.alive {
        return;
    }
    organism.alive = false;
    organism.age_at_death = Some(organism.age);
    organism.cause_of_death = Some(cause);
}

/// Return a dead copy of an organism, leaving the original untouched.
pub fn with_death(organism: &Organism, cause: CauseOfDeath) -> Organism {
    let mut dead = organism.clone();
    mark_dead(&mut dead, cause);
    dead
}

/// Create a child organism from a parent.
///
/// The child is a clone of the parent with age reset to zero, a fresh
/// identifier drawn from the run's random source, the parent appended to
/// its lineage, no last action, and each enabled resource reserve
/// floor-divided by two. Time-without-resource counters are inherited.
pub fn spawn_child(parent: &Organism, rng: &mut SimRng) -> Organism {
    let mut child = parent.clone();
    child.id = OrganismId::from_rng(rng);
    child.age = 0;
    child.lineage.push(parent.id);
    child.last_action = None;

    for kind in [ResourceKind::Water, ResourceKind::Food] {
        if parent.species.resource_enabled(kind)
            && let Some(level) = child.resource_mut(kind)
        {
            level.current /= 2;
        }
    }

    child
}

/// Advance an organism that did not act this tick.
///
/// Age is incremented; a living organism that thereby exceeds its maximum
/// age dies of old age. A dead organism has only its age changed -- no
/// action, no resource updates, and never a second death transition.
pub fn carry_over(organism: &Organism) -> Result<Organism, OrganismError> {
    let mut next = organism.clone();
    next.age = next
        .age
        .checked_add(1)
        .ok_or_else(|| OrganismError::ArithmeticOverflow {
            context: String::from("age increment overflow during carry-over"),
        })?;
    if next.alive && next.age > next.species.max_age {
        mark_dead(&mut next, CauseOfDeath::OldAge);
    }
    Ok(next)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use verdure_types::{ResourceLevel, ResourceTraits, SpeciesTraits, rng_from_seed};

    use super::*;

    fn replicator() -> Organism {
        let traits = SpeciesTraits {
            name: String::from("splitter"),
            movement_policy: Some(String::from("stationary")),
            reproduction_policy: Some(String::from("pure_replication")),
            drinking_policy: Some(String::from("constant_drink")),
            eating_policy: None,
            action_policy: Some(String::from("move_and_reproduce")),
            dna_length: 4,
            dna: String::from("1100"),
            max_age: 10,
            mutation_rate: None,
            can_mutate: false,
            water: Some(ResourceTraits {
                capacity: 10,
                initial: 9,
                metabolism: 1,
                intake: 2,
                max_ticks_without: 2,
            }),
            food: None,
        };
        let mut rng = rng_from_seed(11);
        Organism::create(traits, vec![0], &mut rng)
    }

    #[test]
    fn mark_dead_sets_both_death_fields() {
        let mut organism = replicator();
        organism.age = 4;
        mark_dead(&mut organism, CauseOfDeath::Thirst);
        assert!(!organism.alive);
        assert_eq!(organism.age_at_death, Some(4));
        assert_eq!(organism.cause_of_death, Some(CauseOfDeath::Thirst));
        assert!(organism.death_fields_consistent());
    }

    #[test]
    fn death_is_terminal() {
        let mut organism = replicator();
        organism.age = 3;
        mark_dead(&mut organism, CauseOfDeath::Hunger);
        organism.age = 7;
        mark_dead(&mut organism, CauseOfDeath::OldAge);
        // The original cause and age survive.
        assert_eq!(organism.age_at_death, Some(3));
        assert_eq!(organism.cause_of_death, Some(CauseOfDeath::Hunger));
    }

    #[test]
    fn with_death_leaves_original_alive() {
        let organism = replicator();
        let dead = with_death(&organism, CauseOfDeath::Replication);
        assert!(organism.alive);
        assert!(!dead.alive);
        assert_eq!(dead.id, organism.id);
    }

    #[test]
    fn spawn_child_resets_identity_and_halves_reserves() {
        let mut rng = rng_from_seed(5);
        let mut parent = replicator();
        parent.age = 6;
        parent.water = Some(ResourceLevel {
            current: 9,
            ticks_without: 1,
        });

        let child = spawn_child(&parent, &mut rng);
        assert_ne!(child.id, parent.id);
        assert_eq!(child.age, 0);
        assert_eq!(child.lineage.last(), Some(&parent.id));
        assert!(child.last_action.is_none());
        // 9 / 2 floors to 4; the empty-tick counter is inherited.
        assert_eq!(
            child.water,
            Some(ResourceLevel {
                current: 4,
                ticks_without: 1
            })
        );
    }

    #[test]
    fn carry_over_ages_and_checks_old_age() {
        let mut organism = replicator();
        organism.age = 10;
        let next = carry_over(&organism).unwrap();
        assert_eq!(next.age, 11);
        assert!(!next.alive);
        assert_eq!(next.cause_of_death, Some(CauseOfDeath::OldAge));
    }

    #[test]
    fn dead_carry_over_changes_only_age() {
        let mut organism = replicator();
        organism.age = 11;
        mark_dead(&mut organism, CauseOfDeath::OldAge);
        let before = organism.clone();
        let next = carry_over(&organism).unwrap();
        assert_eq!(next.age, 12);
        assert_eq!(next.alive, before.alive);
        assert_eq!(next.age_at_death, before.age_at_death);
        assert_eq!(next.cause_of_death, before.cause_of_death);
        assert_eq!(next.water, before.water);
    }
}
