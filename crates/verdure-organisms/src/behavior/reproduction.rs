//! Built-in reproduction policies.

use verdure_types::{CauseOfDeath, Organism, SimRng};

use crate::behavior::{BehaviorOutcome, StepContext};
use crate::error::OrganismError;
use crate::lifecycle;

/// Replace the parent with two children on the same cell.
///
/// Each child starts at age zero with the parent appended to its lineage
/// and inherits roughly half of each enabled reserve (integer halves, so
/// an odd unit is lost). The parent is returned as a dead record with
/// cause `replication`.
pub fn pure_replication(
    organism: Organism,
    _ctx: &StepContext<'_>,
    rng: &mut SimRng,
) -> Result<BehaviorOutcome, OrganismError> {
    let first = lifecycle::spawn_child(&organism, rng);
    let second = lifecycle::spawn_child(&organism, rng);
    let parent = lifecycle::with_death(&organism, CauseOfDeath::Replication);
    Ok(BehaviorOutcome {
        organisms: vec![first, second, parent],
        withdrawals: Vec::new(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use verdure_types::{ResourceKind, ResourceTraits, SpeciesTraits, rng_from_seed};
    use verdure_world::World;

    use crate::behavior::PopulationView;

    use super::*;

    fn replicator() -> Organism {
        let traits = SpeciesTraits {
            name: String::from("replicator"),
            movement_policy: Some(String::from("stationary")),
            reproduction_policy: Some(String::from("pure_replication")),
            drinking_policy: Some(String::from("constant_drink")),
            eating_policy: None,
            action_policy: Some(String::from("move_reproduce_drink")),
            dna_length: 4,
            dna: String::from("1010"),
            max_age: 40,
            mutation_rate: None,
            can_mutate: false,
            water: Some(ResourceTraits {
                capacity: 20,
                initial: 9,
                metabolism: 1,
                intake: 4,
                max_ticks_without: 5,
            }),
            food: None,
        };
        let mut rng = rng_from_seed(23);
        Organism::create(traits, vec![2], &mut rng)
    }

    #[test]
    fn replication_yields_two_children_and_a_dead_parent() {
        let world = World::new(vec![5], None, None, None).unwrap();
        let organisms = [replicator()];
        let view = PopulationView::new(&organisms);
        let ctx = StepContext {
            world: &world,
            population: &view,
        };
        let mut rng = rng_from_seed(9);
        let parent = organisms[0].clone();
        let outcome = pure_replication(parent.clone(), &ctx, &mut rng).unwrap();

        assert_eq!(outcome.organisms.len(), 3);
        assert!(outcome.withdrawals.is_empty());

        let children: Vec<_> = outcome.organisms.iter().filter(|o| o.alive).collect();
        assert_eq!(children.len(), 2);
        for child in &children {
            assert_ne!(child.id, parent.id);
            assert_eq!(child.age, 0);
            assert_eq!(child.position, parent.position);
            assert_eq!(child.lineage.last(), Some(&parent.id));
            // 9 units halve down to 4 per child.
            assert_eq!(child.resource(ResourceKind::Water).unwrap().current, 4);
        }
        assert_ne!(children[0].id, children[1].id);

        let dead = outcome.organisms.iter().find(|o| !o.alive).unwrap();
        assert_eq!(dead.id, parent.id);
        assert_eq!(dead.cause_of_death, Some(CauseOfDeath::Replication));
        assert_eq!(dead.age_at_death, Some(parent.age));
    }
}
