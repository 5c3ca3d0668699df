//! The per-tick organism step.
//!
//! Stepping an organism never mutates shared state. It reads the pre-tick
//! world and population, consults the behavior registry, and produces an
//! [`IntentSet`]: the organism records that would replace the actor if the
//! proposal is admitted, plus any pending world withdrawals. Admission is
//! decided later by the resolver.

use tracing::warn;
use verdure_types::{CauseOfDeath, Organism, OrganismId, SimRng, Withdrawal};

use crate::behavior::{BehaviorRegistry, StepContext};
use crate::error::OrganismError;
use crate::{lifecycle, vitals};

/// One organism's proposal for the current tick.
#[derive(Debug)]
pub struct IntentSet {
    /// The organism that produced the proposal.
    pub actor: OrganismId,
    /// The records that replace the actor if the proposal is admitted.
    pub organisms: Vec<Organism>,
    /// World-cell deductions to apply if the proposal is admitted.
    pub withdrawals: Vec<Withdrawal>,
}

impl IntentSet {
    /// Identifiers of every organism the proposal introduces.
    pub fn ids(&self) -> impl Iterator<Item = OrganismId> {
        self.organisms.iter().map(|organism| organism.id)
    }
}

/// Step one organism through a full tick: aging, old-age check, action
/// selection and execution, then metabolism on every living result.
///
/// Old age preempts the action: an organism whose incremented age exceeds
/// its species maximum dies of `old_age` without acting. A dead organism
/// passes through with only its age advanced.
///
/// # Errors
///
/// Fails on unresolvable behavior policies, arithmetic overflow, or a
/// defective capability implementation.
pub fn step_organism(
    organism: &Organism,
    registry: &BehaviorRegistry,
    ctx: &StepContext<'_>,
    rng: &mut SimRng,
) -> Result<IntentSet, OrganismError> {
    let actor = organism.id;
    let mut acting = lifecycle::carry_over(organism)?;

    // carry_over marks old-age deaths; the dead skip the action entirely.
    if !acting.alive {
        return Ok(IntentSet {
            actor,
            organisms: vec![acting],
            withdrawals: Vec::new(),
        });
    }

    let action = registry.select_action(&acting, ctx, rng)?;
    acting.last_action = Some(action);

    // If the behavior drops the actor from its own outcome without
    // recording a death, reinstate it as a dead record rather than letting
    // it vanish from the population.
    let fallback = acting.clone();
    let mut outcome = registry.perform(action, acting, ctx, rng)?;
    if !outcome.organisms.iter().any(|o| o.id == actor) {
        warn!(organism = %actor, action = %action, "actor missing from behavior outcome");
        outcome
            .organisms
            .push(lifecycle::with_death(&fallback, CauseOfDeath::Unknown));
    }

    for result in &mut outcome.organisms {
        if result.alive {
            vitals::apply_metabolism(result)?;
        }
    }

    Ok(IntentSet {
        actor,
        organisms: outcome.organisms,
        withdrawals: outcome.withdrawals,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use verdure_types::{
        Action, ResourceKind, ResourceTraits, SpeciesTraits, rng_from_seed,
    };
    use verdure_world::{ResourceGrid, World};

    use crate::behavior::{BehaviorOutcome, BehaviorTable, CapabilityFn, PopulationView};

    use super::*;

    fn species(max_age: u32) -> SpeciesTraits {
        SpeciesTraits {
            name: String::from("walker"),
            movement_policy: Some(String::from("simple_random")),
            reproduction_policy: Some(String::from("pure_replication")),
            drinking_policy: Some(String::from("constant_drink")),
            eating_policy: None,
            action_policy: Some(String::from("move_only")),
            dna_length: 4,
            dna: String::from("0110"),
            max_age,
            mutation_rate: None,
            can_mutate: false,
            water: Some(ResourceTraits {
                capacity: 50,
                initial: 40,
                metabolism: 1,
                intake: 5,
                max_ticks_without: 3,
            }),
            food: None,
        }
    }

    fn watered_world() -> World {
        let water = ResourceGrid::uniform(&[5], 100).unwrap();
        World::new(vec![5], Some(water), None, None).unwrap()
    }

    #[test]
    fn stepping_ages_and_metabolizes() {
        let world = watered_world();
        let mut rng = rng_from_seed(31);
        let organism = Organism::create(species(20), vec![2], &mut rng);
        let organisms = [organism.clone()];
        let view = PopulationView::new(&organisms);
        let ctx = StepContext {
            world: &world,
            population: &view,
        };
        let registry = BehaviorRegistry::builtin();

        let intent = step_organism(&organism, &registry, &ctx, &mut rng).unwrap();
        assert_eq!(intent.actor, organism.id);
        assert_eq!(intent.organisms.len(), 1);

        let stepped = &intent.organisms[0];
        assert_eq!(stepped.age, 1);
        assert!(stepped.alive);
        assert_eq!(stepped.last_action, Some(Action::Move));
        // metabolism 1: reserve drops from 40 to 39
        assert_eq!(
            stepped.resource(ResourceKind::Water).unwrap().current,
            39
        );
    }

    #[test]
    fn old_age_preempts_the_action() {
        let world = watered_world();
        let mut rng = rng_from_seed(13);
        let mut organism = Organism::create(species(5), vec![1], &mut rng);
        organism.age = 5;
        let organisms = [organism.clone()];
        let view = PopulationView::new(&organisms);
        let ctx = StepContext {
            world: &world,
            population: &view,
        };
        let registry = BehaviorRegistry::builtin();

        let intent = step_organism(&organism, &registry, &ctx, &mut rng).unwrap();
        assert_eq!(intent.organisms.len(), 1);
        let dead = &intent.organisms[0];
        assert!(!dead.alive);
        assert_eq!(dead.age, 6);
        assert_eq!(dead.age_at_death, Some(6));
        assert_eq!(dead.cause_of_death, Some(CauseOfDeath::OldAge));
        assert_eq!(dead.last_action, None);
        // the water reserve is untouched: old age skips metabolism too
        assert_eq!(dead.resource(ResourceKind::Water).unwrap().current, 40);
    }

    #[test]
    fn dead_organisms_pass_through_with_age_only() {
        let world = watered_world();
        let mut rng = rng_from_seed(3);
        let mut organism = Organism::create(species(20), vec![0], &mut rng);
        lifecycle::mark_dead(&mut organism, CauseOfDeath::Thirst);
        let recorded_age = organism.age_at_death;
        let organisms = [organism.clone()];
        let view = PopulationView::new(&organisms);
        let ctx = StepContext {
            world: &world,
            population: &view,
        };
        let registry = BehaviorRegistry::builtin();

        let intent = step_organism(&organism, &registry, &ctx, &mut rng).unwrap();
        let record = &intent.organisms[0];
        assert!(!record.alive);
        assert_eq!(record.age, 1);
        assert_eq!(record.age_at_death, recorded_age);
        assert_eq!(record.cause_of_death, Some(CauseOfDeath::Thirst));
    }

    #[test]
    fn vanished_actor_is_reinstated_dead() {
        fn vanish(
            _organism: Organism,
            _ctx: &StepContext<'_>,
            _rng: &mut SimRng,
        ) -> Result<BehaviorOutcome, OrganismError> {
            Ok(BehaviorOutcome::default())
        }

        let mut layer = BehaviorTable::new();
        layer
            .movement
            .insert(String::from("simple_random"), vanish as CapabilityFn);
        let registry = BehaviorRegistry::with_overrides(vec![layer]);

        let world = watered_world();
        let mut rng = rng_from_seed(19);
        let organism = Organism::create(species(20), vec![3], &mut rng);
        let organisms = [organism.clone()];
        let view = PopulationView::new(&organisms);
        let ctx = StepContext {
            world: &world,
            population: &view,
        };

        let intent = step_organism(&organism, &registry, &ctx, &mut rng).unwrap();
        assert_eq!(intent.organisms.len(), 1);
        let record = &intent.organisms[0];
        assert_eq!(record.id, organism.id);
        assert!(!record.alive);
        assert_eq!(record.cause_of_death, Some(CauseOfDeath::Unknown));
    }

    #[test]
    fn replication_intent_carries_three_records() {
        fn always_reproduce(
            _organism: &Organism,
            _ctx: &StepContext<'_>,
            _rng: &mut SimRng,
        ) -> Result<Action, OrganismError> {
            Ok(Action::Reproduce)
        }

        let mut layer = BehaviorTable::new();
        layer.action.insert(
            String::from("move_only"),
            always_reproduce as crate::behavior::ActionFn,
        );
        let registry = BehaviorRegistry::with_overrides(vec![layer]);

        let world = watered_world();
        let mut rng = rng_from_seed(47);
        let organism = Organism::create(species(20), vec![2], &mut rng);
        let organisms = [organism.clone()];
        let view = PopulationView::new(&organisms);
        let ctx = StepContext {
            world: &world,
            population: &view,
        };

        let intent = step_organism(&organism, &registry, &ctx, &mut rng).unwrap();
        assert_eq!(intent.organisms.len(), 3);
        assert!(intent.ids().any(|id| id == organism.id));
        assert_eq!(intent.organisms.iter().filter(|o| o.alive).count(), 2);
    }
}
