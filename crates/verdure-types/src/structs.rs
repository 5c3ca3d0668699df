//! Core entity structs: organisms, species traits, and population stats.
//!
//! An [`Organism`] embeds its own copy of the species-level traits so that
//! individuals can drift from the species defaults (mutation, per-organism
//! overrides in parameter files) without any shared lookup. The instance
//! state alongside the traits is what changes tick to tick.

use serde::{Deserialize, Serialize};

use crate::enums::{Action, CauseOfDeath, ResourceKind};
use crate::ids::OrganismId;
use crate::rng::SimRng;

/// Species-level parameters for one consumable resource.
///
/// Present only when the species enables the matching capability
/// (drinking for water, eating for food). All quantities are whole units
/// per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTraits {
    /// Maximum amount an organism can hold.
    pub capacity: u32,
    /// Amount a newly created organism starts with.
    pub initial: u32,
    /// Amount consumed by metabolism each tick.
    pub metabolism: u32,
    /// Maximum amount taken from a world cell in one intake action.
    pub intake: u32,
    /// Consecutive empty ticks an organism survives before dying.
    pub max_ticks_without: u32,
}

/// Instantaneous state of one consumable resource on an organism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLevel {
    /// Current amount held, always within `[0, capacity]`.
    pub current: u32,
    /// Consecutive ticks spent at zero. Resets whenever `current` is
    /// positive after the metabolic update.
    pub ticks_without: u32,
}

/// Species-level traits carried by every organism of a species.
///
/// Policy names select behavior functions from the engine's behavior
/// tables. A policy left as `None` disables that capability: invoking a
/// disabled capability is a configuration defect, not a silent no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesTraits {
    /// Species name, the key under which organisms are grouped.
    pub name: String,

    /// Movement policy name (e.g. `stationary`, `simple_random`).
    pub movement_policy: Option<String>,
    /// Reproduction policy name (e.g. `pure_replication`).
    pub reproduction_policy: Option<String>,
    /// Drinking policy name (e.g. `constant_drink`).
    pub drinking_policy: Option<String>,
    /// Eating policy name (e.g. `constant_eat`).
    pub eating_policy: Option<String>,
    /// Action-selection policy name (e.g. `move_only`).
    pub action_policy: Option<String>,

    /// Number of symbols in the DNA string.
    pub dna_length: u32,
    /// DNA value, generated at load time.
    pub dna: String,
    /// Maximum age in ticks; exceeding it is death by old age.
    pub max_age: u32,
    /// Probability of mutation on replication, when mutation is enabled.
    pub mutation_rate: Option<f64>,
    /// Whether this species mutates at all.
    pub can_mutate: bool,

    /// Water parameters, required when `drinking_policy` is set.
    pub water: Option<ResourceTraits>,
    /// Food parameters, required when `eating_policy` is set.
    pub food: Option<ResourceTraits>,
}

impl SpeciesTraits {
    /// Look up the resource parameters for the given kind.
    pub const fn resource_traits(&self, kind: ResourceKind) -> Option<ResourceTraits> {
        match kind {
            ResourceKind::Water => self.water,
            ResourceKind::Food => self.food,
        }
    }

    /// Whether the capability that consumes `kind` is enabled.
    pub const fn resource_enabled(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Water => self.drinking_policy.is_some(),
            ResourceKind::Food => self.eating_policy.is_some(),
        }
    }
}

/// One simulated agent.
///
/// Lifecycle invariant: `alive == false` exactly when both `age_at_death`
/// and `cause_of_death` are set. Resource levels are `Some` exactly when
/// the species enables the matching capability and stay within
/// `[0, capacity]` after every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    /// Globally unique identifier, assigned at creation.
    pub id: OrganismId,
    /// Species-level traits (this individual's copy).
    pub species: SpeciesTraits,

    /// Grid coordinates, one entry per world axis.
    pub position: Vec<u32>,
    /// Age in ticks.
    pub age: u32,
    /// Whether the organism is still acting. Dead organisms remain in the
    /// population as terminal records.
    pub alive: bool,
    /// Age at the moment of death, set together with `cause_of_death`.
    pub age_at_death: Option<u32>,
    /// Why the organism died, set together with `age_at_death`.
    pub cause_of_death: Option<CauseOfDeath>,
    /// Ancestor identifiers, oldest first.
    pub lineage: Vec<OrganismId>,

    /// Water state, present iff drinking is enabled.
    pub water: Option<ResourceLevel>,
    /// Food state, present iff eating is enabled.
    pub food: Option<ResourceLevel>,

    /// The action chosen on the most recent acting tick.
    pub last_action: Option<Action>,
}

impl Organism {
    /// Create a living organism from species traits at a position, drawing
    /// its identifier from the run's random source.
    ///
    /// Resource levels are initialized to the species' `initial` amount for
    /// each enabled resource and left unset for disabled ones.
    pub fn create(species: SpeciesTraits, position: Vec<u32>, rng: &mut SimRng) -> Self {
        let water = species
            .drinking_policy
            .is_some()
            .then(|| species.water.map(initial_level))
            .flatten();
        let food = species
            .eating_policy
            .is_some()
            .then(|| species.food.map(initial_level))
            .flatten();

        Self {
            id: OrganismId::from_rng(rng),
            species,
            position,
            age: 0,
            alive: true,
            age_at_death: None,
            cause_of_death: None,
            lineage: Vec::new(),
            water,
            food,
            last_action: None,
        }
    }

    /// Current level of the given resource, if enabled.
    pub const fn resource(&self, kind: ResourceKind) -> Option<&ResourceLevel> {
        match kind {
            ResourceKind::Water => self.water.as_ref(),
            ResourceKind::Food => self.food.as_ref(),
        }
    }

    /// Mutable level of the given resource, if enabled.
    pub fn resource_mut(&mut self, kind: ResourceKind) -> Option<&mut ResourceLevel> {
        match kind {
            ResourceKind::Water => self.water.as_mut(),
            ResourceKind::Food => self.food.as_mut(),
        }
    }

    /// Whether the death-field invariant holds: dead organisms carry both
    /// `age_at_death` and `cause_of_death`, living organisms carry neither.
    pub const fn death_fields_consistent(&self) -> bool {
        if self.alive {
            self.age_at_death.is_none() && self.cause_of_death.is_none()
        } else {
            self.age_at_death.is_some() && self.cause_of_death.is_some()
        }
    }
}

const fn initial_level(traits: ResourceTraits) -> ResourceLevel {
    ResourceLevel {
        current: traits.initial,
        ticks_without: 0,
    }
}

/// A pending deduction from one world cell, produced during proposal
/// computation and applied only when the owning intent set is admitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Cell coordinates, one entry per world axis.
    pub position: Vec<u32>,
    /// Which resource grid to deduct from.
    pub kind: ResourceKind,
    /// Amount to deduct, clamped at the cell when applied.
    pub amount: u32,
}

/// Summary counts for one species, always recomputable from the organism
/// collection itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationStats {
    /// All organisms ever recorded for the species, dead included.
    pub total: usize,
    /// Organisms still alive.
    pub alive: usize,
    /// Organisms retained as terminal records.
    pub dead: usize,
}

#[cfg(test)]
mod tests {
    use crate::rng::rng_from_seed;

    use super::*;

    fn drinker_traits() -> SpeciesTraits {
        SpeciesTraits {
            name: String::from("sipper"),
            movement_policy: Some(String::from("simple_random")),
            reproduction_policy: None,
            drinking_policy: Some(String::from("constant_drink")),
            eating_policy: None,
            action_policy: Some(String::from("move_and_drink")),
            dna_length: 4,
            dna: String::from("0101"),
            max_age: 20,
            mutation_rate: None,
            can_mutate: false,
            water: Some(ResourceTraits {
                capacity: 10,
                initial: 8,
                metabolism: 1,
                intake: 4,
                max_ticks_without: 3,
            }),
            food: None,
        }
    }

    #[test]
    fn create_initializes_enabled_resources_only() {
        let mut rng = rng_from_seed(1);
        let organism = Organism::create(drinker_traits(), vec![0], &mut rng);
        assert_eq!(
            organism.water,
            Some(ResourceLevel {
                current: 8,
                ticks_without: 0
            })
        );
        assert!(organism.food.is_none());
        assert!(organism.alive);
        assert!(organism.death_fields_consistent());
        assert!(organism.lineage.is_empty());
    }

    #[test]
    fn resource_accessors_map_kinds() {
        let mut rng = rng_from_seed(2);
        let mut organism = Organism::create(drinker_traits(), vec![3], &mut rng);
        assert!(organism.resource(ResourceKind::Water).is_some());
        assert!(organism.resource(ResourceKind::Food).is_none());
        if let Some(level) = organism.resource_mut(ResourceKind::Water) {
            level.current = 2;
        }
        assert_eq!(organism.water.map(|w| w.current), Some(2));
    }

    #[test]
    fn organism_roundtrip_serde() {
        let mut rng = rng_from_seed(3);
        let organism = Organism::create(drinker_traits(), vec![1], &mut rng);
        let json = serde_json::to_string(&organism).ok();
        assert!(json.is_some());
        let restored: Option<Organism> =
            json.as_deref().and_then(|j| serde_json::from_str(j).ok());
        assert_eq!(restored, Some(organism));
    }
}
