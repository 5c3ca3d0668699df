//! Name-keyed behavior tables and the built-in policies.
//!
//! An organism is polymorphic over five capabilities: action selection,
//! movement, reproduction, drinking, and eating. Each capability is
//! resolved by looking up the organism's configured policy name, first in
//! the caller-supplied override tables (in order), then in the built-in
//! table. The tables are plain maps from policy name to function pointer,
//! built once before the simulation starts -- there is no dynamic module
//! probing.
//!
//! A policy name that resolves nowhere, or a capability invoked with no
//! policy configured, is a hard [`OrganismError`] that aborts the run:
//! it indicates a configuration defect, not a situation to skip.
//!
//! # Modules
//!
//! - [`action`] -- Action-selection policies (`move_only`, mixes)
//! - [`movement`] -- Movement policies (`stationary`, `simple_random`)
//! - [`drinking`] / [`eating`] -- Constant-rate intake policies
//! - [`reproduction`] -- `pure_replication`

pub mod action;
pub mod drinking;
pub mod eating;
mod intake;
pub mod movement;
pub mod reproduction;

use std::collections::BTreeMap;

use verdure_types::{Action, Organism, SimRng, Withdrawal};
use verdure_world::World;

use crate::error::OrganismError;

/// One of the five behavior slots an organism dispatches through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Chooses which action to take this tick.
    ActionSelection,
    /// Moves the organism on the grid.
    Movement,
    /// Creates offspring.
    Reproduction,
    /// Takes water from the occupied cell.
    Drinking,
    /// Takes food from the occupied cell.
    Eating,
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ActionSelection => write!(f, "action-selection"),
            Self::Movement => write!(f, "movement"),
            Self::Reproduction => write!(f, "reproduction"),
            Self::Drinking => write!(f, "drinking"),
            Self::Eating => write!(f, "eating"),
        }
    }
}

/// Read-only context a behavior sees while computing a proposal.
///
/// Both the world and the population are the pre-tick snapshot: proposals
/// never observe each other's in-tick effects, which is what makes intent
/// resolution necessary.
pub struct StepContext<'a> {
    /// The pre-tick world.
    pub world: &'a World,
    /// The pre-tick population.
    pub population: &'a PopulationView<'a>,
}

/// A position-keyed view over the pre-tick population.
pub struct PopulationView<'a> {
    organisms: &'a [Organism],
    by_position: BTreeMap<&'a [u32], Vec<usize>>,
}

impl<'a> PopulationView<'a> {
    /// Index a slice of organisms by their positions.
    pub fn new(organisms: &'a [Organism]) -> Self {
        let mut by_position: BTreeMap<&'a [u32], Vec<usize>> = BTreeMap::new();
        for (idx, organism) in organisms.iter().enumerate() {
            by_position
                .entry(organism.position.as_slice())
                .or_default()
                .push(idx);
        }
        Self {
            organisms,
            by_position,
        }
    }

    /// All organisms in the view.
    pub const fn organisms(&self) -> &'a [Organism] {
        self.organisms
    }

    /// Organisms occupying the given cell.
    pub fn at_position(&self, position: &[u32]) -> impl Iterator<Item = &'a Organism> {
        self.by_position
            .get(position)
            .into_iter()
            .flatten()
            .filter_map(|&idx| self.organisms.get(idx))
    }
}

/// What a capability produced: the resulting organism records plus any
/// pending world-cell deductions.
#[derive(Debug, Default)]
pub struct BehaviorOutcome {
    /// Organism records resulting from the behavior. The actor may be
    /// absent (e.g. replication replaces the parent), in which case the
    /// step logic reinstates it defensively.
    pub organisms: Vec<Organism>,
    /// World-cell deductions to apply if this proposal is admitted.
    pub withdrawals: Vec<Withdrawal>,
}

impl BehaviorOutcome {
    /// An outcome consisting of a single organism and no withdrawals.
    pub fn single(organism: Organism) -> Self {
        Self {
            organisms: vec![organism],
            withdrawals: Vec::new(),
        }
    }
}

/// Selects one action for the tick.
pub type ActionFn =
    fn(&Organism, &StepContext<'_>, &mut SimRng) -> Result<Action, OrganismError>;

/// Executes one capability, consuming the acting organism's tick-local
/// copy and returning the resulting records.
pub type CapabilityFn =
    fn(Organism, &StepContext<'_>, &mut SimRng) -> Result<BehaviorOutcome, OrganismError>;

/// One name-keyed table of behavior functions, either the built-ins or a
/// caller-supplied override layer.
#[derive(Default)]
pub struct BehaviorTable {
    /// Action-selection policies.
    pub action: BTreeMap<String, ActionFn>,
    /// Movement policies.
    pub movement: BTreeMap<String, CapabilityFn>,
    /// Reproduction policies.
    pub reproduction: BTreeMap<String, CapabilityFn>,
    /// Drinking policies.
    pub drinking: BTreeMap<String, CapabilityFn>,
    /// Eating policies.
    pub eating: BTreeMap<String, CapabilityFn>,
}

impl BehaviorTable {
    /// An empty table, the starting point for an override layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in behavior table.
    pub fn builtin() -> Self {
        let mut table = Self::new();

        table
            .action
            .insert(String::from("move_only"), action::move_only as ActionFn);
        table
            .action
            .insert(String::from("move_and_reproduce"), action::move_and_reproduce);
        table
            .action
            .insert(String::from("move_and_drink"), action::move_and_drink);
        table
            .action
            .insert(String::from("move_and_eat"), action::move_and_eat);
        table
            .action
            .insert(String::from("move_reproduce_drink"), action::move_reproduce_drink);
        table
            .action
            .insert(String::from("move_reproduce_eat"), action::move_reproduce_eat);

        table
            .movement
            .insert(String::from("stationary"), movement::stationary as CapabilityFn);
        table
            .movement
            .insert(String::from("simple_random"), movement::simple_random);

        table.reproduction.insert(
            String::from("pure_replication"),
            reproduction::pure_replication as CapabilityFn,
        );

        table
            .drinking
            .insert(String::from("constant_drink"), drinking::constant_drink as CapabilityFn);
        table
            .eating
            .insert(String::from("constant_eat"), eating::constant_eat as CapabilityFn);

        table
    }
}

/// The resolved dispatch structure: override layers consulted in order,
/// then the built-ins.
pub struct BehaviorRegistry {
    overrides: Vec<BehaviorTable>,
    builtin: BehaviorTable,
}

impl BehaviorRegistry {
    /// A registry containing only the built-in behaviors.
    pub fn builtin() -> Self {
        Self {
            overrides: Vec::new(),
            builtin: BehaviorTable::builtin(),
        }
    }

    /// A registry with caller-supplied override layers, consulted before
    /// the built-ins in the order given.
    pub fn with_overrides(overrides: Vec<BehaviorTable>) -> Self {
        Self {
            overrides,
            builtin: BehaviorTable::builtin(),
        }
    }

    /// Run the organism's action-selection policy.
    pub fn select_action(
        &self,
        organism: &Organism,
        ctx: &StepContext<'_>,
        rng: &mut SimRng,
    ) -> Result<Action, OrganismError> {
        let policy = organism.species.action_policy.as_deref().ok_or_else(|| {
            OrganismError::PolicyUnset {
                capability: Capability::ActionSelection,
                species: organism.species.name.clone(),
            }
        })?;
        let select = self
            .tables()
            .find_map(|table| table.action.get(policy))
            .ok_or_else(|| OrganismError::UnsupportedBehavior {
                capability: Capability::ActionSelection,
                policy: policy.to_owned(),
            })?;
        select(organism, ctx, rng)
    }

    /// Dispatch the capability matching the chosen action.
    pub fn perform(
        &self,
        action: Action,
        organism: Organism,
        ctx: &StepContext<'_>,
        rng: &mut SimRng,
    ) -> Result<BehaviorOutcome, OrganismError> {
        let (capability, policy) = match action {
            Action::Move => (Capability::Movement, &organism.species.movement_policy),
            Action::Reproduce => (Capability::Reproduction, &organism.species.reproduction_policy),
            Action::Drink => (Capability::Drinking, &organism.species.drinking_policy),
            Action::Eat => (Capability::Eating, &organism.species.eating_policy),
        };
        let policy = policy.as_deref().ok_or_else(|| OrganismError::PolicyUnset {
            capability,
            species: organism.species.name.clone(),
        })?;
        let behavior = self
            .tables()
            .find_map(|table| match capability {
                Capability::Movement => table.movement.get(policy),
                Capability::Reproduction => table.reproduction.get(policy),
                Capability::Drinking => table.drinking.get(policy),
                Capability::Eating => table.eating.get(policy),
                Capability::ActionSelection => None,
            })
            .copied()
            .ok_or_else(|| OrganismError::UnsupportedBehavior {
                capability,
                policy: policy.to_owned(),
            })?;
        behavior(organism, ctx, rng)
    }

    /// Override layers first, built-ins last.
    fn tables(&self) -> impl Iterator<Item = &BehaviorTable> {
        self.overrides.iter().chain(core::iter::once(&self.builtin))
    }
}
