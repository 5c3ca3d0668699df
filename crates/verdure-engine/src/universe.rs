//! The universe: top-level control loop over population, world, and RNG.
//!
//! The universe owns the canonical run state and is the only thing that
//! mutates it. Each [`Universe::step`] runs one full tick: every living
//! organism proposes against the pre-tick snapshot, the proposals are
//! resolved first-claim-wins, admitted withdrawals hit the world, the
//! registry is rebuilt, and a snapshot is written through the store.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info};
use verdure_organisms::{
    BehaviorRegistry, IntentSet, PopulationView, StepContext, step_organism,
};
use verdure_types::{Organism, PopulationStats, RunId, SimRng};
use verdure_world::World;

use crate::error::TickError;
use crate::intent;
use crate::registry::Registry;
use crate::snapshot::{Snapshot, SnapshotStore};

/// Initial state for a fresh run, normally produced by the loader.
///
/// Carries the already-advanced RNG so draws made while placing the
/// initial population stay part of the run's single random stream.
#[derive(Debug)]
pub struct UniverseSeed {
    /// Identifier for the new run.
    pub run_id: RunId,
    /// Configured species names.
    pub species_names: Vec<String>,
    /// The initial population.
    pub organisms: Vec<Organism>,
    /// The initial world.
    pub world: World,
    /// The run RNG, positioned after initial-population draws.
    pub rng: SimRng,
}

/// When a run stops.
#[derive(Debug, Clone, Copy)]
pub struct RunBounds {
    /// Tick at which the run completes.
    pub end_tick: u64,
    /// Abort the run if the total record count ever exceeds this.
    ///
    /// This counts every organism record, dead ones included: dead
    /// records are retained forever and each snapshot carries the full
    /// set, so the ceiling bounds snapshot size and bookkeeping cost,
    /// not just the live population.
    pub organism_limit: Option<usize>,
}

/// Summary of one completed tick.
#[derive(Debug, Clone, Copy)]
pub struct TickSummary {
    /// The tick that just completed.
    pub tick: u64,
    /// Population totals after the tick.
    pub stats: PopulationStats,
}

/// Why a run aborted before its end tick.
#[derive(Debug, Clone, Copy)]
pub enum AbortReason {
    /// The record set outgrew the configured limit.
    OrganismLimit {
        /// Total record count (alive and dead) at abort time.
        count: usize,
        /// The configured limit.
        limit: usize,
    },
}

impl core::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OrganismLimit { count, limit } => {
                write!(f, "organism count {count} exceeded limit {limit}")
            }
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy)]
pub enum RunOutcome {
    /// The run reached its end tick.
    Completed {
        /// The final tick.
        tick: u64,
    },
    /// The run stopped early.
    Aborted {
        /// The tick at which the run stopped.
        tick: u64,
        /// What tripped the abort.
        reason: AbortReason,
    },
}

/// A point-in-time description of a run, for observers.
#[derive(Debug, Clone)]
pub struct RunInfo {
    /// The run identifier.
    pub run_id: RunId,
    /// The current tick.
    pub tick: u64,
    /// The configured end tick.
    pub end_tick: u64,
    /// Current population totals.
    pub stats: PopulationStats,
    /// Per-species counts, keyed by species name.
    pub species: BTreeMap<String, PopulationStats>,
    /// Wall-clock time since the universe was constructed or resumed.
    pub elapsed: Duration,
}

/// The canonical run state and its control loop.
pub struct Universe<S: SnapshotStore> {
    run_id: RunId,
    tick: u64,
    species_names: Vec<String>,
    organisms: Vec<Organism>,
    world: World,
    registry: Registry,
    rng: SimRng,
    behaviors: BehaviorRegistry,
    bounds: RunBounds,
    store: S,
    started: Instant,
}

impl<S: SnapshotStore> Universe<S> {
    /// Start a fresh run and persist its initial (tick 0) snapshot.
    ///
    /// # Errors
    ///
    /// Fails if the initial snapshot cannot be saved.
    pub fn from_seed(
        seed: UniverseSeed,
        bounds: RunBounds,
        behaviors: BehaviorRegistry,
        store: S,
    ) -> Result<Self, TickError> {
        let registry = Registry::build(&seed.species_names, &seed.organisms);
        let mut universe = Self {
            run_id: seed.run_id,
            tick: 0,
            species_names: seed.species_names,
            organisms: seed.organisms,
            world: seed.world,
            registry,
            rng: seed.rng,
            behaviors,
            bounds,
            store,
            started: Instant::now(),
        };
        let snapshot = universe.snapshot();
        universe.store.save(&snapshot)?;
        info!(
            run_id = %universe.run_id,
            organisms = universe.organisms.len(),
            end_tick = bounds.end_tick,
            "universe created"
        );
        Ok(universe)
    }

    /// Continue a run from the latest snapshot in `store`, if one exists.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be read.
    pub fn resume(
        bounds: RunBounds,
        behaviors: BehaviorRegistry,
        store: S,
    ) -> Result<Option<Self>, TickError> {
        let Some(snapshot) = store.load_latest()? else {
            return Ok(None);
        };
        info!(
            run_id = %snapshot.run_id,
            tick = snapshot.tick,
            "resuming universe from snapshot"
        );
        let registry = Registry::build(&snapshot.species_names, &snapshot.organisms);
        Ok(Some(Self {
            run_id: snapshot.run_id,
            tick: snapshot.tick,
            species_names: snapshot.species_names,
            organisms: snapshot.organisms,
            world: snapshot.world,
            registry,
            rng: snapshot.rng,
            behaviors,
            bounds,
            store,
            started: Instant::now(),
        }))
    }

    /// Run one full tick.
    ///
    /// # Errors
    ///
    /// Any [`TickError`] leaves the universe unfit for further stepping.
    pub fn step(&mut self) -> Result<TickSummary, TickError> {
        let next_tick =
            self.tick
                .checked_add(1)
                .ok_or_else(|| TickError::ArithmeticOverflow {
                    context: String::from("tick counter overflow"),
                })?;

        // Proposals all read the same pre-tick snapshot.
        let view = PopulationView::new(&self.organisms);
        let ctx = StepContext {
            world: &self.world,
            population: &view,
        };
        let mut proposals: Vec<IntentSet> = Vec::new();
        for organism in &self.organisms {
            if organism.alive {
                proposals.push(step_organism(organism, &self.behaviors, &ctx, &mut self.rng)?);
            }
        }
        debug!(tick = next_tick, proposals = proposals.len(), "computed intents");

        let resolution = intent::resolve(proposals, &self.organisms, &mut self.rng)?;
        self.organisms = resolution.organisms;
        for withdrawal in &resolution.withdrawals {
            self.world
                .withdraw(withdrawal.kind, &withdrawal.position, withdrawal.amount)?;
        }
        self.world.advance()?;
        self.tick = next_tick;
        self.registry = Registry::build(&self.species_names, &self.organisms);

        let snapshot = self.snapshot();
        self.store.save(&snapshot)?;

        let stats = self.registry.totals();
        info!(
            tick = self.tick,
            alive = stats.alive,
            dead = stats.dead,
            "tick complete"
        );
        Ok(TickSummary {
            tick: self.tick,
            stats,
        })
    }

    /// Step until the end tick or an abort condition.
    ///
    /// # Errors
    ///
    /// Propagates the first tick failure.
    pub fn run(&mut self) -> Result<RunOutcome, TickError> {
        while self.tick < self.bounds.end_tick {
            let summary = self.step()?;
            if let Some(limit) = self.bounds.organism_limit
                && summary.stats.total > limit
            {
                let reason = AbortReason::OrganismLimit {
                    count: summary.stats.total,
                    limit,
                };
                info!(tick = summary.tick, %reason, "run aborted");
                return Ok(RunOutcome::Aborted {
                    tick: summary.tick,
                    reason,
                });
            }
        }
        info!(tick = self.tick, "run completed");
        Ok(RunOutcome::Completed { tick: self.tick })
    }

    /// A point-in-time description of the run.
    pub fn current_info(&self) -> RunInfo {
        RunInfo {
            run_id: self.run_id,
            tick: self.tick,
            end_tick: self.bounds.end_tick,
            stats: self.registry.totals(),
            species: self
                .registry
                .entries()
                .map(|(name, entry)| (name.to_owned(), entry.stats))
                .collect(),
            elapsed: self.started.elapsed(),
        }
    }

    /// Capture the current state as a snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            run_id: self.run_id,
            tick: self.tick,
            saved_at: Utc::now(),
            species_names: self.species_names.clone(),
            organisms: self.organisms.clone(),
            world: self.world.clone(),
            rng: self.rng.clone(),
        }
    }

    /// The current tick.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The current population, dead records included.
    pub fn organisms(&self) -> &[Organism] {
        &self.organisms
    }

    /// The current world.
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The per-species registry for the current tick.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The backing snapshot store.
    pub const fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use verdure_types::{ResourceTraits, SpeciesTraits, rng_from_seed};
    use verdure_world::ResourceGrid;

    use crate::snapshot::MemoryStore;

    use super::*;

    fn seed_universe(seed: u64, population: usize, max_age: u32) -> UniverseSeed {
        let traits = SpeciesTraits {
            name: String::from("sipper"),
            movement_policy: Some(String::from("simple_random")),
            reproduction_policy: None,
            drinking_policy: Some(String::from("constant_drink")),
            eating_policy: None,
            action_policy: Some(String::from("move_and_drink")),
            dna_length: 4,
            dna: String::from("0110"),
            max_age,
            mutation_rate: None,
            can_mutate: false,
            water: Some(ResourceTraits {
                capacity: 30,
                initial: 20,
                metabolism: 1,
                intake: 3,
                max_ticks_without: 4,
            }),
            food: None,
        };

        let mut rng = rng_from_seed(seed);
        let organisms: Vec<Organism> = (0..population)
            .map(|i| {
                let position = vec![u32::try_from(i).unwrap_or(0) % 8];
                Organism::create(traits.clone(), position, &mut rng)
            })
            .collect();
        let water = ResourceGrid::uniform(&[8], 500).unwrap();
        let world = World::new(vec![8], Some(water), None, None).unwrap();

        UniverseSeed {
            run_id: RunId::new(),
            species_names: vec![String::from("sipper")],
            organisms,
            world,
            rng,
        }
    }

    fn bounds(end_tick: u64) -> RunBounds {
        RunBounds {
            end_tick,
            organism_limit: None,
        }
    }

    #[test]
    fn creation_persists_an_initial_snapshot() {
        let universe = Universe::from_seed(
            seed_universe(3, 2, 50),
            bounds(5),
            BehaviorRegistry::builtin(),
            MemoryStore::new(),
        )
        .unwrap();
        assert_eq!(universe.tick(), 0);
        assert_eq!(universe.store().snapshots().len(), 1);
        assert_eq!(universe.store().snapshots()[0].tick, 0);
    }

    #[test]
    fn stepping_advances_tick_world_and_population() {
        let mut universe = Universe::from_seed(
            seed_universe(5, 3, 50),
            bounds(10),
            BehaviorRegistry::builtin(),
            MemoryStore::new(),
        )
        .unwrap();

        let summary = universe.step().unwrap();
        assert_eq!(summary.tick, 1);
        assert_eq!(summary.stats.alive, 3);
        assert_eq!(universe.world().tick(), 1);
        assert!(universe.organisms().iter().all(|o| o.age == 1));
        // initial snapshot plus one per tick
        assert_eq!(universe.store().snapshots().len(), 2);
    }

    #[test]
    fn run_stops_at_end_tick() {
        let mut universe = Universe::from_seed(
            seed_universe(7, 2, 50),
            bounds(4),
            BehaviorRegistry::builtin(),
            MemoryStore::new(),
        )
        .unwrap();
        let outcome = universe.run().unwrap();
        assert!(matches!(outcome, RunOutcome::Completed { tick: 4 }));
        assert_eq!(universe.tick(), 4);
    }

    #[test]
    fn old_age_kills_but_never_removes() {
        let mut universe = Universe::from_seed(
            seed_universe(11, 2, 3),
            bounds(6),
            BehaviorRegistry::builtin(),
            MemoryStore::new(),
        )
        .unwrap();
        let outcome = universe.run().unwrap();
        assert!(matches!(outcome, RunOutcome::Completed { .. }));

        let stats = universe.registry().totals();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.alive, 0);
        assert_eq!(stats.dead, 2);
        for organism in universe.organisms() {
            assert_eq!(
                organism.cause_of_death,
                Some(verdure_types::CauseOfDeath::OldAge)
            );
            assert_eq!(organism.age_at_death, Some(4));
            // dead records keep aging on carry-over
            assert_eq!(organism.age, 6);
        }
    }

    #[test]
    fn organism_limit_aborts_the_run() {
        let mut seed = seed_universe(13, 4, 50);
        // reproduction makes the population outgrow a tight limit fast
        for organism in &mut seed.organisms {
            organism.species.action_policy = Some(String::from("move_and_reproduce"));
            organism.species.reproduction_policy = Some(String::from("pure_replication"));
        }
        let mut universe = Universe::from_seed(
            seed,
            RunBounds {
                end_tick: 200,
                organism_limit: Some(6),
            },
            BehaviorRegistry::builtin(),
            MemoryStore::new(),
        )
        .unwrap();
        let outcome = universe.run().unwrap();
        assert!(matches!(outcome, RunOutcome::Aborted { .. }));
        if let RunOutcome::Aborted { reason, .. } = outcome {
            let AbortReason::OrganismLimit { count, limit } = reason;
            assert_eq!(limit, 6);
            assert!(count > 6);
            // The ceiling counts dead replication parents too, so it
            // trips before the live population alone would reach it.
            let stats = universe.registry().totals();
            assert_eq!(stats.total, count);
            assert!(stats.alive < count);
        }
    }

    #[test]
    fn current_info_reflects_progress() {
        let mut universe = Universe::from_seed(
            seed_universe(17, 1, 50),
            bounds(3),
            BehaviorRegistry::builtin(),
            MemoryStore::new(),
        )
        .unwrap();
        universe.step().unwrap();
        let info = universe.current_info();
        assert_eq!(info.tick, 1);
        assert_eq!(info.end_tick, 3);
        assert_eq!(info.stats.total, 1);
        assert_eq!(info.species.get("sipper").map(|s| s.alive), Some(1));
    }
}
