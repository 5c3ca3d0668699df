//! Turn a validated [`RunConfig`] into a live [`UniverseSeed`].
//!
//! All randomness used while seeding (placement, genomes, organism ids)
//! comes from the run RNG, and the RNG is handed over to the universe
//! still warm, so the whole run remains one stream derived from the
//! configured seed.

use rand::Rng;
use tracing::info;
use verdure_engine::{RunBounds, UniverseSeed};
use verdure_types::{
    Organism, ResourceTraits, RunId, SimRng, SpeciesTraits, rng_from_seed,
};
use verdure_world::{ResourceGrid, World};

use crate::config::{GridSection, ResourceSection, RunConfig, SpeciesSection};
use crate::error::LoaderError;

/// Build the initial universe state and run bounds from a configuration.
///
/// # Errors
///
/// Fails if a configured grid does not match the world shape.
pub fn build_seed(config: &RunConfig) -> Result<(UniverseSeed, RunBounds), LoaderError> {
    let size = &config.world.size;
    let world = World::new(
        size.clone(),
        grid_from(config.world.water.as_ref(), size)?,
        grid_from(config.world.food.as_ref(), size)?,
        grid_from(config.world.obstacles.as_ref(), size)?,
    )?;

    let mut rng = rng_from_seed(config.seed);
    let mut organisms = Vec::new();
    let mut species_names = Vec::with_capacity(config.species.len());
    for section in &config.species {
        species_names.push(section.name.clone());
        populate(section, size, &mut organisms, &mut rng);
    }

    let run_id = RunId::new();
    info!(
        %run_id,
        seed = config.seed,
        species = species_names.len(),
        organisms = organisms.len(),
        "universe seeded"
    );
    Ok((
        UniverseSeed {
            run_id,
            species_names,
            organisms,
            world,
            rng,
        },
        RunBounds {
            end_tick: config.run.end_tick,
            organism_limit: config.run.organism_limit,
        },
    ))
}

fn grid_from(
    section: Option<&GridSection>,
    size: &[u32],
) -> Result<Option<ResourceGrid>, LoaderError> {
    match section {
        None => Ok(None),
        Some(GridSection::Uniform { uniform }) => {
            Ok(Some(ResourceGrid::uniform(size, *uniform)?))
        }
        Some(GridSection::Cells { cells }) => {
            Ok(Some(ResourceGrid::from_cells(size, cells.clone())?))
        }
    }
}

fn populate(
    section: &SpeciesSection,
    size: &[u32],
    organisms: &mut Vec<Organism>,
    rng: &mut SimRng,
) {
    for index in 0..section.population_size {
        let position = section
            .initial_positions
            .as_ref()
            .and_then(|positions| positions.get(index).cloned())
            .unwrap_or_else(|| random_position(size, rng));
        let traits = traits_for(section, rng);
        organisms.push(Organism::create(traits, position, rng));
    }
}

fn random_position(size: &[u32], rng: &mut SimRng) -> Vec<u32> {
    size.iter()
        .map(|&axis| if axis == 0 { 0 } else { rng.random_range(0..axis) })
        .collect()
}

fn traits_for(section: &SpeciesSection, rng: &mut SimRng) -> SpeciesTraits {
    let dna = section
        .dna
        .clone()
        .unwrap_or_else(|| random_genome(section.dna_length, rng));
    SpeciesTraits {
        name: section.name.clone(),
        movement_policy: section.movement_policy.clone(),
        reproduction_policy: section.reproduction_policy.clone(),
        drinking_policy: section.drinking_policy.clone(),
        eating_policy: section.eating_policy.clone(),
        action_policy: section.action_policy.clone(),
        dna_length: section.dna_length,
        dna,
        max_age: section.max_age,
        mutation_rate: section.mutation_rate,
        can_mutate: section.can_mutate,
        water: section.water.map(resource_traits),
        food: section.food.map(resource_traits),
    }
}

const fn resource_traits(section: ResourceSection) -> ResourceTraits {
    ResourceTraits {
        capacity: section.capacity,
        initial: section.initial,
        metabolism: section.metabolism,
        intake: section.intake,
        max_ticks_without: section.max_ticks_without,
    }
}

fn random_genome(length: u32, rng: &mut SimRng) -> String {
    (0..length)
        .map(|_| if rng.random_range(0..2_u8) == 0 { '0' } else { '1' })
        .collect()
}
