//! Typed run configuration mirroring the YAML file.
//!
//! A run is described by one YAML document: the seed, the run bounds, the
//! world grids, and one section per species. This module only parses and
//! validates; turning a config into a live universe happens in
//! [`crate::build`].

use std::path::Path;

use serde::Deserialize;
use verdure_types::ResourceKind;

use crate::error::LoaderError;

/// Top-level run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Seed for the run's single random stream.
    pub seed: u64,
    /// When the run stops.
    pub run: RunSection,
    /// The world grids.
    pub world: WorldSection,
    /// One section per species.
    pub species: Vec<SpeciesSection>,
}

/// Run bounds.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSection {
    /// Tick at which the run completes.
    pub end_tick: u64,
    /// Abort if the total organism count ever exceeds this.
    #[serde(default)]
    pub organism_limit: Option<usize>,
}

/// World dimensions and resource grids.
#[derive(Debug, Clone, Deserialize)]
pub struct WorldSection {
    /// Axis lengths, one or two entries.
    pub size: Vec<u32>,
    /// Water per cell; absent means a dry world.
    #[serde(default)]
    pub water: Option<GridSection>,
    /// Food per cell; absent means a barren world.
    #[serde(default)]
    pub food: Option<GridSection>,
    /// Obstacle markers per cell.
    #[serde(default)]
    pub obstacles: Option<GridSection>,
}

/// Per-cell quantities, either one value for every cell or an explicit
/// row-major list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GridSection {
    /// The same quantity in every cell.
    Uniform {
        /// The per-cell quantity.
        uniform: u32,
    },
    /// Explicit row-major per-cell quantities.
    Cells {
        /// The per-cell quantities, row-major.
        cells: Vec<u32>,
    },
}

/// One species' traits and starting population.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesSection {
    /// Species name, unique within the run.
    pub name: String,
    /// How many organisms to place at start.
    pub population_size: usize,
    /// Action-selection policy name.
    pub action_policy: Option<String>,
    /// Movement policy name.
    #[serde(default)]
    pub movement_policy: Option<String>,
    /// Reproduction policy name.
    #[serde(default)]
    pub reproduction_policy: Option<String>,
    /// Drinking policy name.
    #[serde(default)]
    pub drinking_policy: Option<String>,
    /// Eating policy name.
    #[serde(default)]
    pub eating_policy: Option<String>,
    /// Genome length in symbols.
    pub dna_length: u32,
    /// Fixed genome for every organism; absent means a random genome per
    /// organism.
    #[serde(default)]
    pub dna: Option<String>,
    /// Maximum age before dying of old age.
    pub max_age: u32,
    /// Per-symbol mutation probability.
    #[serde(default)]
    pub mutation_rate: Option<f64>,
    /// Whether offspring genomes may mutate.
    #[serde(default)]
    pub can_mutate: bool,
    /// Water traits; required when a drinking policy is set.
    #[serde(default)]
    pub water: Option<ResourceSection>,
    /// Food traits; required when an eating policy is set.
    #[serde(default)]
    pub food: Option<ResourceSection>,
    /// Fixed starting positions; absent means random placement.
    #[serde(default)]
    pub initial_positions: Option<Vec<Vec<u32>>>,
}

/// Per-resource physiology numbers.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ResourceSection {
    /// Maximum reserve.
    pub capacity: u32,
    /// Starting reserve.
    pub initial: u32,
    /// Units consumed per tick.
    pub metabolism: u32,
    /// Maximum units taken per intake action.
    pub intake: u32,
    /// Consecutive empty ticks survivable.
    pub max_ticks_without: u32,
}

impl RunConfig {
    /// Load and validate a run configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Io`] if the file cannot be read,
    /// [`LoaderError::Yaml`] if it is not valid YAML, or a validation
    /// error if the document is internally inconsistent.
    pub fn from_file(path: &Path) -> Result<Self, LoaderError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate a run configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Yaml`] if the string is not valid YAML, or
    /// a validation error if the document is internally inconsistent.
    pub fn parse(yaml: &str) -> Result<Self, LoaderError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), LoaderError> {
        let dims = self.world.size.len();
        if !(1..=2).contains(&dims) {
            return Err(LoaderError::InvalidRun {
                context: format!("world must have 1 or 2 axes, got {dims}"),
            });
        }
        if self.species.is_empty() {
            return Err(LoaderError::InvalidRun {
                context: String::from("at least one species is required"),
            });
        }

        let mut seen = std::collections::BTreeSet::new();
        for species in &self.species {
            if !seen.insert(species.name.as_str()) {
                return Err(LoaderError::InvalidRun {
                    context: format!("duplicate species name '{}'", species.name),
                });
            }
            species.validate(&self.world)?;
        }
        Ok(())
    }
}

impl SpeciesSection {
    fn invalid(&self, context: String) -> LoaderError {
        LoaderError::InvalidSpecies {
            species: self.name.clone(),
            context,
        }
    }

    fn validate(&self, world: &WorldSection) -> Result<(), LoaderError> {
        if self.action_policy.is_none() {
            return Err(self.invalid(String::from("an action policy is required")));
        }
        if self.dna_length == 0 {
            return Err(self.invalid(String::from("dna_length must be positive")));
        }
        if let Some(dna) = &self.dna
            && u32::try_from(dna.len()).ok() != Some(self.dna_length)
        {
            return Err(self.invalid(format!(
                "dna has {} symbols but dna_length is {}",
                dna.len(),
                self.dna_length
            )));
        }

        for (kind, policy, traits) in [
            (ResourceKind::Water, &self.drinking_policy, self.water),
            (ResourceKind::Food, &self.eating_policy, self.food),
        ] {
            if policy.is_some() && traits.is_none() {
                return Err(self.invalid(format!("{kind} policy set but no {kind} traits given")));
            }
            if let Some(traits) = traits
                && traits.initial > traits.capacity
            {
                return Err(self.invalid(format!(
                    "{kind} initial {} exceeds capacity {}",
                    traits.initial, traits.capacity
                )));
            }
        }

        if let Some(positions) = &self.initial_positions {
            if positions.len() != self.population_size {
                return Err(self.invalid(format!(
                    "{} initial positions for population_size {}",
                    positions.len(),
                    self.population_size
                )));
            }
            for position in positions {
                if position.len() != world.size.len() {
                    return Err(self.invalid(format!(
                        "position {position:?} does not match world dimensionality"
                    )));
                }
                if position.iter().zip(&world.size).any(|(c, len)| c >= len) {
                    return Err(
                        self.invalid(format!("position {position:?} is outside the world"))
                    );
                }
            }
        }
        Ok(())
    }
}
