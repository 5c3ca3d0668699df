//! The population registry: a per-species view derived from the organism
//! list.
//!
//! The registry is rebuilt from scratch after every tick. It never owns
//! simulation state and never filters it -- every organism record, dead
//! ones included, appears under its species. Configured species with no
//! organisms still get an entry so observers can distinguish "extinct"
//! from "never configured".

use std::collections::BTreeMap;

use verdure_types::{Organism, PopulationStats};

/// One species' slice of the population.
#[derive(Debug, Default)]
pub struct SpeciesEntry {
    /// Aggregate counts for the species.
    pub stats: PopulationStats,
    /// Every organism record of the species, dead included.
    pub organisms: Vec<Organism>,
}

/// Per-species population view, keyed by species name.
#[derive(Debug, Default)]
pub struct Registry {
    species: BTreeMap<String, SpeciesEntry>,
}

impl Registry {
    /// Build the registry from the configured species list and the current
    /// population. Organisms of a species missing from `species_names`
    /// (possible only through a defective behavior) are still included.
    pub fn build(species_names: &[String], organisms: &[Organism]) -> Self {
        let mut species: BTreeMap<String, SpeciesEntry> = species_names
            .iter()
            .map(|name| (name.clone(), SpeciesEntry::default()))
            .collect();

        for organism in organisms {
            let entry = species
                .entry(organism.species.name.clone())
                .or_default();
            entry.stats.total = entry.stats.total.saturating_add(1);
            if organism.alive {
                entry.stats.alive = entry.stats.alive.saturating_add(1);
            } else {
                entry.stats.dead = entry.stats.dead.saturating_add(1);
            }
            entry.organisms.push(organism.clone());
        }

        Self { species }
    }

    /// The entry for one species, if configured or populated.
    pub fn species(&self, name: &str) -> Option<&SpeciesEntry> {
        self.species.get(name)
    }

    /// Iterate over all species entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &SpeciesEntry)> {
        self.species
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Aggregate counts across every species.
    pub fn totals(&self) -> PopulationStats {
        let mut totals = PopulationStats::default();
        for entry in self.species.values() {
            totals.total = totals.total.saturating_add(entry.stats.total);
            totals.alive = totals.alive.saturating_add(entry.stats.alive);
            totals.dead = totals.dead.saturating_add(entry.stats.dead);
        }
        totals
    }
}
