//! Simulation runner binary for Verdure.
//!
//! Loads a YAML run configuration, seeds or resumes a universe, and
//! steps it to completion, writing a JSON snapshot after every tick.
//!
//! # Usage
//!
//! `verdure-sim [config-path] [data-dir]`
//!
//! Defaults to `verdure-config.yaml` and `data/`. If the data directory
//! already holds snapshots, the run continues from the latest one; the
//! config then only supplies the run bounds.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Open the snapshot store
//! 3. Resume from the latest snapshot if one exists
//! 4. Otherwise load the config and seed a fresh universe
//! 5. Run to the end tick
//! 6. Log the outcome

use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;
use verdure_engine::{RunOutcome, Universe};
use verdure_loader::RunConfig;
use verdure_organisms::BehaviorRegistry;
use verdure_store::JsonSnapshotStore;

const DEFAULT_CONFIG: &str = "verdure-config.yaml";
const DEFAULT_DATA_DIR: &str = "data";

/// Application entry point for the simulation runner.
///
/// # Errors
///
/// Returns an error if configuration loading, snapshot access, or the
/// simulation itself fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("verdure-sim starting");

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| String::from(DEFAULT_CONFIG));
    let data_dir = args.next().unwrap_or_else(|| String::from(DEFAULT_DATA_DIR));

    // 2. Open the snapshot store.
    let store = JsonSnapshotStore::open(&data_dir)?;
    info!(data_dir, "snapshot store opened");

    let config = RunConfig::from_file(Path::new(&config_path))?;
    info!(
        config_path,
        seed = config.seed,
        end_tick = config.run.end_tick,
        species = config.species.len(),
        "configuration loaded"
    );
    let bounds = verdure_engine::RunBounds {
        end_tick: config.run.end_tick,
        organism_limit: config.run.organism_limit,
    };

    // 3-4. Resume if snapshots exist, otherwise seed a fresh universe.
    let resumed = Universe::resume(bounds, BehaviorRegistry::builtin(), store)?;
    let mut universe = if let Some(universe) = resumed {
        universe
    } else {
        let (seed, bounds) = verdure_loader::build_seed(&config)?;
        let store = JsonSnapshotStore::open(&data_dir)?;
        Universe::from_seed(seed, bounds, BehaviorRegistry::builtin(), store)?
    };

    // 5. Run to the end tick.
    let outcome = universe.run()?;

    // 6. Log the outcome.
    let info = universe.current_info();
    match outcome {
        RunOutcome::Completed { tick } => {
            info!(
                run_id = %info.run_id,
                tick,
                alive = info.stats.alive,
                dead = info.stats.dead,
                elapsed_ms = u64::try_from(info.elapsed.as_millis()).unwrap_or(u64::MAX),
                "run completed"
            );
        }
        RunOutcome::Aborted { tick, reason } => {
            info!(
                run_id = %info.run_id,
                tick,
                %reason,
                alive = info.stats.alive,
                "run aborted"
            );
        }
    }
    Ok(())
}
