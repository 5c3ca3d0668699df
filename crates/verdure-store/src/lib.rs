//! Filesystem snapshot persistence.
//!
//! Snapshots are written as one JSON file per tick, `snapshot_000042.json`,
//! inside a run's data directory. Writes go through a temporary file and a
//! rename so a crash mid-write never leaves a truncated snapshot where the
//! loader would find it. `load_latest` picks the file with the highest
//! tick number, which is all a resume needs.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use verdure_engine::{Snapshot, SnapshotStore, StoreError};

const SNAPSHOT_PREFIX: &str = "snapshot_";
const SNAPSHOT_SUFFIX: &str = ".json";

/// A [`SnapshotStore`] writing one JSON file per tick into a directory.
#[derive(Debug)]
pub struct JsonSnapshotStore {
    dir: PathBuf,
}

impl JsonSnapshotStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The directory snapshots are written into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, tick: u64) -> PathBuf {
        self.dir
            .join(format!("{SNAPSHOT_PREFIX}{tick:06}{SNAPSHOT_SUFFIX}"))
    }
}

/// Extract the tick number from a snapshot file name, if it is one.
fn tick_of(file_name: &str) -> Option<u64> {
    file_name
        .strip_prefix(SNAPSHOT_PREFIX)?
        .strip_suffix(SNAPSHOT_SUFFIX)?
        .parse()
        .ok()
}

impl SnapshotStore for JsonSnapshotStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let path = self.path_for(snapshot.tick);
        let staging = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec(snapshot)?;
        fs::write(&staging, bytes)?;
        fs::rename(&staging, &path)?;
        debug!(tick = snapshot.tick, path = %path.display(), "snapshot written");
        Ok(())
    }

    fn load_latest(&self) -> Result<Option<Snapshot>, StoreError> {
        let mut latest: Option<(u64, PathBuf)> = None;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(tick) = name.to_str().and_then(tick_of) else {
                continue;
            };
            if latest.as_ref().is_none_or(|(best, _)| tick > *best) {
                latest = Some((tick, entry.path()));
            }
        }
        let Some((tick, path)) = latest else {
            return Ok(None);
        };
        let bytes = fs::read(&path)?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        if snapshot.tick != tick {
            return Err(StoreError::Corrupt {
                path: path.display().to_string(),
            });
        }
        debug!(tick, path = %path.display(), "snapshot loaded");
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::Utc;
    use verdure_types::{RunId, rng_from_seed};
    use verdure_world::World;

    use super::*;

    fn unique_dir(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "verdure_store_{label}_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        ))
    }

    fn snapshot(tick: u64) -> Snapshot {
        Snapshot {
            run_id: RunId::new(),
            tick,
            saved_at: Utc::now(),
            species_names: vec![String::from("ant")],
            organisms: Vec::new(),
            world: World::new(vec![4], None, None, None).unwrap(),
            rng: rng_from_seed(5),
        }
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = unique_dir("roundtrip");
        let mut store = JsonSnapshotStore::open(&dir).unwrap();
        let original = snapshot(3);
        store.save(&original).unwrap();

        let restored = store.load_latest().unwrap().unwrap();
        assert_eq!(restored, original);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn latest_means_highest_tick() {
        let dir = unique_dir("latest");
        let mut store = JsonSnapshotStore::open(&dir).unwrap();
        store.save(&snapshot(0)).unwrap();
        store.save(&snapshot(12)).unwrap();
        store.save(&snapshot(5)).unwrap();

        let latest = store.load_latest().unwrap().unwrap();
        assert_eq!(latest.tick, 12);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_directory_loads_nothing() {
        let dir = unique_dir("empty");
        let store = JsonSnapshotStore::open(&dir).unwrap();
        assert!(store.load_latest().unwrap().is_none());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = unique_dir("unrelated");
        let mut store = JsonSnapshotStore::open(&dir).unwrap();
        fs::write(dir.join("notes.txt"), b"not a snapshot").unwrap();
        fs::write(dir.join("snapshot_junk.json"), b"{}").unwrap();
        store.save(&snapshot(2)).unwrap();

        let latest = store.load_latest().unwrap().unwrap();
        assert_eq!(latest.tick, 2);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn mismatched_tick_is_corrupt() {
        let dir = unique_dir("corrupt");
        let mut store = JsonSnapshotStore::open(&dir).unwrap();
        let mut lying = snapshot(9);
        lying.tick = 1;
        // write under a name claiming tick 9 while the body says tick 1
        let bytes = serde_json::to_vec(&lying).unwrap();
        fs::write(dir.join("snapshot_000009.json"), bytes).unwrap();
        store.save(&snapshot(0)).unwrap();

        let result = store.load_latest();
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
        fs::remove_dir_all(&dir).ok();
    }
}
