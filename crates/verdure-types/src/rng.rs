//! The checkpointable random source threaded through a run.
//!
//! A single generator drives every stochastic decision in a simulation:
//! action selection, movement direction, identifier assignment, and the
//! order in which intent sets are resolved. The generator is never reseeded
//! mid-run, and its internal state serializes into each snapshot so that a
//! resumed run continues the exact same random stream.
//!
//! `ChaCha8` is used rather than `StdRng` because its stream is stable
//! across crate versions and its state derives `Serialize`/`Deserialize`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The pseudo-random generator threaded through the whole simulation.
pub type SimRng = ChaCha8Rng;

/// Build the run's random source from an integer seed.
///
/// Two generators built from the same seed produce identical streams, so a
/// run restarted from scratch with the same seed replays identically.
#[must_use]
pub fn rng_from_seed(seed: u64) -> SimRng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = rng_from_seed(42);
        let mut b = rng_from_seed(42);
        for _ in 0..16 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn state_survives_serialization() {
        let mut original = rng_from_seed(9);
        // Burn a few draws so the state is mid-stream.
        let _ = original.random::<u64>();
        let _ = original.random::<u64>();

        let json = serde_json::to_string(&original).ok();
        let restored: Option<SimRng> =
            json.as_deref().and_then(|j| serde_json::from_str(j).ok());
        assert!(restored.is_some());
        let mut restored = restored.unwrap_or_else(|| rng_from_seed(0));
        assert_eq!(original.random::<u64>(), restored.random::<u64>());
    }
}
