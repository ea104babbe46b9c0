//! Seeded pseudo-random chooser.
//!
//! Each call seeds a fresh ChaCha8 stream from the chooser seed and an
//! `FxHasher` digest of the candidates, so the answer depends only on the
//! inputs. Two engines built with the same seed resolve identical ties
//! identically; different seeds explore different orderings.

use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

use super::Chooser;

/// Deterministic chooser that does not favour the first candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededChooser {
    seed: u64,
}

impl SeededChooser {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    fn stream_seed(&self, count: usize, describe: &dyn Fn(usize) -> String) -> u64 {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        count.hash(&mut hasher);
        for i in 0..count {
            describe(i).hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl Chooser for SeededChooser {
    fn choose(&self, count: usize, describe: &dyn Fn(usize) -> String) -> usize {
        if count <= 1 {
            return 0;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.stream_seed(count, describe));
        rng.gen_range(0..count)
    }
}
