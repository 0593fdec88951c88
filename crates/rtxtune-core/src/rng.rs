//! Seeded RNG wrapper using PCG32.
//!
//! Every random decision made while tuning a pack goes through this module,
//! so a run repeated with the same seed rewrites files identically.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Wrapper around PCG32 for reproducible random number generation.
#[derive(Clone)]
pub struct DeterministicRng {
    inner: Pcg32,
}

impl DeterministicRng {
    /// Create a new RNG from a 32-bit seed.
    ///
    /// The seed is expanded to 64 bits by duplicating the bits.
    pub fn new(seed: u32) -> Self {
        let seed64 = (seed as u64) | ((seed as u64) << 32);
        Self {
            inner: Pcg32::seed_from_u64(seed64),
        }
    }

    /// Derive the seed for one file of a run using BLAKE3.
    ///
    /// `relative_path` should be relative to the pack root so that the same
    /// pack produces the same noise wherever it is installed.
    pub fn derive_file_seed(run_seed: u32, relative_path: &Path) -> u32 {
        let key = relative_path.to_string_lossy().replace('\\', "/");
        let mut input = Vec::with_capacity(4 + key.len());
        input.extend_from_slice(&run_seed.to_le_bytes());
        input.extend_from_slice(key.as_bytes());
        let hash = blake3::hash(&input);
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&hash.as_bytes()[0..4]);
        u32::from_le_bytes(bytes)
    }

    /// Generate a random integer in `[-magnitude, magnitude]`.
    #[inline]
    pub fn gen_offset(&mut self, magnitude: i32) -> i32 {
        if magnitude <= 0 {
            return 0;
        }
        self.inner.gen_range(-magnitude..=magnitude)
    }
}
