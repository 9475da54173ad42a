//! RNG oracle for deterministic random number generation.
//!
//! Every die roll, velocity roll and deck shuffle derives its value from a
//! seed computed with [`compute_seed`]. Given the same battle seed and the same
//! sequence of commitments, a battle replays identically.

use std::sync::atomic::{AtomicUsize, Ordering};

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32(seed)) % span) as u32
    }

    /// Pick an index in `0..len`. Returns `None` for an empty range.
    fn index(&self, seed: u64, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.next_u32(seed) as usize % len)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Oracle that replays a fixed list of values for [`RngOracle::range`].
///
/// Each `range` call consumes the next scripted value (clamped into the
/// requested bounds). Once the script runs out, values come from [`PcgRng`].
/// `next_u32` (used for shuffles and index picks) always comes from
/// [`PcgRng`], so deck order never eats scripted rolls.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: AtomicUsize,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values
            .len()
            .saturating_sub(self.cursor.load(Ordering::Relaxed))
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&self, seed: u64) -> u32 {
        PcgRng.next_u32(seed)
    }

    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        let at = self.cursor.fetch_add(1, Ordering::Relaxed);
        match self.values.get(at) {
            Some(&value) => value.clamp(min, max.max(min)),
            None => PcgRng.range(seed, min, max),
        }
    }
}

/// Compute deterministic seed from battle state components.
///
/// # Arguments
///
/// * `battle_seed` - Base seed set at battle start (for replay/determinism)
/// * `nonce` - Random event sequence number (increments on every draw from the oracle)
/// * `actor` - Unit the random event belongs to
/// * `context` - Additional context for multiple rolls in the same event
///
/// # Context Values
///
/// - `0`: Die roll
/// - `1`: Velocity roll
/// - `2`: Deck shuffle
pub fn compute_seed(battle_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    // These constants are based on SplitMix64 and FxHash multipliers
    let mut hash = battle_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Seed contexts used across the engine.
pub mod context {
    pub const DIE_ROLL: u32 = 0;
    pub const VELOCITY_ROLL: u32 = 1;
    pub const SHUFFLE: u32 = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        for seed in 0..64 {
            assert_eq!(rng.next_u32(seed), rng.next_u32(seed));
        }
    }

    #[test]
    fn range_stays_within_bounds() {
        let rng = PcgRng;
        for nonce in 0..500 {
            let seed = compute_seed(42, nonce, 1, context::DIE_ROLL);
            let value = rng.range(seed, 2, 5);
            assert!((2..=5).contains(&value));
        }
    }

    #[test]
    fn range_covers_every_face() {
        let rng = PcgRng;
        let mut seen = [false; 4];
        for nonce in 0..500 {
            let seed = compute_seed(7, nonce, 0, context::DIE_ROLL);
            seen[(rng.range(seed, 1, 4) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn degenerate_range_returns_min() {
        assert_eq!(PcgRng.range(9, 3, 3), 3);
    }

    #[test]
    fn scripted_rng_replays_then_falls_back() {
        let rng = ScriptedRng::new([4, 9, 0]);
        assert_eq!(rng.range(0, 1, 4), 4);
        // clamped into bounds
        assert_eq!(rng.range(0, 1, 4), 4);
        assert_eq!(rng.range(0, 2, 5), 2);
        assert_eq!(rng.remaining(), 0);

        let fallback = rng.range(11, 1, 6);
        assert!((1..=6).contains(&fallback));
    }

    #[test]
    fn seeds_differ_by_context() {
        assert_ne!(compute_seed(1, 1, 1, 0), compute_seed(1, 1, 1, 1));
        assert_ne!(compute_seed(1, 1, 1, 0), compute_seed(1, 2, 1, 0));
    }
}
