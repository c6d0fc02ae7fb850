//! Seeded RNG oracle for deterministic tie-breaking.
//!
//! Decision randomness (strafe-vs-circle choice, pause scheduling, fallback
//! positions) goes through a stateless, seeded oracle: the caller derives a
//! seed from [`crate::TickTime::seed`] and the oracle maps it to a value.
//! Same seed, same value — every run of a scenario reproduces the same
//! decisions.

/// Stateless source of deterministic random values.
///
/// Implementations must be pure functions of the seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[min, max)` (returns `min` when the range is empty).
    fn range_f32(&self, seed: u64, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        let unit = self.next_u32(seed) as f32 / u32::MAX as f32;
        min + unit * (max - min)
    }

    /// Uniform integer in `[min, max]` inclusive.
    fn range_u32(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + self.next_u32(seed) % (max - min + 1)
    }

    /// True with probability `percent / 100`.
    fn chance(&self, seed: u64, percent: u32) -> bool {
        self.next_u32(seed) % 100 < percent
    }
}

/// SplitMix64-based oracle.
///
/// SplitMix64 is a tiny, well-studied mixing function: a single additive
/// constant plus two xor-shift-multiply rounds. It is not cryptographic and
/// does not need to be; it only has to spread nearby seeds (consecutive
/// ticks) across the output space, which it does well.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplitMix64;

impl SplitMix64 {
    const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    #[inline]
    fn mix(mut z: u64) -> u64 {
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl RngOracle for SplitMix64 {
    fn next_u32(&self, seed: u64) -> u32 {
        (Self::mix(seed.wrapping_add(Self::GOLDEN_GAMMA)) >> 32) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_value() {
        let rng = SplitMix64;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
    }

    #[test]
    fn adjacent_seeds_diverge() {
        let rng = SplitMix64;
        assert_ne!(rng.next_u32(1), rng.next_u32(2));
    }

    #[test]
    fn range_f32_stays_in_bounds() {
        let rng = SplitMix64;
        for seed in 0..100 {
            let v = rng.range_f32(seed, 1500.0, 4000.0);
            assert!((1500.0..4000.0).contains(&v));
        }
    }

    #[test]
    fn chance_extremes() {
        let rng = SplitMix64;
        assert!(!rng.chance(7, 0));
        assert!(rng.chance(7, 100));
    }
}
