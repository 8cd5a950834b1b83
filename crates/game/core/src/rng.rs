//! Deterministic random numbers for presentation variance.
//!
//! The rules themselves never roll dice. Randomness only varies how feedback
//! is presented (the footsteps pitch), and it is seeded so a replayed action
//! queue sounds exactly the same.

/// Source of deterministic random values.
///
/// Implementations must produce the same values given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit_f32(&self, seed: u64) -> f32 {
        // 24 bits fit the f32 mantissa exactly.
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform value between `min` and `max`. Returns `min` for an empty range.
    fn range_f32(&self, seed: u64, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.unit_f32(seed)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// - **Deterministic**: same seed always produces same output
/// - **Fast**: single multiply + xorshift + rotate
///
/// Reference: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Derives a per-event seed from the level seed, the action nonce and a
/// context discriminator (use distinct contexts for independent rolls within
/// one action).
pub fn compute_seed(level_seed: u64, nonce: u64, context: u32) -> u64 {
    let mut hash = level_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step (SplitMix64 finaliser)
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
