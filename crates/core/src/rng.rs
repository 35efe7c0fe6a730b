//! RNG module - deterministic random source for board fills
//!
//! Every random draw the engine makes (initial fill, refills after a pop,
//! reshuffles) goes through one [`SimpleRng`] owned by the session, so a seed
//! plus a sequence of selections reproduces a game exactly.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales from the high bits; the low bits of a power-of-two LCG cycle
    /// with a short period and would tile the board in stripes.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Pick a uniformly random index into a slice of length `len`
    pub fn next_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }

    /// Current internal state (feeding it back to [`SimpleRng::new`] resumes the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(4) < 4);
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_next_range_small_ranges_are_not_periodic() {
        // With low-bit extraction the sequence mod 4 repeats every 4 draws.
        let mut rng = SimpleRng::new(1);
        let draws: Vec<u32> = (0..64).map(|_| rng.next_range(4)).collect();
        let periodic = draws.chunks(4).all(|chunk| chunk == &draws[0..4]);
        assert!(!periodic);
        for value in 0..4 {
            assert!(draws.contains(&value), "value {} never drawn", value);
        }
    }

    #[test]
    fn test_state_resumes_sequence() {
        let mut rng = SimpleRng::new(99);
        rng.next_u32();
        let mut resumed = SimpleRng::new(rng.state());
        assert_eq!(rng.next_u32(), resumed.next_u32());
    }
}
