//! RNG module - deterministic random source for shuffling and effects
//!
//! A simple LCG keeps every session reproducible from its seed, which is what
//! the tests and `--seed` rely on.

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
    /// Uses the high bits; the low bits of an LCG with a power-of-two modulus
    /// cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (((self.next_u32() as u64) * (max as u64)) >> 32) as u32
    }

    /// Random value in [0, 1000).
    pub fn next_permille(&mut self) -> u16 {
        self.next_range(1000) as u16
    }

}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
