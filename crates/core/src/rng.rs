//! RNG module - deterministic source for the spawner
//!
//! A simple LCG is enough for uniform shape selection and keeps games
//! reproducible from a seed, which the tests and benches rely on.

use crate::types::{ShapeId, SHAPE_COUNT};

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
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of a power-of-two LCG cycle quickly; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Uniformly random shape.
    pub fn next_shape(&mut self) -> ShapeId {
        ShapeId::from_index(self.next_range(SHAPE_COUNT as u32) as usize)
    }

    /// Current internal state (seed for reproducing the rest of the sequence)
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

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_not_degenerate() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_shape_covers_catalog() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [0u32; SHAPE_COUNT as usize];
        for _ in 0..7000 {
            seen[rng.next_shape().index()] += 1;
        }
        // Roughly uniform: each shape within 30% of the expected 1000.
        for (shape, count) in seen.iter().enumerate() {
            assert!(
                (700..=1300).contains(count),
                "shape {shape} drawn {count} times"
            );
        }
    }
}
