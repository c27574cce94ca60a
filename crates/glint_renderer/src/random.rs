//! Per-worker random number generation.
//!
//! Each render worker owns one [`Xorshift32`] seeded from its worker id.
//! The generator implements `rand::RngCore`, so every sampling routine in
//! the crate takes `&mut dyn RngCore` and tests can substitute any other
//! `rand` generator.

use rand::{Rng, RngCore, SeedableRng};

/// Marsaglia xorshift generator with 32 bits of state.
///
/// Zero is a fixed point of the xorshift step, so the state is never allowed
/// to be zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Create a generator from a raw seed. A zero seed is replaced by 1.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Generator for render worker `worker_id` (seeded with `worker_id + 1`).
    pub fn for_worker(worker_id: usize) -> Self {
        Self::new((worker_id as u32).wrapping_add(1))
    }

    /// Current state, mostly useful for debugging.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RngCore for Xorshift32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_u32() as u64;
        let hi = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xorshift32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Uniform `f32` in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform `f32` in [min, max).
#[inline]
pub fn gen_range_f32(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_is_replaced() {
        let mut rng = Xorshift32::new(0);
        assert_eq!(rng.state(), 1);
        // Never collapses to the zero fixed point
        for _ in 0..1000 {
            assert_ne!(rng.next_u32(), 0);
        }
    }

    #[test]
    fn test_worker_seeds_are_offset() {
        assert_eq!(Xorshift32::for_worker(0).state(), 1);
        assert_eq!(Xorshift32::for_worker(7).state(), 8);
    }

    #[test]
    fn test_known_sequence() {
        // 1 -> 1 ^ (1 << 13) = 0x2001; ^ (0x2001 >> 17) = 0x2001; ^ (0x2001 << 5) = 0x42021
        let mut rng = Xorshift32::new(1);
        assert_eq!(rng.next_u32(), 0x0004_2021);
    }

    #[test]
    fn test_streams_are_reproducible() {
        let mut a = Xorshift32::for_worker(3);
        let mut b = Xorshift32::from_seed(4u32.to_le_bytes());
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_distinct_workers_diverge() {
        let mut a = Xorshift32::for_worker(0);
        let mut b = Xorshift32::for_worker(1);
        let same = (0..64).filter(|_| a.next_u32() == b.next_u32()).count();
        assert!(same < 4);
    }

    #[test]
    fn test_gen_f32_range() {
        let mut rng = Xorshift32::new(12345);
        let mut sum = 0.0;
        for _ in 0..10_000 {
            let x = gen_f32(&mut rng);
            assert!((0.0..1.0).contains(&x));
            sum += x;
        }
        let mean = sum / 10_000.0;
        assert!((mean - 0.5).abs() < 0.02, "mean = {mean}");
    }

    #[test]
    fn test_gen_range_f32_bounds() {
        let mut rng = Xorshift32::new(99);
        for _ in 0..10_000 {
            let x = gen_range_f32(&mut rng, -1.0, 1.0);
            assert!((-1.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut rng = Xorshift32::new(1);
        let mut bytes = [0u8; 6];
        rng.fill_bytes(&mut bytes);
        assert_eq!(&bytes[..4], &0x0004_2021u32.to_le_bytes());
    }
}
