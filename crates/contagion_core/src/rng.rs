//! Random source threaded through every probabilistic operation.
//!
//! The engine runs on a seeded [`ChaCha8Rng`]; deterministic harnesses can
//! substitute [`ConstantRandom`] to force every draw to one value.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Uniform draw in [0, 1).
    fn unit(&mut self) -> f64;

    /// Uniform draw in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.unit() * (hi - lo)
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

impl RandomSource for ChaCha8Rng {
    #[inline]
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

/// Returns the same value from every draw.
///
/// `ConstantRandom(0.0)` makes every chance succeed; `ConstantRandom(1.0)`
/// makes every chance fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRandom(pub f64);

impl RandomSource for ConstantRandom {
    #[inline]
    fn unit(&mut self) -> f64 {
        self.0
    }
}
