//! Bounded integer code generators.

use rand::Rng;
use std::num::NonZeroU32;

/// Generate an integer code uniformly in `[0, bound)`.
pub fn generate_code<R: Rng>(rng: &mut R, bound: NonZeroU32) -> i64 {
    i64::from(rng.gen_range(0..bound.get()))
}
