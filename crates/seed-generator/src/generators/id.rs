//! Identifier generator.

use rand::Rng;

/// Draw an identifier from the full signed 64-bit space.
///
/// Collisions are possible and are left to the store to detect.
pub fn generate_id<R: Rng>(rng: &mut R) -> i64 {
    rng.gen()
}
