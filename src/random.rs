//! Random number generator construction.
//!
//! Every population owns exactly one generator, created here once and then
//! threaded through the operators as `&mut R`. Nothing in the crate reseeds
//! per call.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed.
///
/// `None` draws a fresh seed from the thread-local, OS-seeded generator.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..16 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_successive_draws_differ() {
        let mut rng = rng_from_seed(None);
        let draws: Vec<u64> = (0..8).map(|_| rng.random()).collect();
        assert!(draws.windows(2).any(|w| w[0] != w[1]));
    }
}
