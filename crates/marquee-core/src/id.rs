//! # Identifier Generation
//!
//! Identifiers are drawn from a random source rather than a counter. A raw
//! signed 64-bit draw is turned into a positive id by taking its magnitude and
//! rounding it up to the next multiple of [`ID_STEP`]. A zero draw becomes
//! `ID_STEP`, so no generated id is ever zero.
//!
//! Collisions are not retried. With about 2^50 distinct outcomes per draw the
//! chance is negligible for an in-memory store.

use crate::primitives::ID_STEP;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source of entity identifiers.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: StdRng,
}

impl IdGenerator {
    /// Create a generator seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a fixed seed (reproducible sequences).
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw the next identifier.
    pub fn next_id(&mut self) -> u64 {
        round_up_to_step(self.rng.r#gen::<i64>())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a raw draw to a positive multiple of [`ID_STEP`].
///
/// `i64::MIN` is handled: its magnitude is 2^63, which still rounds up inside
/// the `u64` range.
#[must_use]
pub fn round_up_to_step(raw: i64) -> u64 {
    raw.unsigned_abs()
        .div_ceil(ID_STEP)
        .saturating_mul(ID_STEP)
        .max(ID_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn rounds_up_to_next_step() {
        assert_eq!(round_up_to_step(1), ID_STEP);
        assert_eq!(round_up_to_step(10_000), 10_000);
        assert_eq!(round_up_to_step(10_001), 20_000);
        assert_eq!(round_up_to_step(-25_000), 30_000);
    }

    #[test]
    fn zero_draw_is_never_an_id() {
        assert_eq!(round_up_to_step(0), ID_STEP);
    }

    #[test]
    fn extreme_draws_stay_in_range() {
        assert_eq!(round_up_to_step(i64::MIN), 9_223_372_036_854_780_000);
        assert_eq!(round_up_to_step(i64::MAX), 9_223_372_036_854_780_000);
    }

    #[test]
    fn seeded_generators_repeat() {
        let mut a = IdGenerator::seeded(7);
        let mut b = IdGenerator::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.next_id(), b.next_id());
        }
    }

    #[test]
    fn ids_are_distinct_positive_multiples() {
        let mut ids = IdGenerator::seeded(42);
        let drawn: BTreeSet<u64> = (0..1000).map(|_| ids.next_id()).collect();

        assert_eq!(drawn.len(), 1000);
        assert!(drawn.iter().all(|id| *id > 0 && id % ID_STEP == 0));
    }
}
