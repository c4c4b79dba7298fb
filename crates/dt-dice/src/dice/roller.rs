//! Random sources for rolling dice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{DieType, RollOutcome};
use crate::error::{DiceError, DiceResult};

/// A source of uniformly distributed die faces.
///
/// Fairness is the requirement, not unpredictability: implementations may
/// use any non-cryptographic PRNG.
pub trait RandomSource {
    /// Roll a die with `sides` faces, returning a value in `1..=sides`.
    ///
    /// Fails with [`DiceError::InvalidArgument`] if `sides < 2`.
    fn roll(&mut self, sides: u32) -> DiceResult<u32>;

    /// Roll one of the canonical dice.
    fn roll_die(&mut self, die: DieType) -> DiceResult<RollOutcome> {
        let value = self.roll(die.sides())?;
        RollOutcome::new(die, value)
    }
}

/// The default [`RandomSource`], backed by a [`StdRng`].
#[derive(Debug, Clone)]
pub struct DiceRoller {
    rng: StdRng,
}

impl DiceRoller {
    /// A roller with a fixed seed, for reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A roller seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A seeded roller when `seed` is set, otherwise one seeded from entropy.
    pub fn with_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl RandomSource for DiceRoller {
    fn roll(&mut self, sides: u32) -> DiceResult<u32> {
        if sides < 2 {
            return Err(DiceError::InvalidArgument { sides });
        }
        let value = self.rng.random_range(1..=sides);
        tracing::trace!(sides, value, "rolled die");
        Ok(value)
    }
}
