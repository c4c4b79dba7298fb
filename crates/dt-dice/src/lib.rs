//! Dice engine for DiceTales.
//!
//! Provides the canonical die types, a uniform random source for rolling
//! them, immutable roll outcomes, and the five-tier severity classifier
//! that turns a roll into a narrative result.

pub mod dice;
pub mod error;
pub mod resolution;

pub use dice::{DiceRoller, DieType, RandomSource, RollOutcome};
pub use error::{DiceError, DiceResult};
pub use resolution::{SeverityTier, classify, classify_outcome};
