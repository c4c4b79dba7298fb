//! Dice types and rolling.
//!
//! DiceTales uses the standard polyhedral set (d4 through d100). The d20 is
//! the game's universal default die and the only one with fumble semantics.

pub mod roll;
pub mod roller;

pub use roll::RollOutcome;
pub use roller::{DiceRoller, RandomSource};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiceError;

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieType {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    #[default]
    D20,
    /// Percentile die (1-100).
    D100,
}

impl DieType {
    /// Every supported die, smallest first.
    pub const ALL: [DieType; 7] = [
        Self::D4,
        Self::D6,
        Self::D8,
        Self::D10,
        Self::D12,
        Self::D20,
        Self::D100,
    ];

    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }

    /// Map a side count back to its die type, if it is one of the canonical set.
    pub fn from_sides(sides: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.sides() == sides)
    }
}

impl FromStr for DieType {
    type Err = DiceError;

    /// Parse a die from a string like "d20", "D6" or "d100".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        normalized
            .strip_prefix('d')
            .and_then(|n| n.parse::<u32>().ok())
            .and_then(Self::from_sides)
            .ok_or_else(|| DiceError::UnknownDie(s.trim().to_string()))
    }
}

impl std::fmt::Display for DieType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_sides() {
        assert_eq!(DieType::D4.sides(), 4);
        assert_eq!(DieType::D6.sides(), 6);
        assert_eq!(DieType::D8.sides(), 8);
        assert_eq!(DieType::D10.sides(), 10);
        assert_eq!(DieType::D12.sides(), 12);
        assert_eq!(DieType::D20.sides(), 20);
        assert_eq!(DieType::D100.sides(), 100);
    }

    #[test]
    fn die_from_str() {
        assert_eq!("d20".parse::<DieType>(), Ok(DieType::D20));
        assert_eq!("D6".parse::<DieType>(), Ok(DieType::D6));
        assert_eq!(" d100 ".parse::<DieType>(), Ok(DieType::D100));
        assert_eq!(
            "d30".parse::<DieType>(),
            Err(DiceError::UnknownDie("d30".to_string()))
        );
        assert!("d1".parse::<DieType>().is_err());
        assert!("foo".parse::<DieType>().is_err());
    }

    #[test]
    fn from_sides_only_knows_canonical_dice() {
        assert_eq!(DieType::from_sides(12), Some(DieType::D12));
        assert_eq!(DieType::from_sides(7), None);
    }

    #[test]
    fn default_is_d20() {
        assert_eq!(DieType::default(), DieType::D20);
    }

    #[test]
    fn die_display() {
        assert_eq!(DieType::D20.to_string(), "d20");
        assert_eq!(DieType::D100.to_string(), "d100");
    }

    #[test]
    fn serializes_as_lowercase_name() {
        let json = serde_json::to_string(&DieType::D12).unwrap();
        assert_eq!(json, "\"d12\"");
        let back: DieType = serde_json::from_str("\"d4\"").unwrap();
        assert_eq!(back, DieType::D4);
    }
}
