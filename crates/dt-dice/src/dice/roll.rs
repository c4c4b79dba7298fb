//! Roll outcomes.

use serde::{Deserialize, Serialize};

use super::DieType;
use crate::error::{DiceError, DiceResult};

/// The result of rolling a single die.
///
/// Outcomes are immutable once created. The fields are private so a value
/// can only exist if it lies within `1..=sides`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    die: DieType,
    result: u32,
}

impl RollOutcome {
    /// Build an outcome from a value reported for `die`.
    ///
    /// Used when the roll happens elsewhere (a physical die, a UI animation)
    /// and only the value is handed in.
    pub fn new(die: DieType, result: u32) -> DiceResult<Self> {
        if result == 0 || result > die.sides() {
            return Err(DiceError::OutOfRange {
                result,
                sides: die.sides(),
            });
        }
        Ok(Self { die, result })
    }

    /// The type of die that was rolled.
    pub fn die(&self) -> DieType {
        self.die
    }

    /// The value rolled (1 to `sides`).
    pub fn result(&self) -> u32 {
        self.result
    }

    /// Number of sides on the rolled die.
    pub fn sides(&self) -> u32 {
        self.die.sides()
    }

    /// Whether the die landed on its highest face.
    pub fn is_max(&self) -> bool {
        self.result == self.sides()
    }

    /// Whether this is a natural 1 on a d20, the only fumble in the game.
    pub fn is_min_on_d20(&self) -> bool {
        self.result == 1 && self.die == DieType::D20
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.die, self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_values_on_the_die() {
        let r = RollOutcome::new(DieType::D6, 6).unwrap();
        assert_eq!(r.die(), DieType::D6);
        assert_eq!(r.result(), 6);
        assert_eq!(r.sides(), 6);
    }

    #[test]
    fn rejects_values_off_the_die() {
        assert_eq!(
            RollOutcome::new(DieType::D6, 7),
            Err(DiceError::OutOfRange {
                result: 7,
                sides: 6
            })
        );
        assert!(RollOutcome::new(DieType::D20, 0).is_err());
    }

    #[test]
    fn max_and_fumble_flags() {
        let max = RollOutcome::new(DieType::D8, 8).unwrap();
        assert!(max.is_max());
        assert!(!max.is_min_on_d20());

        let nat1 = RollOutcome::new(DieType::D20, 1).unwrap();
        assert!(nat1.is_min_on_d20());
        assert!(!nat1.is_max());

        let low_d4 = RollOutcome::new(DieType::D4, 1).unwrap();
        assert!(!low_d4.is_min_on_d20());
    }

    #[test]
    fn display() {
        let r = RollOutcome::new(DieType::D20, 18).unwrap();
        assert_eq!(r.to_string(), "d20 = 18");
    }
}
