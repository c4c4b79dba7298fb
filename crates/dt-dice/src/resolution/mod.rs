//! Outcome severity for a single roll.
//!
//! A roll is read against the maximum of the die that produced it:
//! - the top face (or an explicit critical flag) is a **critical success**
//! - a natural 1 on a d20 (or an explicit fumble flag) is a **critical failure**
//! - 80% of the die's maximum or better is a **success**
//! - 50% or better is a **partial** success
//! - anything lower is a **failure**
//!
//! Fumbles only exist on the d20. A 1 on a d4 is a plain failure.

use serde::{Deserialize, Serialize};

use crate::dice::RollOutcome;

/// How well a roll resolves an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    /// The best possible result.
    CriticalSuccess,
    /// A clean success.
    Success,
    /// Succeed at a cost.
    Partial,
    /// The action does not work.
    Failure,
    /// A fumble with extra consequences.
    CriticalFailure,
}

impl SeverityTier {
    /// The snake_case name, as used in prompts and serialized state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CriticalSuccess => "critical_success",
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Failure => "failure",
            Self::CriticalFailure => "critical_failure",
        }
    }

    /// Whether the action goes (at least partly) the player's way.
    pub fn is_favorable(self) -> bool {
        matches!(self, Self::CriticalSuccess | Self::Success | Self::Partial)
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CriticalSuccess => write!(f, "Critical Success"),
            Self::Success => write!(f, "Success"),
            Self::Partial => write!(f, "Partial Success"),
            Self::Failure => write!(f, "Failure"),
            Self::CriticalFailure => write!(f, "Critical Failure"),
        }
    }
}

/// Classify a roll of `result` on a die with `sides` faces.
///
/// The explicit flags are checked before the thresholds, critical first.
/// Thresholds are inclusive and computed in integers.
pub fn classify(result: u32, sides: u32, is_critical: bool, is_fumble: bool) -> SeverityTier {
    if is_critical || result == sides {
        SeverityTier::CriticalSuccess
    } else if is_fumble || (result == 1 && sides == 20) {
        SeverityTier::CriticalFailure
    } else if u64::from(result) * 10 >= u64::from(sides) * 8 {
        SeverityTier::Success
    } else if u64::from(result) * 2 >= u64::from(sides) {
        SeverityTier::Partial
    } else {
        SeverityTier::Failure
    }
}

/// Classify a [`RollOutcome`] without extra flags.
pub fn classify_outcome(outcome: &RollOutcome) -> SeverityTier {
    classify(
        outcome.result(),
        outcome.sides(),
        outcome.is_max(),
        outcome.is_min_on_d20(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DieType;
    use proptest::prelude::*;

    #[test]
    fn d20_boundaries() {
        assert_eq!(classify(20, 20, false, false), SeverityTier::CriticalSuccess);
        assert_eq!(classify(1, 20, false, false), SeverityTier::CriticalFailure);
        assert_eq!(classify(16, 20, false, false), SeverityTier::Success);
        assert_eq!(classify(15, 20, false, false), SeverityTier::Partial);
        assert_eq!(classify(10, 20, false, false), SeverityTier::Partial);
        assert_eq!(classify(9, 20, false, false), SeverityTier::Failure);
        assert_eq!(classify(2, 20, false, false), SeverityTier::Failure);
    }

    #[test]
    fn fumble_is_d20_only() {
        assert_eq!(classify(1, 4, false, false), SeverityTier::Failure);
        assert_eq!(classify(1, 100, false, false), SeverityTier::Failure);
    }

    #[test]
    fn flags_take_precedence() {
        assert_eq!(classify(3, 20, true, false), SeverityTier::CriticalSuccess);
        assert_eq!(classify(18, 20, false, true), SeverityTier::CriticalFailure);
        // Critical is checked before fumble.
        assert_eq!(classify(1, 20, true, true), SeverityTier::CriticalSuccess);
    }

    #[test]
    fn small_dice() {
        // d4: 4 is max, 3 is 75% (partial), 2 is 50% (partial), 1 fails.
        assert_eq!(classify(4, 4, false, false), SeverityTier::CriticalSuccess);
        assert_eq!(classify(3, 4, false, false), SeverityTier::Partial);
        assert_eq!(classify(2, 4, false, false), SeverityTier::Partial);
        // d6: 5 >= 4.8
        assert_eq!(classify(5, 6, false, false), SeverityTier::Success);
        assert_eq!(classify(3, 6, false, false), SeverityTier::Partial);
        assert_eq!(classify(2, 6, false, false), SeverityTier::Failure);
    }

    #[test]
    fn classify_outcome_uses_roll_flags() {
        let nat20 = RollOutcome::new(DieType::D20, 20).unwrap();
        assert_eq!(classify_outcome(&nat20), SeverityTier::CriticalSuccess);
        let nat1 = RollOutcome::new(DieType::D20, 1).unwrap();
        assert_eq!(classify_outcome(&nat1), SeverityTier::CriticalFailure);
        let eighteen = RollOutcome::new(DieType::D20, 18).unwrap();
        assert_eq!(classify_outcome(&eighteen), SeverityTier::Success);
    }

    #[test]
    fn tier_names() {
        assert_eq!(SeverityTier::CriticalFailure.as_str(), "critical_failure");
        assert_eq!(SeverityTier::Partial.to_string(), "Partial Success");
        assert!(SeverityTier::Partial.is_favorable());
        assert!(!SeverityTier::Failure.is_favorable());
    }

    proptest! {
        #[test]
        fn higher_rolls_never_classify_worse(
            die_idx in 0usize..7,
            a in 1u32..=100,
            b in 1u32..=100,
        ) {
            let die = DieType::ALL[die_idx];
            let sides = die.sides();
            let (lo, hi) = (a.min(b).min(sides), a.max(b).min(sides));
            // Skip the d20 fumble, which deliberately breaks monotonicity at 1.
            prop_assume!(!(sides == 20 && lo == 1));
            let rank = |t: SeverityTier| match t {
                SeverityTier::CriticalFailure => 0,
                SeverityTier::Failure => 1,
                SeverityTier::Partial => 2,
                SeverityTier::Success => 3,
                SeverityTier::CriticalSuccess => 4,
            };
            let low = classify(lo, sides, false, false);
            let high = classify(hi, sides, false, false);
            prop_assert!(rank(low) <= rank(high));
        }
    }
}
