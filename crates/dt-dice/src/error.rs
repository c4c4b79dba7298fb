//! Error types for the dice engine.

/// Errors that can occur while rolling dice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// A die needs at least two sides to be rolled.
    #[error("invalid argument: a die needs at least 2 sides, got {sides}")]
    InvalidArgument {
        /// The rejected side count.
        sides: u32,
    },

    /// A die name did not match any of the supported die types.
    #[error("unknown die '{0}', expected one of d4, d6, d8, d10, d12, d20, d100")]
    UnknownDie(String),

    /// A rolled value fell outside `1..=sides`.
    #[error("roll of {result} is out of range for a d{sides}")]
    OutOfRange {
        /// The value that was reported.
        result: u32,
        /// Sides of the die it was reported for.
        sides: u32,
    },
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
