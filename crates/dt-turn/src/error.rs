//! Error types for turn coordination.
//!
//! Every variant is recoverable: the orchestrator keeps its previous state
//! and the message is meant to be shown to the player as-is.

use thiserror::Error;

use dt_dice::{DiceError, DieType};

use crate::narrator::NarratorError;
use crate::turn::TurnId;

/// Result type for turn operations.
pub type TurnResult<T> = Result<T, TurnError>;

/// Errors that can occur while coordinating a turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    /// A different action is already in flight.
    #[error("finish your current action first: \"{pending}\"")]
    ConflictingAction {
        /// The action that is still pending.
        pending: String,
    },

    /// The turn's one roll has already been used.
    #[error("you already rolled this turn")]
    TurnAlreadyConsumed,

    /// A roll arrived for a turn that has since been superseded.
    #[error("that roll was for turn {submitted}, but turn {current} is active; roll again")]
    StaleTurn {
        /// The turn the roll was made for.
        submitted: TurnId,
        /// The turn that is current now.
        current: TurnId,
    },

    /// No turn is open, so nothing can be rolled.
    #[error("no roll has been asked for")]
    NoActiveTurn,

    /// A roll was submitted before any action was declared.
    #[error("declare an action before rolling")]
    NoPendingAction,

    /// The pending action cannot be narrated until a die is rolled.
    #[error("roll a {die} first")]
    RollRequired {
        /// The die the open turn asks for.
        die: DieType,
    },

    /// `resolve` was called without a submitted roll.
    #[error("nothing to resolve yet")]
    NothingToResolve,

    /// An action with no text was declared.
    #[error("an action needs a description")]
    EmptyAction,

    /// The narrator collaborator failed.
    #[error("narrator failed: {0}")]
    Narrator(#[from] NarratorError),

    /// The dice engine rejected a roll.
    #[error(transparent)]
    Dice(#[from] DiceError),

    /// A snapshot's phase disagrees with the state it carries.
    #[error("saved turn state is inconsistent: {0}")]
    InvalidSnapshot(String),

    /// Configuration could not be loaded.
    #[error("invalid config: {0}")]
    Config(String),
}
