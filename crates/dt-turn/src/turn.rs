//! Turns and dice requests.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dt_dice::DieType;

/// Unique identifier for a turn. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub Uuid);

impl TurnId {
    /// Generate a new random turn ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A requirement that the player roll a specific die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRequest {
    /// The die to roll.
    pub die: DieType,
    /// The narrative text the request was inferred from. Empty when forced.
    pub source_text: String,
}

impl DiceRequest {
    /// A request inferred from narrator text.
    pub fn inferred(die: DieType, source_text: impl Into<String>) -> Self {
        Self {
            die,
            source_text: source_text.into(),
        }
    }

    /// A request opened by the UI regardless of what the narrator said.
    pub fn forced(die: DieType) -> Self {
        Self {
            die,
            source_text: String::new(),
        }
    }

    /// Whether this request was forced rather than inferred.
    pub fn is_forced(&self) -> bool {
        self.source_text.is_empty()
    }
}

/// One coordination cycle, permitting at most one roll.
///
/// Only the [`TurnCoordinator`](crate::TurnCoordinator) can mark a turn as
/// rolled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    id: TurnId,
    has_rolled: bool,
    started_at: DateTime<Utc>,
    request: Option<DiceRequest>,
}

impl Turn {
    pub(crate) fn start(request: Option<DiceRequest>) -> Self {
        Self {
            id: TurnId::new(),
            has_rolled: false,
            started_at: Utc::now(),
            request,
        }
    }

    /// Mark the turn as rolled. Returns false if it already was.
    pub(crate) fn mark_rolled(&mut self) -> bool {
        let first = !self.has_rolled;
        self.has_rolled = true;
        first
    }

    /// The turn's identifier.
    pub fn id(&self) -> TurnId {
        self.id
    }

    /// Whether this turn's roll has been used.
    pub fn has_rolled(&self) -> bool {
        self.has_rolled
    }

    /// When the turn started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The dice request that opened this turn, if any.
    pub fn request(&self) -> Option<&DiceRequest> {
        self.request.as_ref()
    }

    /// The die this turn asks for, falling back to the d20.
    pub fn die(&self) -> DieType {
        self.request.as_ref().map(|r| r.die).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_turn_is_unrolled() {
        let turn = Turn::start(None);
        assert!(!turn.has_rolled());
        assert!(turn.request().is_none());
        assert_eq!(turn.die(), DieType::D20);
    }

    #[test]
    fn mark_rolled_only_once() {
        let mut turn = Turn::start(Some(DiceRequest::forced(DieType::D6)));
        assert!(turn.mark_rolled());
        assert!(!turn.mark_rolled());
        assert!(turn.has_rolled());
        assert_eq!(turn.die(), DieType::D6);
    }

    #[test]
    fn ids_are_distinct() {
        assert_ne!(TurnId::new(), TurnId::new());
    }

    #[test]
    fn id_display_is_short() {
        assert_eq!(TurnId::new().to_string().len(), 8);
    }

    #[test]
    fn forced_requests_have_no_source() {
        assert!(DiceRequest::forced(DieType::D20).is_forced());
        assert!(!DiceRequest::inferred(DieType::D20, "Roll a d20.").is_forced());
    }
}
